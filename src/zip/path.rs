//! Mapping of entry names onto paths under the destination directory.

use std::path::{Component, Path, PathBuf};

use super::error::ZipError;

/// Convert an archive entry name into a relative path that cannot leave
/// the destination directory.
///
/// Both `/` and `\` are treated as separators. Empty and `.` segments are
/// dropped. Absolute names, drive prefixes, `..` segments and NUL bytes
/// are rejected with [`ZipError::UnsafePath`]. A directory entry may
/// reduce to the empty path, which stands for the destination itself; a
/// file entry may not.
pub fn enclosed_path(name: &str, is_directory: bool) -> Result<PathBuf, ZipError> {
    let unsafe_path = || ZipError::UnsafePath(name.to_string());

    if name.contains('\0') || name.starts_with('/') || name.starts_with('\\') {
        return Err(unsafe_path());
    }

    let mut path = PathBuf::new();
    for segment in name.split(['/', '\\']) {
        match segment {
            "" | "." => continue,
            ".." => return Err(unsafe_path()),
            _ => {}
        }

        // `C:` only parses as a prefix on Windows, so check it by hand
        if path.as_os_str().is_empty() && has_drive_prefix(segment) {
            return Err(unsafe_path());
        }

        // Anywhere else a colon names an alternate data stream on NTFS
        #[cfg(windows)]
        {
            if segment.contains(':') {
                return Err(unsafe_path());
            }
        }

        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => path.push(part),
            _ => return Err(unsafe_path()),
        }
    }

    if path.as_os_str().is_empty() && !is_directory {
        return Err(unsafe_path());
    }

    Ok(path)
}

fn has_drive_prefix(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
