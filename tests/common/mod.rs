//! In-memory ZIP fixture builder shared by the integration tests.

#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};
use flate2::Compression;
use flate2::write::DeflateEncoder;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const STORED: u16 = 0;
pub const DEFLATE: u16 = 8;

/// One entry as it will be laid out on disk
pub struct Entry {
    pub name: String,
    pub method: u16,
    pub flags: u16,
    pub crc32: u32,
    pub uncompressed_size: u32,
    pub data: Vec<u8>,
}

impl Entry {
    pub fn stored(name: &str, contents: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            method: STORED,
            flags: 0,
            crc32: crc32(contents),
            uncompressed_size: contents.len() as u32,
            data: contents.to_vec(),
        }
    }

    pub fn deflated(name: &str, contents: &[u8]) -> Self {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(contents).unwrap();
        Self {
            method: DEFLATE,
            data: encoder.finish().unwrap(),
            ..Self::stored(name, contents)
        }
    }

    pub fn dir(name: &str) -> Self {
        Self::stored(name, b"")
    }

    pub fn with_crc(mut self, crc32: u32) -> Self {
        self.crc32 = crc32;
        self
    }

    pub fn with_method(mut self, method: u16) -> Self {
        self.method = method;
        self
    }

    pub fn with_flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }
}

pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = flate2::Crc::new();
    crc.update(data);
    crc.sum()
}

/// Trailer shape for [`build_archive_with`]
#[derive(Clone, Copy, Default)]
pub struct Layout {
    /// Saturate the 32-bit fields and write ZIP64 records instead
    pub zip64: bool,
    /// Disk count written into the ZIP64 locator
    pub total_disks: u32,
}

/// Lay out local headers, central directory and EOCD for `entries`
pub fn build_archive(entries: &[Entry], comment: &[u8]) -> Vec<u8> {
    build_archive_with(entries, comment, Layout::default())
}

pub fn build_archive_with(entries: &[Entry], comment: &[u8], layout: Layout) -> Vec<u8> {
    let mut out = Vec::new();
    let mut central = Vec::new();
    let version = if layout.zip64 { 45 } else { 20 };

    for entry in entries {
        let lfh_offset = out.len() as u32;

        out.extend_from_slice(b"PK\x03\x04");
        out.write_u16::<LittleEndian>(version).unwrap();
        out.write_u16::<LittleEndian>(entry.flags).unwrap();
        out.write_u16::<LittleEndian>(entry.method).unwrap();
        out.write_u16::<LittleEndian>(0).unwrap(); // time
        out.write_u16::<LittleEndian>(0x21).unwrap(); // 1980-01-01
        out.write_u32::<LittleEndian>(entry.crc32).unwrap();
        out.write_u32::<LittleEndian>(entry.data.len() as u32).unwrap();
        out.write_u32::<LittleEndian>(entry.uncompressed_size).unwrap();
        out.write_u16::<LittleEndian>(entry.name.len() as u16).unwrap();
        out.write_u16::<LittleEndian>(0).unwrap();
        out.extend_from_slice(entry.name.as_bytes());
        out.extend_from_slice(&entry.data);

        let external_attrs = if entry.name.ends_with(['/', '\\']) { 0x10 } else { 0 };

        // ZIP64 extended information: uncompressed, compressed, offset
        let mut extra = Vec::new();
        let (compressed, uncompressed, offset) = if layout.zip64 {
            extra.write_u16::<LittleEndian>(0x0001).unwrap();
            extra.write_u16::<LittleEndian>(24).unwrap();
            extra.write_u64::<LittleEndian>(entry.uncompressed_size as u64).unwrap();
            extra.write_u64::<LittleEndian>(entry.data.len() as u64).unwrap();
            extra.write_u64::<LittleEndian>(lfh_offset as u64).unwrap();
            (0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF)
        } else {
            (entry.data.len() as u32, entry.uncompressed_size, lfh_offset)
        };

        central.extend_from_slice(b"PK\x01\x02");
        central.write_u16::<LittleEndian>(version).unwrap();
        central.write_u16::<LittleEndian>(version).unwrap();
        central.write_u16::<LittleEndian>(entry.flags).unwrap();
        central.write_u16::<LittleEndian>(entry.method).unwrap();
        central.write_u16::<LittleEndian>(0).unwrap();
        central.write_u16::<LittleEndian>(0x21).unwrap();
        central.write_u32::<LittleEndian>(entry.crc32).unwrap();
        central.write_u32::<LittleEndian>(compressed).unwrap();
        central.write_u32::<LittleEndian>(uncompressed).unwrap();
        central.write_u16::<LittleEndian>(entry.name.len() as u16).unwrap();
        central.write_u16::<LittleEndian>(extra.len() as u16).unwrap();
        central.write_u16::<LittleEndian>(0).unwrap(); // comment
        central.write_u16::<LittleEndian>(0).unwrap(); // disk
        central.write_u16::<LittleEndian>(0).unwrap(); // internal attrs
        central.write_u32::<LittleEndian>(external_attrs).unwrap();
        central.write_u32::<LittleEndian>(offset).unwrap();
        central.extend_from_slice(entry.name.as_bytes());
        central.extend_from_slice(&extra);
    }

    let cd_offset = out.len() as u64;
    out.extend_from_slice(&central);

    let (count, cd_size, cd_offset32) = if layout.zip64 {
        let eocd64_offset = out.len() as u64;

        out.extend_from_slice(b"PK\x06\x06");
        out.write_u64::<LittleEndian>(44).unwrap(); // size of the rest
        out.write_u16::<LittleEndian>(45).unwrap();
        out.write_u16::<LittleEndian>(45).unwrap();
        out.write_u32::<LittleEndian>(0).unwrap();
        out.write_u32::<LittleEndian>(0).unwrap();
        out.write_u64::<LittleEndian>(entries.len() as u64).unwrap();
        out.write_u64::<LittleEndian>(entries.len() as u64).unwrap();
        out.write_u64::<LittleEndian>(central.len() as u64).unwrap();
        out.write_u64::<LittleEndian>(cd_offset).unwrap();

        out.extend_from_slice(b"PK\x06\x07");
        out.write_u32::<LittleEndian>(0).unwrap();
        out.write_u64::<LittleEndian>(eocd64_offset).unwrap();
        out.write_u32::<LittleEndian>(layout.total_disks).unwrap();

        (0xFFFF, 0xFFFFFFFF, 0xFFFFFFFF)
    } else {
        (entries.len() as u16, central.len() as u32, cd_offset as u32)
    };

    out.extend_from_slice(b"PK\x05\x06");
    out.write_u16::<LittleEndian>(0).unwrap();
    out.write_u16::<LittleEndian>(0).unwrap();
    out.write_u16::<LittleEndian>(count).unwrap();
    out.write_u16::<LittleEndian>(count).unwrap();
    out.write_u32::<LittleEndian>(cd_size).unwrap();
    out.write_u32::<LittleEndian>(cd_offset32).unwrap();
    out.write_u16::<LittleEndian>(comment.len() as u16).unwrap();
    out.extend_from_slice(comment);

    out
}

/// Write `bytes` as `data.zip` inside `dir`
pub fn write_archive(dir: &Path, bytes: &[u8]) -> PathBuf {
    let path = dir.join("data.zip");
    std::fs::write(&path, bytes).unwrap();
    path
}

pub fn is_empty_dir(dir: &Path) -> bool {
    std::fs::read_dir(dir).unwrap().next().is_none()
}
