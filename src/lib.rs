//! # unzip-data
//!
//! Extract every entry of a local ZIP archive into a directory,
//! preserving the relative paths stored in the archive.
//!
//! ## Features
//!
//! - STORED and DEFLATE entries, verified against their CRC-32
//! - ZIP64 archives and archives with a trailing comment
//! - Entry names that would escape the destination are refused before
//!   anything is written
//!
//! ## Example
//!
//! ```no_run
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     unzip_data::extract_zip_archive("data.zip", ".").await
//! }
//! ```

pub mod cli;
pub mod io;
pub mod zip;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub use cli::Cli;
pub use io::{LocalFileReader, ReadAt};
pub use zip::{ZipError, ZipExtractor, ZipFileEntry};

/// Extract all entries of the archive at `filename` into `destination`.
///
/// Existing files at the same relative paths are overwritten. The archive
/// handle is released when this returns, whether or not extraction
/// succeeded.
pub async fn extract_zip_archive(
    filename: impl AsRef<Path>,
    destination: impl AsRef<Path>,
) -> Result<()> {
    let filename = filename.as_ref();
    let destination = destination.as_ref();

    let reader = LocalFileReader::new(filename)
        .with_context(|| format!("cannot open {}", filename.display()))?;
    let extractor = ZipExtractor::new(Arc::new(reader));

    let written = extractor
        .extract_all(destination)
        .await
        .with_context(|| format!("failed to extract {}", filename.display()))?;

    info!(
        archive = %filename.display(),
        destination = %destination.display(),
        files = written,
        "extraction complete"
    );
    Ok(())
}
