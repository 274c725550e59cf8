use flate2::read::DeflateDecoder;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::io::ReadAt;
use anyhow::Result;
use tracing::debug;

use super::error::ZipError;
use super::parser::ZipParser;
use super::path::enclosed_path;
use super::structures::{CompressionMethod, ZipFileEntry};

/// ZIP file extractor
pub struct ZipExtractor<R: ReadAt> {
    parser: ZipParser<R>,
}

impl<R: ReadAt> ZipExtractor<R> {
    pub fn new(reader: Arc<R>) -> Self {
        Self {
            parser: ZipParser::new(reader),
        }
    }

    /// List all files in the archive
    pub async fn list_files(&self) -> Result<Vec<ZipFileEntry>> {
        self.parser.list_files().await
    }

    /// Decompress an entry into memory and verify its size and CRC-32.
    pub async fn extract_to_memory(&self, entry: &ZipFileEntry) -> Result<Vec<u8>> {
        if entry.is_encrypted() {
            return Err(ZipError::Encrypted(entry.file_name.clone()).into());
        }

        let compressed = self.read_compressed(entry).await?;

        let data = match entry.compression_method {
            CompressionMethod::Stored => compressed,
            CompressionMethod::Deflate => {
                // One byte past the declared size is enough to detect overruns
                let mut out = Vec::with_capacity(entry.uncompressed_size.min(1 << 24) as usize);
                DeflateDecoder::new(compressed.as_slice())
                    .take(entry.uncompressed_size.saturating_add(1))
                    .read_to_end(&mut out)?;
                out
            }
            CompressionMethod::Unknown(method) => {
                return Err(ZipError::UnsupportedCompression {
                    name: entry.file_name.clone(),
                    method,
                }
                .into());
            }
        };

        if data.len() as u64 != entry.uncompressed_size {
            return Err(ZipError::SizeMismatch {
                name: entry.file_name.clone(),
                expected: entry.uncompressed_size,
                actual: data.len() as u64,
            }
            .into());
        }

        let mut crc = flate2::Crc::new();
        crc.update(&data);
        if crc.sum() != entry.crc32 {
            return Err(ZipError::CrcMismatch {
                name: entry.file_name.clone(),
                expected: entry.crc32,
                actual: crc.sum(),
            }
            .into());
        }

        Ok(data)
    }

    async fn read_compressed(&self, entry: &ZipFileEntry) -> Result<Vec<u8>> {
        let data_offset = self.parser.get_data_offset(entry).await?;
        let reader = self.parser.reader();

        // Sizes come from the central directory and are not trusted
        match data_offset.checked_add(entry.compressed_size) {
            Some(end) if end <= reader.size() => {}
            _ => return Err(ZipError::Truncated.into()),
        }

        let mut buf = vec![0u8; entry.compressed_size as usize];
        reader.read_exact_at(data_offset, &mut buf).await?;
        Ok(buf)
    }

    /// Extract file to disk, replacing whatever is at `output_path`
    pub async fn extract_to_file(&self, entry: &ZipFileEntry, output_path: &Path) -> Result<()> {
        let data = self.extract_to_memory(entry).await?;

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = fs::File::create(output_path).await?;
        file.write_all(&data).await?;
        file.flush().await?;

        Ok(())
    }

    /// Extract every entry under `destination`.
    ///
    /// All entry names are checked before the first write, so an archive
    /// with an unsafe name leaves the destination untouched. Returns the
    /// number of files written.
    pub async fn extract_all(&self, destination: &Path) -> Result<usize> {
        let entries = self.list_files().await?;

        let planned = entries
            .iter()
            .map(|entry| -> Result<_, ZipError> {
                let path = enclosed_path(&entry.file_name, entry.is_directory)?;
                Ok((entry, destination.join(path)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut written = 0;
        for (entry, output_path) in planned {
            if entry.is_directory {
                debug!(path = %output_path.display(), "creating directory");
                fs::create_dir_all(&output_path).await?;
                continue;
            }

            debug!(
                name = %entry.file_name,
                size = entry.uncompressed_size,
                method = entry.compression_method.as_u16(),
                "extracting"
            );
            self.extract_to_file(entry, &output_path).await?;
            written += 1;
        }

        Ok(written)
    }
}
