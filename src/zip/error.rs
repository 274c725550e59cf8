use thiserror::Error;

/// Archive format failures.
///
/// Raised through `anyhow`; callers that care about the kind use
/// `err.downcast_ref::<ZipError>()`.
#[derive(Debug, Error)]
pub enum ZipError {
    #[error("Not a valid ZIP file")]
    NotZip,

    #[error("Unexpected end of archive")]
    Truncated,

    #[error("Invalid {0}")]
    InvalidHeader(&'static str),

    #[error("Multi-disk archives are not supported")]
    MultiDisk,

    #[error("{0}: encrypted entries are not supported")]
    Encrypted(String),

    #[error("{name}: unsupported compression method {method}")]
    UnsupportedCompression { name: String, method: u16 },

    #[error("{0}: entry path escapes the destination directory")]
    UnsafePath(String),

    #[error("{name}: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        name: String,
        expected: u64,
        actual: u64,
    },

    #[error("{name}: CRC-32 mismatch (expected {expected:08x}, got {actual:08x})")]
    CrcMismatch {
        name: String,
        expected: u32,
        actual: u32,
    },
}
