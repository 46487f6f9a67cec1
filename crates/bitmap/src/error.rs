use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ConvertError {
    /// Malformed or unreadable input image. Aborts the whole batch.
    Decode(String),
    /// Bit depth outside the supported set, carries the offending depth.
    UnsupportedFormat(usize),
    /// Failed to open or write a destination path.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Decode(msg) => write!(f, "decode error: {msg}"),
            ConvertError::UnsupportedFormat(bits) => {
                write!(f, "unsupported pixel format: {bits} bits per pixel")
            }
            ConvertError::Io { path, source } => {
                write!(f, "io error on {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConvertError {}

impl From<png::DecodingError> for ConvertError {
    fn from(err: png::DecodingError) -> Self {
        ConvertError::Decode(err.to_string())
    }
}
