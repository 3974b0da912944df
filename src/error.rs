//! Errors of this crate and a specialized [`Result`] for them.

/// A compression backend that may be disabled at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Snappy compression
    Snappy,
    /// Brotli compression
    Brotli,
    /// Gzip compression
    Gzip,
    /// Lz4 (frame) compression
    Lz4,
    /// Zstd compression
    Zstd,
}

/// Errors the codec engine raises.
///
/// All errors are surfaced to the caller; no partial result is returned and
/// no kind is retried internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The file has a missing or short footer, a bad magic number, or a
    /// negative or oversize metadata length.
    InvalidFile(String),
    /// The thrift-encoded metadata could not be parsed or lacks a
    /// required field.
    CorruptedMetadata(String),
    /// An encoding/type combination, codec or format feature this crate
    /// does not implement.
    UnsupportedFeature(String),
    /// An encoded byte region violates the encoding it declares.
    DecodeError(String),
    /// Repetition/definition level streams whose length or value ranges
    /// violate the max-level invariants or the LIST/MAP shape rules.
    LevelShape(String),
    /// The underlying byte source failed.
    IoError(String),
    /// The requested compression requires a crate feature that is not
    /// active.
    FeatureNotActive(Feature, String),
}

impl Error {
    pub(crate) fn decode<I: Into<String>>(message: I) -> Self {
        Self::DecodeError(message.into())
    }

    pub(crate) fn oos<I: Into<String>>(message: I) -> Self {
        Self::CorruptedMetadata(message.into())
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::InvalidFile(message) => write!(fmt, "Invalid file: {}", message),
            Error::CorruptedMetadata(message) => write!(fmt, "Corrupted metadata: {}", message),
            Error::UnsupportedFeature(message) => write!(fmt, "Not supported: {}", message),
            Error::DecodeError(message) => write!(fmt, "Decode error: {}", message),
            Error::LevelShape(message) => write!(fmt, "Level shape error: {}", message),
            Error::IoError(message) => write!(fmt, "IO error: {}", message),
            Error::FeatureNotActive(feature, message) => {
                write!(
                    fmt,
                    "The feature \"{:?}\" needs to be active to {}",
                    feature, message
                )
            }
        }
    }
}

#[cfg(feature = "snappy")]
impl From<snap::Error> for Error {
    fn from(e: snap::Error) -> Error {
        Error::DecodeError(format!("underlying snap error: {}", e))
    }
}

impl From<parquet_format_safe::thrift::Error> for Error {
    fn from(e: parquet_format_safe::thrift::Error) -> Error {
        Error::CorruptedMetadata(format!("underlying thrift error: {}", e))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::IoError(e.to_string())
    }
}

impl From<std::num::TryFromIntError> for Error {
    fn from(_: std::num::TryFromIntError) -> Error {
        Error::DecodeError("Number must be zero or positive".to_string())
    }
}

/// A specialized `Result` for errors of this crate.
pub type Result<T> = std::result::Result<T, Error>;
