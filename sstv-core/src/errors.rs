//! SSTV error types with granular categories.

use thiserror::Error;

/// Top-level error type for all SSTV codec operations.
#[derive(Debug, Error)]
pub enum SstvError {
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Encoder-side errors.
///
/// The encoder degrades rather than fails in practice (a missing pixel
/// provider is reported through the logger, not returned here); this enum
/// exists so the public API can grow fallible paths later without a
/// breaking change.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("{0}")]
    Other(String),
}

/// Decoder-side errors.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unknown VIS mode code: {code}")]
    UnknownMode { code: u8 },

    #[error("VIS parity check failed: assembled byte {assembled:#04x}")]
    VisParityMismatch { assembled: u8 },

    #[error("decoded mode {detected} does not match expected mode {expected}")]
    UnexpectedMode {
        detected: &'static str,
        expected: &'static str,
    },

    #[error("not enough samples to decode: have {have}, need at least {need}")]
    EmptyInput { have: usize, need: usize },
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid sample rate: {rate} Hz (must be > 0)")]
    InvalidSampleRate { rate: u32 },
}

/// Result type alias for SSTV codec operations.
pub type Result<T> = std::result::Result<T, SstvError>;
