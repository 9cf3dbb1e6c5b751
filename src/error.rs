//! Error types for floem-chroma.
//!
//! Parse failures are explicit per grammar and only collapse to `None` at
//! [`parse_color_string`](crate::parse::parse_color_string).

use thiserror::Error;

/// Result type alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Why a color string did not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,

    /// The text is not shaped like any supported grammar.
    #[error("not a recognized color notation")]
    NoMatch,

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    #[error("channel value {0} exceeds 255")]
    ChannelOutOfRange(u32),

    #[error("alpha value `{0}` outside 0..=1")]
    AlphaOutOfRange(String),

    #[error("invalid hex digits")]
    InvalidHex,
}

/// Base error type for the crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error("color parse error: {0}")]
    Parse(#[from] ColorParseError),

    /// Picker configuration could not be decoded.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),
}
