/// Crate-wide result alias.
pub type ApngenResult<T> = Result<T, ApngenError>;

/// Errors surfaced by request validation, decoding and encoding.
///
/// Rendering itself never fails on missing resources: fonts fall back to the built-in face and
/// missing icons are skipped.
#[derive(thiserror::Error, Debug)]
pub enum ApngenError {
    /// Request or layer parameters are unusable.
    #[error("validation error: {0}")]
    Validation(String),

    /// A font resource could not be parsed.
    #[error("font error: {0}")]
    Font(String),

    /// PNG/APNG serialization failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// An input bitmap or artifact could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApngenError {
    /// Build a [`ApngenError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ApngenError::Font`].
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`ApngenError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`ApngenError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

impl From<png::EncodingError> for ApngenError {
    fn from(e: png::EncodingError) -> Self {
        Self::encode(e.to_string())
    }
}

impl From<png::DecodingError> for ApngenError {
    fn from(e: png::DecodingError) -> Self {
        Self::decode(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
