/// Convenience result type used across the crate.
pub type WrappedResult<T> = Result<T, WrappedError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum WrappedError {
    /// Invalid user-provided configuration, statistics, or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while evaluating or rasterizing a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while decoding or mixing audio tracks.
    #[error("audio error: {0}")]
    Audio(String),

    /// Errors while encoding or writing the output artifact.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WrappedError {
    /// Build a [`WrappedError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WrappedError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`WrappedError::Audio`] value.
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Build a [`WrappedError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`WrappedError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
