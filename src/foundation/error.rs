/// Convenience result type used across scrollreel.
pub type ScrollResult<T> = Result<T, ScrollError>;

/// Top-level error taxonomy used by sequencer APIs.
#[derive(thiserror::Error, Debug)]
pub enum ScrollError {
    /// Invalid region, scene or layer configuration. Fatal to that region only.
    #[error("configuration error: {0}")]
    Config(String),

    /// Geometry could not be measured (element not mounted, non-finite rect).
    #[error("measurement error: {0}")]
    Measurement(String),

    /// The host lacks a capability (e.g. reliable fixed positioning).
    #[error("unsupported capability: {0}")]
    Capability(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollError {
    /// Build a [`ScrollError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ScrollError::Measurement`] value.
    pub fn measurement(msg: impl Into<String>) -> Self {
        Self::Measurement(msg.into())
    }

    /// Build a [`ScrollError::Capability`] value.
    pub fn capability(msg: impl Into<String>) -> Self {
        Self::Capability(msg.into())
    }

    /// Build a [`ScrollError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Recoverable errors are handled inside the sequencer and never reach the host.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Measurement(_) | Self::Capability(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
