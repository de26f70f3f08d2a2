/// Convenience result type used across pentrace.
pub type PentraceResult<T> = Result<T, PentraceError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum PentraceError {
    /// Rejected input data: unknown subject keys, bad speed multipliers, negative durations.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A segment geometry that could not be parsed or measured.
    #[error("missing geometry: {0}")]
    MissingGeometry(String),

    /// A control operation issued in a state where it has no meaning.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PentraceError {
    /// Build a [`PentraceError::InvalidConfiguration`] value.
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Build a [`PentraceError::MissingGeometry`] value.
    pub fn missing_geometry(msg: impl Into<String>) -> Self {
        Self::MissingGeometry(msg.into())
    }

    /// Build a [`PentraceError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build a [`PentraceError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
