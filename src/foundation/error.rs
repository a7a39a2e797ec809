/// Convenience result type used across ridgeline.
pub type RidgelineResult<T> = Result<T, RidgelineError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum RidgelineError {
    /// Invalid user-provided options or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// A drawable was missing or of the wrong kind for the element being built.
    #[error("drawable error: {0}")]
    Drawable(String),

    /// Errors while wiring a scene description into a backdrop.
    #[error("scene error: {0}")]
    Scene(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RidgelineError {
    /// Build a [`RidgelineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RidgelineError::Drawable`] value.
    pub fn drawable(msg: impl Into<String>) -> Self {
        Self::Drawable(msg.into())
    }

    /// Build a [`RidgelineError::Scene`] value.
    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }

    /// Build a [`RidgelineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
