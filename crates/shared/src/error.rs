use thiserror::Error;

/// Rejected wire input
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Input has the wrong shape; `input` is the dotted path of the first
    /// offending value.
    #[error("Invalid input at '{input}': {reason}")]
    Shape { input: String, reason: String },

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProtocolError {
    pub fn shape(input: impl Into<String>, reason: impl Into<String>) -> Self {
        let input = input.into();
        let reason = reason.into();
        tracing::debug!(input = %input, reason = %reason, "Rejected wire input");
        Self::Shape { input, reason }
    }

    /// Path of the offending value, if this is a shape error.
    pub fn input(&self) -> Option<&str> {
        match self {
            Self::Shape { input, .. } => Some(input),
            Self::Json(_) => None,
        }
    }
}
