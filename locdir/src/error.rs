use thiserror::Error;

pub type Result<T> = std::result::Result<T, LocdirError>;

#[derive(Debug, Error)]
pub enum LocdirError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {message}")]
    InvalidConfig { message: String },

    #[error("required element not found: #{id}")]
    MissingElement { id: String },

    #[error("request to {url} failed: {message}")]
    Fetch { url: String, message: String },

    #[error("parameter '{param}' must be finite")]
    NonFinite { param: &'static str },
}

impl LocdirError {
    /// Stable machine-readable code, used as `error.code` in JS envelopes.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Json(_) => "invalid_json",
            Self::InvalidConfig { .. } => "invalid_config",
            Self::MissingElement { .. } => "missing_element",
            Self::Fetch { .. } => "fetch_failed",
            Self::NonFinite { .. } => "non_finite",
        }
    }

    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig { message: message.into() }
    }

    #[must_use]
    pub fn missing_element(id: impl Into<String>) -> Self {
        Self::MissingElement { id: id.into() }
    }
}
