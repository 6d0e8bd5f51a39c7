use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid value for `{field}`: {reason}")]
    Validation { field: String, reason: String },

    #[error("Invalid history action `{0}` (expected one of: info, get, delete, add)")]
    InvalidAction(String),

    #[error("Transport error{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Transport { status: Option<u16>, message: String },

    #[error("Malformed response at `{path}`: expected {expected}")]
    MalformedResponse { path: String, expected: String },

    #[error("API error: {0}")]
    Api(String),
}

impl AppError {
    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn malformed(path: &str, expected: &str) -> Self {
        AppError::MalformedResponse {
            path: path.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Name of the offending field for validation failures.
    pub fn field(&self) -> Option<&str> {
        match self {
            AppError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
