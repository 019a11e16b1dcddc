use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Configuration,
    Transport,
    Status,
    Decode,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("word service unreachable: {0}")]
    Transport(String),
    #[error("word service returned HTTP {status}")]
    Status { status: u16 },
    #[error("malformed word service response: {0}")]
    Decode(String),
}

impl LookupError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidBaseUrl { .. } => ErrorCode::Configuration,
            Self::Transport(_) => ErrorCode::Transport,
            Self::Status { .. } => ErrorCode::Status,
            Self::Decode(_) => ErrorCode::Decode,
        }
    }
}

/// Serializable form of a failure, printed by `--json` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorReport {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<&LookupError> for ErrorReport {
    fn from(value: &LookupError) -> Self {
        Self::new(value.code(), value.to_string())
    }
}
