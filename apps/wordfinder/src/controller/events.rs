//! Backend-to-UI events and error modeling for the page controller.

use shared::{
    error::{ErrorCode, LookupError},
    protocol::{LookupResult, WordQuery},
};

#[derive(Debug)]
pub enum UiEvent {
    Results(LookupResult),
    LookupFailed { query: WordQuery, error: UiError },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Decode,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Lookup,
    Save,
    Input,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("malformed")
            || message_lower.contains("decode")
            || message_lower.contains("expected value")
        {
            UiErrorCategory::Decode
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("out of range")
            || message_lower.contains("unknown command")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("unreachable")
            || message_lower.contains("dns")
            || message_lower.contains("http ")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_lookup_error(err: &LookupError) -> Self {
        let category = match err.code() {
            ErrorCode::Transport | ErrorCode::Status => UiErrorCategory::Transport,
            ErrorCode::Decode => UiErrorCategory::Decode,
            ErrorCode::Configuration => UiErrorCategory::Validation,
        };
        Self {
            category,
            context: UiErrorContext::Lookup,
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// One-line status text shown to the user.
    pub fn status_line(&self) -> String {
        match self.category {
            UiErrorCategory::Transport => {
                format!("Word service unavailable; try again later. ({})", self.message)
            }
            UiErrorCategory::Decode => {
                format!("Word service sent an unexpected reply. ({})", self.message)
            }
            UiErrorCategory::Validation | UiErrorCategory::Unknown => self.message.clone(),
        }
    }
}
