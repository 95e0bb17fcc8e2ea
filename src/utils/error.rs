use crate::domain::model::EventKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormwireError {
    #[error("Element not found: #{id}")]
    ElementNotFound { id: String },

    #[error("Expected a {expected:?} event, got {actual:?}")]
    UnexpectedEvent {
        expected: EventKind,
        actual: EventKind,
    },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No tokio runtime is running to dispatch the request")]
    NoRuntime,

    #[error("Request task failed: {0}")]
    TaskFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Page,
    Network,
    Configuration,
    Internal,
}

impl FormwireError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FormwireError::ElementNotFound { .. } | FormwireError::UnexpectedEvent { .. } => {
                ErrorCategory::Page
            }
            FormwireError::Request(_)
            | FormwireError::Timeout { .. }
            | FormwireError::InvalidUrl { .. } => ErrorCategory::Network,
            FormwireError::ConfigError { .. } | FormwireError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            FormwireError::Serialization(_)
            | FormwireError::Io(_)
            | FormwireError::NoRuntime
            | FormwireError::TaskFailed(_) => ErrorCategory::Internal,
        }
    }

    /// Short message for terminal output, without nested source chains.
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Page => format!("Page error: {}", self),
            ErrorCategory::Network => format!("Network error: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Internal => format!("Internal error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, FormwireError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_mapping() {
        let err = FormwireError::ElementNotFound { id: "b1".into() };
        assert_eq!(err.category(), ErrorCategory::Page);
        assert_eq!(err.to_string(), "Element not found: #b1");

        let err = FormwireError::Timeout {
            url: "http://localhost/items".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(err.user_friendly_message().starts_with("Network error"));

        let err = FormwireError::InvalidConfigValueError {
            field: "timeout_seconds".into(),
            value: "0".into(),
            reason: "Value must be at least 1".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);

        let err = FormwireError::UnexpectedEvent {
            expected: EventKind::Click,
            actual: EventKind::Submit,
        };
        assert_eq!(err.category(), ErrorCategory::Page);
        assert_eq!(err.to_string(), "Expected a Click event, got Submit");
    }
}
