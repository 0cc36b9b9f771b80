use std::time::Duration;
use thiserror::Error;

/// Fallback shown when neither the server nor the transport supplied a message.
pub const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred during the analysis.";

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Request timed out after {timeout:?}")]
    TimeoutError { timeout: Duration },

    #[error("Analysis service error: {message}")]
    ApplicationError { message: String, status: Option<u16> },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {reason} (got '{value}')")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Transport,
    Application,
    Configuration,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AnalysisError {
    pub fn application(message: impl Into<String>) -> Self {
        AnalysisError::ApplicationError {
            message: message.into(),
            status: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AnalysisError::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AnalysisError::ValidationError { .. } => ErrorCategory::Validation,
            AnalysisError::TransportError(_) | AnalysisError::TimeoutError { .. } => {
                ErrorCategory::Transport
            }
            AnalysisError::ApplicationError { .. } | AnalysisError::SerializationError(_) => {
                ErrorCategory::Application
            }
            AnalysisError::ConfigError { .. }
            | AnalysisError::InvalidConfigValueError { .. }
            | AnalysisError::MissingConfigError { .. } => ErrorCategory::Configuration,
            AnalysisError::IoError(_) => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Transport => ErrorSeverity::Medium,
            ErrorCategory::Application => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    /// The most specific message available: server text first, then the
    /// transport error, then a generic fallback.
    pub fn failure_message(&self) -> String {
        let message = match self {
            AnalysisError::ApplicationError { message, .. } => message.trim().to_string(),
            AnalysisError::ValidationError { message } | AnalysisError::ConfigError { message } => {
                message.trim().to_string()
            }
            other => other.to_string(),
        };

        if message.is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Validation => format!("Files Required: {}", self.failure_message()),
            ErrorCategory::Transport => format!(
                "Could not reach the analysis service: {}",
                self.failure_message()
            ),
            ErrorCategory::Application => {
                format!("The analysis service reported an error: {}", self.failure_message())
            }
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Io => format!("File access failed: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AnalysisError::ValidationError { .. } => {
                "Provide both the transaction data (.xlsx) and the MCC template (.xlsb)"
            }
            AnalysisError::TimeoutError { .. } => {
                "The analysis took too long; try a smaller file or raise --timeout-seconds"
            }
            AnalysisError::TransportError(_) => {
                "Check that the analysis service is running and the endpoint URL is correct"
            }
            AnalysisError::ApplicationError { .. } | AnalysisError::SerializationError(_) => {
                "Check the uploaded files match the expected templates and try again"
            }
            AnalysisError::ConfigError { .. }
            | AnalysisError::InvalidConfigValueError { .. }
            | AnalysisError::MissingConfigError { .. } => {
                "Review the command line flags and the TOML configuration file"
            }
            AnalysisError::IoError(_) => "Check the file paths and directory permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_prefers_server_text() {
        let err = AnalysisError::ApplicationError {
            message: "Sheet 'Customer Data Template' not found".to_string(),
            status: Some(500),
        };
        assert_eq!(err.failure_message(), "Sheet 'Customer Data Template' not found");
        assert_eq!(err.category(), ErrorCategory::Application);
    }

    #[test]
    fn test_failure_message_falls_back_to_generic_text() {
        let err = AnalysisError::application("   ");
        assert_eq!(err.failure_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_timeout_is_a_transport_error() {
        let err = AnalysisError::TimeoutError {
            timeout: Duration::from_secs(300),
        };
        assert_eq!(err.category(), ErrorCategory::Transport);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.failure_message(), "Request timed out after 300s");
    }
}
