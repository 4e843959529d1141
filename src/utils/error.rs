use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Value out of range: {message}")]
    OutOfRange { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CoreError {
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::OutOfRange {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidFormat { .. } | Self::OutOfRange { .. } => ErrorCategory::Input,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::Storage,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // Bad user input is rendered in place, never fatal.
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Storage => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
        }
    }

    /// Short message a host can show next to the input field.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidFormat { .. } | Self::OutOfRange { .. } => "Invalid input".to_string(),
            Self::IoError(_) | Self::SerializationError(_) => {
                "Your progress could not be read or saved".to_string()
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            Self::MissingConfigError { field } => format!("Setting '{}' is required", field),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidFormat { .. } => "Check that the value only uses digits valid for its base",
            Self::OutOfRange { .. } => "Use a non-negative value inside the allowed range",
            Self::IoError(_) => "Check that the data directory exists and is writable",
            Self::SerializationError(_) => "Reset progress if the saved data is corrupted",
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Fix the configuration file and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_render_as_invalid_input() {
        let err = CoreError::invalid_format("'12' is not binary");
        assert_eq!(err.user_friendly_message(), "Invalid input");
        assert_eq!(err.severity(), ErrorSeverity::Low);

        let err = CoreError::out_of_range("prefix 33");
        assert_eq!(err.user_friendly_message(), "Invalid input");
        assert_eq!(err.category(), ErrorCategory::Input);
    }

    #[test]
    fn test_storage_errors_are_medium_severity() {
        let err = CoreError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }
}
