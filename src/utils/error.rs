use thiserror::Error;

#[derive(Error, Debug)]
pub enum IssueError {
    #[error("Fetch failed: {message}")]
    FetchError { message: String },

    #[error("Parse failed: {message}")]
    ParseError { message: String },

    #[error("Storage listing failed: {message}")]
    StorageError { message: String },

    #[error("unknown parsing error. No elements found")]
    NoElementsFound,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl From<reqwest::Error> for IssueError {
    fn from(err: reqwest::Error) -> Self {
        IssueError::FetchError {
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Source,
    Extraction,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl IssueError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            IssueError::FetchError { .. } | IssueError::StorageError { .. } => {
                ErrorCategory::Source
            }
            IssueError::ParseError { .. } | IssueError::NoElementsFound => {
                ErrorCategory::Extraction
            }
            IssueError::ConfigError { .. } | IssueError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            IssueError::IoError(_) | IssueError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 來源暫時不可用，重試可能成功
            IssueError::FetchError { .. } | IssueError::StorageError { .. } => {
                ErrorSeverity::Medium
            }
            IssueError::ParseError { .. } | IssueError::NoElementsFound => ErrorSeverity::High,
            IssueError::ConfigError { .. } | IssueError::InvalidConfigValueError { .. } => {
                ErrorSeverity::High
            }
            IssueError::IoError(_) | IssueError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            IssueError::FetchError { .. } => {
                "Check that the listing page is reachable and retry the request"
            }
            IssueError::StorageError { .. } => {
                "Check bucket name, region and credentials, then retry the request"
            }
            IssueError::ParseError { .. } => {
                "Check the configured item selector and that the page is HTML"
            }
            IssueError::NoElementsFound => {
                "The source layout may have changed; verify the naming pattern of the entries"
            }
            IssueError::ConfigError { .. } | IssueError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again"
            }
            IssueError::IoError(_) | IssueError::SerializationError(_) => {
                "Check the request payload and the local environment"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, IssueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_elements_message() {
        assert_eq!(
            IssueError::NoElementsFound.to_string(),
            "unknown parsing error. No elements found"
        );
    }

    #[test]
    fn test_source_errors_are_retryable() {
        let err = IssueError::StorageError {
            message: "denied".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Source);
        assert_eq!(err.severity(), ErrorSeverity::Medium);

        let err = IssueError::ParseError {
            message: "bad".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Extraction);
        assert!(err.severity() > ErrorSeverity::Medium);
    }
}
