use thiserror::Error;

#[derive(Error, Debug)]
pub enum CareError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Remote store responded with {status}: {message}")]
    RemoteError { status: u16, message: String },

    #[error("Storage unavailable: {message}")]
    StorageUnavailable { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for '{field}': {reason}")]
    ValidationError { field: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Configuration,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CareError {
    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::RemoteError { .. } => ErrorCategory::Network,
            Self::IoError(_) | Self::SerializationError(_) | Self::StorageUnavailable { .. } => {
                ErrorCategory::Storage
            }
            Self::TomlError(_) | Self::ConfigError { .. } | Self::MissingConfigError { .. } => {
                ErrorCategory::Configuration
            }
            Self::ValidationError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Medium,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// Whether the store layer may swallow this error and serve a default instead.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.category(), ErrorCategory::Validation)
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ApiError(_) => "Check network connectivity and the remote store URL",
            Self::RemoteError { status, .. } if *status == 401 || *status == 403 => {
                "Check that SUPABASE_ANON_KEY is set to a valid key"
            }
            Self::RemoteError { status, .. } if *status == 404 => {
                "Make sure the 'stats' and 'testimonials' tables exist"
            }
            Self::RemoteError { .. } => "Retry later; the remote store rejected the request",
            Self::IoError(_) => "Check that the data directory exists and is writable",
            Self::SerializationError(_) => "The stored JSON document is corrupt; run `reset`",
            Self::StorageUnavailable { .. } => "Check the configured storage backend",
            Self::TomlError(_) => "Make sure the config file is valid TOML",
            Self::ConfigError { .. } | Self::MissingConfigError { .. } => {
                "Review config.toml and the HOMECARE_* / SUPABASE_* environment variables"
            }
            Self::ValidationError { .. } => "Correct the highlighted field and submit again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { field, reason } => format!("{}: {}", field, reason),
            Self::ApiError(_) | Self::RemoteError { .. } => {
                "Unable to reach the statistics database. Please try again later.".to_string()
            }
            Self::MissingConfigError { field } => {
                format!("Configuration value '{}' is required", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CareError>;
