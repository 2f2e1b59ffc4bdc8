use crate::error::*;
use tracing::{error, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::RedditApi(e) => {
                error!("Reddit API error details: {:?}", e);
            }
            CoreError::Database(e) => {
                error!("Database error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("CoreError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::RedditApi(e) => e.user_friendly_message(),
            CoreError::Database(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Platform { operation, .. } => {
                format!("Discord rejected the {} request.", operation)
            }
            CoreError::Http(_) => "An HTTP client could not be created.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::RedditApi(_) => "REDDIT_API".to_string(),
            CoreError::Database(_) => "DATABASE".to_string(),
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::Http(_) => "HTTP".to_string(),
            CoreError::Platform { .. } => "PLATFORM".to_string(),
        }
    }
}

impl ErrorExt for RedditApiError {
    fn log_error(&self) -> &Self {
        error!("RedditApiError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("RedditApiError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            RedditApiError::Network { .. } => {
                "Could not reach Reddit. Please try again later.".to_string()
            }
            RedditApiError::NonOkStatus { status_code } => {
                format!("Reddit answered with HTTP {}.", status_code)
            }
            RedditApiError::BadContentType { .. } => {
                "Reddit did not return JSON. The subreddit may be private or banned.".to_string()
            }
            RedditApiError::DecodeTypeMismatch { .. } | RedditApiError::DecodeUnknown { .. } => {
                "Reddit returned a response that could not be read.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            RedditApiError::Network { .. } => "REDDIT_NETWORK".to_string(),
            RedditApiError::NonOkStatus { .. } => "REDDIT_NON_OK_STATUS".to_string(),
            RedditApiError::BadContentType { .. } => "REDDIT_BAD_CONTENT_TYPE".to_string(),
            RedditApiError::DecodeTypeMismatch { .. } => "REDDIT_DECODE_TYPE_MISMATCH".to_string(),
            RedditApiError::DecodeUnknown { .. } => "REDDIT_DECODE_UNKNOWN".to_string(),
        }
    }
}

impl ErrorExt for DatabaseError {
    fn log_error(&self) -> &Self {
        error!("DatabaseError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("DatabaseError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            DatabaseError::ConnectionFailed { .. } => {
                "Database connection failed. Please check DATABASE_URL.".to_string()
            }
            DatabaseError::NotConnected => "Database has not been connected yet.".to_string(),
            DatabaseError::Sql(_) => "Database error occurred.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            DatabaseError::ConnectionFailed { .. } => "DB_CONNECTION_FAILED".to_string(),
            DatabaseError::NotConnected => "DB_NOT_CONNECTED".to_string(),
            DatabaseError::Sql(_) => "DB_SQL_ERROR".to_string(),
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!("ConfigError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ConfigError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::FileNotFound { path } => {
                format!("Configuration file '{}' not found.", path)
            }
            ConfigError::MissingEnvironmentVariable { var_name } => format!(
                "Environment variable '{}' is required but not set.",
                var_name
            ),
            ConfigError::InvalidValue { field, .. } => {
                format!("Invalid value for configuration field '{}'.", field)
            }
            ConfigError::ValidationFailed { reason } => {
                format!("Configuration is invalid: {}", reason)
            }
            ConfigError::Parse(_) => {
                "Configuration file format is invalid. Please check the settings.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND".to_string(),
            ConfigError::MissingEnvironmentVariable { .. } => "CONFIG_MISSING_ENV_VAR".to_string(),
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE".to_string(),
            ConfigError::ValidationFailed { .. } => "CONFIG_VALIDATION_FAILED".to_string(),
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR".to_string(),
        }
    }
}
