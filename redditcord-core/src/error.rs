use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Reddit API error: {0}")]
    RedditApi(#[from] RedditApiError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Discord {operation} failed: {message}")]
    Platform { operation: String, message: String },
}

/// Failures of a single request against the Reddit JSON endpoints.
///
/// Every variant is terminal for the request that produced it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RedditApiError {
    #[error("HTTP GET failed: {details}")]
    Network { details: String },

    #[error("non 200 http status code: {status_code}")]
    NonOkStatus { status_code: u16 },

    #[error("invalid Content-Type header: {content_type}")]
    BadContentType { content_type: String },

    #[error("JSON type mismatch: {details}")]
    DecodeTypeMismatch { details: String },

    #[error("unknown error during JSON decode: {details}")]
    DecodeUnknown { details: String },
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection failed: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Database is not connected")]
    NotConnected,

    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Environment variable not set: {var_name}")]
    MissingEnvironmentVariable { var_name: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}
