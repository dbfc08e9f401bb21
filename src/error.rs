//! Error types for helpdesk
//!
//! Every failure surfaces to the user as a single message plus optional
//! suggestions. Server-side failures keep the HTTP status and whatever
//! message the server put in its error body.

use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, HelpdeskError>;

/// Main error type for helpdesk operations
#[derive(Error, Debug)]
pub enum HelpdeskError {
    /// Server rejected the request with a non-2xx status
    #[error("Request failed ({status}): {message}")]
    Api { status: u16, message: String },

    /// Token missing, expired or rejected by the server
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource does not exist on the server
    #[error("Not found: {0}")]
    NotFound(String),

    /// No stored session
    #[error("Not logged in")]
    NotLoggedIn,

    /// Action gated off locally for the current role
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Transport-level failure (connection refused, timeout, bad TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed base URL or path
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded or written
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Interactive prompt failed (no TTY, interrupted)
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// Anything else
    #[error("{0}")]
    Custom(String),
}

impl From<config::ConfigError> for HelpdeskError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl HelpdeskError {
    /// Create a custom error
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Build an error from an HTTP status and the server-provided message
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::Api { status, message },
        }
    }

    /// HTTP status carried by this error, if it came from the server
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            _ => None,
        }
    }

    /// Message suitable for a one-line failure notice
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::NotLoggedIn => "You are not logged in".to_string(),
            Self::Http(e) if e.is_connect() => "Could not reach the helpdesk server".to_string(),
            Self::Http(e) if e.is_timeout() => "The helpdesk server did not respond in time".to_string(),
            _ => self.to_string(),
        }
    }

    /// Follow-up hints shown under the error message
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotLoggedIn => vec![
                "Run 'helpdesk login' to sign in".to_string(),
                "New here? Run 'helpdesk register'".to_string(),
            ],
            Self::Unauthorized(_) => vec![
                "Your session may have expired; run 'helpdesk login' again".to_string(),
            ],
            Self::Forbidden(_) | Self::PermissionDenied(_) => vec![
                "Ask an administrator if you need broader access".to_string(),
            ],
            Self::NotFound(_) => vec!["Check the ID with 'helpdesk list'".to_string()],
            Self::Http(e) if e.is_connect() || e.is_timeout() => vec![
                "Check that the server is running".to_string(),
                "Verify the API URL with 'helpdesk config show'".to_string(),
            ],
            Self::Url(_) | Self::Config(_) => vec![
                "Locate the settings file with 'helpdesk config path'".to_string(),
                "Fix a value with 'helpdesk config set <key> <value>'".to_string(),
            ],
            _ => vec![],
        }
    }

    /// Whether retrying the same command could reasonably succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_connect() || e.is_timeout(),
            Self::Api { status, .. } => *status >= 500,
            Self::NotLoggedIn | Self::Unauthorized(_) | Self::InvalidInput(_) => true,
            _ => false,
        }
    }

    /// Whether the failure stems from local configuration
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Url(_))
    }
}
