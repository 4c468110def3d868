//! Error handling for domain-scout

use thiserror::Error;

/// Main error type for domain-scout
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainScoutError {
    #[error("Empty query: enter a domain name to search")]
    EmptyQuery,

    /// Never leaves the oracle; downgraded to a taken verdict there.
    #[error("DNS resolver unreachable for '{domain}': {message}")]
    OracleUnreachable { domain: String, message: String },

    #[error("Unexpected failure: {message}")]
    UnexpectedFailure { message: String },

    #[error("Search cancelled")]
    Cancelled,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
        url: Option<String>,
    },

    #[error("Timeout error: {operation} timed out after {timeout_ms}ms")]
    Timeout {
        operation: String,
        timeout_ms: u64,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },
}

impl DomainScoutError {
    /// Create an oracle error
    pub fn oracle_unreachable(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self::OracleUnreachable {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create an unexpected failure
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::UnexpectedFailure {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(
        message: impl Into<String>,
        status_code: Option<u16>,
        url: Option<String>,
    ) -> Self {
        Self::Network {
            message: message.into(),
            status_code,
            url,
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Whether the error came from the lookup transport rather than from the search itself
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::OracleUnreachable { .. }
                | Self::Network { .. }
                | Self::Timeout { .. }
                | Self::Parse { .. }
        )
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyQuery => "Type a domain name to search.".to_string(),
            Self::Cancelled => "Search cancelled.".to_string(),
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check your .env file or DOMAIN_SCOUT_* variables", message)
            }
            Self::UnexpectedFailure { .. }
            | Self::OracleUnreachable { .. }
            | Self::Network { .. }
            | Self::Timeout { .. }
            | Self::Parse { .. } => "Something went wrong. Please try again.".to_string(),
        }
    }
}

/// Convert from common error types
impl From<reqwest::Error> for DomainScoutError {
    fn from(err: reqwest::Error) -> Self {
        let status_code = err.status().map(|s| s.as_u16());
        let url = err.url().map(|u| u.to_string());

        if err.is_timeout() {
            Self::network("Request timed out", status_code, url)
        } else if err.is_connect() {
            Self::network("Connection failed", status_code, url)
        } else if err.is_decode() {
            Self::parse(err.to_string(), None)
        } else {
            Self::network(err.to_string(), status_code, url)
        }
    }
}

impl From<serde_json::Error> for DomainScoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string(), None)
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DomainScoutError>;
