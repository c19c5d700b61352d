//! Error taxonomy for the utilization batch
//!
//! Only [`BatchFatal`] ever escapes a batch run. Everything else is a
//! per-row fault that the orchestrator folds into an outcome record.

use std::time::Duration;

/// Failure of the client-credentials exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Token endpoint answered with a non-success status
    Rejected { status: u16, body: String },
    /// Request never produced a response (connect error, timeout, ...)
    Transport(String),
    /// 200 response whose body did not carry an access token
    MalformedResponse(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::Rejected { status, body } => {
                write!(f, "Failed to get OAuth token: {} {}", status, body)
            }
            AuthError::Transport(message) => write!(f, "Token request failed: {}", message),
            AuthError::MalformedResponse(message) => {
                write!(f, "Failed to parse token response: {}", message)
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Fault from a directory search or utilization update call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No HTTP response was received
    Transport { message: String, timed_out: bool },
    /// Remote answered with an unexpected status; body is passed through verbatim
    Status {
        status: u16,
        body: String,
        /// `Retry-After` in seconds, when the remote sent one
        retry_after: Option<Duration>,
    },
    /// Success status but the body could not be decoded
    Decode(String),
}

impl ApiError {
    /// Faults worth retrying under an opt-in retry policy: 429, 5xx and
    /// anything that never got a response.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Transport { .. } => true,
            ApiError::Status { status, .. } => *status == 429 || (500..=599).contains(status),
            ApiError::Decode(_) => false,
        }
    }

    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            ApiError::Status { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport { message, timed_out: true } => {
                write!(f, "request timed out: {}", message)
            }
            ApiError::Transport { message, .. } => write!(f, "request failed: {}", message),
            ApiError::Status { status, body, .. } => write!(f, "{}, {}", status, body),
            ApiError::Decode(message) => write!(f, "unexpected response body: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport {
            timed_out: err.is_timeout(),
            message: err.to_string(),
        }
    }
}

/// A row that cannot be turned into a utilization payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub column: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.column, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Errors that abort a whole batch before any row is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchFatal {
    Auth(AuthError),
}

impl std::fmt::Display for BatchFatal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchFatal::Auth(err) => write!(f, "batch aborted, no token available: {}", err),
        }
    }
}

impl std::error::Error for BatchFatal {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchFatal::Auth(err) => Some(err),
        }
    }
}

impl From<AuthError> for BatchFatal {
    fn from(err: AuthError) -> Self {
        BatchFatal::Auth(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        let throttled = ApiError::Status {
            status: 429,
            body: String::new(),
            retry_after: None,
        };
        let unavailable = ApiError::Status {
            status: 503,
            body: String::new(),
            retry_after: None,
        };
        let forbidden = ApiError::Status {
            status: 403,
            body: "forbidden".to_string(),
            retry_after: None,
        };
        let timeout = ApiError::Transport {
            message: "deadline".to_string(),
            timed_out: true,
        };

        assert!(throttled.is_transient());
        assert!(unavailable.is_transient());
        assert!(timeout.is_transient());
        assert!(!forbidden.is_transient());
        assert!(!ApiError::Decode("eof".to_string()).is_transient());
    }

    #[test]
    fn test_status_error_display_is_verbatim() {
        let err = ApiError::Status {
            status: 403,
            body: "forbidden".to_string(),
            retry_after: None,
        };
        assert_eq!(err.to_string(), "403, forbidden");
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn test_validation_error_names_column() {
        let err = ValidationError::new("Chat Maximum Capacity", "'two' is not an integer");
        assert_eq!(err.to_string(), "Chat Maximum Capacity: 'two' is not an integer");
    }

    #[test]
    fn test_batch_fatal_wraps_auth_error() {
        let fatal: BatchFatal = AuthError::Rejected {
            status: 401,
            body: "invalid_client".to_string(),
        }
        .into();
        assert!(fatal.to_string().contains("401"));
        assert!(std::error::Error::source(&fatal).is_some());
    }
}
