//! Error model shared by the submission and polling paths.

use thiserror::Error;

/// A request parameter failed validation before anything was sent.
///
/// Validation errors are surfaced immediately and never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required parameter was absent or blank.
    #[error("missing required parameter: {0}")]
    Missing(&'static str),

    /// A parameter was present but malformed.
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    /// An uploaded sample exceeds the size ceiling.
    #[error("audio file too large: {size} bytes (max {max})")]
    FileTooLarge { size: u64, max: u64 },

    /// An uploaded sample is not of the expected media type.
    #[error("invalid file type: {0}")]
    UnsupportedMediaType(String),
}

impl ValidationError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Whether a failed attempt may be retried.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorClass {
    /// Network unavailability, request timeout, or a dropped connection.
    Transient,
    /// Everything else: malformed payloads, business rejections.
    Permanent,
}

/// Failure talking to the remote service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The service could not be reached at all.
    #[error("service unreachable: {0}")]
    Unreachable(String),

    /// No response arrived within the per-request timeout.
    #[error("request timed out")]
    Timeout,

    /// The connection broke while the response was in flight.
    #[error("connection dropped: {0}")]
    ConnectionDropped(String),

    /// The service answered with a non-success HTTP status.
    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered, but not with a decodable payload.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The request itself could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// Classify this failure for the backoff policy.
    ///
    /// HTTP 408/502/503/504 are request-timeout and unavailability signals and
    /// count as transient. All other statuses are business answers.
    pub fn class(&self) -> ErrorClass {
        match self {
            TransportError::Unreachable(_)
            | TransportError::Timeout
            | TransportError::ConnectionDropped(_) => ErrorClass::Transient,
            TransportError::Status { status, .. } => match status {
                408 | 502 | 503 | 504 => ErrorClass::Transient,
                _ => ErrorClass::Permanent,
            },
            TransportError::Malformed(_) | TransportError::InvalidRequest(_) => {
                ErrorClass::Permanent
            }
        }
    }

    pub fn is_transient(&self) -> bool {
        self.class() == ErrorClass::Transient
    }

    /// HTTP status code, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_level_failures_are_transient() {
        assert!(TransportError::Unreachable("dns".into()).is_transient());
        assert!(TransportError::Timeout.is_transient());
        assert!(TransportError::ConnectionDropped("reset".into()).is_transient());
    }

    #[test]
    fn business_rejections_are_permanent() {
        let bad_request = TransportError::Status {
            status: 400,
            body: "{\"error\":\"bad\"}".into(),
        };
        assert_eq!(bad_request.class(), ErrorClass::Permanent);
        assert_eq!(
            TransportError::Malformed("eof".into()).class(),
            ErrorClass::Permanent
        );
    }

    #[test]
    fn gateway_statuses_are_transient() {
        for status in [408, 502, 503, 504] {
            let err = TransportError::Status {
                status,
                body: String::new(),
            };
            assert!(err.is_transient(), "{status} should be transient");
        }
        let server_error = TransportError::Status {
            status: 500,
            body: String::new(),
        };
        assert!(!server_error.is_transient());
    }
}
