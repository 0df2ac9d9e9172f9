use serde::{Deserialize, Serialize};

/// Unified error type for all procurement API operations.
///
/// Each variant carries an `endpoint` field naming the API resource that
/// produced the error (`products`, `vendors`, `users`, `rfq`), plus
/// variant-specific context. All variants are serializable so the UI layer
/// can render them as structured toasts.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError): network connectivity issues, gateway errors
/// - [`Timeout`](Self::Timeout): request timed out
/// - [`RateLimited`](Self::RateLimited): API rate limit exceeded
///
/// The built-in HTTP client retries these with exponential backoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, 502-504).
    NetworkError {
        /// Endpoint that produced the error.
        endpoint: String,
        /// Error details.
        detail: String,
    },

    /// The bearer token is missing, invalid or expired (HTTP 401).
    Unauthorized {
        /// Endpoint that produced the error.
        endpoint: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The authenticated user lacks permission for the requested operation (HTTP 403).
    PermissionDenied {
        /// Endpoint that produced the error.
        endpoint: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The requested resource (usually an RFQ being updated) does not exist (HTTP 404).
    NotFound {
        /// Endpoint that produced the error.
        endpoint: String,
        /// Identifier of the missing resource.
        resource: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// A request parameter is invalid before it ever reaches the wire.
    InvalidParameter {
        /// Endpoint that would have been called.
        endpoint: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The server rejected the payload (HTTP 400 / 409 / 422).
    Rejected {
        /// Endpoint that produced the error.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    RateLimited {
        /// Endpoint that produced the error.
        endpoint: String,
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Endpoint that produced the error.
        endpoint: String,
        /// Error details.
        detail: String,
    },

    /// The server failed while handling the request (HTTP 500 and other 5xx not covered above).
    ServerError {
        /// Endpoint that produced the error.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// Failed to parse the API response.
    ParseError {
        /// Endpoint that produced the error.
        endpoint: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Endpoint that produced the error.
        endpoint: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// An unrecognized response status.
    Unknown {
        /// Endpoint that produced the error.
        endpoint: String,
        /// Raw HTTP status, if one was received.
        raw_status: Option<u16>,
        /// Raw error message.
        raw_message: String,
    },
}

impl ProviderError {
    /// Whether the error is caused by the user or by the request itself rather than
    /// by infrastructure, used for log levels.
    ///
    /// Use `warn` when this returns `true` and `error` otherwise.
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. }
                | Self::PermissionDenied { .. }
                | Self::NotFound { .. }
                | Self::InvalidParameter { .. }
                | Self::Rejected { .. }
        )
    }

    /// Whether retrying the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }

    /// Endpoint that produced the error.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        match self {
            Self::NetworkError { endpoint, .. }
            | Self::Unauthorized { endpoint, .. }
            | Self::PermissionDenied { endpoint, .. }
            | Self::NotFound { endpoint, .. }
            | Self::InvalidParameter { endpoint, .. }
            | Self::Rejected { endpoint, .. }
            | Self::RateLimited { endpoint, .. }
            | Self::Timeout { endpoint, .. }
            | Self::ServerError { endpoint, .. }
            | Self::ParseError { endpoint, .. }
            | Self::SerializationError { endpoint, .. }
            | Self::Unknown { endpoint, .. } => endpoint,
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { endpoint, detail } => {
                write!(f, "[{endpoint}] Network error: {detail}")
            }
            Self::Unauthorized {
                endpoint,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{endpoint}] Unauthorized: {msg}")
                } else {
                    write!(f, "[{endpoint}] Unauthorized")
                }
            }
            Self::PermissionDenied {
                endpoint,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{endpoint}] Permission denied: {msg}")
                } else {
                    write!(f, "[{endpoint}] Permission denied")
                }
            }
            Self::NotFound {
                endpoint, resource, ..
            } => {
                write!(f, "[{endpoint}] '{resource}' not found")
            }
            Self::InvalidParameter {
                endpoint,
                param,
                detail,
            } => {
                write!(f, "[{endpoint}] Invalid parameter '{param}': {detail}")
            }
            Self::Rejected {
                endpoint,
                status,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{endpoint}] Rejected (HTTP {status}): {msg}")
                } else {
                    write!(f, "[{endpoint}] Rejected (HTTP {status})")
                }
            }
            Self::RateLimited {
                endpoint,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{endpoint}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{endpoint}] Rate limited")
                }
            }
            Self::Timeout { endpoint, detail } => {
                write!(f, "[{endpoint}] Request timeout: {detail}")
            }
            Self::ServerError {
                endpoint, status, ..
            } => {
                write!(f, "[{endpoint}] Server error (HTTP {status})")
            }
            Self::ParseError { endpoint, detail } => {
                write!(f, "[{endpoint}] Parse error: {detail}")
            }
            Self::SerializationError { endpoint, detail } => {
                write!(f, "[{endpoint}] Serialization error: {detail}")
            }
            Self::Unknown {
                endpoint,
                raw_message,
                ..
            } => {
                write!(f, "[{endpoint}] {raw_message}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = ProviderError::NetworkError {
            endpoint: "products".to_string(),
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "[products] Network error: connection refused");
    }

    #[test]
    fn display_unauthorized_with_message() {
        let e = ProviderError::Unauthorized {
            endpoint: "vendors".to_string(),
            raw_message: Some("token expired".to_string()),
        };
        assert_eq!(e.to_string(), "[vendors] Unauthorized: token expired");
    }

    #[test]
    fn display_not_found() {
        let e = ProviderError::NotFound {
            endpoint: "rfq".to_string(),
            resource: "rfq-42".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[rfq] 'rfq-42' not found");
    }

    #[test]
    fn display_rejected() {
        let e = ProviderError::Rejected {
            endpoint: "rfq".to_string(),
            status: 422,
            raw_message: Some("title is required".to_string()),
        };
        assert_eq!(
            e.to_string(),
            "[rfq] Rejected (HTTP 422): title is required"
        );
    }

    #[test]
    fn display_rate_limited_with_retry() {
        let e = ProviderError::RateLimited {
            endpoint: "products".to_string(),
            retry_after: Some(30),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[products] Rate limited (retry after 30s)");
    }

    #[test]
    fn display_server_error() {
        let e = ProviderError::ServerError {
            endpoint: "rfq".to_string(),
            status: 500,
            raw_message: Some("boom".to_string()),
        };
        assert_eq!(e.to_string(), "[rfq] Server error (HTTP 500)");
    }

    #[test]
    fn expected_errors_are_request_side() {
        let rejected = ProviderError::Rejected {
            endpoint: "rfq".into(),
            status: 400,
            raw_message: None,
        };
        let server = ProviderError::ServerError {
            endpoint: "rfq".into(),
            status: 500,
            raw_message: None,
        };
        assert!(rejected.is_expected());
        assert!(!server.is_expected());
        assert!(!server.is_retryable());
    }

    #[test]
    fn endpoint_accessor() {
        let e = ProviderError::Timeout {
            endpoint: "users".into(),
            detail: "30s elapsed".into(),
        };
        assert_eq!(e.endpoint(), "users");
        assert!(e.is_retryable());
    }

    #[test]
    fn serialize_is_tagged_by_code() {
        let e = ProviderError::RateLimited {
            endpoint: "vendors".to_string(),
            retry_after: Some(60),
            raw_message: Some("too many requests".to_string()),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"RateLimited\""));
        assert!(json.contains("\"retry_after\":60"));
    }
}
