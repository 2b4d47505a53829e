use serde::{Deserialize, Serialize};

/// A single failed domain association inside a best-effort deployment batch.
///
/// Failures are recorded in domain processing order. The full error is kept
/// (not a flattened message) so callers can branch on the underlying cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssociationFailure {
    /// Accelerated domain whose association failed.
    pub domain: String,
    /// The error returned by the provider for this domain.
    pub error: Box<DeployerError>,
}

/// Unified error type for all certificate deployment operations.
///
/// Each variant includes a `provider` field identifying which provider produced
/// the error, plus variant-specific context. All variants are serializable for
/// structured error reporting.
///
/// Transient transport conditions (`NetworkError`, `Timeout`, `RateLimited`)
/// are reported as-is; this crate performs no retries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum DeployerError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details, prefixed with the failed API operation where known.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The provided credentials are invalid or expired.
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The authenticated account lacks permission for the requested operation.
    PermissionDenied {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The API rate limit has been exceeded (HTTP 429 or a throttling error code).
    ///
    /// Reported without retrying; whether and when to retry is the caller's call.
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The certificate store quota has been exceeded.
    QuotaExceeded {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The referenced certificate does not exist in the provider's store.
    CertificateNotFound {
        /// Provider that produced the error.
        provider: String,
        /// Certificate identifier that was not found.
        cert_id: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// No accelerated domain is eligible for the requested certificate.
    ///
    /// For wildcard deployments this signals a configuration mismatch: the
    /// provider reports no domain — configured or not — that the certificate
    /// could be bound to.
    DomainNotFound {
        /// Provider that produced the error.
        provider: String,
        /// Domain or domain pattern that matched nothing.
        domain: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// A request parameter is invalid (e.g., malformed PEM, empty credential).
    InvalidParameter {
        /// Provider that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// Failed to parse the provider's API response.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// One or more domain associations failed during a best-effort batch.
    ///
    /// Every domain in the resolved set was attempted; this aggregate carries
    /// one entry per failed domain, in processing order. Successful domains are
    /// not rolled back.
    PartialFailure {
        /// Provider that produced the error.
        provider: String,
        /// Per-domain failures, in domain processing order. Never empty.
        failures: Vec<AssociationFailure>,
    },

    /// An unrecognized error from the provider API.
    ///
    /// This is a catch-all for error codes not yet mapped to a specific variant.
    Unknown {
        /// Provider that produced the error.
        provider: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl DeployerError {
    /// 是否为预期行为（配置不匹配、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::QuotaExceeded { .. }
                | Self::CertificateNotFound { .. }
                | Self::DomainNotFound { .. }
                | Self::InvalidParameter { .. }
        )
    }

    /// Prefix transport-level detail with the API operation that failed.
    ///
    /// Semantic variants already carry their own context and pass through
    /// unchanged.
    pub(crate) fn in_operation(self, operation: &str) -> Self {
        match self {
            Self::NetworkError { provider, detail } => Self::NetworkError {
                provider,
                detail: format!("{operation}: {detail}"),
            },
            Self::Timeout { provider, detail } => Self::Timeout {
                provider,
                detail: format!("{operation}: {detail}"),
            },
            Self::ParseError { provider, detail } => Self::ParseError {
                provider,
                detail: format!("{operation}: {detail}"),
            },
            Self::SerializationError { provider, detail } => Self::SerializationError {
                provider,
                detail: format!("{operation}: {detail}"),
            },
            other => other,
        }
    }
}

impl std::fmt::Display for DeployerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{provider}] Invalid credentials")
                }
            }
            Self::PermissionDenied {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Permission denied: {msg}")
                } else {
                    write!(f, "[{provider}] Permission denied")
                }
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::QuotaExceeded { provider, .. } => {
                write!(f, "[{provider}] Certificate quota exceeded")
            }
            Self::CertificateNotFound {
                provider, cert_id, ..
            } => {
                write!(f, "[{provider}] Certificate '{cert_id}' not found")
            }
            Self::DomainNotFound {
                provider,
                domain,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Domain '{domain}' not found: {msg}")
                } else {
                    write!(f, "[{provider}] Domain '{domain}' not found")
                }
            }
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => {
                write!(f, "[{provider}] Invalid parameter '{param}': {detail}")
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
            Self::PartialFailure { provider, failures } => {
                write!(
                    f,
                    "[{provider}] {} domain association(s) failed:",
                    failures.len()
                )?;
                for failure in failures {
                    write!(f, "\n{}: {}", failure.domain, failure.error)?;
                }
                Ok(())
            }
            Self::Unknown {
                provider,
                raw_message,
                ..
            } => {
                write!(f, "[{provider}] {raw_message}")
            }
        }
    }
}

impl std::error::Error for DeployerError {}

/// Convenience type alias for `Result<T, DeployerError>`.
pub type Result<T> = std::result::Result<T, DeployerError>;
