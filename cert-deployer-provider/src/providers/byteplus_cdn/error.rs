//! BytePlus CDN 错误映射

use crate::error::DeployerError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{ByteplusCdnClient, PROVIDER_NAME};

/// BytePlus CDN 错误码映射
/// 参考: <https://docs.byteplus.com/en/docs/byteplus-cdn/reference-error-codes>
impl ProviderErrorMapper for ByteplusCdnClient {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> DeployerError {
        match raw.code.as_deref() {
            // ============ 认证错误 ============
            Some(
                "InvalidCredential"
                | "InvalidAccessKey"
                | "InvalidSecretKey"
                | "SignatureDoesNotMatch"
                | "InvalidAuthorization",
            ) => DeployerError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // ============ 权限/操作被拒绝 ============
            Some("AccessDenied" | "Forbidden" | "NoPermission" | "ServiceNotActivated") => {
                DeployerError::PermissionDenied {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }

            // ============ 频率限流 ============
            Some("Throttling" | "FlowLimitExceeded" | "RequestLimitExceeded") => {
                DeployerError::RateLimited {
                    provider: self.provider_name().to_string(),
                    retry_after: None,
                    raw_message: Some(raw.message),
                }
            }

            // ============ 证书配额 ============
            Some("QuotaExceeded" | "CertQuotaExceeded") => DeployerError::QuotaExceeded {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // ============ 证书不存在 ============
            Some("CertNotExist" | "CertificateNotFound" | "ErrCertNotFound") => {
                DeployerError::CertificateNotFound {
                    provider: self.provider_name().to_string(),
                    cert_id: context.cert_id.unwrap_or_default(),
                    raw_message: Some(raw.message),
                }
            }

            // ============ 域名不存在 ============
            Some("DomainNotExist" | "DomainNotFound" | "ErrDomainNotFound") => {
                DeployerError::DomainNotFound {
                    provider: self.provider_name().to_string(),
                    domain: context.domain.unwrap_or_default(),
                    raw_message: Some(raw.message),
                }
            }

            // ============ 参数无效（带字段后缀，如 InvalidParameter.CertId） ============
            Some(code) if code.starts_with("InvalidParameter") || code.starts_with("MissingParameter") => {
                let param = code
                    .split_once('.')
                    .map_or("request", |(_, field)| field)
                    .to_string();
                DeployerError::InvalidParameter {
                    provider: self.provider_name().to_string(),
                    param,
                    detail: raw.message,
                }
            }

            // ============ 其他错误 fallback ============
            _ => self.unknown_error(raw),
        }
    }
}
