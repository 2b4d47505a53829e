use async_trait::async_trait;

use crate::error::{DeployerError, Result};
use crate::types::{CertConfigState, CertInfoPage, DeployResult, ProviderMetadata, UploadResult};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（各 Provider 格式不同）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 证书 ID（用于 `CertificateNotFound` 等错误）
    pub cert_id: Option<String>,
    /// 域名（用于 `DomainNotFound` 等错误）
    pub domain: Option<String>,
}

/// Provider 错误映射 Trait（内部使用）
/// 各 Provider 实现此 trait 以将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> DeployerError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> DeployerError {
        DeployerError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> DeployerError {
        DeployerError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Certificate deployer capability.
///
/// One implementation per CDN provider. A deployer owns its immutable
/// configuration (credentials + target domain pattern) and performs the full
/// upload → resolve → associate pipeline in a single [`deploy`](Self::deploy)
/// call.
#[async_trait]
pub trait Deployer: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 获取 Provider 元数据（类型级别）
    ///
    /// 返回该 Provider 的元数据，包括名称、描述、凭证字段等。
    /// 此方法不需要实例，可以在创建 Deployer 之前调用。
    fn metadata() -> ProviderMetadata
    where
        Self: Sized;

    /// Deploy an issued certificate to the provider.
    ///
    /// Uploads the PEM-encoded certificate and private key, resolves the set of
    /// accelerated domains the certificate must be bound to, and binds each one
    /// in sequence. Association is best-effort: a failing domain does not stop
    /// later domains, but any failure makes the whole call fail with
    /// [`DeployerError::PartialFailure`](crate::DeployerError::PartialFailure).
    ///
    /// Dropping the returned future cancels the in-flight provider call.
    async fn deploy(&self, cert_pem: &str, privkey_pem: &str) -> Result<DeployResult>;
}

/// Certificate upload capability.
///
/// Stores a PEM certificate + private key in the provider's certificate store
/// and returns the provider-assigned identifier. Implementations may reuse an
/// already-stored certificate instead of uploading a duplicate.
#[async_trait]
pub trait CertificateUploader: Send + Sync {
    /// Upload a certificate, returning its provider-assigned identifier.
    async fn upload(&self, cert_pem: &str, privkey_pem: &str) -> Result<UploadResult>;
}

/// Wire-level CDN certificate API surface.
///
/// The provider's SDK client implements this over authenticated HTTPS; tests
/// substitute fakes to drive the deployer and uploader without a network.
#[async_trait]
pub trait CdnApi: Send + Sync {
    /// Query which accelerated domains are (not) configured for a certificate.
    async fn describe_cert_config(&self, cert_id: &str) -> Result<CertConfigState>;

    /// Bind a certificate to a single accelerated domain.
    ///
    /// Despite the provider's operation name (`BatchDeployCert`), one call binds
    /// one domain; batching is repeated invocation by the caller. Returns the
    /// raw provider acknowledgement for observability.
    async fn batch_deploy_cert(&self, cert_id: &str, domain: &str) -> Result<serde_json::Value>;

    /// List one page of the provider's certificate store.
    async fn list_cert_info(&self, page_num: u32, page_size: u32) -> Result<CertInfoPage>;

    /// Store a certificate + private key, returning the new certificate id.
    async fn add_certificate(
        &self,
        cert_pem: &str,
        privkey_pem: &str,
        desc: &str,
    ) -> Result<String>;
}
