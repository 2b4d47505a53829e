//! BytePlus CDN 证书部署实现

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{AssociationFailure, DeployerError, Result};
use crate::logger::{DeployLogger, NoopLogger};
use crate::traits::{CdnApi, CertificateUploader, Deployer};
use crate::types::{
    DeployResult, FieldType, ProviderCredentialField, ProviderFeatures, ProviderLimits,
    ProviderMetadata, ProviderType,
};

use super::uploader::{ByteplusCdnUploader, ByteplusCdnUploaderConfig, require_non_empty};
use super::{ByteplusCdnClient, MAX_PAGE_SIZE, PROVIDER_NAME};

/// Configuration for [`ByteplusCdnDeployer`].
///
/// Holds raw credentials; no `Debug` impl.
#[derive(Clone)]
pub struct ByteplusCdnDeployerConfig {
    /// BytePlus Access Key.
    pub access_key: String,
    /// BytePlus Secret Key.
    pub secret_key: String,
    /// 加速域名（支持 `*.` 泛域名）。
    pub domain: String,
}

/// Deploys TLS certificates to BytePlus CDN accelerated domains.
///
/// A deployer is immutable after construction and safe to share across tasks.
/// One [`deploy`](Deployer::deploy) call runs the full pipeline:
///
/// 1. upload the certificate (reusing a stored copy when possible),
/// 2. resolve which accelerated domains need (re-)binding — for wildcard
///    patterns this queries the provider's per-certificate configuration state,
/// 3. bind the certificate to each resolved domain in sequence, collecting
///    per-domain failures instead of aborting early.
///
/// # Construction
///
/// ```rust,no_run
/// use cert_deployer_provider::{ByteplusCdnDeployer, ByteplusCdnDeployerConfig};
///
/// let deployer = ByteplusCdnDeployer::new(ByteplusCdnDeployerConfig {
///     access_key: "your-access-key".to_string(),
///     secret_key: "your-secret-key".to_string(),
///     domain: "*.example.com".to_string(),
/// })?;
/// # Ok::<(), cert_deployer_provider::DeployerError>(())
/// ```
pub struct ByteplusCdnDeployer {
    config: ByteplusCdnDeployerConfig,
    api: Arc<dyn CdnApi>,
    uploader: Arc<dyn CertificateUploader>,
    logger: Arc<dyn DeployLogger>,
}

/// Builder for [`ByteplusCdnDeployer`] with collaborator injection points.
pub struct ByteplusCdnDeployerBuilder {
    config: ByteplusCdnDeployerConfig,
    api: Option<Arc<dyn CdnApi>>,
    uploader: Option<Arc<dyn CertificateUploader>>,
    logger: Option<Arc<dyn DeployLogger>>,
}

impl ByteplusCdnDeployerBuilder {
    fn new(config: ByteplusCdnDeployerConfig) -> Self {
        Self {
            config,
            api: None,
            uploader: None,
            logger: None,
        }
    }

    /// Set the deployment event logger (default: [`NoopLogger`]).
    pub fn logger(mut self, logger: Arc<dyn DeployLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Substitute the wire-level API handle (default: a signed SDK client).
    pub fn api(mut self, api: Arc<dyn CdnApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Substitute the certificate uploader (default: [`ByteplusCdnUploader`]
    /// built from the same credentials).
    pub fn uploader(mut self, uploader: Arc<dyn CertificateUploader>) -> Self {
        self.uploader = Some(uploader);
        self
    }

    /// Build the deployer, validating configuration and constructing the
    /// default collaborators that were not injected.
    pub fn build(self) -> Result<ByteplusCdnDeployer> {
        require_non_empty("access_key", &self.config.access_key)?;
        require_non_empty("secret_key", &self.config.secret_key)?;
        require_non_empty("domain", &self.config.domain)?;

        let api = self.api.unwrap_or_else(|| {
            Arc::new(ByteplusCdnClient::new(
                self.config.access_key.clone(),
                self.config.secret_key.clone(),
            ))
        });

        let uploader: Arc<dyn CertificateUploader> = match self.uploader {
            Some(uploader) => uploader,
            None => Arc::new(ByteplusCdnUploader::new(&ByteplusCdnUploaderConfig {
                access_key: self.config.access_key.clone(),
                secret_key: self.config.secret_key.clone(),
            })?),
        };

        let logger = self.logger.unwrap_or_else(|| Arc::new(NoopLogger));

        Ok(ByteplusCdnDeployer {
            config: self.config,
            api,
            uploader,
            logger,
        })
    }
}

impl ByteplusCdnDeployer {
    /// Creates a deployer with default collaborators and no event logger.
    pub fn new(config: ByteplusCdnDeployerConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Returns a builder for customizing collaborators and logging.
    pub fn builder(config: ByteplusCdnDeployerConfig) -> ByteplusCdnDeployerBuilder {
        ByteplusCdnDeployerBuilder::new(config)
    }

    /// 确定证书需要关联的加速域名集合
    ///
    /// 非泛域名固定返回配置的域名本身（不查询 Provider，保持关联调用幂等）。
    /// 泛域名按 Provider 上报的配置状态取 未配置 + 配置了其他证书 两个分区，
    /// 已配置本证书的域名不重复关联。
    async fn resolve_domains(&self, cert_id: &str) -> Result<Vec<String>> {
        if !self.config.domain.starts_with("*.") {
            return Ok(vec![self.config.domain.clone()]);
        }

        // 获取指定证书可关联的域名
        let state = self.api.describe_cert_config(cert_id).await?;

        let mut domains: Vec<String> = state
            .cert_not_config
            .iter()
            .map(|e| e.domain.clone())
            .collect();
        domains.extend(state.other_cert_config.iter().map(|e| e.domain.clone()));

        if domains.is_empty() {
            if state.specified_cert_config.is_empty() {
                return Err(DeployerError::DomainNotFound {
                    provider: PROVIDER_NAME.to_string(),
                    domain: self.config.domain.clone(),
                    raw_message: None,
                });
            }
            // 所有可关联的域名都已配置该证书，跳过关联
            log::debug!(
                "[{PROVIDER_NAME}] every eligible domain already carries certificate {cert_id}"
            );
        }

        Ok(domains)
    }

    /// 将证书依次关联到各加速域名
    ///
    /// 单个域名失败不会中断后续域名，全部处理完后统一上报失败集合。
    async fn associate(&self, cert_id: &str, domains: &[String]) -> Result<()> {
        let mut failures: Vec<AssociationFailure> = Vec::new();

        for domain in domains {
            // 关联证书与加速域名
            match self.api.batch_deploy_cert(cert_id, domain).await {
                Ok(response) => {
                    self.logger
                        .logt(&format!("certificate bound to domain {domain}"), &response);
                }
                Err(e) => {
                    log::warn!("[{PROVIDER_NAME}] binding certificate to {domain} failed: {e}");
                    failures.push(AssociationFailure {
                        domain: domain.clone(),
                        error: Box::new(e),
                    });
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(DeployerError::PartialFailure {
                provider: PROVIDER_NAME.to_string(),
                failures,
            })
        }
    }
}

#[async_trait]
impl Deployer for ByteplusCdnDeployer {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::ByteplusCdn,
            name: "BytePlus CDN".to_string(),
            description: "Deploys TLS certificates to BytePlus CDN accelerated domains"
                .to_string(),
            required_fields: vec![
                ProviderCredentialField {
                    key: "accessKey".to_string(),
                    label: "Access Key".to_string(),
                    field_type: FieldType::Password,
                    placeholder: None,
                    help_text: Some("BytePlus account Access Key".to_string()),
                },
                ProviderCredentialField {
                    key: "secretKey".to_string(),
                    label: "Secret Key".to_string(),
                    field_type: FieldType::Password,
                    placeholder: None,
                    help_text: Some("BytePlus account Secret Key".to_string()),
                },
            ],
            features: ProviderFeatures {
                wildcard_domains: true,
            },
            limits: ProviderLimits {
                max_page_size_certs: MAX_PAGE_SIZE,
            },
        }
    }

    async fn deploy(&self, cert_pem: &str, privkey_pem: &str) -> Result<DeployResult> {
        // 上传证书到 CDN
        let upres = self.uploader.upload(cert_pem, privkey_pem).await?;

        self.logger.logt(
            "certificate file uploaded",
            &serde_json::to_value(&upres).unwrap_or(serde_json::Value::Null),
        );

        let domains = self.resolve_domains(&upres.cert_id).await?;
        self.associate(&upres.cert_id, &domains).await?;

        Ok(DeployResult::default())
    }
}
