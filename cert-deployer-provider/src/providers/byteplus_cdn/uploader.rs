//! BytePlus CDN 证书上传实现

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::error::{DeployerError, Result};
use crate::traits::{CdnApi, CertificateUploader};
use crate::types::{CertSummary, UploadResult};

use super::{ByteplusCdnClient, MAX_PAGE_SIZE, PROVIDER_NAME};

/// Configuration for [`ByteplusCdnUploader`].
///
/// Holds raw credentials; no `Debug` impl.
#[derive(Clone)]
pub struct ByteplusCdnUploaderConfig {
    /// BytePlus Access Key.
    pub access_key: String,
    /// BytePlus Secret Key.
    pub secret_key: String,
}

/// Uploads certificates to the BytePlus CDN certificate store.
///
/// Before uploading, the store is scanned for a certificate with the same
/// SHA-256 leaf fingerprint; a match is reused instead of creating a duplicate
/// entry. New uploads get a generated, timestamped description.
pub struct ByteplusCdnUploader {
    api: Arc<dyn CdnApi>,
}

impl ByteplusCdnUploader {
    /// Creates an uploader with its own SDK client.
    ///
    /// Fails with [`DeployerError::InvalidParameter`] when a credential field
    /// is empty.
    pub fn new(config: &ByteplusCdnUploaderConfig) -> Result<Self> {
        require_non_empty("access_key", &config.access_key)?;
        require_non_empty("secret_key", &config.secret_key)?;
        Ok(Self {
            api: Arc::new(ByteplusCdnClient::new(
                config.access_key.clone(),
                config.secret_key.clone(),
            )),
        })
    }

    /// Creates an uploader on top of an existing API handle.
    ///
    /// Used by the deployer to share one client, and by tests to inject fakes.
    pub fn with_api(api: Arc<dyn CdnApi>) -> Self {
        Self { api }
    }
}

pub(crate) fn require_non_empty(param: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DeployerError::InvalidParameter {
            provider: PROVIDER_NAME.to_string(),
            param: param.to_string(),
            detail: "must not be empty".to_string(),
        });
    }
    Ok(())
}

/// SHA-256 fingerprint of the leaf certificate in a PEM bundle, lowercase hex.
fn leaf_fingerprint_sha256(cert_pem: &str) -> Result<String> {
    let (_, pem) = x509_parser::pem::parse_x509_pem(cert_pem.as_bytes()).map_err(|e| {
        DeployerError::InvalidParameter {
            provider: PROVIDER_NAME.to_string(),
            param: "certificate".to_string(),
            detail: format!("not valid PEM: {e:?}"),
        }
    })?;
    pem.parse_x509().map_err(|e| DeployerError::InvalidParameter {
        provider: PROVIDER_NAME.to_string(),
        param: "certificate".to_string(),
        detail: format!("not a valid X.509 certificate: {e:?}"),
    })?;
    Ok(hex::encode(Sha256::digest(&pem.contents)))
}

/// Normalize a provider-reported fingerprint for comparison
/// (providers differ on colon separators and hex case).
fn normalize_fingerprint(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != ':')
        .collect::<String>()
        .to_ascii_lowercase()
}

fn find_matching_cert<'a>(certs: &'a [CertSummary], fingerprint: &str) -> Option<&'a CertSummary> {
    certs.iter().find(|cert| {
        cert.fingerprint_sha256
            .as_deref()
            .is_some_and(|fp| normalize_fingerprint(fp) == fingerprint)
    })
}

#[async_trait]
impl CertificateUploader for ByteplusCdnUploader {
    async fn upload(&self, cert_pem: &str, privkey_pem: &str) -> Result<UploadResult> {
        let fingerprint = leaf_fingerprint_sha256(cert_pem)?;

        // 查询证书列表，避免重复上传
        let mut page_num = 1;
        loop {
            let page = self.api.list_cert_info(page_num, MAX_PAGE_SIZE).await?;
            if let Some(existing) = find_matching_cert(&page.certs, &fingerprint) {
                log::debug!(
                    "[{PROVIDER_NAME}] certificate already stored as {}, reusing",
                    existing.cert_id
                );
                return Ok(UploadResult {
                    cert_id: existing.cert_id.clone(),
                    cert_name: existing.desc.clone(),
                });
            }
            if page.certs.is_empty() || page_num.saturating_mul(MAX_PAGE_SIZE) >= page.total {
                break;
            }
            page_num += 1;
        }

        // 上传证书
        let desc = format!("certdeploy-{}", Utc::now().format("%Y%m%d%H%M%S"));
        let cert_id = self.api.add_certificate(cert_pem, privkey_pem, &desc).await?;
        log::debug!("[{PROVIDER_NAME}] certificate stored as {cert_id}");
        Ok(UploadResult {
            cert_id,
            cert_name: Some(desc),
        })
    }
}
