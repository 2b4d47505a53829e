//! Provider factory functions and metadata.

use std::sync::Arc;

use crate::error::Result;
use crate::traits::{CertificateUploader, Deployer};
use crate::types::{ProviderCredentials, ProviderMetadata};

#[cfg(feature = "byteplus-cdn")]
use crate::providers::{
    ByteplusCdnDeployer, ByteplusCdnDeployerConfig, ByteplusCdnUploader,
    ByteplusCdnUploaderConfig,
};

/// Creates a [`Deployer`] instance from the given credentials and target domain.
///
/// The concrete provider type is determined by the [`ProviderCredentials`]
/// variant. The returned deployer is wrapped in `Arc<dyn Deployer>` for easy
/// sharing across async tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use cert_deployer_provider::{create_deployer, ProviderCredentials};
///
/// let deployer = create_deployer(
///     ProviderCredentials::ByteplusCdn {
///         access_key: "your-access-key".to_string(),
///         secret_key: "your-secret-key".to_string(),
///     },
///     "*.example.com",
/// ).unwrap();
/// ```
pub fn create_deployer(
    credentials: ProviderCredentials,
    domain: impl Into<String>,
) -> Result<Arc<dyn Deployer>> {
    match credentials {
        #[cfg(feature = "byteplus-cdn")]
        ProviderCredentials::ByteplusCdn {
            access_key,
            secret_key,
        } => Ok(Arc::new(ByteplusCdnDeployer::new(
            ByteplusCdnDeployerConfig {
                access_key,
                secret_key,
                domain: domain.into(),
            },
        )?)),
    }
}

/// Creates a standalone [`CertificateUploader`] from the given credentials.
///
/// Useful when the surrounding system only needs to push a certificate into a
/// provider's store without binding it to domains.
pub fn create_uploader(credentials: ProviderCredentials) -> Result<Arc<dyn CertificateUploader>> {
    match credentials {
        #[cfg(feature = "byteplus-cdn")]
        ProviderCredentials::ByteplusCdn {
            access_key,
            secret_key,
        } => Ok(Arc::new(ByteplusCdnUploader::new(
            &ByteplusCdnUploaderConfig {
                access_key,
                secret_key,
            },
        )?)),
    }
}

/// Returns metadata for all providers enabled via feature flags.
///
/// Useful for building dynamic UIs that enumerate available providers
/// and their required credential fields.
pub fn get_all_provider_metadata() -> Vec<ProviderMetadata> {
    vec![
        #[cfg(feature = "byteplus-cdn")]
        ByteplusCdnDeployer::metadata(),
    ]
}
