//! # cert-deployer-provider
//!
//! A CDN certificate deployment provider library: upload issued TLS
//! certificates to a provider's certificate store and bind them to accelerated
//! domains.
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Auth Method |
//! |----------|-------------|-------------|
//! | [BytePlus CDN](https://www.byteplus.com/en/product/cdn) | `byteplus-cdn` | HMAC-SHA256 (AK/SK) |
//!
//! ## Feature Flags
//!
//! ### Provider Selection
//!
//! - **`all-providers`** *(default)* — Enable all providers listed above.
//! - **`byteplus-cdn`** — Enable only the BytePlus CDN provider.
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation.
//!
//! ## Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! cert-deployer-provider = { version = "0.1", features = ["all-providers"] }
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cert_deployer_provider::{create_deployer, Deployer as _, ProviderCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Create a deployer from credentials and a target domain pattern.
//!     //    Exact domains bind directly; `*.` wildcards are resolved against
//!     //    the provider's per-certificate configuration state.
//!     let credentials = ProviderCredentials::ByteplusCdn {
//!         access_key: "your-access-key".to_string(),
//!         secret_key: "your-secret-key".to_string(),
//!     };
//!     let deployer = create_deployer(credentials, "*.example.com")?;
//!
//!     // 2. Deploy an issued certificate + private key (PEM).
//!     let cert_pem = std::fs::read_to_string("cert.pem")?;
//!     let privkey_pem = std::fs::read_to_string("privkey.pem")?;
//!     deployer.deploy(&cert_pem, &privkey_pem).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Deployment Events
//!
//! Deployers emit per-step events (certificate uploaded, domain bound) through
//! the [`DeployLogger`] capability. The default is [`NoopLogger`]; inject
//! [`LogForwarder`] (or your own sink) to capture a deploy timeline:
//!
//! ```rust,no_run
//! # use std::sync::Arc;
//! # use cert_deployer_provider::*;
//! let deployer = ByteplusCdnDeployer::builder(ByteplusCdnDeployerConfig {
//!     access_key: "ak".to_string(),
//!     secret_key: "sk".to_string(),
//!     domain: "img.example.com".to_string(),
//! })
//! .logger(Arc::new(LogForwarder))
//! .build()?;
//! # Ok::<(), DeployerError>(())
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, DeployerError>`](DeployerError). The error
//! enum provides structured variants for common failure modes:
//!
//! - [`DeployerError::InvalidCredentials`] — authentication failed
//! - [`DeployerError::DomainNotFound`] — no accelerated domain is eligible for
//!   the certificate (configuration mismatch)
//! - [`DeployerError::PartialFailure`] — one or more domain associations failed;
//!   every domain was still attempted and every failure is listed in order
//!
//! Domain association is best-effort by design: a provider error on one domain
//! never prevents the remaining domains from being attempted, but any recorded
//! failure makes the overall deployment fail. This crate performs no transport
//! retries; transient errors (`NetworkError`, `Timeout`, `RateLimited`) are
//! reported once and retry policy is left to the caller.

mod error;
mod factory;
mod http_client;
mod logger;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{AssociationFailure, DeployerError, Result};

// Re-export factory functions
pub use factory::{create_deployer, create_uploader, get_all_provider_metadata};

// Re-export capability traits (internal traits are not exported)
pub use traits::{CdnApi, CertificateUploader, Deployer};

// Re-export the logging capability
pub use logger::{DeployLogger, LogForwarder, NoopLogger};

// Re-export types
pub use types::{
    CertConfigDomain, CertConfigState, CertInfoPage, CertSummary, CredentialValidationError,
    DeployResult, FieldType, ProviderCredentialField, ProviderCredentials, ProviderFeatures,
    ProviderLimits, ProviderMetadata, ProviderType, UploadResult,
};

// Re-export concrete providers (behind feature flags)
#[cfg(feature = "byteplus-cdn")]
pub use providers::{
    ByteplusCdnClient, ByteplusCdnDeployer, ByteplusCdnDeployerBuilder, ByteplusCdnDeployerConfig,
    ByteplusCdnUploader, ByteplusCdnUploaderConfig,
};
