//! CDN deployment provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

#[cfg(feature = "byteplus-cdn")]
mod byteplus_cdn;

#[cfg(feature = "byteplus-cdn")]
pub use byteplus_cdn::{
    ByteplusCdnClient, ByteplusCdnDeployer, ByteplusCdnDeployerBuilder, ByteplusCdnDeployerConfig,
    ByteplusCdnUploader, ByteplusCdnUploaderConfig,
};
