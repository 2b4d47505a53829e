//! BytePlus CDN 证书部署 Provider

mod deployer;
mod error;
mod http;
mod sign;
mod types;
mod uploader;

use reqwest::Client;

use crate::providers::common::create_http_client;

pub use deployer::{ByteplusCdnDeployer, ByteplusCdnDeployerBuilder, ByteplusCdnDeployerConfig};
pub use uploader::{ByteplusCdnUploader, ByteplusCdnUploaderConfig};

pub(crate) const PROVIDER_NAME: &str = "byteplus-cdn";
pub(crate) const BYTEPLUS_CDN_HOST: &str = "cdn.byteplusapi.com";
pub(crate) const BYTEPLUS_CDN_VERSION: &str = "2021-04-27";
pub(crate) const BYTEPLUS_CDN_REGION: &str = "ap-singapore-1";
pub(crate) const BYTEPLUS_CDN_SERVICE: &str = "CDN";
pub(crate) const BYTEPLUS_CDN_CONTENT_TYPE: &str = "application/json; charset=utf-8";
/// 证书上传/查询时使用的证书来源标识
pub(crate) const BYTEPLUS_CERT_SOURCE: &str = "cert_center";
/// 证书列表接口单页最大记录数
pub(crate) const MAX_PAGE_SIZE: u32 = 100;

/// BytePlus CDN SDK client.
///
/// Signs requests with HMAC-SHA256 (V4-style: date/region/service credential
/// scope) using an Access Key/Secret Key pair and speaks the CDN open API's
/// JSON-over-POST convention. Implements [`CdnApi`](crate::CdnApi); deployers
/// and uploaders hold it behind that trait so tests can substitute fakes.
///
/// # Construction
///
/// ```rust,no_run
/// use cert_deployer_provider::ByteplusCdnClient;
///
/// let client = ByteplusCdnClient::new(
///     "your-access-key".to_string(),
///     "your-secret-key".to_string(),
/// );
/// ```
pub struct ByteplusCdnClient {
    pub(crate) client: Client,
    pub(crate) access_key: String,
    pub(crate) secret_key: String,
}

impl ByteplusCdnClient {
    /// Creates a new BytePlus CDN client with default timeouts.
    pub fn new(access_key: String, secret_key: String) -> Self {
        Self {
            client: create_http_client(),
            access_key,
            secret_key,
        }
    }
}
