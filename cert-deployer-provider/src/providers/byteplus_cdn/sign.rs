//! BytePlus HMAC-SHA256 (V4 风格) 签名

use sha2::{Digest, Sha256};

use crate::providers::common::hmac_sha256;

use super::{
    BYTEPLUS_CDN_CONTENT_TYPE, BYTEPLUS_CDN_HOST, BYTEPLUS_CDN_REGION, BYTEPLUS_CDN_SERVICE,
    ByteplusCdnClient,
};

impl ByteplusCdnClient {
    /// 生成 HMAC-SHA256 签名
    ///
    /// `x_date` 为 `YYYYMMDD'T'HHMMSS'Z'` 格式的 UTC 时间戳，
    /// `payload_hash` 为请求体的 SHA-256 十六进制摘要。
    pub(crate) fn sign(
        &self,
        method: &str,
        canonical_query: &str,
        payload_hash: &str,
        x_date: &str,
    ) -> String {
        let short_date = x_date.get(..8).unwrap_or(x_date);

        // 1. 拼接规范请求串
        let canonical_uri = "/";
        let canonical_headers = format!(
            "content-type:{BYTEPLUS_CDN_CONTENT_TYPE}\nhost:{BYTEPLUS_CDN_HOST}\nx-content-sha256:{payload_hash}\nx-date:{x_date}\n"
        );
        let signed_headers = "content-type;host;x-content-sha256;x-date";
        let canonical_request = format!(
            "{method}\n{canonical_uri}\n{canonical_query}\n{canonical_headers}\n{signed_headers}\n{payload_hash}"
        );

        // 2. 拼接待签名字符串
        let algorithm = "HMAC-SHA256";
        let credential_scope =
            format!("{short_date}/{BYTEPLUS_CDN_REGION}/{BYTEPLUS_CDN_SERVICE}/request");
        let hashed_canonical_request = hex::encode(Sha256::digest(canonical_request.as_bytes()));
        let string_to_sign =
            format!("{algorithm}\n{x_date}\n{credential_scope}\n{hashed_canonical_request}");

        // 3. 计算签名
        let secret_date = hmac_sha256(self.secret_key.as_bytes(), short_date.as_bytes());
        let secret_region = hmac_sha256(&secret_date, BYTEPLUS_CDN_REGION.as_bytes());
        let secret_service = hmac_sha256(&secret_region, BYTEPLUS_CDN_SERVICE.as_bytes());
        let secret_signing = hmac_sha256(&secret_service, b"request");
        let signature = hex::encode(hmac_sha256(&secret_signing, string_to_sign.as_bytes()));

        // 4. 拼接 Authorization
        format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            algorithm, self.access_key, credential_scope, signed_headers, signature
        )
    }
}
