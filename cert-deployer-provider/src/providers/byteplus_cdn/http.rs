//! BytePlus CDN HTTP 请求方法（签名 JSON POST + `ResponseMetadata` 包装解析）

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{DeployerError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{CdnApi, ErrorContext, ProviderErrorMapper, RawApiError};
use crate::types::{CertConfigState, CertInfoPage};
use crate::utils::log_sanitizer::truncate_for_log;

use super::types::{
    AddCertificateInfo, AddCertificateRequest, AddCertificateResult, ApiResponse,
    BatchDeployCertRequest, DescribeCertConfigRequest, DescribeCertConfigResult,
    ListCertInfoRequest, ListCertInfoResult,
};
use super::{
    BYTEPLUS_CDN_CONTENT_TYPE, BYTEPLUS_CDN_HOST, BYTEPLUS_CDN_VERSION, BYTEPLUS_CERT_SOURCE,
    ByteplusCdnClient, MAX_PAGE_SIZE,
};

impl ByteplusCdnClient {
    /// 执行 BytePlus 开放 API 请求
    ///
    /// 参数通过 `Action`/`Version` 查询串路由，请求体为 JSON。
    /// 传输层错误会带上失败的操作名（`cdn.<Action>`）后再向上传播。
    pub(crate) async fn request<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        action: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let operation = format!("cdn.{action}");

        // 1. 序列化请求体
        let payload = serde_json::to_string(body).map_err(|e| {
            DeployerError::SerializationError {
                provider: self.provider_name().to_string(),
                detail: e.to_string(),
            }
            .in_operation(&operation)
        })?;

        log::debug!("Request Body: {}", truncate_for_log(&payload));

        // 2. 生成签名
        let payload_hash = hex::encode(Sha256::digest(payload.as_bytes()));
        let x_date = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
        let canonical_query = format!("Action={action}&Version={BYTEPLUS_CDN_VERSION}");
        let authorization = self.sign("POST", &canonical_query, &payload_hash, &x_date);

        // 3. 发送请求（使用 HttpUtils）
        let url = format!("https://{BYTEPLUS_CDN_HOST}/?{canonical_query}");
        let request = self
            .client
            .post(&url)
            .header("Content-Type", BYTEPLUS_CDN_CONTENT_TYPE)
            .header("Host", BYTEPLUS_CDN_HOST)
            .header("X-Date", &x_date)
            .header("X-Content-Sha256", &payload_hash)
            .header("Authorization", authorization)
            .body(payload);

        let (status, response_text) = HttpUtils::execute_request(
            request,
            self.provider_name(),
            "POST",
            &format!("Action: {action}"),
        )
        .await
        .map_err(|e| e.in_operation(&operation))?;

        // 4. 解析响应包装
        let envelope: ApiResponse<T> =
            match HttpUtils::parse_json(&response_text, self.provider_name()) {
                Ok(envelope) => envelope,
                // 4xx/5xx 且无法解析为结构化错误时，返回通用 NetworkError
                Err(_) if status >= 400 => {
                    return Err(DeployerError::NetworkError {
                        provider: self.provider_name().to_string(),
                        detail: format!(
                            "{operation}: HTTP {status}: {}",
                            truncate_for_log(&response_text)
                        ),
                    });
                }
                Err(e) => return Err(e.in_operation(&operation)),
            };

        // 5. 检查错误
        if let Some(error) = envelope.metadata.error {
            log::error!(
                "API error: {} - {} (RequestId: {})",
                error.code,
                error.message,
                envelope.metadata.request_id.as_deref().unwrap_or("-")
            );
            return Err(self.map_error(RawApiError::with_code(&error.code, &error.message), ctx));
        }

        // 6. 提取数据
        envelope
            .result
            .ok_or_else(|| self.parse_error("Missing Result in response").in_operation(&operation))
    }
}

#[async_trait]
impl CdnApi for ByteplusCdnClient {
    async fn describe_cert_config(&self, cert_id: &str) -> Result<CertConfigState> {
        // REF: https://docs.byteplus.com/en/docs/byteplus-cdn/reference-describecertconfig-9ea17
        let req = DescribeCertConfigRequest {
            cert_id: cert_id.to_string(),
        };
        let ctx = ErrorContext {
            cert_id: Some(cert_id.to_string()),
            ..Default::default()
        };
        let result: DescribeCertConfigResult =
            self.request("DescribeCertConfig", &req, ctx).await?;
        Ok(result.into())
    }

    async fn batch_deploy_cert(&self, cert_id: &str, domain: &str) -> Result<serde_json::Value> {
        // REF: https://docs.byteplus.com/en/docs/byteplus-cdn/reference-batchdeploycert
        let req = BatchDeployCertRequest {
            cert_id: cert_id.to_string(),
            domain: domain.to_string(),
        };
        let ctx = ErrorContext {
            cert_id: Some(cert_id.to_string()),
            domain: Some(domain.to_string()),
        };
        self.request("BatchDeployCert", &req, ctx).await
    }

    async fn list_cert_info(&self, page_num: u32, page_size: u32) -> Result<CertInfoPage> {
        let req = ListCertInfoRequest {
            page_num: page_num.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            source: BYTEPLUS_CERT_SOURCE.to_string(),
        };
        let result: ListCertInfoResult = self
            .request("ListCertInfo", &req, ErrorContext::default())
            .await?;
        Ok(result.into())
    }

    async fn add_certificate(
        &self,
        cert_pem: &str,
        privkey_pem: &str,
        desc: &str,
    ) -> Result<String> {
        let req = AddCertificateRequest {
            certificate: cert_pem.to_string(),
            private_key: privkey_pem.to_string(),
            source: BYTEPLUS_CERT_SOURCE.to_string(),
            cert_info: AddCertificateInfo {
                desc: desc.to_string(),
            },
        };
        let result: AddCertificateResult = self
            .request("AddCertificate", &req, ErrorContext::default())
            .await?;
        Ok(result.cert_id)
    }
}
