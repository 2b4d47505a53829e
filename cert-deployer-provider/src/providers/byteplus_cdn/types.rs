//! BytePlus CDN 开放 API 请求/响应类型

use serde::{Deserialize, Serialize};

use crate::types::{CertConfigDomain, CertConfigState, CertInfoPage, CertSummary};

// ============ 响应包装 ============

/// 开放 API 统一响应包装：`ResponseMetadata` + `Result`
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    #[serde(rename = "ResponseMetadata")]
    pub metadata: ResponseMetadata,
    #[serde(rename = "Result")]
    pub result: Option<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseMetadata {
    #[serde(rename = "RequestId")]
    pub request_id: Option<String>,
    #[serde(rename = "Error")]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message")]
    pub message: String,
}

// ============ DescribeCertConfig ============

#[derive(Debug, Serialize)]
pub(crate) struct DescribeCertConfigRequest {
    #[serde(rename = "CertId")]
    pub cert_id: String,
}

/// 分区字段可能为 null，映射时统一为空集
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DescribeCertConfigResult {
    #[serde(rename = "CertNotConfig")]
    pub cert_not_config: Option<Vec<CertConfigDomainEntry>>,
    #[serde(rename = "OtherCertConfig")]
    pub other_cert_config: Option<Vec<CertConfigDomainEntry>>,
    #[serde(rename = "SpecifiedCertConfig")]
    pub specified_cert_config: Option<Vec<CertConfigDomainEntry>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CertConfigDomainEntry {
    #[serde(rename = "Domain")]
    pub domain: String,
}

fn to_domains(entries: Option<Vec<CertConfigDomainEntry>>) -> Vec<CertConfigDomain> {
    entries
        .unwrap_or_default()
        .into_iter()
        .map(|e| CertConfigDomain { domain: e.domain })
        .collect()
}

impl From<DescribeCertConfigResult> for CertConfigState {
    fn from(result: DescribeCertConfigResult) -> Self {
        Self {
            cert_not_config: to_domains(result.cert_not_config),
            other_cert_config: to_domains(result.other_cert_config),
            specified_cert_config: to_domains(result.specified_cert_config),
        }
    }
}

// ============ BatchDeployCert ============

#[derive(Debug, Serialize)]
pub(crate) struct BatchDeployCertRequest {
    #[serde(rename = "CertId")]
    pub cert_id: String,
    #[serde(rename = "Domain")]
    pub domain: String,
}

// ============ ListCertInfo ============

#[derive(Debug, Serialize)]
pub(crate) struct ListCertInfoRequest {
    #[serde(rename = "PageNum")]
    pub page_num: u32,
    #[serde(rename = "PageSize")]
    pub page_size: u32,
    #[serde(rename = "Source")]
    pub source: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListCertInfoResult {
    #[serde(rename = "Total")]
    pub total: Option<u32>,
    #[serde(rename = "CertInfo")]
    pub cert_info: Option<Vec<CertInfoEntry>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CertInfoEntry {
    #[serde(rename = "CertId")]
    pub cert_id: String,
    #[serde(rename = "Desc")]
    pub desc: Option<String>,
    #[serde(rename = "CertFingerprint")]
    pub cert_fingerprint: Option<CertFingerprintEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CertFingerprintEntry {
    #[serde(rename = "Sha256")]
    pub sha256: Option<String>,
}

impl From<ListCertInfoResult> for CertInfoPage {
    fn from(result: ListCertInfoResult) -> Self {
        Self {
            total: result.total.unwrap_or(0),
            certs: result
                .cert_info
                .unwrap_or_default()
                .into_iter()
                .map(|entry| CertSummary {
                    cert_id: entry.cert_id,
                    desc: entry.desc,
                    fingerprint_sha256: entry.cert_fingerprint.and_then(|fp| fp.sha256),
                })
                .collect(),
        }
    }
}

// ============ AddCertificate ============

#[derive(Debug, Serialize)]
pub(crate) struct AddCertificateRequest {
    #[serde(rename = "Certificate")]
    pub certificate: String,
    #[serde(rename = "PrivateKey")]
    pub private_key: String,
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "CertInfo")]
    pub cert_info: AddCertificateInfo,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddCertificateInfo {
    #[serde(rename = "Desc")]
    pub desc: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddCertificateResult {
    #[serde(rename = "CertId")]
    pub cert_id: String,
}
