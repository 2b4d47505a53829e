//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cert_deployer_provider::{
    ByteplusCdnDeployer, ByteplusCdnDeployerConfig, CdnApi, CertConfigDomain, CertConfigState,
    CertInfoPage, CertificateUploader, DeployLogger, DeployerError, Result, UploadResult,
};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        match $expr {
            Ok(val) => val,
            Err(err) => panic!("expected Ok(..), got Err({err:?})"),
        }
    }};
    ($expr:expr, $($msg:tt)+) => {{
        match $expr {
            Ok(val) => val,
            Err(err) => panic!("{}: {err:?}", format_args!($($msg)+)),
        }
    }};
}

/// 构造证书配置状态（三分区各取域名列表）
pub fn cert_config_state(
    not_config: &[&str],
    other_cert: &[&str],
    this_cert: &[&str],
) -> CertConfigState {
    let to_entries = |domains: &[&str]| -> Vec<CertConfigDomain> {
        domains.iter().map(|d| CertConfigDomain::new(*d)).collect()
    };
    CertConfigState {
        cert_not_config: to_entries(not_config),
        other_cert_config: to_entries(other_cert),
        specified_cert_config: to_entries(this_cert),
    }
}

/// 可编程的 `CdnApi` 假实现：记录每次调用，按域名注入失败
#[derive(Default)]
pub struct FakeCdnApi {
    describe_state: Mutex<Option<CertConfigState>>,
    describe_error: Mutex<Option<DeployerError>>,
    failing_domains: Mutex<Vec<String>>,
    describe_calls: Mutex<Vec<String>>,
    batch_calls: Mutex<Vec<(String, String)>>,
}

impl FakeCdnApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// 设定 `DescribeCertConfig` 返回的配置状态
    pub fn with_state(state: CertConfigState) -> Arc<Self> {
        let fake = Self::default();
        *fake.describe_state.lock().unwrap() = Some(state);
        Arc::new(fake)
    }

    /// 设定 `DescribeCertConfig` 直接返回错误
    pub fn with_describe_error(error: DeployerError) -> Arc<Self> {
        let fake = Self::default();
        *fake.describe_error.lock().unwrap() = Some(error);
        Arc::new(fake)
    }

    /// 指定某个域名的 `BatchDeployCert` 调用失败
    pub fn fail_domain(&self, domain: &str) {
        self.failing_domains.lock().unwrap().push(domain.to_string());
    }

    /// `DescribeCertConfig` 的调用次数
    pub fn describe_call_count(&self) -> usize {
        self.describe_calls.lock().unwrap().len()
    }

    /// `BatchDeployCert` 调用的域名，按调用顺序
    pub fn deployed_domains(&self) -> Vec<String> {
        self.batch_calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, domain)| domain.clone())
            .collect()
    }
}

#[async_trait]
impl CdnApi for FakeCdnApi {
    async fn describe_cert_config(&self, cert_id: &str) -> Result<CertConfigState> {
        self.describe_calls.lock().unwrap().push(cert_id.to_string());
        if let Some(error) = self.describe_error.lock().unwrap().clone() {
            return Err(error);
        }
        Ok(self
            .describe_state
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_default())
    }

    async fn batch_deploy_cert(&self, cert_id: &str, domain: &str) -> Result<serde_json::Value> {
        self.batch_calls
            .lock()
            .unwrap()
            .push((cert_id.to_string(), domain.to_string()));
        if self
            .failing_domains
            .lock()
            .unwrap()
            .iter()
            .any(|d| d == domain)
        {
            return Err(DeployerError::NetworkError {
                provider: "byteplus-cdn".to_string(),
                detail: format!("cdn.BatchDeployCert: injected failure for {domain}"),
            });
        }
        Ok(serde_json::json!({ "Domain": domain, "Status": "success" }))
    }

    async fn list_cert_info(&self, _page_num: u32, _page_size: u32) -> Result<CertInfoPage> {
        Ok(CertInfoPage::default())
    }

    async fn add_certificate(
        &self,
        _cert_pem: &str,
        _privkey_pem: &str,
        _desc: &str,
    ) -> Result<String> {
        Ok("cert-fake".to_string())
    }
}

/// 固定结果的上传器假实现，记录调用次数
pub struct FakeUploader {
    result: std::result::Result<String, DeployerError>,
    calls: Mutex<usize>,
}

impl FakeUploader {
    /// 总是成功并返回给定证书 ID
    pub fn ok(cert_id: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(cert_id.to_string()),
            calls: Mutex::new(0),
        })
    }

    /// 总是失败
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            result: Err(DeployerError::NetworkError {
                provider: "byteplus-cdn".to_string(),
                detail: "cdn.AddCertificate: injected upload failure".to_string(),
            }),
            calls: Mutex::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl CertificateUploader for FakeUploader {
    async fn upload(&self, _cert_pem: &str, _privkey_pem: &str) -> Result<UploadResult> {
        *self.calls.lock().unwrap() += 1;
        match &self.result {
            Ok(cert_id) => Ok(UploadResult {
                cert_id: cert_id.clone(),
                cert_name: None,
            }),
            Err(e) => Err(e.clone()),
        }
    }
}

/// 记录所有部署事件的日志假实现
#[derive(Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<(String, serde_json::Value)>>,
}

impl RecordingLogger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn messages(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(message, _)| message.clone())
            .collect()
    }
}

impl DeployLogger for RecordingLogger {
    fn logt(&self, message: &str, payload: &serde_json::Value) {
        self.events
            .lock()
            .unwrap()
            .push((message.to_string(), payload.clone()));
    }
}

/// 用假协作方构建部署器
pub fn deployer_with_fakes(
    domain: &str,
    api: &Arc<FakeCdnApi>,
    uploader: &Arc<FakeUploader>,
    logger: &Arc<RecordingLogger>,
) -> ByteplusCdnDeployer {
    ByteplusCdnDeployer::builder(ByteplusCdnDeployerConfig {
        access_key: "test-ak".to_string(),
        secret_key: "test-sk".to_string(),
        domain: domain.to_string(),
    })
    .api(api.clone())
    .uploader(uploader.clone())
    .logger(logger.clone())
    .build()
    .expect("deployer construction with fakes should succeed")
}
