//! BytePlus CDN 部署流程测试（基于假协作方，无网络）

#![cfg(feature = "byteplus-cdn")]

mod common;

use cert_deployer_provider::{Deployer as _, DeployerError};
use common::{
    FakeCdnApi, FakeUploader, RecordingLogger, cert_config_state, deployer_with_fakes,
};

// ============ 精确域名 ============

#[tokio::test]
async fn exact_domain_binds_without_provider_query() {
    let api = FakeCdnApi::new();
    let uploader = FakeUploader::ok("cert-1");
    let logger = RecordingLogger::new();
    let deployer = deployer_with_fakes("example.com", &api, &uploader, &logger);

    let result = deployer.deploy("CERT", "KEY").await;
    assert!(result.is_ok(), "expected Ok(..), got {result:?}");

    // 配置状态查询不应发生，域名直接关联
    assert_eq!(api.describe_call_count(), 0);
    assert_eq!(api.deployed_domains(), vec!["example.com"]);
}

#[tokio::test]
async fn exact_domain_rebinding_is_idempotent() {
    let api = FakeCdnApi::new();
    let uploader = FakeUploader::ok("cert-1");
    let logger = RecordingLogger::new();
    let deployer = deployer_with_fakes("example.com", &api, &uploader, &logger);

    let first = deployer.deploy("CERT", "KEY").await;
    let second = deployer.deploy("CERT", "KEY").await;
    assert!(first.is_ok() && second.is_ok());
    assert_eq!(
        api.deployed_domains(),
        vec!["example.com", "example.com"],
        "every deploy issues its own association call"
    );
}

// ============ 泛域名解析 ============

#[tokio::test]
async fn wildcard_binds_unconfigured_then_other_cert_domains_in_order() {
    let api = FakeCdnApi::with_state(cert_config_state(
        &["a.example.com"],
        &["b.example.com"],
        &[],
    ));
    let uploader = FakeUploader::ok("cert-1");
    let logger = RecordingLogger::new();
    let deployer = deployer_with_fakes("*.example.com", &api, &uploader, &logger);

    let result = deployer.deploy("CERT", "KEY").await;
    assert!(result.is_ok(), "expected Ok(..), got {result:?}");

    assert_eq!(api.describe_call_count(), 1);
    assert_eq!(
        api.deployed_domains(),
        vec!["a.example.com", "b.example.com"]
    );
}

#[tokio::test]
async fn wildcard_partition_order_is_not_configured_before_other_cert() {
    let api = FakeCdnApi::with_state(cert_config_state(
        &["n1.example.com", "n2.example.com"],
        &["o1.example.com"],
        &[],
    ));
    let uploader = FakeUploader::ok("cert-1");
    let logger = RecordingLogger::new();
    let deployer = deployer_with_fakes("*.example.com", &api, &uploader, &logger);

    let result = deployer.deploy("CERT", "KEY").await;
    assert!(result.is_ok(), "expected Ok(..), got {result:?}");
    assert_eq!(
        api.deployed_domains(),
        vec!["n1.example.com", "n2.example.com", "o1.example.com"]
    );
}

#[tokio::test]
async fn wildcard_skips_domains_already_carrying_this_certificate() {
    let api = FakeCdnApi::with_state(cert_config_state(
        &["n1.example.com"],
        &[],
        &["t1.example.com"],
    ));
    let uploader = FakeUploader::ok("cert-1");
    let logger = RecordingLogger::new();
    let deployer = deployer_with_fakes("*.example.com", &api, &uploader, &logger);

    let result = deployer.deploy("CERT", "KEY").await;
    assert!(result.is_ok(), "expected Ok(..), got {result:?}");
    assert_eq!(api.deployed_domains(), vec!["n1.example.com"]);
}

#[tokio::test]
async fn wildcard_fully_configured_is_a_silent_no_op() {
    let api = FakeCdnApi::with_state(cert_config_state(&[], &[], &["a.example.com"]));
    let uploader = FakeUploader::ok("cert-1");
    let logger = RecordingLogger::new();
    let deployer = deployer_with_fakes("*.example.com", &api, &uploader, &logger);

    let result = deployer.deploy("CERT", "KEY").await;
    assert!(result.is_ok(), "expected Ok(..), got {result:?}");
    assert_eq!(api.describe_call_count(), 1);
    assert!(
        api.deployed_domains().is_empty(),
        "no association calls for a fully-configured certificate"
    );
}

#[tokio::test]
async fn wildcard_with_no_eligible_domain_fails_with_domain_not_found() {
    let api = FakeCdnApi::with_state(cert_config_state(&[], &[], &[]));
    let uploader = FakeUploader::ok("cert-1");
    let logger = RecordingLogger::new();
    let deployer = deployer_with_fakes("*.example.com", &api, &uploader, &logger);

    let result = deployer.deploy("CERT", "KEY").await;
    assert!(
        matches!(
            &result,
            Err(DeployerError::DomainNotFound { domain, .. }) if domain == "*.example.com"
        ),
        "unexpected result: {result:?}"
    );
    assert!(api.deployed_domains().is_empty());
}

#[tokio::test]
async fn wildcard_resolution_failure_aborts_deploy() {
    let api = FakeCdnApi::with_describe_error(DeployerError::NetworkError {
        provider: "byteplus-cdn".to_string(),
        detail: "cdn.DescribeCertConfig: connection reset".to_string(),
    });
    let uploader = FakeUploader::ok("cert-1");
    let logger = RecordingLogger::new();
    let deployer = deployer_with_fakes("*.example.com", &api, &uploader, &logger);

    let result = deployer.deploy("CERT", "KEY").await;
    assert!(
        matches!(&result, Err(DeployerError::NetworkError { .. })),
        "unexpected result: {result:?}"
    );
    assert!(api.deployed_domains().is_empty());
}

// ============ 关联失败聚合 ============

#[tokio::test]
async fn association_failure_still_attempts_remaining_domains() {
    let api = FakeCdnApi::with_state(cert_config_state(
        &["a.example.com"],
        &["b.example.com"],
        &[],
    ));
    api.fail_domain("a.example.com");
    let uploader = FakeUploader::ok("cert-1");
    let logger = RecordingLogger::new();
    let deployer = deployer_with_fakes("*.example.com", &api, &uploader, &logger);

    let result = deployer.deploy("CERT", "KEY").await;

    // 两个域名都被尝试过
    assert_eq!(
        api.deployed_domains(),
        vec!["a.example.com", "b.example.com"]
    );

    // 聚合错误只包含失败的域名
    assert!(
        matches!(&result, Err(DeployerError::PartialFailure { .. })),
        "expected PartialFailure, got {result:?}"
    );
    let Err(DeployerError::PartialFailure { failures, .. }) = result else {
        return;
    };
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].domain, "a.example.com");

    // 成功域名的事件仍然发出
    let messages = logger.messages();
    assert!(
        messages
            .iter()
            .any(|m| m == "certificate bound to domain b.example.com"),
        "missing success event for b.example.com: {messages:?}"
    );
    assert!(
        !messages
            .iter()
            .any(|m| m == "certificate bound to domain a.example.com"),
        "failed domain must not emit a success event"
    );
}

#[tokio::test]
async fn aggregated_failures_preserve_processing_order() {
    let api = FakeCdnApi::with_state(cert_config_state(
        &["a.example.com", "b.example.com", "c.example.com"],
        &["d.example.com"],
        &[],
    ));
    api.fail_domain("a.example.com");
    api.fail_domain("c.example.com");
    let uploader = FakeUploader::ok("cert-1");
    let logger = RecordingLogger::new();
    let deployer = deployer_with_fakes("*.example.com", &api, &uploader, &logger);

    let result = deployer.deploy("CERT", "KEY").await;

    assert_eq!(api.deployed_domains().len(), 4, "every domain is attempted");

    assert!(
        matches!(&result, Err(DeployerError::PartialFailure { .. })),
        "expected PartialFailure, got {result:?}"
    );
    let Err(DeployerError::PartialFailure { failures, .. }) = result else {
        return;
    };
    let failed: Vec<&str> = failures.iter().map(|f| f.domain.as_str()).collect();
    assert_eq!(failed, vec!["a.example.com", "c.example.com"]);
}

#[tokio::test]
async fn all_associations_failing_reports_every_domain() {
    let api = FakeCdnApi::with_state(cert_config_state(
        &["a.example.com", "b.example.com"],
        &[],
        &[],
    ));
    api.fail_domain("a.example.com");
    api.fail_domain("b.example.com");
    let uploader = FakeUploader::ok("cert-1");
    let logger = RecordingLogger::new();
    let deployer = deployer_with_fakes("*.example.com", &api, &uploader, &logger);

    let result = deployer.deploy("CERT", "KEY").await;
    assert!(
        matches!(&result, Err(DeployerError::PartialFailure { .. })),
        "expected PartialFailure, got {result:?}"
    );
    let Err(DeployerError::PartialFailure { failures, .. }) = result else {
        return;
    };
    assert_eq!(failures.len(), 2);
    // 渲染时逐条列出
    let rendered = DeployerError::PartialFailure {
        provider: "byteplus-cdn".to_string(),
        failures,
    }
    .to_string();
    assert!(rendered.contains("a.example.com"));
    assert!(rendered.contains("b.example.com"));
}

// ============ 上传失败 ============

#[tokio::test]
async fn upload_failure_prevents_resolution_and_association() {
    let api = FakeCdnApi::new();
    let uploader = FakeUploader::failing();
    let logger = RecordingLogger::new();
    let deployer = deployer_with_fakes("*.example.com", &api, &uploader, &logger);

    let result = deployer.deploy("CERT", "KEY").await;
    assert!(
        matches!(&result, Err(DeployerError::NetworkError { .. })),
        "unexpected result: {result:?}"
    );
    assert_eq!(uploader.call_count(), 1);
    assert_eq!(api.describe_call_count(), 0);
    assert!(api.deployed_domains().is_empty());
    assert!(
        logger.messages().is_empty(),
        "no events when upload already failed"
    );
}

// ============ 部署事件 ============

#[tokio::test]
async fn successful_deploy_emits_upload_and_binding_events() {
    let api = FakeCdnApi::new();
    let uploader = FakeUploader::ok("cert-1");
    let logger = RecordingLogger::new();
    let deployer = deployer_with_fakes("img.example.com", &api, &uploader, &logger);

    let result = deployer.deploy("CERT", "KEY").await;
    assert!(result.is_ok(), "expected Ok(..), got {result:?}");

    let messages = logger.messages();
    assert_eq!(
        messages,
        vec![
            "certificate file uploaded".to_string(),
            "certificate bound to domain img.example.com".to_string(),
        ]
    );
}
