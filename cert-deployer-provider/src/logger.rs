//! Deployment event logging capability.
//!
//! Deployers emit per-step events (certificate uploaded, domain bound) through
//! a [`DeployLogger`] so the surrounding system can persist a deploy timeline.
//! This is separate from the crate's ambient `log` diagnostics.

use crate::utils::log_sanitizer::truncate_for_log;

/// Observability sink for deployment events.
///
/// Fire-and-forget by contract: implementations must not fail, and callers
/// never wait on them. Injected at deployer construction; when none is
/// supplied, [`NoopLogger`] is used — an absent logger is never represented as
/// an optional reference inside the deployer.
pub trait DeployLogger: Send + Sync {
    /// Record a deployment event with a structured payload.
    fn logt(&self, message: &str, payload: &serde_json::Value);
}

/// Logger that discards every event. The default when none is injected.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl DeployLogger for NoopLogger {
    fn logt(&self, _message: &str, _payload: &serde_json::Value) {}
}

/// Logger that forwards events onto the `log` facade at `info` level.
///
/// Payloads are truncated before logging so raw provider responses never land
/// in logs whole.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogForwarder;

impl DeployLogger for LogForwarder {
    fn logt(&self, message: &str, payload: &serde_json::Value) {
        log::info!("{message}: {}", truncate_for_log(&payload.to_string()));
    }
}
