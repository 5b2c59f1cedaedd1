//! Application configuration
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! defaults below.

use anyhow::Context;
use app_core::AnalysisConfig;
use archive_client::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use storage::KvConfig;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Base URL of the archive API
    pub api_base_url: String,
    /// HTTP timeout in seconds
    pub request_timeout_secs: u64,
    /// On-disk session store; None keeps the session in memory only
    pub storage_path: Option<String>,
    /// Simulated thesis analysis time in milliseconds
    pub analysis_delay_ms: u64,
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: ClientConfig::default().base_url,
            request_timeout_secs: 30,
            storage_path: Some(KvConfig::default().path),
            analysis_delay_ms: 3000,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Read a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Set the API base URL
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Set the session store location; None for memory only
    pub fn with_storage_path(mut self, path: Option<String>) -> Self {
        self.storage_path = path;
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_secs = timeout.as_secs();
        self
    }

    /// Set the simulated analysis time
    pub fn with_analysis_delay(mut self, delay: Duration) -> Self {
        self.analysis_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// HTTP client settings
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_base_url.clone())
            .with_timeout(Duration::from_secs(self.request_timeout_secs))
    }

    /// Session store settings, if on disk
    pub fn kv_config(&self) -> Option<KvConfig> {
        self.storage_path.as_ref().map(|path| KvConfig::new(path.clone()))
    }

    /// Simulated analyzer settings
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig::default().with_delay(Duration::from_millis(self.analysis_delay_ms))
    }
}
