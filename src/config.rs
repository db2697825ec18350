use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    pub publishing: PublishingConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the link telemetry API, e.g. `http://127.0.0.1:5000`.
    pub base_url: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    /// Period of the node, link, history and spectrum feeds.
    #[serde(default = "default_fast_interval_ms")]
    pub fast_interval_ms: u64,
    /// Period of the event log and message flow feeds.
    #[serde(default = "default_slow_interval_ms")]
    pub slow_interval_ms: u64,
    /// Points kept per history chart series (oldest dropped first).
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

fn default_fast_interval_ms() -> u64 {
    2000
}

fn default_slow_interval_ms() -> u64 {
    5000
}

fn default_history_window() -> usize {
    60
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            fast_interval_ms: default_fast_interval_ms(),
            slow_interval_ms: default_slow_interval_ms(),
            history_window: default_history_window(),
        }
    }
}

impl PollingConfig {
    pub fn fast_interval(&self) -> Duration {
        Duration::from_millis(self.fast_interval_ms)
    }

    pub fn slow_interval(&self) -> Duration {
        Duration::from_millis(self.slow_interval_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishingConfig {
    /// Max number of board updates buffered for /ws/board (slow clients may lag).
    pub broadcast_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    /// How often to log app stats (ws clients, cycles ok/failed) at INFO level.
    pub stats_log_interval_secs: u64,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            self.upstream.base_url.starts_with("http://")
                || self.upstream.base_url.starts_with("https://"),
            "upstream.base_url must be an http(s) URL, got {:?}",
            self.upstream.base_url
        );
        anyhow::ensure!(
            self.upstream.request_timeout_ms > 0,
            "upstream.request_timeout_ms must be > 0, got {}",
            self.upstream.request_timeout_ms
        );
        anyhow::ensure!(
            self.polling.fast_interval_ms > 0,
            "polling.fast_interval_ms must be > 0, got {}",
            self.polling.fast_interval_ms
        );
        anyhow::ensure!(
            self.polling.slow_interval_ms > 0,
            "polling.slow_interval_ms must be > 0, got {}",
            self.polling.slow_interval_ms
        );
        anyhow::ensure!(
            self.polling.history_window > 0,
            "polling.history_window must be > 0, got {}",
            self.polling.history_window
        );
        anyhow::ensure!(
            self.publishing.broadcast_capacity > 0,
            "publishing.broadcast_capacity must be > 0, got {}",
            self.publishing.broadcast_capacity
        );
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        Ok(())
    }
}
