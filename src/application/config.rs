use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::thresholds::DiagnosisThresholds;

/// Top-level application configuration loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub probes: ProbeSettings,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// General settings: monitor polling interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
}

/// Which hosts to ping and resolve, and how hard to try.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeSettings {
    #[serde(default = "default_ping_targets")]
    pub ping_targets: Vec<String>,
    #[serde(default = "default_dns_domains")]
    pub dns_domains: Vec<String>,
    #[serde(default = "default_ping_count")]
    pub ping_count: u32,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_external_ip_url")]
    pub external_ip_url: String,
    #[serde(default = "default_true")]
    pub ping_gateway: bool,
}

/// Limits for the degraded-connection rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default = "default_latency")]
    pub latency_ms: f64,
    #[serde(default = "default_packet_loss")]
    pub packet_loss_percent: f64,
}

/// Report channels: terminal, log file, webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_true")]
    pub terminal: bool,
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default = "default_webhook_min_severity")]
    pub webhook_min_severity: Severity,
}

// --- Defaults ---

const fn default_interval() -> u64 {
    10
}

fn default_ping_targets() -> Vec<String> {
    vec!["8.8.8.8".into(), "google.com".into()]
}

fn default_dns_domains() -> Vec<String> {
    vec!["google.com".into()]
}

const fn default_ping_count() -> u32 {
    4
}

const fn default_timeout() -> u64 {
    5
}

fn default_external_ip_url() -> String {
    "https://api.ipify.org".into()
}

const fn default_true() -> bool {
    true
}

const fn default_latency() -> f64 {
    150.0
}

const fn default_packet_loss() -> f64 {
    20.0
}

const fn default_webhook_min_severity() -> Severity {
    Severity::Warning
}

// --- Default impls ---

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
        }
    }
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            ping_targets: default_ping_targets(),
            dns_domains: default_dns_domains(),
            ping_count: default_ping_count(),
            timeout_secs: default_timeout(),
            external_ip_url: default_external_ip_url(),
            ping_gateway: default_true(),
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency(),
            packet_loss_percent: default_packet_loss(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            terminal: default_true(),
            log_file: None,
            webhook_url: None,
            webhook_min_severity: default_webhook_min_severity(),
        }
    }
}

// --- AppConfig methods ---

impl AppConfig {
    /// Load config from default path or create default config file
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined,
    /// the file cannot be read, or the TOML content is invalid.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_or_create(&path)
    }

    /// Load from a specific path, or create a default config file if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is invalid,
    /// or the default config file cannot be written.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!(path = %path.display(), "Created default config");
            Ok(config)
        }
    }

    /// Load from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML content is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save config to a specific path, creating parent directories if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created,
    /// serialization fails, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Monitor interval as a `Duration`. Zero is passed through; the monitor
    /// loop rejects it.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.general.interval_secs)
    }

    #[must_use]
    pub fn diagnosis_thresholds(&self) -> DiagnosisThresholds {
        DiagnosisThresholds::from(&self.thresholds)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("netcheck").join("config.toml"))
    }
}

impl From<&ThresholdConfig> for DiagnosisThresholds {
    fn from(config: &ThresholdConfig) -> Self {
        let defaults = Self::default();

        let latency_ms = if config.latency_ms.is_finite() {
            config.latency_ms.max(0.0)
        } else {
            defaults.latency_ms
        };
        let packet_loss_percent = if config.packet_loss_percent.is_finite() {
            config.packet_loss_percent.clamp(0.0, 100.0)
        } else {
            defaults.packet_loss_percent
        };

        Self {
            latency_ms,
            packet_loss_percent,
        }
    }
}
