//! Configuration
//!
//! TOML-backed settings for the tracker and the classification cycle.
//! Every field has a default carrying the reference constants, so an empty
//! config (or none at all) yields the stock engine. Environment variables
//! override file values.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::detection::DetectionWeights;
use crate::error::{AirsentryError, Result};

/// Root configuration structure.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Device table settings.
    pub tracker: TrackerSettings,

    /// Classification cycle settings.
    pub analysis: AnalysisSettings,

    /// Detector thresholds and score deltas.
    pub weights: DetectionWeights,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracker: TrackerSettings::default(),
            analysis: AnalysisSettings::default(),
            weights: DetectionWeights::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, then apply environment
    /// overrides.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| AirsentryError::Config(format!("failed to read config file: {}", e)))?;
        let mut config = Self::from_str(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| AirsentryError::Config(format!("failed to parse config: {}", e)))
    }

    /// Serialize configuration to a TOML string.
    pub fn to_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| AirsentryError::Config(format!("failed to serialize config: {}", e)))
    }

    /// Save configuration to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_string()?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| AirsentryError::Config(format!("failed to write config file: {}", e)))
    }

    /// Default config file content with comments.
    pub fn default_with_comments() -> &'static str {
        DEFAULT_CONFIG
    }

    /// Apply environment variable overrides.
    ///
    /// Supported: AIRSENTRY_MAX_DEVICES, AIRSENTRY_MAX_SSIDS,
    /// AIRSENTRY_WINDOW_MS, AIRSENTRY_ANALYSIS_PERIOD_MS,
    /// AIRSENTRY_STALE_AFTER_MS, AIRSENTRY_CONFIRM_THRESHOLD.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("AIRSENTRY_MAX_DEVICES") {
            if let Ok(n) = v.parse() {
                self.tracker.max_devices = n;
            }
        }
        if let Ok(v) = std::env::var("AIRSENTRY_MAX_SSIDS") {
            if let Ok(n) = v.parse() {
                self.tracker.max_ssids_per_device = n;
            }
        }
        if let Ok(v) = std::env::var("AIRSENTRY_WINDOW_MS") {
            if let Ok(ms) = v.parse() {
                self.analysis.window_ms = ms;
            }
        }
        if let Ok(v) = std::env::var("AIRSENTRY_ANALYSIS_PERIOD_MS") {
            if let Ok(ms) = v.parse() {
                self.analysis.period_ms = ms;
            }
        }
        if let Ok(v) = std::env::var("AIRSENTRY_STALE_AFTER_MS") {
            if let Ok(ms) = v.parse() {
                self.analysis.stale_after_ms = ms;
            }
        }
        if let Ok(v) = std::env::var("AIRSENTRY_CONFIRM_THRESHOLD") {
            if let Ok(t) = v.parse() {
                self.analysis.confirm_threshold = t;
            }
        }
    }
}

/// Device table settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Maximum number of transmitters tracked at once. When full, new
    /// identities are silently dropped; nothing is evicted.
    pub max_devices: usize,

    /// Maximum distinct advertised names remembered per device; oldest
    /// names are evicted past the cap.
    pub max_ssids_per_device: usize,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            max_devices: 50,
            max_ssids_per_device: 16,
        }
    }
}

/// Classification cycle settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Short sliding window length in milliseconds.
    pub window_ms: u64,

    /// Minimum window age before a device is scored.
    pub min_window_ms: u64,

    /// Reference cadence for the periodic classification task.
    pub period_ms: u64,

    /// Devices without a frame for this long are skipped by the cycle.
    pub stale_after_ms: u64,

    /// Risk score at which a device is confirmed malicious.
    pub confirm_threshold: f32,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            window_ms: 3000,
            min_window_ms: 500,
            period_ms: 500,
            stale_after_ms: 8000,
            confirm_threshold: 2.0,
        }
    }
}

/// Default configuration file content with comments.
const DEFAULT_CONFIG: &str = r#"# airsentry configuration
# =======================

[tracker]
# Maximum transmitters tracked at once. When the table is full, frames
# from unseen identities are dropped from tracking (no eviction).
max_devices = 50

# Distinct advertised network names remembered per transmitter.
max_ssids_per_device = 16

[analysis]
# Short sliding window for rate computation (milliseconds).
window_ms = 3000

# Minimum window age before a device is scored.
min_window_ms = 500

# Cadence of the periodic classification task.
period_ms = 500

# Devices silent for this long are skipped by the cycle.
stale_after_ms = 8000

# Risk score at which a transmitter is confirmed malicious.
confirm_threshold = 2.0

# Detector thresholds and score deltas, in evaluation order.

[weights.beacon_spam]
rate_min = 2.0
score = 4.0

[weights.beacon_surge]
baseline_factor = 2.0
rate_min = 1.5
score = 3.0

[weights.deauth_flood]
rate_min = 1.0
score = 5.0

[weights.probe_flood]
rate_min = 5.0
score = 4.0

[weights.evil_twin]
distinct_ssid_min = 2
score = 3.0

[weights.high_activity]
beacon_rate_min = 10.0
probe_rate_min = 8.0
beacon_count_min = 20
score = 2.0

[weights.burst]
total_count_min = 15
score = 2.0
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tracker.max_devices, 50);
        assert_eq!(config.analysis.window_ms, 3000);
        assert_eq!(config.weights.deauth_flood.score, 5.0);
    }

    #[test]
    fn test_parse_default_config() {
        let config = Config::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.analysis.confirm_threshold, 2.0);
        assert_eq!(config.weights.evil_twin.distinct_ssid_min, 2);
        assert_eq!(config.weights.burst.total_count_min, 15);
    }

    #[test]
    fn test_roundtrip() {
        let config = Config::default();
        let toml = config.to_string().unwrap();
        let parsed = Config::from_str(&toml).unwrap();
        assert_eq!(config.analysis.window_ms, parsed.analysis.window_ms);
        assert_eq!(
            config.weights.beacon_spam.rate_min,
            parsed.weights.beacon_spam.rate_min
        );
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = Config::from_str(
            r#"
[tracker]
max_devices = 10
"#,
        )
        .unwrap();
        assert_eq!(config.tracker.max_devices, 10);
        assert_eq!(config.tracker.max_ssids_per_device, 16);
        assert_eq!(config.analysis.period_ms, 500);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(Config::from_str("tracker = 5").is_err());
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("AIRSENTRY_WINDOW_MS", "4500");
        std::env::set_var("AIRSENTRY_CONFIRM_THRESHOLD", "3.5");
        let mut config = Config::default();
        config.apply_env_overrides();
        std::env::remove_var("AIRSENTRY_WINDOW_MS");
        std::env::remove_var("AIRSENTRY_CONFIRM_THRESHOLD");
        assert_eq!(config.analysis.window_ms, 4500);
        assert_eq!(config.analysis.confirm_threshold, 3.5);
    }
}
