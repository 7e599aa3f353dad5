use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Vitalrisk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "vitalrisk=info,warn"
}

/// Get the application data directory.
/// Falls back to the working directory when no home directory can be resolved.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Vitalrisk")
}

/// Location of the health record database.
pub fn database_path() -> PathBuf {
    app_data_dir().join("health.db")
}

// ═══════════════════════════════════════════════════════════
// Analytics configuration
// ═══════════════════════════════════════════════════════════

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config load failed ({0}): {1}")]
    Load(String, String),

    #[error("Config parse failed ({0}): {1}")]
    Parse(String, String),
}

/// Slope magnitudes (units per sample) above which a metric trend is
/// classified moderate or severe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlopeThresholds {
    pub moderate: f64,
    pub severe: f64,
}

impl SlopeThresholds {
    pub const fn new(moderate: f64, severe: f64) -> Self {
        Self { moderate, severe }
    }
}

/// Tunables for the trend analyzer.
///
/// `Default` carries the production values; a JSON file may override any subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Values a single metric needs before its slope is considered.
    pub min_samples_per_metric: usize,
    /// Samples needed before any pattern is emitted at all.
    pub min_samples_total: usize,
    /// Most recent samples inspected for symptom frequency.
    pub recent_window: usize,
    /// |slope| at or below this is "stable".
    pub stable_slope: f64,
    pub symptom_frequency_threshold: f64,
    pub symptom_severe_threshold: f64,
    /// Mean overall condition below this is severe.
    pub condition_severe_mean: f64,
    /// Mean overall condition below this is moderate.
    pub condition_moderate_mean: f64,
    pub metric_thresholds: BTreeMap<String, SlopeThresholds>,
    pub default_thresholds: SlopeThresholds,
}

impl Default for TrendConfig {
    fn default() -> Self {
        let metric_thresholds = [
            ("systolic_bp", SlopeThresholds::new(2.0, 5.0)),
            ("diastolic_bp", SlopeThresholds::new(1.5, 4.0)),
            ("heart_rate", SlopeThresholds::new(3.0, 8.0)),
            ("weight", SlopeThresholds::new(0.5, 1.5)),
            ("blood_glucose", SlopeThresholds::new(3.0, 8.0)),
            ("temperature", SlopeThresholds::new(0.2, 0.5)),
            ("oxygen_saturation", SlopeThresholds::new(0.5, 1.5)),
        ]
        .into_iter()
        .map(|(name, t)| (name.to_string(), t))
        .collect();

        Self {
            min_samples_per_metric: 5,
            min_samples_total: 7,
            recent_window: 3,
            stable_slope: 0.1,
            symptom_frequency_threshold: 0.5,
            symptom_severe_threshold: 0.8,
            condition_severe_mean: 2.5,
            condition_moderate_mean: 3.5,
            metric_thresholds,
            default_thresholds: SlopeThresholds::new(1.0, 3.0),
        }
    }
}

impl TrendConfig {
    /// Thresholds for a metric, falling back to the default pair.
    pub fn thresholds_for(&self, metric: &str) -> SlopeThresholds {
        self.metric_thresholds
            .get(metric)
            .copied()
            .unwrap_or(self.default_thresholds)
    }
}

/// Top-level analytics configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub trend: TrendConfig,
}

impl AnalyticsConfig {
    /// Load configuration from a JSON file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Load(path.display().to_string(), e.to_string()))?;
        let config: Self = serde_json::from_str(&json)
            .map_err(|e| ConfigError::Parse(path.display().to_string(), e.to_string()))?;

        tracing::info!(path = %path.display(), "Loaded analytics configuration");
        Ok(config)
    }
}
