use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PatternType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    /// Sustained slope in one vital-sign metric.
    VitalSignTrend,
    /// A symptom concentrated in the most recent samples.
    IncreasingSymptoms,
    /// Sustained slope in the self-reported overall condition.
    ConditionTrend,
}

impl PatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VitalSignTrend => "vital_sign_trend",
            Self::IncreasingSymptoms => "increasing_symptoms",
            Self::ConditionTrend => "condition_trend",
        }
    }
}

// ---------------------------------------------------------------------------
// Severity / AlertLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }

    /// Surfacing level for this severity.
    pub fn alert_level(&self) -> AlertLevel {
        match self {
            Self::Mild => AlertLevel::Info,
            Self::Moderate => AlertLevel::Warning,
            Self::Severe => AlertLevel::Critical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

// ---------------------------------------------------------------------------
// TrendDirection
// ---------------------------------------------------------------------------

/// Direction taken strictly from the slope sign: a positive slope is
/// `Declining` for every series, whatever the metric measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

impl TrendDirection {
    pub fn from_slope(slope: f64, stable_band: f64) -> Self {
        if slope > stable_band {
            Self::Declining
        } else if slope < -stable_band {
            Self::Improving
        } else {
            Self::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Stable => "stable",
            Self::Declining => "declining",
        }
    }
}

// ---------------------------------------------------------------------------
// HealthPattern
// ---------------------------------------------------------------------------

/// Span of samples a pattern was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeframe {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub sample_count: usize,
}

/// One detected pattern. Produced fresh per analysis; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthPattern {
    pub pattern_type: PatternType,
    pub severity: Severity,
    pub trend_direction: TrendDirection,
    pub affected_metrics: Vec<String>,
    pub timeframe: Timeframe,
    pub confidence: f64,
    pub alert_level: AlertLevel,
    /// Patient-facing summary (calm framing).
    pub description: String,
}
