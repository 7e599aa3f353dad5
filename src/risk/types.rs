use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{DiseaseType, FamilyMember, GenomicSummary, UserProfile};

/// Neutral value for a factor with no contributing data.
pub const NEUTRAL_FACTOR: f64 = 0.5;

// ---------------------------------------------------------------------------
// RiskCalculationInput
// ---------------------------------------------------------------------------

/// Read-only snapshot of everything known about one user for one disease.
/// Gathered by the caller; the engine never fetches data itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskCalculationInput {
    pub disease_type: DiseaseType,
    pub user_profile: UserProfile,
    #[serde(default)]
    pub genomic_data: Option<GenomicSummary>,
    #[serde(default)]
    pub family_history: Option<Vec<FamilyMember>>,
}

impl RiskCalculationInput {
    pub fn new(disease_type: DiseaseType, user_profile: UserProfile) -> Self {
        Self {
            disease_type,
            user_profile,
            genomic_data: None,
            family_history: None,
        }
    }
}

// ---------------------------------------------------------------------------
// DiseaseRiskFactors
// ---------------------------------------------------------------------------

/// Six normalized contributors, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiseaseRiskFactors {
    pub genetic_risk: f64,
    pub lifestyle_risk: f64,
    pub family_history_risk: f64,
    pub environmental_risk: f64,
    pub age_risk: f64,
    pub gender_risk: f64,
}

impl Default for DiseaseRiskFactors {
    fn default() -> Self {
        Self {
            genetic_risk: NEUTRAL_FACTOR,
            lifestyle_risk: NEUTRAL_FACTOR,
            family_history_risk: NEUTRAL_FACTOR,
            environmental_risk: NEUTRAL_FACTOR,
            age_risk: NEUTRAL_FACTOR,
            gender_risk: NEUTRAL_FACTOR,
        }
    }
}

impl DiseaseRiskFactors {
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.genetic_risk,
            self.lifestyle_risk,
            self.family_history_risk,
            self.environmental_risk,
            self.age_risk,
            self.gender_risk,
        ]
    }

    /// Clamp every factor into [0, 1]. NaN collapses to neutral.
    pub fn clamped(self) -> Self {
        Self {
            genetic_risk: clamp_unit(self.genetic_risk),
            lifestyle_risk: clamp_unit(self.lifestyle_risk),
            family_history_risk: clamp_unit(self.family_history_risk),
            environmental_risk: clamp_unit(self.environmental_risk),
            age_risk: clamp_unit(self.age_risk),
            gender_risk: clamp_unit(self.gender_risk),
        }
    }
}

/// Clamp to [0, 1], mapping NaN to the neutral factor.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        NEUTRAL_FACTOR
    } else {
        value.clamp(0.0, 1.0)
    }
}

// ---------------------------------------------------------------------------
// RiskLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score > 0.7 {
            Self::VeryHigh
        } else if score > 0.5 {
            Self::High
        } else if score > 0.3 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::VeryHigh => "very_high",
        }
    }
}

// ---------------------------------------------------------------------------
// RiskAssessment
// ---------------------------------------------------------------------------

/// Complete, immutable result of one scoring request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub disease_type: DiseaseType,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    /// One of 10, 25, 50, 75, 90, 95.
    pub percentile: u8,
    pub contributing_factors: DiseaseRiskFactors,
    /// Advisory messages in reading order.
    pub recommendations: Vec<String>,
    pub confidence: f64,
    pub calculated_at: NaiveDateTime,
}

// ---------------------------------------------------------------------------
// RiskError
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum RiskError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal lock failed")]
    LockFailed,
}

// ---------------------------------------------------------------------------
// RiskScorer trait
// ---------------------------------------------------------------------------

/// Scoring seam used by request handlers.
pub trait RiskScorer: Send + Sync {
    /// Score one disease for one user. Never fails: missing data degrades to neutral factors.
    fn compute_risk(&self, input: &RiskCalculationInput) -> RiskAssessment;
}
