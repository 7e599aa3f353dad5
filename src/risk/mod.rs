//! Disease risk scoring.
//!
//! Pure computation over a `RiskCalculationInput`: factor extraction,
//! weighted integration, percentile lookup and recommendations. Per-disease
//! behaviour lives in the model registry; unknown diseases use the generic model.

pub mod cache;
pub mod engine;
pub mod factors;
pub mod integrator;
pub mod percentile;
pub mod recommendations;
pub mod registry;
pub mod types;
pub mod weights;

pub use cache::{AssessmentCache, CacheKey};
pub use engine::DefaultRiskScorer;
pub use registry::{DiseaseModel, DiseaseRegistry};
pub use types::{
    DiseaseRiskFactors, RiskAssessment, RiskCalculationInput, RiskError, RiskLevel, RiskScorer,
};
pub use weights::FactorWeights;

/// Score one disease with the default scorer.
pub fn compute_risk(input: &RiskCalculationInput) -> RiskAssessment {
    DefaultRiskScorer::new().compute_risk(input)
}
