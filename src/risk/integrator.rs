use super::types::{clamp_unit, DiseaseRiskFactors};
use super::weights::FactorWeights;

/// Weighted sum of the six factors, clamped to [0, 1].
pub fn integrate(factors: &DiseaseRiskFactors, weights: &FactorWeights) -> f64 {
    let score = factors.genetic_risk * weights.genetic
        + factors.lifestyle_risk * weights.lifestyle
        + factors.family_history_risk * weights.family_history
        + factors.environmental_risk * weights.environmental
        + factors.age_risk * weights.age
        + factors.gender_risk * weights.gender;

    clamp_unit(score)
}
