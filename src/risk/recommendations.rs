//! Rule-based advisory text.
//!
//! Messages are additive. Reading order is most urgent first: the overall
//! risk band, then factor-specific advice, then the general advice that
//! every assessment carries.

use super::registry::DiseaseModel;
use super::types::DiseaseRiskFactors;

pub const GENETIC_THRESHOLD: f64 = 0.7;
pub const LIFESTYLE_THRESHOLD: f64 = 0.6;
pub const FAMILY_HISTORY_THRESHOLD: f64 = 0.6;
pub const AGE_THRESHOLD: f64 = 0.6;
pub const URGENT_SCORE: f64 = 0.7;
pub const MODERATE_SCORE: f64 = 0.5;

/// Message templates. Advisory wording only: these are not diagnoses.
pub struct RecommendationTemplates;

impl RecommendationTemplates {
    pub fn urgent(disease: &str) -> String {
        format!(
            "Your estimated {} risk is high. Please book a consultation with your doctor soon to review it together.",
            disease,
        )
    }

    pub fn moderate(disease: &str) -> String {
        format!(
            "Your estimated {} risk is moderate. Small changes now and regular monitoring can make a real difference.",
            disease,
        )
    }

    pub fn reassurance(disease: &str) -> String {
        format!(
            "Your estimated {} risk is currently low. Keep up your healthy habits.",
            disease,
        )
    }

    pub fn genetic_counseling() -> String {
        "Your genetic profile shows elevated risk. Consider speaking with a genetic counselor.".into()
    }

    pub fn early_screening() -> String {
        "Your family history suggests earlier screening may be worthwhile. Ask your doctor when to start.".into()
    }

    pub fn shorter_screening_interval() -> String {
        "At your age, more frequent screening is recommended. Ask your doctor about shortening the interval between checks.".into()
    }

    pub fn regular_checkups() -> String {
        "Schedule regular checkups with your healthcare provider.".into()
    }

    pub fn balanced_diet() -> String {
        "Maintain a balanced diet rich in vegetables, fruits and whole grains.".into()
    }
}

/// Select recommendations for one assessment.
pub fn generate_recommendations(
    disease: &str,
    factors: &DiseaseRiskFactors,
    risk_score: f64,
    model: &DiseaseModel,
) -> Vec<String> {
    let label = disease.replace('_', " ");
    let mut recommendations = Vec::new();

    if risk_score > URGENT_SCORE {
        recommendations.push(RecommendationTemplates::urgent(&label));
    } else if risk_score > MODERATE_SCORE {
        recommendations.push(RecommendationTemplates::moderate(&label));
    } else {
        recommendations.push(RecommendationTemplates::reassurance(&label));
    }

    if factors.genetic_risk > GENETIC_THRESHOLD {
        recommendations.push(RecommendationTemplates::genetic_counseling());
    }
    if factors.lifestyle_risk > LIFESTYLE_THRESHOLD {
        recommendations.push(model.lifestyle_advice.to_string());
    }
    if factors.family_history_risk > FAMILY_HISTORY_THRESHOLD {
        recommendations.push(RecommendationTemplates::early_screening());
    }
    if factors.age_risk > AGE_THRESHOLD {
        recommendations.push(RecommendationTemplates::shorter_screening_interval());
    }

    recommendations.push(RecommendationTemplates::regular_checkups());
    recommendations.push(RecommendationTemplates::balanced_diet());

    recommendations
}
