//! Factor extraction: raw profile, genomic and family data into six bounded scores.

use crate::models::{AlcoholUse, FamilyMember, GenomicSummary, Lifestyle, UserProfile};

use super::registry::{DiseaseModel, LifestyleTrigger};
use super::types::{clamp_unit, DiseaseRiskFactors, RiskCalculationInput, NEUTRAL_FACTOR};

/// Starting lifestyle risk once lifestyle data is recorded.
pub const LIFESTYLE_BASE: f64 = 0.3;
/// Starting family-history risk once any relatives are recorded.
pub const FAMILY_HISTORY_BASE: f64 = 0.3;

/// Extract all six factors for the model's disease. Every factor is clamped to [0, 1].
pub fn normalize(input: &RiskCalculationInput, model: &DiseaseModel) -> DiseaseRiskFactors {
    let profile = &input.user_profile;

    let factors = DiseaseRiskFactors {
        genetic_risk: genetic_risk(input),
        lifestyle_risk: lifestyle_risk(profile, model),
        family_history_risk: family_history_risk(input.family_history.as_deref(), model),
        environmental_risk: (model.environmental)(input),
        age_risk: model.age_bands.risk_for(profile.age),
        gender_risk: model.gender.risk_for(profile.gender),
    }
    .clamped();

    tracing::debug!(
        disease = %input.disease_type,
        genetic = factors.genetic_risk,
        lifestyle = factors.lifestyle_risk,
        family_history = factors.family_history_risk,
        age = factors.age_risk,
        gender = factors.gender_risk,
        "Risk factors normalized"
    );

    factors
}

/// Genetic percentile for the target disease scaled to [0, 1]; neutral when absent.
pub fn genetic_risk(input: &RiskCalculationInput) -> f64 {
    input
        .genomic_data
        .as_ref()
        .and_then(|g: &GenomicSummary| g.score_for(&input.disease_type))
        .map(|score| clamp_unit(score / 100.0))
        .unwrap_or(NEUTRAL_FACTOR)
}

/// Base plus the increment of every rule that applies; neutral without lifestyle data.
pub fn lifestyle_risk(profile: &UserProfile, model: &DiseaseModel) -> f64 {
    let Some(lifestyle) = profile.lifestyle.as_ref() else {
        return NEUTRAL_FACTOR;
    };

    let risk = model
        .lifestyle_rules
        .iter()
        .filter(|rule| trigger_applies(rule.trigger, profile, lifestyle))
        .fold(LIFESTYLE_BASE, |acc, rule| acc + rule.increment);

    clamp_unit(risk)
}

fn trigger_applies(trigger: LifestyleTrigger, profile: &UserProfile, lifestyle: &Lifestyle) -> bool {
    match trigger {
        LifestyleTrigger::Smoking => lifestyle.smoking,
        LifestyleTrigger::ModerateAlcohol => lifestyle.alcohol == AlcoholUse::Moderate,
        LifestyleTrigger::HeavyAlcohol => lifestyle.alcohol == AlcoholUse::Heavy,
        LifestyleTrigger::LowExercise => lifestyle.is_low_exercise(),
        LifestyleTrigger::Diet(diets) => lifestyle.diet_is(diets),
        LifestyleTrigger::BmiAbove(cutoff) => profile.bmi_above(cutoff),
        LifestyleTrigger::SecondhandSmoke => lifestyle.secondhand_smoke == Some(true),
        LifestyleTrigger::HormoneTherapy => lifestyle.hormonal().hormone_therapy,
        LifestyleTrigger::EarlyMenarche => lifestyle.hormonal().early_menarche,
        LifestyleTrigger::LateMenopause => lifestyle.hormonal().late_menopause,
    }
}

/// Base plus a relationship-weighted increment per affected relative.
/// A relative counts once even when several conditions match.
pub fn family_history_risk(history: Option<&[FamilyMember]>, model: &DiseaseModel) -> f64 {
    let Some(members) = history.filter(|m| !m.is_empty()) else {
        return NEUTRAL_FACTOR;
    };

    let risk = members
        .iter()
        .filter(|member| member.conditions.iter().any(|c| model.condition_matches(c)))
        .fold(FAMILY_HISTORY_BASE, |acc, member| {
            acc + model.relative_increments.for_relationship(member.relationship)
        });

    clamp_unit(risk)
}
