//! Disease model registry.
//!
//! Every supported disease is one `DiseaseModel` entry: its lifestyle rules,
//! family-history matcher, age bands, gender pair, weights and reference
//! distribution. Adding a disease means registering one more entry here.
//! The registry is built once and never mutated.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{DietType, DiseaseType, Gender, Relationship};

use super::percentile::{self, ReferenceDistribution};
use super::types::{RiskCalculationInput, NEUTRAL_FACTOR};
use super::weights::{self, FactorWeights};

// ---------------------------------------------------------------------------
// Rule types
// ---------------------------------------------------------------------------

/// Adverse behavior or trait that raises lifestyle risk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LifestyleTrigger {
    Smoking,
    ModerateAlcohol,
    HeavyAlcohol,
    /// Fewer than two exercise sessions per week.
    LowExercise,
    Diet(&'static [DietType]),
    BmiAbove(f64),
    SecondhandSmoke,
    HormoneTherapy,
    EarlyMenarche,
    LateMenopause,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifestyleRule {
    pub trigger: LifestyleTrigger,
    pub increment: f64,
}

const fn rule(trigger: LifestyleTrigger, increment: f64) -> LifestyleRule {
    LifestyleRule { trigger, increment }
}

/// Increments added per matching relative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeIncrements {
    pub parent: f64,
    pub sibling: f64,
    pub grandparent: f64,
    pub other: f64,
}

impl RelativeIncrements {
    pub fn for_relationship(&self, relationship: Relationship) -> f64 {
        match relationship {
            Relationship::Parent => self.parent,
            Relationship::Sibling => self.sibling,
            Relationship::Grandparent => self.grandparent,
            Relationship::Other => self.other,
        }
    }
}

/// Age-risk step function: first band whose lower bound is exceeded wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeBands {
    /// (age strictly greater than, risk), ordered oldest first.
    pub bands: &'static [(u32, f64)],
    pub floor: f64,
}

impl AgeBands {
    pub fn risk_for(&self, age: u32) -> f64 {
        self.bands
            .iter()
            .find(|(above, _)| age > *above)
            .map(|(_, risk)| *risk)
            .unwrap_or(self.floor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenderRisk {
    pub male: f64,
    pub female: f64,
}

impl GenderRisk {
    pub fn risk_for(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
        }
    }
}

/// Environmental factor hook. Every model currently reports the neutral value.
pub type EnvironmentalFn = fn(&RiskCalculationInput) -> f64;

pub fn neutral_environment(_input: &RiskCalculationInput) -> f64 {
    NEUTRAL_FACTOR
}

// ---------------------------------------------------------------------------
// DiseaseModel
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct DiseaseModel {
    pub lifestyle_rules: &'static [LifestyleRule],
    pub family_keywords: &'static [&'static str],
    /// `None` when the model has no keywords; nothing matches.
    pub family_matcher: Option<Regex>,
    pub relative_increments: RelativeIncrements,
    pub age_bands: AgeBands,
    pub gender: GenderRisk,
    pub environmental: EnvironmentalFn,
    pub weights: FactorWeights,
    pub reference: ReferenceDistribution,
    /// Guidance shown when lifestyle risk is elevated.
    pub lifestyle_advice: &'static str,
    pub confidence: f64,
}

impl DiseaseModel {
    /// Whether a free-text condition refers to this disease (whole words, any case).
    pub fn condition_matches(&self, condition: &str) -> bool {
        self.family_matcher
            .as_ref()
            .is_some_and(|m| m.is_match(condition))
    }
}

/// Static part of a model; the keyword matcher is compiled at registration.
struct ModelDef {
    lifestyle_rules: &'static [LifestyleRule],
    family_keywords: &'static [&'static str],
    relative_increments: RelativeIncrements,
    age_bands: AgeBands,
    gender: GenderRisk,
    weights: FactorWeights,
    reference: ReferenceDistribution,
    lifestyle_advice: &'static str,
    confidence: f64,
}

impl ModelDef {
    fn compile(self) -> DiseaseModel {
        let family_matcher = (!self.family_keywords.is_empty()).then(|| {
            let alternatives: Vec<String> = self
                .family_keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect();
            let pattern = format!(r"(?i)\b(?:{})\b", alternatives.join("|"));
            Regex::new(&pattern).expect("escaped keywords form a valid pattern")
        });

        DiseaseModel {
            lifestyle_rules: self.lifestyle_rules,
            family_keywords: self.family_keywords,
            family_matcher,
            relative_increments: self.relative_increments,
            age_bands: self.age_bands,
            gender: self.gender,
            environmental: neutral_environment,
            weights: self.weights,
            reference: self.reference,
            lifestyle_advice: self.lifestyle_advice,
            confidence: self.confidence,
        }
    }
}

// ---------------------------------------------------------------------------
// Model definitions
// ---------------------------------------------------------------------------

use LifestyleTrigger::*;

const STANDARD_RELATIVES: RelativeIncrements = RelativeIncrements {
    parent: 0.2,
    sibling: 0.2,
    grandparent: 0.1,
    other: 0.05,
};

const STRONG_RELATIVES: RelativeIncrements = RelativeIncrements {
    parent: 0.3,
    sibling: 0.3,
    grandparent: 0.15,
    other: 0.08,
};

const CARDIOVASCULAR_DEF: ModelDef = ModelDef {
    lifestyle_rules: &[
        rule(Smoking, 0.3),
        rule(HeavyAlcohol, 0.2),
        rule(LowExercise, 0.2),
        rule(Diet(&[DietType::Western, DietType::HighFat, DietType::Processed]), 0.15),
        rule(BmiAbove(30.0), 0.1),
    ],
    family_keywords: &[
        "heart", "cardiovascular", "cardiac", "coronary", "stroke", "strokes",
        "heart attack", "myocardial infarction",
    ],
    relative_increments: STANDARD_RELATIVES,
    age_bands: AgeBands { bands: &[(65, 0.8), (55, 0.6), (45, 0.4)], floor: 0.2 },
    gender: GenderRisk { male: 0.6, female: 0.4 },
    weights: weights::CARDIOVASCULAR,
    reference: percentile::CARDIOVASCULAR,
    lifestyle_advice: "Stop smoking, limit alcohol and aim for at least 150 minutes of moderate exercise per week to protect your heart.",
    confidence: 0.85,
};

const TYPE2_DIABETES_DEF: ModelDef = ModelDef {
    lifestyle_rules: &[
        rule(BmiAbove(30.0), 0.3),
        rule(LowExercise, 0.2),
        rule(Diet(&[DietType::HighSugar, DietType::Western, DietType::Processed]), 0.2),
        rule(Smoking, 0.1),
        rule(HeavyAlcohol, 0.1),
    ],
    family_keywords: &["diabetes", "diabetic", "type 2 diabetes", "insulin resistance"],
    relative_increments: STANDARD_RELATIVES,
    age_bands: AgeBands { bands: &[(65, 0.7), (45, 0.5), (35, 0.3)], floor: 0.2 },
    gender: GenderRisk { male: 0.55, female: 0.45 },
    weights: weights::TYPE2_DIABETES,
    reference: percentile::TYPE2_DIABETES,
    lifestyle_advice: "Reduce refined sugar, favour whole foods and stay active most days of the week to keep blood sugar in check.",
    confidence: 0.85,
};

const ALZHEIMER_DEF: ModelDef = ModelDef {
    lifestyle_rules: &[
        rule(LowExercise, 0.15),
        rule(HeavyAlcohol, 0.15),
        rule(Smoking, 0.1),
        rule(Diet(&[DietType::HighFat, DietType::Processed]), 0.1),
    ],
    family_keywords: &["alzheimer", "alzheimers", "alzheimer's", "dementia"],
    relative_increments: STRONG_RELATIVES,
    age_bands: AgeBands {
        bands: &[(85, 0.9), (75, 0.7), (65, 0.5), (55, 0.3)],
        floor: 0.1,
    },
    gender: GenderRisk { male: 0.4, female: 0.6 },
    weights: weights::ALZHEIMER,
    reference: percentile::ALZHEIMER,
    lifestyle_advice: "Stay physically and socially active, keep your mind engaged and limit alcohol to support long-term brain health.",
    confidence: 0.75,
};

const BREAST_CANCER_DEF: ModelDef = ModelDef {
    lifestyle_rules: &[
        rule(HeavyAlcohol, 0.2),
        rule(ModerateAlcohol, 0.1),
        rule(HormoneTherapy, 0.2),
        rule(EarlyMenarche, 0.05),
        rule(LateMenopause, 0.05),
        rule(LowExercise, 0.1),
        rule(BmiAbove(30.0), 0.1),
    ],
    family_keywords: &["breast cancer", "breast", "brca", "brca1", "brca2"],
    relative_increments: STRONG_RELATIVES,
    age_bands: AgeBands {
        bands: &[(70, 0.8), (60, 0.7), (50, 0.6), (40, 0.4)],
        floor: 0.2,
    },
    gender: GenderRisk { male: 0.1, female: 0.9 },
    weights: weights::BREAST_CANCER,
    reference: percentile::BREAST_CANCER,
    lifestyle_advice: "Limit alcohol, keep a healthy weight and review any hormone therapy with your doctor.",
    confidence: 0.8,
};

const PROSTATE_CANCER_DEF: ModelDef = ModelDef {
    lifestyle_rules: &[
        rule(Diet(&[DietType::HighFat, DietType::HighRedMeat, DietType::Western]), 0.15),
        rule(LowExercise, 0.1),
        rule(BmiAbove(30.0), 0.1),
        rule(Smoking, 0.1),
    ],
    family_keywords: &["prostate", "prostate cancer"],
    relative_increments: STRONG_RELATIVES,
    age_bands: AgeBands { bands: &[(70, 0.9), (60, 0.7), (50, 0.5)], floor: 0.1 },
    gender: GenderRisk { male: 1.0, female: 0.0 },
    weights: weights::PROSTATE_CANCER,
    reference: percentile::PROSTATE_CANCER,
    lifestyle_advice: "Favour a plant-rich, lower-fat diet and regular exercise.",
    confidence: 0.8,
};

const COLORECTAL_CANCER_DEF: ModelDef = ModelDef {
    lifestyle_rules: &[
        rule(Diet(&[DietType::HighRedMeat, DietType::Processed, DietType::Western]), 0.2),
        rule(LowExercise, 0.15),
        rule(Smoking, 0.15),
        rule(HeavyAlcohol, 0.15),
        rule(BmiAbove(30.0), 0.1),
    ],
    family_keywords: &[
        "colorectal", "colon", "rectal", "bowel cancer", "colon cancer", "polyps",
    ],
    relative_increments: STANDARD_RELATIVES,
    age_bands: AgeBands {
        bands: &[(70, 0.8), (60, 0.6), (50, 0.5), (45, 0.3)],
        floor: 0.1,
    },
    gender: GenderRisk { male: 0.55, female: 0.45 },
    weights: weights::COLORECTAL_CANCER,
    reference: percentile::COLORECTAL_CANCER,
    lifestyle_advice: "Cut back on red and processed meat, eat more fibre, and stay active.",
    confidence: 0.8,
};

const LUNG_CANCER_DEF: ModelDef = ModelDef {
    lifestyle_rules: &[rule(Smoking, 0.5), rule(SecondhandSmoke, 0.2)],
    family_keywords: &["lung", "lung cancer"],
    relative_increments: STANDARD_RELATIVES,
    age_bands: AgeBands { bands: &[(75, 0.8), (65, 0.7), (55, 0.5)], floor: 0.2 },
    gender: GenderRisk { male: 0.55, female: 0.45 },
    weights: weights::LUNG_CANCER,
    reference: percentile::LUNG_CANCER,
    lifestyle_advice: "Quitting smoking and avoiding secondhand smoke are the most effective ways to lower lung cancer risk.",
    confidence: 0.85,
};

const GENERIC_DEF: ModelDef = ModelDef {
    lifestyle_rules: &[
        rule(Smoking, 0.2),
        rule(HeavyAlcohol, 0.15),
        rule(LowExercise, 0.15),
        rule(BmiAbove(30.0), 0.1),
    ],
    family_keywords: &[],
    relative_increments: STANDARD_RELATIVES,
    age_bands: AgeBands { bands: &[(65, 0.7), (50, 0.5)], floor: 0.3 },
    gender: GenderRisk { male: 0.5, female: 0.5 },
    weights: weights::GENERIC,
    reference: percentile::GENERIC,
    lifestyle_advice: "Avoid tobacco, limit alcohol and stay physically active.",
    confidence: 0.7,
};

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

static REGISTRY: LazyLock<DiseaseRegistry> = LazyLock::new(DiseaseRegistry::build);

pub struct DiseaseRegistry {
    models: HashMap<DiseaseType, DiseaseModel>,
    generic: DiseaseModel,
}

impl DiseaseRegistry {
    /// The process-wide registry.
    pub fn global() -> &'static DiseaseRegistry {
        &REGISTRY
    }

    fn build() -> Self {
        let mut models = HashMap::new();
        models.insert(DiseaseType::CardiovascularDisease, CARDIOVASCULAR_DEF.compile());
        models.insert(DiseaseType::Type2Diabetes, TYPE2_DIABETES_DEF.compile());
        models.insert(DiseaseType::AlzheimerDisease, ALZHEIMER_DEF.compile());
        models.insert(DiseaseType::BreastCancer, BREAST_CANCER_DEF.compile());
        models.insert(DiseaseType::ProstateCancer, PROSTATE_CANCER_DEF.compile());
        models.insert(DiseaseType::ColorectalCancer, COLORECTAL_CANCER_DEF.compile());
        models.insert(DiseaseType::LungCancer, LUNG_CANCER_DEF.compile());

        tracing::debug!(models = models.len(), "Disease model registry initialized");

        Self {
            models,
            generic: GENERIC_DEF.compile(),
        }
    }

    /// Model for a disease, or the generic model for anything unregistered.
    pub fn model_for(&self, disease: &DiseaseType) -> &DiseaseModel {
        self.models.get(disease).unwrap_or(&self.generic)
    }

    pub fn is_registered(&self, disease: &DiseaseType) -> bool {
        self.models.contains_key(disease)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_disease_is_registered() {
        let registry = DiseaseRegistry::global();
        for disease in DiseaseType::KNOWN {
            assert!(registry.is_registered(&disease), "{disease} missing");
        }
        assert!(!registry.is_registered(&DiseaseType::Other("gout".into())));
    }

    #[test]
    fn other_with_known_tag_uses_dedicated_model() {
        let registry = DiseaseRegistry::global();
        let raw = DiseaseType::Other("Lung_Cancer".into());
        assert!(registry.is_registered(&raw));
        assert_eq!(registry.model_for(&raw).confidence, 0.85);
        assert_eq!(registry.model_for(&DiseaseType::Other("gout".into())).confidence, 0.7);
    }

    #[test]
    fn alzheimer_age_bands() {
        let model = DiseaseRegistry::global().model_for(&DiseaseType::AlzheimerDisease);
        assert_eq!(model.age_bands.risk_for(90), 0.9);
        assert_eq!(model.age_bands.risk_for(80), 0.7);
        assert_eq!(model.age_bands.risk_for(70), 0.5);
        assert_eq!(model.age_bands.risk_for(60), 0.3);
        assert_eq!(model.age_bands.risk_for(55), 0.1);
    }

    #[test]
    fn cardiovascular_age_bands() {
        let model = DiseaseRegistry::global().model_for(&DiseaseType::CardiovascularDisease);
        assert_eq!(model.age_bands.risk_for(66), 0.8);
        assert_eq!(model.age_bands.risk_for(65), 0.6);
        assert_eq!(model.age_bands.risk_for(50), 0.4);
        assert_eq!(model.age_bands.risk_for(45), 0.2);
    }

    #[test]
    fn gender_pairs() {
        let registry = DiseaseRegistry::global();
        let breast = registry.model_for(&DiseaseType::BreastCancer);
        assert_eq!(breast.gender.risk_for(Gender::Female), 0.9);
        assert_eq!(breast.gender.risk_for(Gender::Male), 0.1);
        let prostate = registry.model_for(&DiseaseType::ProstateCancer);
        assert_eq!(prostate.gender.risk_for(Gender::Male), 1.0);
        assert_eq!(prostate.gender.risk_for(Gender::Female), 0.0);
    }

    #[test]
    fn cardiovascular_matcher_uses_whole_words() {
        let model = DiseaseRegistry::global().model_for(&DiseaseType::CardiovascularDisease);
        assert!(model.condition_matches("Heart disease"));
        assert!(model.condition_matches("had a STROKE in 2010"));
        assert!(model.condition_matches("coronary artery disease"));
        assert!(!model.condition_matches("heartburn"));
        assert!(!model.condition_matches("asthma"));
    }

    #[test]
    fn generic_model_matches_nothing() {
        let model = DiseaseRegistry::global().model_for(&DiseaseType::Other("gout".into()));
        assert!(!model.condition_matches("gout"));
        assert!(!model.condition_matches("heart disease"));
    }

    #[test]
    fn lung_smoking_outweighs_cardiovascular_smoking() {
        let registry = DiseaseRegistry::global();
        let smoking = |d: &DiseaseType| {
            registry
                .model_for(d)
                .lifestyle_rules
                .iter()
                .find(|r| r.trigger == LifestyleTrigger::Smoking)
                .map(|r| r.increment)
        };
        assert_eq!(smoking(&DiseaseType::LungCancer), Some(0.5));
        assert_eq!(smoking(&DiseaseType::CardiovascularDisease), Some(0.3));
    }
}
