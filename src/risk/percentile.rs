//! Population percentile lookup against age/gender-adjusted reference distributions.

use serde::Serialize;

use crate::models::{DiseaseType, Gender};

use super::registry::DiseaseRegistry;

/// Percentile labels returned for scores at or below each breakpoint, then above the last.
pub const PERCENTILE_LABELS: [u8; 6] = [10, 25, 50, 75, 90, 95];

/// Reference risk scores at the 10th, 25th, 50th, 75th and 90th percentiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceDistribution {
    pub breakpoints: [f64; 5],
    pub male_multiplier: f64,
    pub female_multiplier: f64,
}

impl ReferenceDistribution {
    pub const fn new(breakpoints: [f64; 5]) -> Self {
        Self {
            breakpoints,
            male_multiplier: 1.0,
            female_multiplier: 1.0,
        }
    }

    pub const fn with_gender(mut self, male: f64, female: f64) -> Self {
        self.male_multiplier = male;
        self.female_multiplier = female;
        self
    }

    pub fn gender_multiplier(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Male => self.male_multiplier,
            Gender::Female => self.female_multiplier,
        }
    }

    /// Breakpoints scaled for the age band and gender of the person being ranked.
    pub fn adjusted(&self, age: u32, gender: Gender) -> [f64; 5] {
        let factor = age_multiplier(age) * self.gender_multiplier(gender);
        self.breakpoints.map(|b| b * factor)
    }
}

pub const CARDIOVASCULAR: ReferenceDistribution =
    ReferenceDistribution::new([0.15, 0.25, 0.35, 0.50, 0.65]).with_gender(1.2, 1.0);
pub const TYPE2_DIABETES: ReferenceDistribution =
    ReferenceDistribution::new([0.12, 0.22, 0.33, 0.48, 0.62]);
pub const ALZHEIMER: ReferenceDistribution =
    ReferenceDistribution::new([0.10, 0.18, 0.28, 0.42, 0.58]).with_gender(1.0, 1.1);
pub const BREAST_CANCER: ReferenceDistribution =
    ReferenceDistribution::new([0.10, 0.20, 0.30, 0.45, 0.60]).with_gender(1.0, 1.2);
pub const PROSTATE_CANCER: ReferenceDistribution =
    ReferenceDistribution::new([0.10, 0.20, 0.32, 0.46, 0.60]).with_gender(1.2, 1.0);
pub const COLORECTAL_CANCER: ReferenceDistribution =
    ReferenceDistribution::new([0.08, 0.16, 0.26, 0.40, 0.55]);
pub const LUNG_CANCER: ReferenceDistribution =
    ReferenceDistribution::new([0.08, 0.15, 0.25, 0.40, 0.55]);
pub const GENERIC: ReferenceDistribution =
    ReferenceDistribution::new([0.10, 0.20, 0.30, 0.45, 0.60]);

/// Older populations carry higher baseline risk.
pub fn age_multiplier(age: u32) -> f64 {
    if age > 65 {
        1.5
    } else if age > 50 {
        1.2
    } else {
        1.0
    }
}

/// Rank a score against ascending breakpoints.
pub fn classify(score: f64, breakpoints: &[f64; 5]) -> u8 {
    breakpoints
        .iter()
        .position(|b| score <= *b)
        .map(|i| PERCENTILE_LABELS[i])
        .unwrap_or(PERCENTILE_LABELS[5])
}

/// Population percentile of `risk_score` for a person of this age and gender.
pub fn estimate_percentile(risk_score: f64, disease: &DiseaseType, age: u32, gender: Gender) -> u8 {
    let reference = &DiseaseRegistry::global().model_for(disease).reference;
    let adjusted = reference.adjusted(age, gender);
    classify(risk_score, &adjusted)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn age_multiplier_bands() {
        assert_eq!(age_multiplier(30), 1.0);
        assert_eq!(age_multiplier(50), 1.0);
        assert_eq!(age_multiplier(51), 1.2);
        assert_eq!(age_multiplier(65), 1.2);
        assert_eq!(age_multiplier(66), 1.5);
    }

    #[test]
    fn classify_each_band() {
        let bp = [0.1, 0.2, 0.3, 0.4, 0.5];
        assert_eq!(classify(0.05, &bp), 10);
        assert_eq!(classify(0.1, &bp), 10);
        assert_eq!(classify(0.15, &bp), 25);
        assert_eq!(classify(0.25, &bp), 50);
        assert_eq!(classify(0.35, &bp), 75);
        assert_eq!(classify(0.45, &bp), 90);
        assert_eq!(classify(0.9, &bp), 95);
    }

    #[test]
    fn male_cardiovascular_breakpoints_shift_up() {
        let male = CARDIOVASCULAR.adjusted(40, Gender::Male);
        let female = CARDIOVASCULAR.adjusted(40, Gender::Female);
        assert!((male[2] - 0.42).abs() < 1e-12);
        assert!((female[2] - 0.35).abs() < 1e-12);
    }

    #[test]
    fn older_users_need_higher_score_for_same_rank() {
        let disease = DiseaseType::Type2Diabetes;
        let young = estimate_percentile(0.40, &disease, 35, Gender::Female);
        let old = estimate_percentile(0.40, &disease, 70, Gender::Female);
        assert_eq!(young, 75);
        assert_eq!(old, 50);
    }

    #[test]
    fn unknown_disease_uses_generic_reference() {
        let p = estimate_percentile(0.25, &DiseaseType::Other("gout".into()), 30, Gender::Male);
        assert_eq!(p, 50);
    }

    proptest! {
        #[test]
        fn percentile_is_monotonic(
            a in 0.0f64..=1.0,
            b in 0.0f64..=1.0,
            age in 0u32..110,
            male in any::<bool>(),
            idx in 0usize..8,
        ) {
            let gender = if male { Gender::Male } else { Gender::Female };
            let disease = DiseaseType::KNOWN
                .get(idx)
                .cloned()
                .unwrap_or(DiseaseType::Other("generic".into()));
            let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
            let p_hi = estimate_percentile(hi, &disease, age, gender);
            let p_lo = estimate_percentile(lo, &disease, age, gender);
            prop_assert!(p_hi >= p_lo);
            prop_assert!(PERCENTILE_LABELS.contains(&p_hi));
        }
    }
}
