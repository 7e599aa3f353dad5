//! Per-disease factor weights.
//!
//! Each entry sums to 1.0. Entries are process-wide constants; the registry
//! pairs each disease with one of them and unknown diseases get `GENERIC`.

use serde::Serialize;

use crate::models::DiseaseType;

use super::registry::DiseaseRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorWeights {
    pub genetic: f64,
    pub lifestyle: f64,
    pub family_history: f64,
    pub age: f64,
    pub gender: f64,
    pub environmental: f64,
}

impl FactorWeights {
    pub const fn new(
        genetic: f64,
        lifestyle: f64,
        family_history: f64,
        age: f64,
        gender: f64,
        environmental: f64,
    ) -> Self {
        Self {
            genetic,
            lifestyle,
            family_history,
            age,
            gender,
            environmental,
        }
    }

    pub fn sum(&self) -> f64 {
        self.genetic + self.lifestyle + self.family_history + self.age + self.gender + self.environmental
    }
}

pub const CARDIOVASCULAR: FactorWeights = FactorWeights::new(0.25, 0.35, 0.15, 0.15, 0.05, 0.05);
pub const TYPE2_DIABETES: FactorWeights = FactorWeights::new(0.25, 0.40, 0.15, 0.10, 0.05, 0.05);
pub const ALZHEIMER: FactorWeights = FactorWeights::new(0.40, 0.15, 0.15, 0.25, 0.03, 0.02);
pub const BREAST_CANCER: FactorWeights = FactorWeights::new(0.30, 0.20, 0.20, 0.10, 0.15, 0.05);
pub const PROSTATE_CANCER: FactorWeights = FactorWeights::new(0.25, 0.15, 0.20, 0.20, 0.15, 0.05);
pub const COLORECTAL_CANCER: FactorWeights = FactorWeights::new(0.20, 0.30, 0.20, 0.20, 0.05, 0.05);
pub const LUNG_CANCER: FactorWeights = FactorWeights::new(0.15, 0.50, 0.10, 0.10, 0.05, 0.10);
pub const GENERIC: FactorWeights = FactorWeights::new(0.25, 0.25, 0.20, 0.15, 0.10, 0.05);

/// Read-only view of the weight assigned to each disease.
pub struct WeightTable;

impl WeightTable {
    /// Weights for a disease; unrecognized diseases resolve to `GENERIC`.
    pub fn for_disease(disease: &DiseaseType) -> &'static FactorWeights {
        &DiseaseRegistry::global().model_for(disease).weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_sums_to_one() {
        for weights in [
            CARDIOVASCULAR,
            TYPE2_DIABETES,
            ALZHEIMER,
            BREAST_CANCER,
            PROSTATE_CANCER,
            COLORECTAL_CANCER,
            LUNG_CANCER,
            GENERIC,
        ] {
            assert!((weights.sum() - 1.0).abs() < 1e-9, "{weights:?} sums to {}", weights.sum());
        }
    }

    #[test]
    fn registered_diseases_sum_to_one() {
        for disease in DiseaseType::KNOWN {
            let sum = WeightTable::for_disease(&disease).sum();
            assert!((sum - 1.0).abs() < 1e-9, "{disease} sums to {sum}");
        }
    }

    #[test]
    fn cardiovascular_weights() {
        let w = WeightTable::for_disease(&DiseaseType::CardiovascularDisease);
        assert_eq!(*w, FactorWeights::new(0.25, 0.35, 0.15, 0.15, 0.05, 0.05));
    }

    #[test]
    fn unknown_disease_uses_generic() {
        let w = WeightTable::for_disease(&DiseaseType::Other("gout".into()));
        assert_eq!(*w, GENERIC);
    }
}
