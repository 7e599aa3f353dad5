use serde::{Deserialize, Serialize};

use super::enums::{AlcoholUse, DietType, Gender};

/// Reproductive and hormonal history relevant to hormone-sensitive cancers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HormonalFactors {
    pub hormone_therapy: bool,
    pub early_menarche: bool,
    pub late_menopause: bool,
}

/// Self-reported lifestyle. Optional fields mean "not recorded".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lifestyle {
    pub smoking: bool,
    pub alcohol: AlcoholUse,
    /// Exercise sessions per week.
    pub exercise_frequency: u32,
    #[serde(default)]
    pub diet_type: Option<DietType>,
    #[serde(default)]
    pub secondhand_smoke: Option<bool>,
    #[serde(default)]
    pub hormonal_factors: Option<HormonalFactors>,
}

impl Lifestyle {
    pub fn is_low_exercise(&self) -> bool {
        self.exercise_frequency < 2
    }

    pub fn diet_is(&self, diets: &[DietType]) -> bool {
        self.diet_type.is_some_and(|d| diets.contains(&d))
    }

    pub fn hormonal(&self) -> HormonalFactors {
        self.hormonal_factors.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: u32,
    pub gender: Gender,
    #[serde(default)]
    pub bmi: Option<f64>,
    #[serde(default)]
    pub lifestyle: Option<Lifestyle>,
}

impl UserProfile {
    /// BMI above the given cut-off; an unrecorded BMI never counts.
    pub fn bmi_above(&self, cutoff: f64) -> bool {
        self.bmi.is_some_and(|b| b.is_finite() && b > cutoff)
    }
}
