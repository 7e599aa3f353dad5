use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One dated self-tracking entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSample {
    pub date: NaiveDate,
    /// Metric name (e.g. `systolic_bp`) to measured value.
    #[serde(default)]
    pub vital_signs: BTreeMap<String, f64>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    /// Self-rated overall condition, 1 (poor) to 5 (very good).
    pub overall_condition: f64,
}
