use crate::config::TrendConfig;
use crate::models::HealthSample;

use super::detection::{detect_condition_trend, detect_increasing_symptoms, detect_vital_sign_trends};
use super::regression;
use super::types::HealthPattern;

/// Stateless deterioration detector over a user's dated samples.
#[derive(Debug, Clone, Default)]
pub struct TrendAnalyzer {
    config: TrendConfig,
}

impl TrendAnalyzer {
    pub fn new(config: TrendConfig) -> Self {
        Self { config }
    }

    /// OLS slope of a series against its index.
    pub fn calculate_trend(&self, values: &[f64]) -> f64 {
        regression::calculate_trend(values)
    }

    /// Detect patterns. Too few samples is insufficient evidence, not an error:
    /// the result is simply empty.
    ///
    /// Order: vital-sign patterns by metric name, symptom patterns by symptom
    /// name, then the overall-condition pattern.
    pub fn analyze(&self, samples: &[HealthSample]) -> Vec<HealthPattern> {
        if samples.len() < self.config.min_samples_total {
            tracing::debug!(
                samples = samples.len(),
                required = self.config.min_samples_total,
                "Not enough samples for trend analysis"
            );
            return Vec::new();
        }

        let mut ordered = samples.to_vec();
        ordered.sort_by_key(|s| s.date);

        let mut patterns = detect_vital_sign_trends(&ordered, &self.config);
        patterns.extend(detect_increasing_symptoms(&ordered, &self.config));
        patterns.extend(detect_condition_trend(&ordered, &self.config));

        tracing::info!(
            samples = ordered.len(),
            patterns = patterns.len(),
            "Trend analysis complete"
        );

        patterns
    }
}
