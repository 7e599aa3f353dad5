use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::config::TrendConfig;
use crate::models::HealthSample;

use super::messages::TrendMessages;
use super::regression::{calculate_trend, mean};
use super::types::*;

/// Confidence attached to every vital-sign pattern.
pub const VITAL_SIGN_CONFIDENCE: f64 = 0.8;
/// Confidence attached to the overall-condition pattern.
pub const CONDITION_CONFIDENCE: f64 = 0.75;

pub const OVERALL_CONDITION: &str = "overall_condition";

fn timeframe(dates: &[NaiveDate]) -> Option<Timeframe> {
    Some(Timeframe {
        start: *dates.first()?,
        end: *dates.last()?,
        sample_count: dates.len(),
    })
}

// ---------------------------------------------------------------------------
// Vital signs
// ---------------------------------------------------------------------------

/// One pattern per metric whose |slope| crosses its moderate threshold.
/// `samples` must be in date order.
pub fn detect_vital_sign_trends(samples: &[HealthSample], config: &TrendConfig) -> Vec<HealthPattern> {
    let metrics: BTreeSet<&str> = samples
        .iter()
        .flat_map(|s| s.vital_signs.keys().map(String::as_str))
        .collect();

    metrics
        .into_iter()
        .filter_map(|metric| detect_metric_trend(metric, samples, config))
        .collect()
}

fn detect_metric_trend(metric: &str, samples: &[HealthSample], config: &TrendConfig) -> Option<HealthPattern> {
    let mut dates = Vec::new();
    let mut values = Vec::new();

    for sample in samples {
        let Some(&value) = sample.vital_signs.get(metric) else {
            continue;
        };
        if !value.is_finite() {
            tracing::warn!(metric, date = %sample.date, "Skipping non-finite vital sign value");
            continue;
        }
        dates.push(sample.date);
        values.push(value);
    }

    if values.len() < config.min_samples_per_metric {
        return None;
    }

    let slope = calculate_trend(&values);
    let thresholds = config.thresholds_for(metric);
    let severity = if slope.abs() > thresholds.severe {
        Severity::Severe
    } else if slope.abs() > thresholds.moderate {
        Severity::Moderate
    } else {
        return None;
    };

    tracing::debug!(metric, slope, severity = severity.as_str(), "Vital sign trend detected");

    Some(HealthPattern {
        pattern_type: PatternType::VitalSignTrend,
        severity,
        trend_direction: TrendDirection::from_slope(slope, config.stable_slope),
        affected_metrics: vec![metric.to_string()],
        timeframe: timeframe(&dates)?,
        confidence: VITAL_SIGN_CONFIDENCE,
        alert_level: severity.alert_level(),
        description: TrendMessages::vital_sign(metric, slope, severity, values.len()),
    })
}

// ---------------------------------------------------------------------------
// Symptoms
// ---------------------------------------------------------------------------

fn normalize_symptom(symptom: &str) -> Option<String> {
    let trimmed = symptom.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// Symptoms present in more than the threshold share of the most recent samples.
/// Frequency is the number of recent samples reporting the symptom over the window size.
pub fn detect_increasing_symptoms(samples: &[HealthSample], config: &TrendConfig) -> Vec<HealthPattern> {
    let window = config.recent_window.min(samples.len());
    if window == 0 {
        return Vec::new();
    }
    let recent = &samples[samples.len() - window..];
    let dates: Vec<NaiveDate> = recent.iter().map(|s| s.date).collect();
    let Some(frame) = timeframe(&dates) else {
        return Vec::new();
    };

    // A sample counts once per symptom even if it lists it twice.
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for sample in recent {
        let names: BTreeSet<String> = sample
            .symptoms
            .iter()
            .filter_map(|s| normalize_symptom(s))
            .collect();
        for name in names {
            *counts.entry(name).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .filter_map(|(symptom, count)| {
            let frequency = count as f64 / window as f64;
            if frequency <= config.symptom_frequency_threshold {
                return None;
            }
            let severity = if frequency > config.symptom_severe_threshold {
                Severity::Severe
            } else {
                Severity::Moderate
            };

            tracing::debug!(symptom = %symptom, frequency, "Increasing symptom detected");

            Some(HealthPattern {
                pattern_type: PatternType::IncreasingSymptoms,
                severity,
                trend_direction: TrendDirection::Declining,
                description: TrendMessages::increasing_symptom(&symptom, count, window, severity),
                affected_metrics: vec![symptom],
                timeframe: frame,
                confidence: frequency,
                alert_level: severity.alert_level(),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Overall condition
// ---------------------------------------------------------------------------

/// Slope of the overall-condition series, banded by its mean.
/// Nothing is reported while |slope| stays under the stable band.
pub fn detect_condition_trend(samples: &[HealthSample], config: &TrendConfig) -> Option<HealthPattern> {
    let (dates, values): (Vec<NaiveDate>, Vec<f64>) = samples
        .iter()
        .filter(|s| s.overall_condition.is_finite())
        .map(|s| (s.date, s.overall_condition))
        .unzip();

    let slope = calculate_trend(&values);
    if slope.abs() < config.stable_slope {
        return None;
    }

    let average = mean(&values);
    let severity = if average < config.condition_severe_mean {
        Severity::Severe
    } else if average < config.condition_moderate_mean {
        Severity::Moderate
    } else {
        Severity::Mild
    };
    let direction = TrendDirection::from_slope(slope, config.stable_slope);

    tracing::debug!(slope, mean = average, severity = severity.as_str(), "Condition trend detected");

    Some(HealthPattern {
        pattern_type: PatternType::ConditionTrend,
        severity,
        trend_direction: direction,
        affected_metrics: vec![OVERALL_CONDITION.to_string()],
        timeframe: timeframe(&dates)?,
        confidence: CONDITION_CONFIDENCE,
        alert_level: severity.alert_level(),
        description: TrendMessages::condition(direction, average, severity),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap() + chrono::Days::new(n as u64)
    }

    fn sample(n: u32) -> HealthSample {
        HealthSample {
            date: day(n),
            vital_signs: BTreeMap::new(),
            symptoms: Vec::new(),
            overall_condition: 4.0,
        }
    }

    fn series(metric: &str, values: &[f64]) -> Vec<HealthSample> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let mut s = sample(i as u32);
                s.vital_signs.insert(metric.to_string(), *v);
                s
            })
            .collect()
    }

    #[test]
    fn systolic_moderate_rise() {
        let samples = series("systolic_bp", &[120.0, 123.0, 126.0, 129.0, 132.0, 135.0, 138.0]);
        let patterns = detect_vital_sign_trends(&samples, &TrendConfig::default());

        assert_eq!(patterns.len(), 1);
        let p = &patterns[0];
        assert_eq!(p.pattern_type, PatternType::VitalSignTrend);
        assert_eq!(p.severity, Severity::Moderate);
        assert_eq!(p.alert_level, AlertLevel::Warning);
        assert_eq!(p.trend_direction, TrendDirection::Declining);
        assert_eq!(p.affected_metrics, vec!["systolic_bp".to_string()]);
        assert_eq!(p.confidence, VITAL_SIGN_CONFIDENCE);
        assert_eq!(p.timeframe.start, day(0));
        assert_eq!(p.timeframe.end, day(6));
        assert_eq!(p.timeframe.sample_count, 7);
    }

    #[test]
    fn heart_rate_severe_fall_is_improving() {
        let samples = series("heart_rate", &[120.0, 110.0, 100.0, 90.0, 80.0]);
        let patterns = detect_vital_sign_trends(&samples, &TrendConfig::default());
        assert_eq!(patterns[0].severity, Severity::Severe);
        assert_eq!(patterns[0].trend_direction, TrendDirection::Improving);
    }

    #[test]
    fn slope_at_moderate_threshold_is_not_reported() {
        // weight moderate threshold is 0.5
        let samples = series("weight", &[80.0, 80.5, 81.0, 81.5, 82.0]);
        assert!(detect_vital_sign_trends(&samples, &TrendConfig::default()).is_empty());
    }

    #[test]
    fn unknown_metric_uses_default_thresholds() {
        let samples = series("steps_k", &[1.0, 3.0, 5.0, 7.0, 9.0]);
        let patterns = detect_vital_sign_trends(&samples, &TrendConfig::default());
        assert_eq!(patterns[0].severity, Severity::Moderate);
    }

    #[test]
    fn metric_needs_five_values() {
        let samples = series("heart_rate", &[60.0, 70.0, 80.0, 90.0]);
        assert!(detect_vital_sign_trends(&samples, &TrendConfig::default()).is_empty());
    }

    #[test]
    fn non_finite_values_are_skipped() {
        let samples = series(
            "heart_rate",
            &[60.0, f64::NAN, 70.0, 80.0, 90.0, f64::INFINITY, 100.0],
        );
        let patterns = detect_vital_sign_trends(&samples, &TrendConfig::default());
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].timeframe.sample_count, 5);
    }

    #[test]
    fn symptom_in_last_three_of_ten_is_severe() {
        let mut samples: Vec<HealthSample> = (0..10).map(sample).collect();
        for s in &mut samples[7..] {
            s.symptoms.push("Headache".into());
        }
        let patterns = detect_increasing_symptoms(&samples, &TrendConfig::default());

        assert_eq!(patterns.len(), 1);
        let p = &patterns[0];
        assert_eq!(p.pattern_type, PatternType::IncreasingSymptoms);
        assert_eq!(p.severity, Severity::Severe);
        assert_eq!(p.alert_level, AlertLevel::Critical);
        assert_eq!(p.affected_metrics, vec!["headache".to_string()]);
        assert!((p.confidence - 1.0).abs() < 1e-12);
        assert_eq!(p.timeframe.start, day(7));
        assert_eq!(p.timeframe.sample_count, 3);
    }

    #[test]
    fn symptom_in_two_of_three_is_moderate() {
        let mut samples: Vec<HealthSample> = (0..8).map(sample).collect();
        samples[5].symptoms.push("nausea".into());
        samples[7].symptoms.push(" Nausea ".into());
        let patterns = detect_increasing_symptoms(&samples, &TrendConfig::default());
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].severity, Severity::Moderate);
    }

    #[test]
    fn single_recent_symptom_is_ignored() {
        let mut samples: Vec<HealthSample> = (0..8).map(sample).collect();
        samples[7].symptoms.push("cough".into());
        samples[7].symptoms.push("cough".into());
        assert!(detect_increasing_symptoms(&samples, &TrendConfig::default()).is_empty());
    }

    #[test]
    fn older_symptoms_do_not_count() {
        let mut samples: Vec<HealthSample> = (0..10).map(sample).collect();
        for s in &mut samples[..7] {
            s.symptoms.push("fatigue".into());
        }
        assert!(detect_increasing_symptoms(&samples, &TrendConfig::default()).is_empty());
    }

    #[test]
    fn declining_condition_with_low_mean() {
        let samples: Vec<HealthSample> = [3.0, 2.8, 2.5, 2.2, 2.0, 1.8, 1.5]
            .iter()
            .enumerate()
            .map(|(i, c)| HealthSample {
                overall_condition: *c,
                ..sample(i as u32)
            })
            .collect();
        let pattern = detect_condition_trend(&samples, &TrendConfig::default()).unwrap();

        assert_eq!(pattern.pattern_type, PatternType::ConditionTrend);
        assert_eq!(pattern.severity, Severity::Severe);
        assert_eq!(pattern.trend_direction, TrendDirection::Improving);
        assert_eq!(pattern.confidence, CONDITION_CONFIDENCE);
        assert_eq!(pattern.affected_metrics, vec![OVERALL_CONDITION.to_string()]);
    }

    #[test]
    fn rising_condition_with_high_mean_is_mild() {
        let samples: Vec<HealthSample> = [3.5, 3.8, 4.0, 4.2, 4.5, 4.7, 5.0]
            .iter()
            .enumerate()
            .map(|(i, c)| HealthSample {
                overall_condition: *c,
                ..sample(i as u32)
            })
            .collect();
        let pattern = detect_condition_trend(&samples, &TrendConfig::default()).unwrap();
        assert_eq!(pattern.severity, Severity::Mild);
        assert_eq!(pattern.alert_level, AlertLevel::Info);
        assert_eq!(pattern.trend_direction, TrendDirection::Declining);
    }

    #[test]
    fn flat_condition_is_suppressed() {
        let samples: Vec<HealthSample> = (0..7).map(sample).collect();
        assert!(detect_condition_trend(&samples, &TrendConfig::default()).is_none());
    }
}
