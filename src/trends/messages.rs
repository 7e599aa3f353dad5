use super::types::{Severity, TrendDirection};

/// Message template builder for trend observations.
/// Calm, preparatory language; no alarm wording.
pub struct TrendMessages;

impl TrendMessages {
    /// Vital-sign slope.
    pub fn vital_sign(metric: &str, slope: f64, severity: Severity, samples: usize) -> String {
        let movement = if slope > 0.0 { "rising" } else { "falling" };
        format!(
            "Your {} readings have been {} over your last {} entries. {}",
            display_metric(metric),
            movement,
            samples,
            follow_up(severity),
        )
    }

    /// Symptom concentrated in recent entries.
    pub fn increasing_symptom(symptom: &str, recent: usize, window: usize, severity: Severity) -> String {
        format!(
            "You have noted {} in {} of your last {} entries. {}",
            symptom.to_lowercase(),
            recent,
            window,
            follow_up(severity),
        )
    }

    /// Overall self-reported condition.
    pub fn condition(direction: TrendDirection, mean: f64, severity: Severity) -> String {
        let movement = match direction {
            TrendDirection::Declining => "has been moving upward",
            TrendDirection::Improving => "has been moving downward",
            TrendDirection::Stable => "has been steady",
        };
        format!(
            "Your overall condition rating {} (average {:.1} out of 5). {}",
            movement,
            mean,
            follow_up(severity),
        )
    }
}

/// "systolic_bp" → "systolic bp".
fn display_metric(metric: &str) -> String {
    metric.replace('_', " ")
}

fn follow_up(severity: Severity) -> &'static str {
    match severity {
        Severity::Severe => "This may be worth discussing with your healthcare provider soon.",
        Severity::Moderate => "You may want to mention this at your next appointment.",
        Severity::Mild => "No action is needed, but it can help to keep an eye on it.",
    }
}
