//! Trend and deterioration detection over dated health samples.
//!
//! Independent of risk scoring. Pure and deterministic: the same samples
//! always produce the same patterns.

pub mod analyzer;
pub mod detection;
pub mod messages;
pub mod regression;
pub mod types;

pub use analyzer::TrendAnalyzer;
pub use regression::calculate_trend;
pub use types::{AlertLevel, HealthPattern, PatternType, Severity, Timeframe, TrendDirection};
