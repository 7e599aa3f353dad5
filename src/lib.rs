pub mod config;
pub mod db;
pub mod models;
pub mod risk; // Disease risk scoring
pub mod service; // Async orchestration over a data source
pub mod source;
pub mod trends; // Deterioration detection over dated samples

pub use risk::{compute_risk, RiskAssessment, RiskCalculationInput};
pub use service::{AnalyticsError, RiskAnalyticsService};
pub use source::{HealthDataSource, SqliteHealthSource};
pub use trends::{HealthPattern, TrendAnalyzer};

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. Filter comes from `RUST_LOG`, falling back
/// to `config::default_log_filter()`. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}
