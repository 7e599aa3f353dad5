//! Request-level orchestration.
//!
//! Gathers a user's inputs from a `HealthDataSource` on the blocking pool,
//! consults the assessment cache and runs the synchronous engines.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::config::AnalyticsConfig;
use crate::db::DatabaseError;
use crate::models::{DiseaseType, FamilyMember, GenomicSummary, UserProfile};
use crate::risk::{
    AssessmentCache, CacheKey, DefaultRiskScorer, RiskAssessment, RiskCalculationInput, RiskError,
    RiskScorer,
};
use crate::source::HealthDataSource;
use crate::trends::{HealthPattern, TrendAnalyzer};

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Risk error: {0}")]
    Risk(#[from] RiskError),

    #[error("No profile recorded for user {0}")]
    ProfileNotFound(Uuid),

    #[error("Background task failed: {0}")]
    TaskJoin(String),
}

/// Disease-independent inputs for one user.
struct UserSnapshot {
    profile: UserProfile,
    genomic: Option<GenomicSummary>,
    family: Option<Vec<FamilyMember>>,
}

impl UserSnapshot {
    fn input_for(&self, disease: DiseaseType) -> RiskCalculationInput {
        RiskCalculationInput {
            disease_type: disease,
            user_profile: self.profile.clone(),
            genomic_data: self.genomic.clone(),
            family_history: self.family.clone(),
        }
    }
}

pub struct RiskAnalyticsService<S> {
    source: Arc<S>,
    scorer: Arc<dyn RiskScorer>,
    cache: AssessmentCache,
    analyzer: TrendAnalyzer,
}

impl<S: HealthDataSource + 'static> RiskAnalyticsService<S> {
    pub fn new(source: Arc<S>, config: AnalyticsConfig) -> Self {
        Self::with_scorer(source, config, Arc::new(DefaultRiskScorer::new()))
    }

    pub fn with_scorer(source: Arc<S>, config: AnalyticsConfig, scorer: Arc<dyn RiskScorer>) -> Self {
        Self {
            source,
            scorer,
            cache: AssessmentCache::new(),
            analyzer: TrendAnalyzer::new(config.trend),
        }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    pub fn cache(&self) -> &AssessmentCache {
        &self.cache
    }

    /// Run a source call on the blocking pool.
    async fn blocking<T, F>(&self, f: F) -> Result<T, AnalyticsError>
    where
        F: FnOnce(&S) -> Result<T, DatabaseError> + Send + 'static,
        T: Send + 'static,
    {
        let source = Arc::clone(&self.source);
        tokio::task::spawn_blocking(move || f(&source))
            .await
            .map_err(|e| AnalyticsError::TaskJoin(e.to_string()))?
            .map_err(AnalyticsError::from)
    }

    async fn snapshot(&self, user_id: Uuid) -> Result<UserSnapshot, AnalyticsError> {
        let (profile, genomic, family) = tokio::try_join!(
            self.blocking(move |s| s.user_profile(&user_id)),
            self.blocking(move |s| s.genomic_summary(&user_id)),
            self.blocking(move |s| s.family_history(&user_id)),
        )?;

        let profile = profile.ok_or(AnalyticsError::ProfileNotFound(user_id))?;
        let family = (!family.is_empty()).then_some(family);

        Ok(UserSnapshot {
            profile,
            genomic,
            family,
        })
    }

    /// Fetch profile, genomic summary and family history concurrently.
    pub async fn gather_input(
        &self,
        user_id: Uuid,
        disease: DiseaseType,
    ) -> Result<RiskCalculationInput, AnalyticsError> {
        Ok(self.snapshot(user_id).await?.input_for(disease))
    }

    fn score(&self, user_id: Uuid, input: RiskCalculationInput) -> Result<RiskAssessment, AnalyticsError> {
        let key = CacheKey::for_input(user_id, &input)?;
        if let Some(cached) = self.cache.get(&key)? {
            tracing::debug!(user_id = %user_id, disease = %input.disease_type, "Assessment cache hit");
            return Ok(cached);
        }

        let assessment = self.scorer.compute_risk(&input);
        self.cache.insert(key, assessment.clone())?;
        Ok(assessment)
    }

    /// Score one disease for a user. Unchanged inputs reuse the cached assessment.
    pub async fn assess(&self, user_id: Uuid, disease: DiseaseType) -> Result<RiskAssessment, AnalyticsError> {
        let input = self.gather_input(user_id, disease).await?;
        self.score(user_id, input)
    }

    /// Score several diseases from one gathering pass, in the order given.
    pub async fn assess_many(
        &self,
        user_id: Uuid,
        diseases: &[DiseaseType],
    ) -> Result<Vec<RiskAssessment>, AnalyticsError> {
        let snapshot = self.snapshot(user_id).await?;
        let assessments = diseases
            .iter()
            .map(|disease| self.score(user_id, snapshot.input_for(disease.clone())))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(user_id = %user_id, diseases = assessments.len(), "Batch assessment complete");
        Ok(assessments)
    }

    /// Trend patterns over the user's samples, optionally within an inclusive date range.
    pub async fn analyze_trends(
        &self,
        user_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<HealthPattern>, AnalyticsError> {
        let samples = self
            .blocking(move |s| s.health_samples(&user_id, range))
            .await?;
        Ok(self.analyzer.analyze(&samples))
    }

    /// Drop cached assessments after the user's data changed.
    pub fn invalidate_user(&self, user_id: Uuid) -> Result<usize, AnalyticsError> {
        Ok(self.cache.invalidate_user(user_id)?)
    }
}
