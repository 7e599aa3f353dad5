//! In-memory assessment cache.
//!
//! One entry per (user, disease), tagged with a content hash of the full
//! calculation input. A lookup with a different hash misses, and the next
//! insert replaces the stale entry. Nothing is persisted; the cache lives
//! as long as its owner.

use std::collections::HashMap;
use std::sync::RwLock;

use base64::Engine;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::models::DiseaseType;

use super::types::{RiskAssessment, RiskCalculationInput, RiskError};

// ═══════════════════════════════════════════════════════════
// CacheKey
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub user_id: Uuid,
    pub disease: DiseaseType,
    pub input_hash: String,
}

impl CacheKey {
    pub fn for_input(user_id: Uuid, input: &RiskCalculationInput) -> Result<Self, RiskError> {
        Ok(Self {
            user_id,
            disease: input.disease_type.clone(),
            input_hash: AssessmentCache::input_hash(input)?,
        })
    }
}

// ═══════════════════════════════════════════════════════════
// AssessmentCache
// ═══════════════════════════════════════════════════════════

#[derive(Debug)]
struct CachedAssessment {
    input_hash: String,
    assessment: RiskAssessment,
}

#[derive(Debug, Default)]
pub struct AssessmentCache {
    entries: RwLock<HashMap<(Uuid, DiseaseType), CachedAssessment>>,
}

impl AssessmentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// SHA-256 of the input's JSON form, base64 encoded.
    pub fn input_hash(input: &RiskCalculationInput) -> Result<String, RiskError> {
        let json =
            serde_json::to_vec(input).map_err(|e| RiskError::Serialization(e.to_string()))?;
        let digest = Sha256::digest(&json);
        Ok(base64::engine::general_purpose::STANDARD.encode(digest))
    }

    pub fn get(&self, key: &CacheKey) -> Result<Option<RiskAssessment>, RiskError> {
        let entries = self.entries.read().map_err(|_| RiskError::LockFailed)?;
        Ok(entries
            .get(&(key.user_id, key.disease.clone()))
            .filter(|cached| cached.input_hash == key.input_hash)
            .map(|cached| cached.assessment.clone()))
    }

    /// Store an assessment, replacing any earlier one for the same user and disease.
    pub fn insert(&self, key: CacheKey, assessment: RiskAssessment) -> Result<(), RiskError> {
        let mut entries = self.entries.write().map_err(|_| RiskError::LockFailed)?;
        let user_id = key.user_id;
        let replaced = entries.insert(
            (key.user_id, key.disease),
            CachedAssessment {
                input_hash: key.input_hash,
                assessment,
            },
        );
        if replaced.is_some() {
            tracing::debug!(user_id = %user_id, "Replaced stale cached assessment");
        }
        Ok(())
    }

    /// Drop every entry for one user. Returns how many were removed.
    pub fn invalidate_user(&self, user_id: Uuid) -> Result<usize, RiskError> {
        let mut entries = self.entries.write().map_err(|_| RiskError::LockFailed)?;
        let before = entries.len();
        entries.retain(|(user, _), _| *user != user_id);
        let removed = before - entries.len();

        if removed > 0 {
            tracing::debug!(user_id = %user_id, removed, "Invalidated cached assessments");
        }
        Ok(removed)
    }

    pub fn len(&self) -> Result<usize, RiskError> {
        let entries = self.entries.read().map_err(|_| RiskError::LockFailed)?;
        Ok(entries.len())
    }

    pub fn is_empty(&self) -> Result<bool, RiskError> {
        Ok(self.len()? == 0)
    }
}
