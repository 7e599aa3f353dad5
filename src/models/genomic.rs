use serde::{Deserialize, Serialize};

use super::disease::DiseaseType;

/// Pre-computed genetic risk percentile for one disease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenomicDiseaseRisk {
    pub disease_type: DiseaseType,
    /// Percentile on a 0-100 scale.
    pub risk_score: f64,
}

/// Aggregate genomic summary supplied by the genotyping collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenomicSummary {
    pub disease_risks: Vec<GenomicDiseaseRisk>,
}

impl GenomicSummary {
    /// Risk score recorded for a disease, if any. First match wins.
    pub fn score_for(&self, disease: &DiseaseType) -> Option<f64> {
        self.disease_risks
            .iter()
            .find(|r| &r.disease_type == disease)
            .map(|r| r.risk_score)
    }
}
