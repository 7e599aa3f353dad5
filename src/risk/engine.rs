use chrono::NaiveDateTime;

use super::factors::normalize;
use super::integrator::integrate;
use super::percentile::estimate_percentile;
use super::recommendations::generate_recommendations;
use super::registry::DiseaseRegistry;
use super::types::{RiskAssessment, RiskCalculationInput, RiskLevel, RiskScorer};

/// Default risk scorer.
/// Runs factor extraction, weighted integration, percentile lookup and
/// recommendation selection for one disease. Holds no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRiskScorer;

impl DefaultRiskScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score with an explicit timestamp. Identical input and timestamp give identical output.
    pub fn compute_risk_at(
        &self,
        input: &RiskCalculationInput,
        calculated_at: NaiveDateTime,
    ) -> RiskAssessment {
        let registry = DiseaseRegistry::global();
        let model = registry.model_for(&input.disease_type);

        if !registry.is_registered(&input.disease_type) {
            tracing::debug!(
                disease = %input.disease_type,
                "No dedicated model, scoring with generic profile"
            );
        }

        let factors = normalize(input, model);
        let risk_score = integrate(&factors, &model.weights);
        let percentile = estimate_percentile(
            risk_score,
            &input.disease_type,
            input.user_profile.age,
            input.user_profile.gender,
        );
        let recommendations =
            generate_recommendations(&input.disease_type.tag(), &factors, risk_score, model);
        let risk_level = RiskLevel::from_score(risk_score);

        tracing::info!(
            disease = %input.disease_type,
            score = risk_score,
            level = risk_level.as_str(),
            percentile,
            "Risk assessment complete"
        );

        RiskAssessment {
            disease_type: input.disease_type.clone(),
            risk_score,
            risk_level,
            percentile,
            contributing_factors: factors,
            recommendations,
            confidence: model.confidence,
            calculated_at,
        }
    }
}

impl RiskScorer for DefaultRiskScorer {
    fn compute_risk(&self, input: &RiskCalculationInput) -> RiskAssessment {
        self.compute_risk_at(input, chrono::Local::now().naive_local())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use proptest::prelude::*;

    use super::*;
    use crate::models::*;
    use crate::risk::recommendations::RecommendationTemplates;

    fn profile(age: u32, gender: Gender) -> UserProfile {
        UserProfile {
            age,
            gender,
            bmi: None,
            lifestyle: None,
        }
    }

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn heavy_smoker_input() -> RiskCalculationInput {
        let mut input = RiskCalculationInput::new(
            DiseaseType::LungCancer,
            UserProfile {
                age: 68,
                gender: Gender::Male,
                bmi: Some(27.0),
                lifestyle: Some(Lifestyle {
                    smoking: true,
                    alcohol: AlcoholUse::Moderate,
                    exercise_frequency: 1,
                    diet_type: None,
                    secondhand_smoke: Some(true),
                    hormonal_factors: None,
                }),
            },
        );
        input.genomic_data = Some(GenomicSummary {
            disease_risks: vec![GenomicDiseaseRisk {
                disease_type: DiseaseType::LungCancer,
                risk_score: 85.0,
            }],
        });
        input.family_history = Some(vec![FamilyMember {
            relationship: Relationship::Parent,
            conditions: vec!["Lung cancer".into()],
        }]);
        input
    }

    #[test]
    fn profile_only_generic_scores_exactly_neutral() {
        let input = RiskCalculationInput::new(
            DiseaseType::Other("hypertension".into()),
            profile(55, Gender::Female),
        );
        let assessment = DefaultRiskScorer::new().compute_risk_at(&input, fixed_time());

        assert!(assessment
            .contributing_factors
            .as_array()
            .iter()
            .all(|f| *f == 0.5));
        assert!((assessment.risk_score - 0.5).abs() < 1e-9);
        assert_eq!(assessment.risk_level, RiskLevel::from_score(assessment.risk_score));
        assert_eq!(assessment.confidence, 0.7);
    }

    #[test]
    fn other_with_known_tag_scores_like_the_known_disease() {
        let scorer = DefaultRiskScorer::new();
        let mut raw = heavy_smoker_input();
        raw.disease_type = DiseaseType::Other(" LUNG_CANCER".into());
        let assessment = scorer.compute_risk_at(&raw, fixed_time());
        let expected = scorer.compute_risk_at(&heavy_smoker_input(), fixed_time());

        assert_eq!(assessment.confidence, 0.85);
        assert_eq!(assessment.risk_score.to_bits(), expected.risk_score.to_bits());
        assert_eq!(assessment.recommendations, expected.recommendations);
    }

    #[test]
    fn profile_only_cardiovascular_is_weighted_neutral_sum() {
        let input = RiskCalculationInput::new(
            DiseaseType::CardiovascularDisease,
            profile(50, Gender::Female),
        );
        let assessment = DefaultRiskScorer::new().compute_risk_at(&input, fixed_time());
        // age 0.4, gender 0.4, everything else neutral
        let expected = 0.5 * (0.25 + 0.35 + 0.15 + 0.05) + 0.4 * 0.15 + 0.4 * 0.05;
        assert!((assessment.risk_score - expected).abs() < 1e-9);
    }

    #[test]
    fn high_risk_smoker_gets_urgent_message_first() {
        let assessment = DefaultRiskScorer::new().compute_risk_at(&heavy_smoker_input(), fixed_time());

        assert!(assessment.risk_score > 0.7, "score {}", assessment.risk_score);
        assert_eq!(assessment.risk_level, RiskLevel::VeryHigh);
        assert_eq!(
            assessment.recommendations[0],
            RecommendationTemplates::urgent("lung cancer")
        );
        assert!(assessment
            .recommendations
            .contains(&RecommendationTemplates::genetic_counseling()));
        assert!(assessment
            .recommendations
            .contains(&RecommendationTemplates::regular_checkups()));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let scorer = DefaultRiskScorer::new();
        let input = heavy_smoker_input();
        let a = scorer.compute_risk(&input);
        let b = scorer.compute_risk(&input);

        assert_eq!(a.risk_score.to_bits(), b.risk_score.to_bits());
        assert_eq!(a.percentile, b.percentile);
        assert_eq!(a.recommendations, b.recommendations);
        assert_eq!(
            serde_json::to_string(&a.contributing_factors).unwrap(),
            serde_json::to_string(&b.contributing_factors).unwrap()
        );
    }

    #[test]
    fn assessment_serializes_with_tags() {
        let assessment = DefaultRiskScorer::new().compute_risk_at(&heavy_smoker_input(), fixed_time());
        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["disease_type"], "lung_cancer");
        assert_eq!(json["risk_level"], "very_high");
        assert!(json["contributing_factors"]["genetic_risk"].is_number());
    }

    proptest! {
        #[test]
        fn score_in_unit_range(
            age in 0u32..120,
            male in any::<bool>(),
            genetic in proptest::option::of(0.0f64..=100.0),
            smoking in any::<bool>(),
            idx in 0usize..8,
        ) {
            let disease = DiseaseType::KNOWN
                .get(idx)
                .cloned()
                .unwrap_or(DiseaseType::Other("generic".into()));
            let mut input = RiskCalculationInput::new(
                disease.clone(),
                UserProfile {
                    age,
                    gender: if male { Gender::Male } else { Gender::Female },
                    bmi: Some(35.0),
                    lifestyle: Some(Lifestyle {
                        smoking,
                        alcohol: AlcoholUse::Heavy,
                        exercise_frequency: 0,
                        diet_type: Some(DietType::Western),
                        secondhand_smoke: Some(true),
                        hormonal_factors: None,
                    }),
                },
            );
            input.genomic_data = genetic.map(|score| GenomicSummary {
                disease_risks: vec![GenomicDiseaseRisk { disease_type: disease.clone(), risk_score: score }],
            });

            let assessment = DefaultRiskScorer::new().compute_risk_at(&input, fixed_time());
            prop_assert!((0.0..=1.0).contains(&assessment.risk_score));
            prop_assert!([10u8, 25, 50, 75, 90, 95].contains(&assessment.percentile));
        }
    }
}
