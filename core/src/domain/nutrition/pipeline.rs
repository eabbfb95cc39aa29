use tracing::{debug, warn};

use crate::domain::nutrition::{
    entities::{AnalysisRecord, ExtractionRecord, HealthBand, ScoreResult, ScoreWarning},
    grade::{GradeCalculator, GradeOutcome},
    health_score::HealthScoreCalculator,
};

pub const SUGAR_GRAMS_PER_TEASPOON: f64 = 4.2;

/// Supplied and derived teaspoon values further apart than this are reported.
pub const TEASPOON_MISMATCH_TOLERANCE: f64 = 0.5;

pub fn sugar_grams_to_teaspoons(grams: f64) -> f64 {
    grams / SUGAR_GRAMS_PER_TEASPOON
}

/// Turns a raw extraction into a fully populated [`AnalysisRecord`].
///
/// Missing collections are replaced by empty ones before either calculator
/// runs. The grade is only computed when a per-100g profile was extracted.
/// A teaspoon value supplied by the extractor always wins over the locally
/// derived one; a disagreement is attached as a warning, never corrected.
/// Without an extracted gram value there is nothing to compare against.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringPipeline {
    grade_calculator: GradeCalculator,
    health_score_calculator: HealthScoreCalculator,
}

impl ScoringPipeline {
    pub fn new() -> Self {
        Self {
            grade_calculator: GradeCalculator::new(),
            health_score_calculator: HealthScoreCalculator::new(),
        }
    }

    pub fn score(&self, extraction: ExtractionRecord) -> AnalysisRecord {
        let ExtractionRecord {
            product_name,
            serving_size,
            sugar_per_serving_grams,
            sugar_teaspoons,
            summary,
            macros,
            nutrition_per_100g,
            ingredients,
            claims,
        } = extraction;

        let ingredients = ingredients.unwrap_or_default();
        let claims = claims.unwrap_or_default();
        let macros = macros.unwrap_or_default();
        let sugar_grams = sugar_per_serving_grams.unwrap_or(0.0);
        let grams_extracted = sugar_per_serving_grams.is_some();

        let (nutri_score, nutri_score_reason, grade_points) =
            match self.grade_calculator.assess(nutrition_per_100g.as_ref()) {
                GradeOutcome::Graded(assessment) => {
                    (Some(assessment.grade), None, Some(assessment.points))
                }
                GradeOutcome::Unavailable { reason } => (None, Some(reason), None),
            };

        let health = self
            .health_score_calculator
            .calculate(sugar_grams, &ingredients, &macros);

        let mut warnings = health.warnings;
        let derived_teaspoons = sugar_grams_to_teaspoons(sugar_grams);
        let teaspoons = match sugar_teaspoons {
            Some(supplied) => {
                if grams_extracted && teaspoons_disagree(supplied, derived_teaspoons) {
                    warn!(
                        supplied,
                        derived = derived_teaspoons,
                        "extracted sugar teaspoons disagree with sugar grams"
                    );
                    warnings.push(ScoreWarning::SugarTeaspoonMismatch {
                        supplied,
                        derived: derived_teaspoons,
                    });
                }
                supplied
            }
            None => derived_teaspoons,
        };

        let product_name = product_name.unwrap_or_default();

        debug!(
            product = %product_name,
            grade = ?nutri_score,
            health_score = health.score,
            ingredients = ingredients.len(),
            "scored label"
        );

        AnalysisRecord {
            product_name,
            serving_size: serving_size.unwrap_or_default(),
            sugar_per_serving_grams: sugar_grams,
            sugar_teaspoons: teaspoons,
            summary: summary.unwrap_or_default(),
            ingredients,
            claims,
            macros,
            nutrition_per_100g,
            score: ScoreResult {
                nutri_score,
                nutri_score_label: nutri_score.map(|grade| grade.label().to_string()),
                nutri_score_description: nutri_score.map(|grade| grade.description().to_string()),
                nutri_score_reason,
                grade_points,
                health_score: health.score,
                health_band: HealthBand::from_score(health.score),
                breakdown: health.breakdown,
                warnings,
            },
        }
    }
}

fn teaspoons_disagree(supplied: f64, derived: f64) -> bool {
    supplied.is_finite()
        && derived.is_finite()
        && (supplied - derived).abs() > TEASPOON_MISMATCH_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::nutrition::entities::{
        ClaimVerdict, Grade, Ingredient, MarketingClaim, NutrientProfile, RiskLevel,
        ServingMacros,
    };

    fn pipeline() -> ScoringPipeline {
        ScoringPipeline::new()
    }

    #[test]
    fn test_empty_extraction_is_fully_populated() {
        let record = pipeline().score(ExtractionRecord::default());

        assert_eq!(record.product_name, "");
        assert_eq!(record.serving_size, "");
        assert_eq!(record.sugar_per_serving_grams, 0.0);
        assert_eq!(record.sugar_teaspoons, 0.0);
        assert!(record.ingredients.is_empty());
        assert!(record.claims.is_empty());
        assert_eq!(record.macros, ServingMacros::default());
        assert_eq!(record.score.health_score, 100);
        assert_eq!(
            record.score.warnings,
            vec![ScoreWarning::EmptyIngredientList]
        );
    }

    #[test]
    fn test_missing_profile_yields_reason_not_grade() {
        let record = pipeline().score(ExtractionRecord::default());

        assert!(record.score.nutri_score.is_none());
        assert!(record.score.grade_points.is_none());
        let reason = record.score.nutri_score_reason.unwrap();
        assert!(!reason.is_empty());
    }

    #[test]
    fn test_present_profile_yields_grade_not_reason() {
        let record = pipeline().score(ExtractionRecord {
            nutrition_per_100g: Some(NutrientProfile::default()),
            ..ExtractionRecord::default()
        });

        assert_eq!(record.score.nutri_score, Some(Grade::B));
        assert!(record.score.nutri_score_reason.is_none());
        assert!(record.nutrition_per_100g.is_some());
    }

    #[test]
    fn test_teaspoons_derived_from_grams() {
        let record = pipeline().score(ExtractionRecord {
            sugar_per_serving_grams: Some(8.4),
            ..ExtractionRecord::default()
        });
        assert_eq!(record.sugar_teaspoons, 2.0);
        assert!(
            !record
                .score
                .warnings
                .iter()
                .any(|w| matches!(w, ScoreWarning::SugarTeaspoonMismatch { .. }))
        );
    }

    #[test]
    fn test_supplied_teaspoons_pass_through_with_warning() {
        let record = pipeline().score(ExtractionRecord {
            sugar_per_serving_grams: Some(8.4),
            sugar_teaspoons: Some(5.0),
            ..ExtractionRecord::default()
        });

        assert_eq!(record.sugar_teaspoons, 5.0);
        assert!(record.score.warnings.contains(&ScoreWarning::SugarTeaspoonMismatch {
            supplied: 5.0,
            derived: 2.0,
        }));
    }

    #[test]
    fn test_supplied_teaspoons_without_grams_have_no_warning() {
        let record = pipeline().score(ExtractionRecord {
            sugar_teaspoons: Some(3.0),
            ..ExtractionRecord::default()
        });

        assert_eq!(record.sugar_teaspoons, 3.0);
        assert_eq!(record.sugar_per_serving_grams, 0.0);
        assert_eq!(
            record.score.warnings,
            vec![ScoreWarning::EmptyIngredientList]
        );
    }

    #[test]
    fn test_mixed_case_avoid_tags_are_penalised() {
        let extraction: ExtractionRecord = serde_json::from_value(serde_json::json!({
            "ingredients": [
                { "originalName": "Rice", "riskLevel": "safe" },
                { "originalName": "E211", "riskLevel": "Avoid" },
                { "originalName": "E102", "riskLevel": "AVOID" }
            ]
        }))
        .unwrap();

        let record = pipeline().score(extraction);

        // 100 - 20 - 20
        assert_eq!(record.score.health_score, 60);
    }

    #[test]
    fn test_grade_label_and_description_accompany_grade() {
        let graded = pipeline().score(ExtractionRecord {
            nutrition_per_100g: Some(NutrientProfile::default()),
            ..ExtractionRecord::default()
        });
        assert_eq!(graded.score.nutri_score_label.as_deref(), Some("Healthy"));
        assert_eq!(
            graded.score.nutri_score_description.as_deref(),
            Some(Grade::B.description())
        );

        let ungraded = pipeline().score(ExtractionRecord::default());
        assert!(ungraded.score.nutri_score_label.is_none());
        assert!(ungraded.score.nutri_score_description.is_none());
    }

    #[test]
    fn test_consistent_supplied_teaspoons_have_no_warning() {
        let record = pipeline().score(ExtractionRecord {
            sugar_per_serving_grams: Some(8.4),
            sugar_teaspoons: Some(2.2),
            ingredients: Some(vec![Ingredient::new("oats", RiskLevel::Safe)]),
            ..ExtractionRecord::default()
        });

        assert_eq!(record.sugar_teaspoons, 2.2);
        assert!(record.score.warnings.is_empty());
    }

    #[test]
    fn test_passthrough_fields_and_scores_merge() {
        let claims = vec![MarketingClaim {
            claim: "Made with real cashews".to_string(),
            reality: "Contains 4% cashew paste".to_string(),
            verdict: ClaimVerdict::Misleading,
        }];
        let ingredients = vec![
            Ingredient::new("Sugar", RiskLevel::Caution),
            Ingredient::new("Cashew paste", RiskLevel::Safe),
        ];

        let record = pipeline().score(ExtractionRecord {
            product_name: Some("Cashew Delight".to_string()),
            serving_size: Some("30 g".to_string()),
            sugar_per_serving_grams: Some(10.0),
            summary: Some("Mostly sugar.".to_string()),
            macros: Some(ServingMacros {
                carbs: 20.0,
                protein: 2.0,
                fat: 6.0,
            }),
            ingredients: Some(ingredients.clone()),
            claims: Some(claims.clone()),
            ..ExtractionRecord::default()
        });

        assert_eq!(record.product_name, "Cashew Delight");
        assert_eq!(record.serving_size, "30 g");
        assert_eq!(record.summary, "Mostly sugar.");
        assert_eq!(record.ingredients, ingredients);
        assert_eq!(record.claims, claims);
        assert_eq!(record.macros.fat, 6.0);
        // 100 - 35 - 30
        assert_eq!(record.score.health_score, 35);
        assert_eq!(record.score.health_band, HealthBand::Poor);
    }

    #[test]
    fn test_identical_input_identical_output() {
        let extraction = ExtractionRecord {
            sugar_per_serving_grams: Some(3.3),
            nutrition_per_100g: Some(NutrientProfile {
                energy_kj: Some(1800.0),
                sugar_grams: Some(12.0),
                ..NutrientProfile::default()
            }),
            ingredients: Some(vec![Ingredient::new("Glucose syrup", RiskLevel::Avoid)]),
            ..ExtractionRecord::default()
        };

        assert_eq!(
            pipeline().score(extraction.clone()),
            pipeline().score(extraction)
        );
    }

    #[test]
    fn test_serialized_record_has_exactly_one_of_grade_and_reason() {
        let graded = serde_json::to_value(pipeline().score(ExtractionRecord {
            nutrition_per_100g: Some(NutrientProfile::default()),
            ..ExtractionRecord::default()
        }))
        .unwrap();
        assert_eq!(graded["nutriScore"], "B");
        assert_eq!(graded["nutriScoreLabel"], "Healthy");
        assert!(graded.get("nutriScoreReason").is_none());
        assert_eq!(graded["healthScore"], 100);

        let ungraded = serde_json::to_value(pipeline().score(ExtractionRecord::default())).unwrap();
        assert!(ungraded.get("nutriScore").is_none());
        assert!(ungraded.get("nutriScoreLabel").is_none());
        assert!(ungraded["nutriScoreReason"].is_string());
    }
}
