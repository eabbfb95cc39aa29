use crate::domain::nutrition::entities::{
    AdjustmentKind, Ingredient, RiskLevel, ScoreAdjustment, ScoreWarning, ServingMacros,
};

pub const BASE_SCORE: f64 = 100.0;
pub const SUGAR_PENALTY_PER_GRAM: f64 = 3.5;
pub const PRIMARY_INGREDIENT_PENALTY: f64 = 30.0;
pub const AVOID_INGREDIENT_PENALTY: f64 = 20.0;
pub const PROCESSING_PENALTY: f64 = 10.0;
pub const PROCESSING_INGREDIENT_LIMIT: usize = 10;
pub const PROTEIN_BONUS: f64 = 5.0;
pub const PROTEIN_BONUS_MIN_GRAMS: f64 = 5.0;

/// Lower-cased fragments that flag an unhealthy primary ingredient.
pub const UNHEALTHY_PRIMARY_INGREDIENTS: [&str; 7] = [
    "sugar",
    "syrup",
    "glucose",
    "maida",
    "refined wheat flour",
    "palm oil",
    "invert sugar",
];

#[derive(Debug, Clone, PartialEq)]
pub struct HealthScore {
    pub score: u8,
    pub breakdown: Vec<ScoreAdjustment>,
    pub warnings: Vec<ScoreWarning>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HealthScoreCalculator;

impl HealthScoreCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Scores a serving on the 0-100 rubric. Terms are additive and the total
    /// is only clamped and rounded once all of them are applied.
    pub fn calculate(
        &self,
        sugar_grams_per_serving: f64,
        ingredients: &[Ingredient],
        macros: &ServingMacros,
    ) -> HealthScore {
        let mut breakdown = Vec::new();
        let mut warnings = Vec::new();

        let sugar_penalty = SUGAR_PENALTY_PER_GRAM * sugar_grams_per_serving;
        if sugar_penalty != 0.0 {
            breakdown.push(ScoreAdjustment::new(
                AdjustmentKind::SugarPenalty,
                -sugar_penalty,
            ));
        }

        match ingredients.first() {
            None => warnings.push(ScoreWarning::EmptyIngredientList),
            Some(primary) => {
                if is_unhealthy_primary(primary) {
                    breakdown.push(
                        ScoreAdjustment::new(
                            AdjustmentKind::PrimaryIngredientPenalty,
                            -PRIMARY_INGREDIENT_PENALTY,
                        )
                        .with_detail(primary.original_name.clone()),
                    );
                }

                breakdown.extend(
                    ingredients
                        .iter()
                        .filter(|ingredient| ingredient.risk_level == RiskLevel::Avoid)
                        .map(|ingredient| {
                            ScoreAdjustment::new(
                                AdjustmentKind::AvoidIngredientPenalty,
                                -AVOID_INGREDIENT_PENALTY,
                            )
                            .with_detail(ingredient.original_name.clone())
                        }),
                );

                if ingredients.len() > PROCESSING_INGREDIENT_LIMIT {
                    breakdown.push(
                        ScoreAdjustment::new(
                            AdjustmentKind::ProcessingPenalty,
                            -PROCESSING_PENALTY,
                        )
                        .with_detail(format!("{} ingredients", ingredients.len())),
                    );
                }
            }
        }

        if macros.protein > PROTEIN_BONUS_MIN_GRAMS {
            breakdown.push(ScoreAdjustment::new(
                AdjustmentKind::ProteinBonus,
                PROTEIN_BONUS,
            ));
        }

        let total = breakdown
            .iter()
            .fold(BASE_SCORE, |total, adjustment| total + adjustment.points);

        HealthScore {
            score: clamp_score(total),
            breakdown,
            warnings,
        }
    }
}

fn is_unhealthy_primary(ingredient: &Ingredient) -> bool {
    let name = ingredient.original_name.to_lowercase();
    UNHEALTHY_PRIMARY_INGREDIENTS
        .iter()
        .any(|fragment| name.contains(fragment))
}

/// NaN totals (from a non-finite sugar value) score 0.
fn clamp_score(total: f64) -> u8 {
    if total.is_nan() {
        return 0;
    }
    total.clamp(0.0, BASE_SCORE).round() as u8
}
