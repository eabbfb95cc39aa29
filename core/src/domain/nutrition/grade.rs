//! Nutri-Score grading from per-100g nutrient levels.
//!
//! Final score is `N - P`, where `N` sums energy, sugar, saturated fat and
//! sodium points (0-10 each) and `P` sums fruit/veg/nut, fiber and protein
//! points (0-5 each). Protein points only count towards `P` when `N < 11` or
//! the fruit/veg/nut bucket is already at its maximum.

use crate::domain::nutrition::entities::{Grade, GradePoints, NutrientPoints, NutrientProfile};

/// Negative point total at which protein stops counting.
pub const PROTEIN_EXCLUSION_THRESHOLD: u8 = 11;

pub const MISSING_PROFILE_REASON: &str = "Insufficient data for accurate calculation: the label \
     has no per-100g nutrition table, so a Nutri-Score cannot be computed.";

/// Ascending `(threshold, points)` steps. A value earns the points of the
/// highest threshold it strictly exceeds, or 0 below the first one.
#[derive(Debug, Clone, Copy)]
pub struct PointsTable(&'static [(f64, u8)]);

impl PointsTable {
    pub fn points(&self, value: f64) -> u8 {
        self.0
            .iter()
            .rev()
            .find(|(threshold, _)| value > *threshold)
            .map(|(_, points)| *points)
            .unwrap_or(0)
    }

    pub fn max_points(&self) -> u8 {
        self.0.last().map(|(_, points)| *points).unwrap_or(0)
    }

    pub fn steps(&self) -> &'static [(f64, u8)] {
        self.0
    }
}

pub const ENERGY_KJ: PointsTable = PointsTable(&[
    (335.0, 1),
    (670.0, 2),
    (1005.0, 3),
    (1340.0, 4),
    (1675.0, 5),
    (2010.0, 6),
    (2345.0, 7),
    (2680.0, 8),
    (3015.0, 9),
    (3350.0, 10),
]);

pub const SUGAR_GRAMS: PointsTable = PointsTable(&[
    (4.5, 1),
    (9.0, 2),
    (13.5, 3),
    (18.0, 4),
    (22.5, 5),
    (27.0, 6),
    (31.0, 7),
    (36.0, 8),
    (40.0, 9),
    (45.0, 10),
]);

pub const SAT_FAT_GRAMS: PointsTable = PointsTable(&[
    (1.0, 1),
    (2.0, 2),
    (3.0, 3),
    (4.0, 4),
    (5.0, 5),
    (6.0, 6),
    (7.0, 7),
    (8.0, 8),
    (9.0, 9),
    (10.0, 10),
]);

pub const SODIUM_MG: PointsTable = PointsTable(&[
    (90.0, 1),
    (180.0, 2),
    (270.0, 3),
    (360.0, 4),
    (450.0, 5),
    (540.0, 6),
    (630.0, 7),
    (720.0, 8),
    (810.0, 9),
    (900.0, 10),
]);

pub const FRUIT_VEG_PERCENT: PointsTable = PointsTable(&[(40.0, 1), (60.0, 2), (80.0, 5)]);

pub const FIBER_GRAMS: PointsTable =
    PointsTable(&[(0.9, 1), (1.9, 2), (2.8, 3), (3.7, 4), (4.7, 5)]);

pub const PROTEIN_GRAMS: PointsTable =
    PointsTable(&[(1.6, 1), (3.2, 2), (4.8, 3), (6.4, 4), (8.0, 5)]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeAssessment {
    pub grade: Grade,
    pub points: GradePoints,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradeOutcome {
    Graded(GradeAssessment),
    Unavailable { reason: String },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GradeCalculator;

impl GradeCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Grades a label, or explains why it can't be graded when no profile
    /// was extracted.
    pub fn assess(&self, profile: Option<&NutrientProfile>) -> GradeOutcome {
        match profile {
            Some(profile) => GradeOutcome::Graded(self.calculate(profile)),
            None => GradeOutcome::Unavailable {
                reason: MISSING_PROFILE_REASON.to_string(),
            },
        }
    }

    /// Missing nutrient fields count as zero.
    pub fn calculate(&self, profile: &NutrientProfile) -> GradeAssessment {
        let nutrients = NutrientPoints {
            energy: ENERGY_KJ.points(profile.energy_kj.unwrap_or(0.0)),
            sugar: SUGAR_GRAMS.points(profile.sugar_grams.unwrap_or(0.0)),
            saturated_fat: SAT_FAT_GRAMS.points(profile.sat_fat_grams.unwrap_or(0.0)),
            sodium: SODIUM_MG.points(profile.sodium_mg.unwrap_or(0.0)),
            fruit_veg: FRUIT_VEG_PERCENT.points(profile.fruit_veg_percent.unwrap_or(0.0)),
            fiber: FIBER_GRAMS.points(profile.fiber_grams.unwrap_or(0.0)),
            protein: PROTEIN_GRAMS.points(profile.protein_grams.unwrap_or(0.0)),
        };

        let negative_points =
            nutrients.energy + nutrients.sugar + nutrients.saturated_fat + nutrients.sodium;

        let protein_excluded = negative_points >= PROTEIN_EXCLUSION_THRESHOLD
            && nutrients.fruit_veg < FRUIT_VEG_PERCENT.max_points();

        let positive_points = nutrients.fruit_veg
            + nutrients.fiber
            + if protein_excluded { 0 } else { nutrients.protein };

        let final_score = i32::from(negative_points) - i32::from(positive_points);

        GradeAssessment {
            grade: Grade::from_score(final_score),
            points: GradePoints {
                nutrients,
                negative_points,
                positive_points,
                protein_excluded,
                final_score,
            },
        }
    }
}
