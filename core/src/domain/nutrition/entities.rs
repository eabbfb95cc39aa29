use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Nutrient levels per 100 g (or 100 ml) as printed on the label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct NutrientProfile {
    #[serde(rename = "energyKJ", alias = "energyKj")]
    pub energy_kj: Option<f64>,
    pub sugar_grams: Option<f64>,
    pub sat_fat_grams: Option<f64>,
    pub sodium_mg: Option<f64>,
    pub fiber_grams: Option<f64>,
    pub protein_grams: Option<f64>,
    pub fruit_veg_percent: Option<f64>,
}

/// Drops `null` entries from an optional list instead of failing the record.
fn skip_null_entries<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let entries = Option::<Vec<Option<T>>>::deserialize(deserializer)?;
    Ok(entries.map(|entries| entries.into_iter().flatten().collect()))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Avoid,
    /// Also used for entries the extractor left unclassified.
    #[default]
    Caution,
}

impl RiskLevel {
    /// Tags are matched case-insensitively; anything unrecognised is `Caution`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "safe" => RiskLevel::Safe,
            "avoid" => RiskLevel::Avoid,
            _ => RiskLevel::Caution,
        }
    }
}

impl<'de> Deserialize<'de> for RiskLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(RiskLevel::from_tag(&tag))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub translated_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub risk_level: RiskLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banned_in: Option<Vec<String>>,
}

impl Ingredient {
    pub fn new(original_name: impl Into<String>, risk_level: RiskLevel) -> Self {
        let original_name = original_name.into();

        Self {
            translated_name: original_name.clone(),
            original_name,
            description: String::new(),
            risk_level,
            banned_in: None,
        }
    }
}

/// Macronutrients per serving, in grams.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ServingMacros {
    #[serde(default, deserialize_with = "null_as_default")]
    pub carbs: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub protein: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fat: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClaimVerdict {
    Verified,
    Misleading,
    #[default]
    Unknown,
}

impl ClaimVerdict {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "verified" => ClaimVerdict::Verified,
            "misleading" => ClaimVerdict::Misleading,
            _ => ClaimVerdict::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for ClaimVerdict {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(ClaimVerdict::from_tag(&tag))
    }
}

/// A front-of-pack claim compared against the ingredient list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MarketingClaim {
    #[serde(default, deserialize_with = "null_as_default")]
    pub claim: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reality: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub verdict: ClaimVerdict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
}

impl Grade {
    /// Maps a final Nutri-Score point total to its letter.
    pub fn from_score(score: i32) -> Self {
        match score {
            i32::MIN..=-1 => Grade::A,
            0..=2 => Grade::B,
            3..=10 => Grade::C,
            11..=18 => Grade::D,
            _ => Grade::E,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Grade::A => "Very Healthy",
            Grade::B => "Healthy",
            Grade::C => "Average",
            Grade::D => "Low Quality",
            Grade::E => "Poor Quality",
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Grade::A => "Highest nutritional quality. Great for daily consumption.",
            Grade::B => "Good nutritional quality. A solid choice.",
            Grade::C => "Acceptable in moderation, but check sugar/fat levels.",
            Grade::D => "Lower nutritional quality. Best enjoyed occasionally.",
            Grade::E => "High in calories, sugar, or fat. Limit significantly.",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Points awarded per nutrient by the grade tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NutrientPoints {
    pub energy: u8,
    pub sugar: u8,
    pub saturated_fat: u8,
    pub sodium: u8,
    pub fruit_veg: u8,
    pub fiber: u8,
    pub protein: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradePoints {
    pub nutrients: NutrientPoints,
    pub negative_points: u8,
    pub positive_points: u8,
    /// Protein points were dropped from the positive total.
    pub protein_excluded: bool,
    pub final_score: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum AdjustmentKind {
    SugarPenalty,
    PrimaryIngredientPenalty,
    AvoidIngredientPenalty,
    ProcessingPenalty,
    ProteinBonus,
}

/// One applied term of the health score rubric. Advisory only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreAdjustment {
    pub kind: AdjustmentKind,
    /// Signed contribution: negative for penalties, positive for bonuses.
    pub points: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ScoreAdjustment {
    pub fn new(kind: AdjustmentKind, points: f64) -> Self {
        Self {
            kind,
            points,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ScoreWarning {
    /// No ingredients were read; ingredient penalties were skipped and the
    /// health score is not a quality signal.
    EmptyIngredientList,
    /// The extractor's teaspoon value disagrees with the gram value.
    SugarTeaspoonMismatch { supplied: f64, derived: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthBand {
    Good,
    Moderate,
    Poor,
}

impl HealthBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            70.. => HealthBand::Good,
            40..=69 => HealthBand::Moderate,
            _ => HealthBand::Poor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutri_score: Option<Grade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutri_score_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutri_score_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutri_score_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_points: Option<GradePoints>,
    pub health_score: u8,
    pub health_band: HealthBand,
    #[serde(default)]
    pub breakdown: Vec<ScoreAdjustment>,
    #[serde(default)]
    pub warnings: Vec<ScoreWarning>,
}

/// Raw record returned by the label extraction collaborator. Every field may
/// be missing; score fields the extractor sends are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractionRecord {
    pub product_name: Option<String>,
    pub serving_size: Option<String>,
    pub sugar_per_serving_grams: Option<f64>,
    pub sugar_teaspoons: Option<f64>,
    pub summary: Option<String>,
    pub macros: Option<ServingMacros>,
    #[serde(rename = "nutritionPer100g")]
    pub nutrition_per_100g: Option<NutrientProfile>,
    #[serde(deserialize_with = "skip_null_entries")]
    pub ingredients: Option<Vec<Ingredient>>,
    #[serde(deserialize_with = "skip_null_entries")]
    pub claims: Option<Vec<MarketingClaim>>,
}

/// Fully populated scoring output for one label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub product_name: String,
    pub serving_size: String,
    pub sugar_per_serving_grams: f64,
    pub sugar_teaspoons: f64,
    pub summary: String,
    pub ingredients: Vec<Ingredient>,
    pub claims: Vec<MarketingClaim>,
    pub macros: ServingMacros,
    #[serde(
        rename = "nutritionPer100g",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub nutrition_per_100g: Option<NutrientProfile>,
    #[serde(flatten)]
    pub score: ScoreResult,
}
