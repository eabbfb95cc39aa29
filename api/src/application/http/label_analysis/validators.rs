use serde::{Deserialize, Serialize};
use truthbite_core::domain::{label_analysis::value_objects::Language, nutrition::ExtractionRecord};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

pub const MAX_TEXT_LENGTH: usize = 5000;
pub const MAX_INGREDIENTS: usize = 200;
pub const MAX_CLAIMS: usize = 50;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct ScoreExtractionRequest {
    #[serde(flatten)]
    #[validate(custom(function = "validate_extraction"))]
    pub extraction: ExtractionRecord,
}

/// Bounds payload size only; numeric values are never rejected.
fn validate_extraction(extraction: &ExtractionRecord) -> Result<(), ValidationError> {
    let too_long = |text: &Option<String>| text.as_ref().is_some_and(|t| t.len() > MAX_TEXT_LENGTH);

    if too_long(&extraction.product_name)
        || too_long(&extraction.serving_size)
        || too_long(&extraction.summary)
    {
        return Err(ValidationError::new("text_too_long").with_message(
            format!("text fields must be at most {} characters", MAX_TEXT_LENGTH).into(),
        ));
    }

    if extraction
        .ingredients
        .as_ref()
        .is_some_and(|ingredients| ingredients.len() > MAX_INGREDIENTS)
    {
        return Err(ValidationError::new("too_many_ingredients").with_message(
            format!("at most {} ingredients are accepted", MAX_INGREDIENTS).into(),
        ));
    }

    if extraction
        .claims
        .as_ref()
        .is_some_and(|claims| claims.len() > MAX_CLAIMS)
    {
        return Err(ValidationError::new("too_many_claims").with_message(
            format!("at most {} claims are accepted", MAX_CLAIMS).into(),
        ));
    }

    Ok(())
}

/// Multipart form accepted by the image analysis endpoint.
#[derive(Debug, ToSchema)]
pub struct AnalyzeLabelImagesForm {
    /// Front-of-pack photos.
    #[schema(value_type = Vec<String>, format = Binary)]
    pub front: Vec<Vec<u8>>,
    /// Back-of-pack photos (nutrition table, ingredients).
    #[schema(value_type = Vec<String>, format = Binary)]
    pub back: Vec<Vec<u8>>,
    pub language: Option<Language>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use truthbite_core::domain::nutrition::{Ingredient, RiskLevel};

    #[test]
    fn test_empty_extraction_is_valid() {
        let request = ScoreExtractionRequest {
            extraction: ExtractionRecord::default(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_too_many_ingredients_is_invalid() {
        let request = ScoreExtractionRequest {
            extraction: ExtractionRecord {
                ingredients: Some(vec![
                    Ingredient::new("salt", RiskLevel::Safe);
                    MAX_INGREDIENTS + 1
                ]),
                ..ExtractionRecord::default()
            },
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_negative_numbers_are_not_rejected() {
        let request = ScoreExtractionRequest {
            extraction: ExtractionRecord {
                sugar_per_serving_grams: Some(-3.0),
                ..ExtractionRecord::default()
            },
        };
        assert!(request.validate().is_ok());
    }
}
