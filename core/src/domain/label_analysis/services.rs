use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    label_analysis::{
        ports::{LabelAnalysisService, LabelExtractor},
        prompt::{SYSTEM_INSTRUCTION, build_user_prompt},
        schema::get_label_extraction_schema,
        value_objects::{AnalyzeLabelInput, ExtractionRequest, MAX_LABEL_IMAGES},
    },
    nutrition::entities::{AnalysisRecord, ExtractionRecord},
};

impl<LE> LabelAnalysisService for Service<LE>
where
    LE: LabelExtractor,
{
    #[instrument(skip_all, fields(images = input.images.len(), language = %input.language))]
    async fn analyze_label(&self, input: AnalyzeLabelInput) -> Result<AnalysisRecord, CoreError> {
        // 1. Validate images
        if input.images.is_empty() {
            tracing::warn!("label analysis requested without images");
            return Err(CoreError::Invalid);
        }

        if input.images.len() > MAX_LABEL_IMAGES {
            tracing::warn!(
                "label analysis requested with {} images (max {})",
                input.images.len(),
                MAX_LABEL_IMAGES
            );
            return Err(CoreError::Invalid);
        }

        // 2. Call the extraction collaborator
        let request = ExtractionRequest {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            prompt: build_user_prompt(input.language),
            images: input.images,
            response_schema: get_label_extraction_schema(),
        };

        let raw_response = self.label_extractor.extract(request).await?;

        // 3. Parse the partial record
        let extraction: ExtractionRecord = serde_json::from_str(&raw_response).map_err(|e| {
            tracing::error!("Failed to parse extraction response: {}", e);
            CoreError::ExtractionFailed(format!("Failed to parse extraction response: {}", e))
        })?;

        // 4. Score
        Ok(self.scoring_pipeline.score(extraction))
    }

    fn score_extraction(&self, extraction: ExtractionRecord) -> AnalysisRecord {
        self.scoring_pipeline.score(extraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        label_analysis::{
            ports::MockLabelExtractor,
            value_objects::{Language, LabelImage, LabelSide},
        },
        nutrition::entities::{Grade, RiskLevel},
    };

    fn back_label() -> LabelImage {
        LabelImage::new(LabelSide::Back, vec![0xff, 0xd8, 0xff, 0xe0])
    }

    fn input(images: Vec<LabelImage>) -> AnalyzeLabelInput {
        AnalyzeLabelInput {
            images,
            language: Language::Hindi,
        }
    }

    #[tokio::test]
    async fn test_analyze_label_scores_extracted_record() {
        let mut extractor = MockLabelExtractor::new();
        extractor
            .expect_extract()
            .withf(|request| {
                request.images.len() == 1
                    && request.prompt.contains("Hindi")
                    && request.system_instruction == SYSTEM_INSTRUCTION
            })
            .times(1)
            .returning(|_| {
                Box::pin(async {
                    Ok(serde_json::json!({
                        "productName": "Glucose Biscuits",
                        "sugarPerServingGrams": 8.4,
                        "ingredients": [
                            { "originalName": "Refined Wheat Flour", "riskLevel": "caution" },
                            { "originalName": "INS 102", "riskLevel": "avoid" }
                        ],
                        "nutritionPer100g": {
                            "energyKJ": 1900, "sugarGrams": 25, "satFatGrams": 8, "sodiumMg": 300
                        }
                    })
                    .to_string())
                })
            });

        let service = Service::new(extractor);
        let record = service.analyze_label(input(vec![back_label()])).await.unwrap();

        assert_eq!(record.product_name, "Glucose Biscuits");
        assert_eq!(record.sugar_teaspoons, 2.0);
        assert_eq!(record.ingredients[1].risk_level, RiskLevel::Avoid);
        // 100 - 29.4 - 30 - 20
        assert_eq!(record.score.health_score, 21);
        // N = 5 + 5 + 7 + 3
        assert_eq!(record.score.nutri_score, Some(Grade::E));
    }

    #[tokio::test]
    async fn test_analyze_label_without_images_is_invalid() {
        let mut extractor = MockLabelExtractor::new();
        extractor.expect_extract().never();

        let service = Service::new(extractor);
        let result = service.analyze_label(input(vec![])).await;

        assert_eq!(result, Err(CoreError::Invalid));
    }

    #[tokio::test]
    async fn test_analyze_label_with_too_many_images_is_invalid() {
        let mut extractor = MockLabelExtractor::new();
        extractor.expect_extract().never();

        let service = Service::new(extractor);
        let images = (0..=MAX_LABEL_IMAGES).map(|_| back_label()).collect();
        let result = service.analyze_label(input(images)).await;

        assert_eq!(result, Err(CoreError::Invalid));
    }

    #[tokio::test]
    async fn test_analyze_label_rejects_malformed_json() {
        let mut extractor = MockLabelExtractor::new();
        extractor
            .expect_extract()
            .returning(|_| Box::pin(async { Ok("not json".to_string()) }));

        let service = Service::new(extractor);
        let result = service.analyze_label(input(vec![back_label()])).await;

        assert!(matches!(result, Err(CoreError::ExtractionFailed(_))));
    }

    #[tokio::test]
    async fn test_analyze_label_propagates_extractor_errors() {
        let mut extractor = MockLabelExtractor::new();
        extractor.expect_extract().returning(|_| {
            Box::pin(async { Err(CoreError::ExternalServiceError("timeout".to_string())) })
        });

        let service = Service::new(extractor);
        let result = service.analyze_label(input(vec![back_label()])).await;

        assert_eq!(
            result,
            Err(CoreError::ExternalServiceError("timeout".to_string()))
        );
    }

    #[test]
    fn test_score_extraction_matches_pipeline() {
        let service = Service::new(MockLabelExtractor::new());
        let extraction = ExtractionRecord {
            sugar_per_serving_grams: Some(4.2),
            ..ExtractionRecord::default()
        };

        assert_eq!(
            service.score_extraction(extraction.clone()),
            service.scoring_pipeline().score(extraction)
        );
    }
}
