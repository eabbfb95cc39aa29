use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    label_analysis::{
        ports::LabelExtractor,
        value_objects::{ExtractionRequest, LabelImage, LabelSide},
    },
};

#[derive(Debug, Clone)]
pub struct GeminiLabelExtractor {
    api_key: String,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ContentResponse,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiLabelExtractor {
    pub fn new(config: &LLMConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build Gemini HTTP client: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(Self {
            api_key: config.gemini_api_key.clone(),
            model_name: config.gemini_model.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model_name, self.api_key
        )
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<String, CoreError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        first_text(gemini_response)
            .ok_or_else(|| CoreError::ExternalServiceError("No response from LLM".to_string()))
    }
}

fn first_text(response: GeminiResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().find_map(|p| p.text))
}

fn inline_image(image: &LabelImage) -> Part {
    Part::InlineData {
        inline_data: InlineData {
            mime_type: image.mime_type().to_string(),
            data: general_purpose::STANDARD.encode(&image.data),
        },
    }
}

/// Back-of-pack images go first: they carry the nutrition table.
fn build_request(request: ExtractionRequest) -> GeminiRequest {
    let (back, front): (Vec<&LabelImage>, Vec<&LabelImage>) = request
        .images
        .iter()
        .partition(|image| image.side == LabelSide::Back);

    let mut parts: Vec<Part> = back.into_iter().chain(front).map(inline_image).collect();
    parts.push(Part::Text {
        text: request.prompt,
    });

    GeminiRequest {
        system_instruction: Content {
            parts: vec![Part::Text {
                text: request.system_instruction,
            }],
        },
        contents: vec![Content { parts }],
        generation_config: GenerationConfig {
            temperature: 0.0,
            response_mime_type: "application/json".to_string(),
            response_schema: request.response_schema,
        },
    }
}

impl LabelExtractor for GeminiLabelExtractor {
    async fn extract(&self, request: ExtractionRequest) -> Result<String, CoreError> {
        tracing::debug!(
            model = %self.model_name,
            images = request.images.len(),
            "requesting label extraction"
        );
        self.call_gemini_api(build_request(request)).await
    }
}
