use axum::extract::{Multipart, State};
use truthbite_core::domain::label_analysis::{
    ports::LabelAnalysisService,
    value_objects::{AnalyzeLabelInput, LabelImage, LabelSide, Language, MAX_LABEL_IMAGES},
};

use crate::application::http::{
    label_analysis::{
        handlers::score_extraction::AnalyzeLabelResponse, validators::AnalyzeLabelImagesForm,
    },
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Body limit for the whole multipart request.
pub const MAX_UPLOAD_SIZE: usize = MAX_LABEL_IMAGES * MAX_IMAGE_SIZE + 64 * 1024;

#[utoipa::path(
    post,
    path = "/images",
    tag = "label-analysis",
    summary = "Analyze label photographs",
    description = "Sends front/back label photos to the extraction model, then scores the extracted record",
    request_body(content = AnalyzeLabelImagesForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = AnalyzeLabelResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 422, body = ApiErrorResponse),
        (status = 502, body = ApiErrorResponse)
    ),
)]
pub async fn analyze_label_images(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<AnalyzeLabelResponse>, ApiError> {
    let mut images: Vec<LabelImage> = Vec::new();
    let mut language = Language::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "language" => {
                let value = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read language: {}", e))
                })?;
                language = value
                    .parse()
                    .map_err(|_| ApiError::BadRequest(format!("Unsupported language: {}", value)))?;
            }
            "front" | "back" => {
                let side = if name == "front" {
                    LabelSide::Front
                } else {
                    LabelSide::Back
                };

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

                if data.is_empty() {
                    continue;
                }

                if data.len() > MAX_IMAGE_SIZE {
                    return Err(ApiError::BadRequest(format!(
                        "Image too large. Max size is {} bytes",
                        MAX_IMAGE_SIZE
                    )));
                }

                images.push(LabelImage::new(side, data.to_vec()));
            }
            _ => {}
        }
    }

    if images.is_empty() {
        return Err(ApiError::BadRequest(
            "Missing image field: send at least one 'front' or 'back' image".to_string(),
        ));
    }

    if images.len() > MAX_LABEL_IMAGES {
        return Err(ApiError::BadRequest(format!(
            "Too many images. At most {} are accepted",
            MAX_LABEL_IMAGES
        )));
    }

    let record = state
        .service
        .analyze_label(AnalyzeLabelInput { images, language })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AnalyzeLabelResponse { data: record }))
}
