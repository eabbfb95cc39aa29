use axum::extract::State;
use serde::{Deserialize, Serialize};
use truthbite_core::domain::{
    label_analysis::ports::LabelAnalysisService, nutrition::AnalysisRecord,
};
use utoipa::ToSchema;

use crate::application::http::{
    label_analysis::validators::ScoreExtractionRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeLabelResponse {
    pub data: AnalysisRecord,
}

#[utoipa::path(
    post,
    path = "/score",
    tag = "label-analysis",
    summary = "Score an extracted label record",
    description = "Normalizes a possibly partial extraction record and computes the Nutri-Score grade, health score and sugar teaspoons. No external service is called.",
    responses(
        (status = 200, body = AnalyzeLabelResponse),
        (status = 400, body = ApiErrorResponse)
    ),
    request_body = ScoreExtractionRequest
)]
pub async fn score_extraction(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<ScoreExtractionRequest>,
) -> Result<Response<AnalyzeLabelResponse>, ApiError> {
    let record = state.service.score_extraction(payload.extraction);

    Ok(Response::OK(AnalyzeLabelResponse { data: record }))
}
