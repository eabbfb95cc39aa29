use super::handlers::{
    analyze_label_images::{MAX_UPLOAD_SIZE, __path_analyze_label_images, analyze_label_images},
    score_extraction::{__path_score_extraction, score_extraction},
};
use crate::application::http::server::app_state::AppState;
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(score_extraction, analyze_label_images))]
pub struct LabelAnalysisApiDoc;

pub fn label_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/label-analysis/score", state.args.server.root_path),
            post(score_extraction),
        )
        .route(
            &format!("{}/label-analysis/images", state.args.server.root_path),
            post(analyze_label_images).layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE)),
        )
}
