use crate::application::http::{
    health::handlers::__path_health_check, label_analysis::router::LabelAnalysisApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "TruthBite API",
        description = "Scores packaged-food labels: Nutri-Score grade, 0-100 health score and sugar teaspoons."
    ),
    paths(health_check),
    nest(
        (path = "/label-analysis", api = LabelAnalysisApiDoc),
    )
)]
pub struct ApiDoc;
