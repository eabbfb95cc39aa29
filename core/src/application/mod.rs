use crate::{
    domain::common::{TruthbiteConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::llm::GeminiLabelExtractor,
};

pub type TruthbiteService = Service<GeminiLabelExtractor>;

/// Builds the service from explicit configuration; nothing is read from
/// process-wide state.
pub fn create_service(config: TruthbiteConfig) -> Result<TruthbiteService, CoreError> {
    if config.llm.gemini_api_key.is_empty() {
        tracing::warn!("GEMINI_API_KEY is empty: label image analysis will fail upstream");
    }

    let label_extractor = GeminiLabelExtractor::new(&config.llm)?;

    Ok(Service::new(label_extractor))
}
