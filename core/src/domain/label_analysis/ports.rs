use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    label_analysis::value_objects::{AnalyzeLabelInput, ExtractionRequest},
    nutrition::entities::{AnalysisRecord, ExtractionRecord},
};

/// Image-to-record extraction collaborator (LLM vision model).
///
/// Returns the raw JSON text of a best-effort, possibly partial record.
#[cfg_attr(test, mockall::automock)]
pub trait LabelExtractor: Send + Sync {
    fn extract(
        &self,
        request: ExtractionRequest,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for label analysis business logic
#[cfg_attr(test, mockall::automock)]
pub trait LabelAnalysisService: Send + Sync {
    /// Extracts a record from label photographs, then scores it.
    fn analyze_label(
        &self,
        input: AnalyzeLabelInput,
    ) -> impl Future<Output = Result<AnalysisRecord, CoreError>> + Send;

    /// Scores an already extracted record. Pure, never fails.
    fn score_extraction(&self, extraction: ExtractionRecord) -> AnalysisRecord;
}
