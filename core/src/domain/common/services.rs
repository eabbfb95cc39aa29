use crate::domain::{label_analysis::ports::LabelExtractor, nutrition::pipeline::ScoringPipeline};

/// Domain service wiring the scoring pipeline to the extraction adapter.
#[derive(Clone)]
pub struct Service<LE>
where
    LE: LabelExtractor,
{
    pub(crate) label_extractor: LE,
    pub(crate) scoring_pipeline: ScoringPipeline,
}

impl<LE> Service<LE>
where
    LE: LabelExtractor,
{
    pub fn new(label_extractor: LE) -> Self {
        Self {
            label_extractor,
            scoring_pipeline: ScoringPipeline::new(),
        }
    }

    pub fn scoring_pipeline(&self) -> &ScoringPipeline {
        &self.scoring_pipeline
    }
}
