pub mod entities;
pub mod grade;
pub mod health_score;
pub mod pipeline;

pub use entities::*;
pub use grade::{GradeAssessment, GradeCalculator, GradeOutcome};
pub use health_score::{HealthScore, HealthScoreCalculator};
pub use pipeline::ScoringPipeline;
