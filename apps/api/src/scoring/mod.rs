// Deterministic scoring of an upstream resume/JD extraction.
// Produces the AnalysisResult the engine allocates points over.

pub mod components;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod simulate;
pub mod skill_matcher;
pub mod suggestions;

pub use models::{AnalysisReport, ExtractionResult, ScoreBreakdown, ScoringResult};
pub use pipeline::{build_analysis, calculate_scores};
