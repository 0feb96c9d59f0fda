// Scoring engine: callback probability, suggestion point allocation, and the
// toggle/reset state that drives the live score preview.
// Pure and synchronous. No I/O happens below this module.

pub mod allocator;
pub mod probability;
pub mod session;
pub mod suggestion;

pub use allocator::{
    compute_point_values, reset, selected_suggestions, toggle, AppliedSet, LiveScore,
    PointValueTable, Toggled,
};
pub use probability::{adjust_probability, base_callback_probability};
pub use session::ScoringSession;
pub use suggestion::{AnalysisResult, Suggestion, SuggestionCategory, WeightClass};
