use serde::{Deserialize, Serialize};

use crate::engine::probability::{adjust_probability, base_callback_probability, clamp_percent};

/// Substring (case-insensitive) that marks a job-title rewrite.
pub const TITLE_MARKER: &str = "title";

/// Warning sign carried by critical / structural suggestions.
pub const CRITICAL_MARKER: &str = "\u{26A0}";

/// Coarse display grouping assigned by the analysis producer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionCategory {
    Text,
    Keyword,
    Other,
}

/// Point-allocation bucket. Independent of [`SuggestionCategory`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WeightClass {
    Keyword,
    Title,
    Critical,
    Unweighted,
}

impl WeightClass {
    pub fn is_weighted(self) -> bool {
        !matches!(self, WeightClass::Unweighted)
    }
}

/// A single recommended resume edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[serde(rename = "suggestion")]
    pub text: String,
    #[serde(default)]
    pub original_text: String,
    #[serde(default)]
    pub improved_text: String,
    pub category: SuggestionCategory,
    /// Explicit bucket tag. When absent the bucket is inferred from the text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_class: Option<WeightClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_user_confirmation: Option<bool>,
}

impl Suggestion {
    pub fn new(
        text: impl Into<String>,
        original_text: impl Into<String>,
        improved_text: impl Into<String>,
        category: SuggestionCategory,
    ) -> Self {
        Self {
            text: text.into(),
            original_text: original_text.into(),
            improved_text: improved_text.into(),
            category,
            weight_class: None,
            requires_user_confirmation: None,
        }
    }

    pub fn with_weight_class(mut self, weight_class: WeightClass) -> Self {
        self.weight_class = Some(weight_class);
        self
    }

    /// Bucket used for point allocation.
    pub fn weight_class(&self) -> WeightClass {
        self.weight_class
            .unwrap_or_else(|| infer_weight_class(&self.text, self.category))
    }
}

/// Legacy classification for producers that don't tag suggestions.
/// Title wins over Critical when both markers are present.
pub fn infer_weight_class(text: &str, category: SuggestionCategory) -> WeightClass {
    if text.to_lowercase().contains(TITLE_MARKER) {
        WeightClass::Title
    } else if category == SuggestionCategory::Keyword {
        WeightClass::Keyword
    } else if category == SuggestionCategory::Other && text.contains(CRITICAL_MARKER) {
        WeightClass::Critical
    } else {
        WeightClass::Unweighted
    }
}

/// Output of one analysis run. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub current_score: i32,
    pub potential_score: i32,
    pub structural_fit: bool,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_callback: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potential_callback: Option<i32>,
    #[serde(default)]
    pub critical_missing_skills: Vec<String>,
}

impl AnalysisResult {
    /// `current_score` clamped into `[0, 100]`.
    pub fn current(&self) -> i32 {
        clamp_percent(self.current_score)
    }

    /// `potential_score` clamped into `[0, 100]`.
    pub fn potential(&self) -> i32 {
        clamp_percent(self.potential_score)
    }

    /// Highest score the live view may reach. Never below the current score.
    pub fn score_ceiling(&self) -> i32 {
        self.potential().max(self.current())
    }

    pub fn score_gap(&self) -> i32 {
        self.potential() - self.current()
    }

    /// Baseline callback, derived from the current score when the producer
    /// didn't supply one.
    pub fn baseline_callback(&self) -> i32 {
        match self.current_callback {
            Some(callback) => clamp_percent(callback),
            None => adjust_probability(
                base_callback_probability(self.current()),
                self.structural_fit,
                &self.critical_missing_skills,
            ),
        }
    }

    pub fn weight_class_of(&self, index: usize) -> Option<WeightClass> {
        self.suggestions.get(index).map(Suggestion::weight_class)
    }

    pub fn is_title(&self, index: usize) -> bool {
        self.weight_class_of(index) == Some(WeightClass::Title)
    }
}
