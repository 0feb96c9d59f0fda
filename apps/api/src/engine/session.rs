use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::allocator::{
    compute_point_values, reset, selected_suggestions, toggle, AppliedSet, LiveScore,
    PointValueTable,
};
use crate::engine::suggestion::{AnalysisResult, Suggestion};

/// One analysis result together with its point table and the user's toggles.
///
/// The three always travel together: a new result produces a new session
/// value with a freshly computed table and an empty applied set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoringSession {
    pub id: Uuid,
    pub result: AnalysisResult,
    pub point_values: PointValueTable,
    pub applied: AppliedSet,
    pub live: LiveScore,
    pub updated_at: DateTime<Utc>,
}

impl ScoringSession {
    pub fn new(result: AnalysisResult) -> Self {
        Self::with_id(Uuid::new_v4(), result)
    }

    fn with_id(id: Uuid, result: AnalysisResult) -> Self {
        let point_values = compute_point_values(&result);
        let baseline = reset(&result);
        Self {
            id,
            result,
            point_values,
            applied: baseline.applied,
            live: baseline.live,
            updated_at: Utc::now(),
        }
    }

    pub fn toggle(&self, index: usize) -> Self {
        let toggled = toggle(index, &self.applied, &self.result, &self.point_values);
        Self {
            applied: toggled.applied,
            live: toggled.live,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    pub fn reset(&self) -> Self {
        let cleared = reset(&self.result);
        Self {
            applied: cleared.applied,
            live: cleared.live,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    /// Swaps in a new result under the same id. Nothing from the old
    /// result's table or toggles survives.
    pub fn replace_result(&self, result: AnalysisResult) -> Self {
        Self::with_id(self.id, result)
    }

    pub fn selected_suggestions(&self) -> Vec<&Suggestion> {
        selected_suggestions(&self.result, &self.applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::suggestion::SuggestionCategory;

    fn result(current: i32, potential: i32, keywords: usize) -> AnalysisResult {
        AnalysisResult {
            current_score: current,
            potential_score: potential,
            structural_fit: false,
            suggestions: (0..keywords)
                .map(|i| {
                    Suggestion::new(
                        format!("Add skill {i}"),
                        "",
                        format!("Skill: S{i}"),
                        SuggestionCategory::Keyword,
                    )
                })
                .collect(),
            current_callback: None,
            potential_callback: None,
            critical_missing_skills: vec![],
        }
    }

    #[test]
    fn test_new_session_starts_at_baseline() {
        let session = ScoringSession::new(result(40, 60, 4));
        assert!(session.applied.is_empty());
        assert_eq!(session.live.score, 40);
        assert_eq!(session.live.callback, session.result.baseline_callback());
        assert_eq!(session.point_values.get(0), 5);
    }

    #[test]
    fn test_toggle_returns_new_value() {
        let session = ScoringSession::new(result(40, 60, 4));
        let toggled = session.toggle(1);

        assert!(session.applied.is_empty());
        assert!(toggled.applied.contains(1));
        assert_eq!(toggled.live.score, 45);
        assert_eq!(toggled.id, session.id);
    }

    #[test]
    fn test_replace_result_discards_toggles_and_table() {
        let session = ScoringSession::new(result(40, 60, 4)).toggle(0).toggle(1);
        let replaced = session.replace_result(result(70, 72, 1));

        assert_eq!(replaced.id, session.id);
        assert!(replaced.applied.is_empty());
        assert_eq!(replaced.live.score, 70);
        assert_eq!(replaced.point_values.len(), 1);
        assert_eq!(replaced.point_values.get(0), 2);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let fresh = ScoringSession::new(result(40, 60, 4));
        let reset_once = fresh.toggle(0).toggle(3).reset();
        let reset_twice = reset_once.reset();

        assert_eq!(reset_once.applied, fresh.applied);
        assert_eq!(reset_once.live, fresh.live);
        assert_eq!(reset_twice.live, fresh.live);
    }

    #[test]
    fn test_out_of_range_result_opens_within_bounds() {
        let mut posted = result(140, 190, 2);
        posted.current_callback = Some(180);
        let session = ScoringSession::new(posted);

        assert!(session.point_values.is_empty());
        assert_eq!(session.live.score, 100);
        assert_eq!(session.live.callback, 100);
        assert_eq!(session.toggle(0).live.score, 100);
    }
}
