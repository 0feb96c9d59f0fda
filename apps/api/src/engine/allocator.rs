//! Suggestion allocator — splits the score gap into per-suggestion point values
//! and recomputes the live score as suggestions are toggled on and off.
//!
//! Weights: keyword 1.0, title 1.5, critical 1.5. Each weighted suggestion is
//! worth at least [`MIN_POINT_VALUE`], so the table may sum past the gap; the
//! live score is capped at the potential score instead. Scores and a supplied
//! callback are clamped into `[0, 100]` before use.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::probability::{adjust_probability, base_callback_probability};
use crate::engine::suggestion::{AnalysisResult, Suggestion, WeightClass};

pub const KEYWORD_WEIGHT: f64 = 1.0;
pub const TITLE_WEIGHT: f64 = 1.5;
pub const CRITICAL_WEIGHT: f64 = 1.5;

/// Every actionable suggestion shows at least this many points.
pub const MIN_POINT_VALUE: i32 = 1;

pub fn bucket_weight(class: WeightClass) -> Option<f64> {
    match class {
        WeightClass::Keyword => Some(KEYWORD_WEIGHT),
        WeightClass::Title => Some(TITLE_WEIGHT),
        WeightClass::Critical => Some(CRITICAL_WEIGHT),
        WeightClass::Unweighted => None,
    }
}

/// Suggestion index → point value. Built once per [`AnalysisResult`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PointValueTable(BTreeMap<usize, i32>);

impl PointValueTable {
    /// Missing entries are worth nothing.
    pub fn get(&self, index: usize) -> i32 {
        self.0.get(&index).copied().unwrap_or(0)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains_key(&index)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn total(&self) -> i32 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, i32)> + '_ {
        self.0.iter().map(|(i, p)| (*i, *p))
    }
}

/// Indices the user has marked as applied. Never mutated in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct AppliedSet(BTreeSet<usize>);

impl AppliedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<usize> for AppliedSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Score and callback shown to the user for the current applied set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LiveScore {
    pub score: i32,
    pub callback: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggled {
    pub applied: AppliedSet,
    pub live: LiveScore,
}

/// Distributes `potential - current` across the weighted suggestions.
pub fn compute_point_values(result: &AnalysisResult) -> PointValueTable {
    let gap = result.score_gap();

    let weighted: Vec<(usize, f64)> = result
        .suggestions
        .iter()
        .enumerate()
        .filter_map(|(idx, s)| bucket_weight(s.weight_class()).map(|w| (idx, w)))
        .collect();

    if gap <= 0 || weighted.is_empty() {
        debug!(gap, weighted = weighted.len(), "no points to allocate");
        return PointValueTable::default();
    }

    let total_weighted_units: f64 = weighted.iter().map(|(_, w)| w).sum();
    let base_point_value = f64::from(gap) / total_weighted_units;

    let table: BTreeMap<usize, i32> = weighted
        .into_iter()
        .map(|(idx, weight)| {
            let points = ((base_point_value * weight).round() as i32).max(MIN_POINT_VALUE);
            (idx, points)
        })
        .collect();

    debug!(
        gap,
        total_weighted_units,
        base_point_value,
        allocated = table.values().sum::<i32>(),
        "allocated suggestion points"
    );

    PointValueTable(table)
}

/// Flips one suggestion and recomputes the live values.
///
/// Applying a title suggestion evicts any other applied title suggestion.
pub fn toggle(
    index: usize,
    applied: &AppliedSet,
    result: &AnalysisResult,
    point_values: &PointValueTable,
) -> Toggled {
    let next: AppliedSet = if applied.contains(index) {
        applied.iter().filter(|&i| i != index).collect()
    } else if result.is_title(index) {
        applied
            .iter()
            .filter(|&i| !result.is_title(i))
            .chain(std::iter::once(index))
            .collect()
    } else {
        applied.iter().chain(std::iter::once(index)).collect()
    };

    let live = live_score(result, &next, point_values);
    Toggled {
        applied: next,
        live,
    }
}

/// Live score for an applied set. The callback is simulated as if every
/// critical skill were resolved.
pub fn live_score(
    result: &AnalysisResult,
    applied: &AppliedSet,
    point_values: &PointValueTable,
) -> LiveScore {
    let added_points: i32 = applied.iter().map(|i| point_values.get(i)).sum();
    let score = result.score_ceiling().min(result.current() + added_points);
    let callback = adjust_probability(base_callback_probability(score), result.structural_fit, &[]);

    LiveScore { score, callback }
}

/// Clears every toggle and restores the non-simulated baseline.
pub fn reset(result: &AnalysisResult) -> Toggled {
    Toggled {
        applied: AppliedSet::new(),
        live: LiveScore {
            score: result.current(),
            callback: result.baseline_callback(),
        },
    }
}

/// Suggestions handed on to the optimizer: weighted ones only when applied,
/// informational ones always.
pub fn selected_suggestions<'a>(
    result: &'a AnalysisResult,
    applied: &AppliedSet,
) -> Vec<&'a Suggestion> {
    result
        .suggestions
        .iter()
        .enumerate()
        .filter(|(idx, s)| !s.weight_class().is_weighted() || applied.contains(*idx))
        .map(|(_, s)| s)
        .collect()
}
