use crate::engine::suggestion::{Suggestion, SuggestionCategory, WeightClass, CRITICAL_MARKER};
use crate::scoring::models::ExtractionResult;

/// Below this title similarity a title rewrite is suggested.
const TITLE_SIMILARITY_THRESHOLD: f64 = 0.7;

/// Missing skills of at least this importance get a keyword suggestion.
const SUGGESTED_MIN_IMPORTANCE: u8 = 2;

/// `(score below, upstream suggestions kept)`. Lower scores get more help.
const SUGGESTION_BUDGETS: &[(i32, usize)] = &[(50, 10), (75, 7), (90, 5)];
const MIN_SUGGESTION_BUDGET: usize = 3;

pub fn suggestion_budget(current_score: i32) -> usize {
    SUGGESTION_BUDGETS
        .iter()
        .find(|(below, _)| current_score < *below)
        .map(|(_, count)| *count)
        .unwrap_or(MIN_SUGGESTION_BUDGET)
}

/// Suggestions derived from the scoring itself, tagged with explicit weight
/// classes so allocation never depends on their wording.
pub fn generate_deterministic_suggestions(
    data: &ExtractionResult,
    structural_fit: bool,
    title_similarity: f64,
    jd_title: &str,
) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    for skill in &data.missing_skills {
        let important = data
            .required_skills
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(skill))
            .map_or(true, |r| r.importance >= SUGGESTED_MIN_IMPORTANCE);
        if !important {
            continue;
        }

        suggestions.push(
            Suggestion::new(
                format!("Add \"{skill}\" to your skills section if you have this skill"),
                "",
                format!("Skill: {skill}"),
                SuggestionCategory::Keyword,
            )
            .with_weight_class(WeightClass::Keyword),
        );
    }

    if title_similarity < TITLE_SIMILARITY_THRESHOLD {
        let best_title = data
            .titles
            .suggested_title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(jd_title);
        suggestions.push(
            Suggestion::new(
                format!("Update your title to match the job: \"{best_title}\""),
                data.candidate_title.as_deref().unwrap_or("Current Title"),
                best_title,
                SuggestionCategory::Keyword,
            )
            .with_weight_class(WeightClass::Title),
        );
    }

    if !structural_fit {
        suggestions.push(
            Suggestion::new(
                format!(
                    "{}\u{FE0F} Your resume structure doesn't meet ATS requirements. Switch to an ATS-friendly template.",
                    CRITICAL_MARKER
                ),
                "Current Structure",
                "ATS Friendly Structure",
                SuggestionCategory::Other,
            )
            .with_weight_class(WeightClass::Critical),
        );
    }

    let has_skills_section = data
        .resume_skills
        .iter()
        .any(|s| s.locations.iter().any(|l| l == "skills"));
    if !has_skills_section {
        suggestions.push(
            Suggestion::new(
                "Add a dedicated 'Skills' section for better ATS parsing",
                "",
                "Skills Section",
                SuggestionCategory::Other,
            )
            .with_weight_class(WeightClass::Unweighted),
        );
    }

    suggestions
}

/// Deterministic suggestions first, then the upstream ones trimmed to the
/// budget for this score.
pub fn merge_suggestions(
    deterministic: Vec<Suggestion>,
    upstream: &[Suggestion],
    current_score: i32,
) -> Vec<Suggestion> {
    let budget = suggestion_budget(current_score);
    deterministic
        .into_iter()
        .chain(upstream.iter().take(budget).cloned())
        .collect()
}
