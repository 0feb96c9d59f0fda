use crate::scoring::components::missing_with_importance;
use crate::scoring::models::{ExtractionResult, MatchType, ResumeSkill};

/// Skills at or above this importance are assumed added by the user.
const SIMULATED_MIN_IMPORTANCE: u8 = 2;

/// Projects the comparison as if the user applied every important suggestion:
/// important missing skills become exact matches, responsibilities are fully
/// covered, and every format signal passes. Only nice-to-have gaps remain.
pub fn simulate_aggressive_improvements(original: &ExtractionResult) -> ExtractionResult {
    let mut improved = original.clone();

    let added = missing_with_importance(
        &improved.missing_skills,
        &improved.required_skills,
        SIMULATED_MIN_IMPORTANCE,
    );
    improved
        .resume_skills
        .extend(added.into_iter().map(|name| ResumeSkill {
            jd_skill_name: name.clone(),
            name,
            match_type: MatchType::Exact,
            locations: vec!["skills".to_string(), "recent_experience".to_string()],
        }));

    let required = improved.required_skills.clone();
    improved.missing_skills.retain(|missing| {
        required
            .iter()
            .any(|r| &r.name == missing && r.importance < SIMULATED_MIN_IMPORTANCE)
    });

    improved.responsibilities.matched_responsibilities_count =
        improved.responsibilities.total_responsibilities_considered;

    improved.format_signals.has_standard_sections = true;
    improved.format_signals.is_parseable = true;
    improved.format_signals.has_contact_info = true;

    improved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::models::{FormatSignals, RequiredSkill, ResponsibilityInfo, SkillType};

    fn required(name: &str, importance: u8) -> RequiredSkill {
        RequiredSkill {
            name: name.to_string(),
            importance,
            skill_type: SkillType::Hard,
        }
    }

    fn extraction() -> ExtractionResult {
        ExtractionResult {
            required_skills: vec![
                required("Rust", 3),
                required("Docker", 2),
                required("GraphQL", 1),
            ],
            missing_skills: vec![
                "Rust".to_string(),
                "Docker".to_string(),
                "GraphQL".to_string(),
                "Unlisted".to_string(),
            ],
            responsibilities: ResponsibilityInfo {
                matched_responsibilities_count: 1,
                total_responsibilities_considered: 5,
                ..Default::default()
            },
            format_signals: FormatSignals {
                has_standard_sections: false,
                is_parseable: true,
                has_contact_info: false,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_important_missing_skills_become_exact_matches() {
        let improved = simulate_aggressive_improvements(&extraction());

        let added: Vec<&str> = improved
            .resume_skills
            .iter()
            .map(|s| s.jd_skill_name.as_str())
            .collect();
        assert_eq!(added, vec!["Rust", "Docker"]);
        assert!(improved
            .resume_skills
            .iter()
            .all(|s| s.match_type == MatchType::Exact));
    }

    #[test]
    fn test_only_nice_to_have_gaps_remain() {
        let improved = simulate_aggressive_improvements(&extraction());
        assert_eq!(improved.missing_skills, vec!["GraphQL".to_string()]);
    }

    #[test]
    fn test_responsibilities_and_format_maxed() {
        let improved = simulate_aggressive_improvements(&extraction());
        assert_eq!(improved.responsibilities.matched_responsibilities_count, 5);
        assert_eq!(improved.format_signals, FormatSignals::default());
    }

    #[test]
    fn test_original_left_untouched() {
        let original = extraction();
        let _ = simulate_aggressive_improvements(&original);
        assert_eq!(original, extraction());
    }
}
