//! Scoring pipeline — turns an upstream extraction into current/potential
//! scores, callback probabilities, and the suggestion list the allocator runs on.
//!
//! Flow: fuzzy skill matching → component scores → aggressive simulation for
//! the potential score → deterministic suggestions merged ahead of upstream ones.

use tracing::info;

use crate::engine::probability::{adjust_probability, base_callback_probability, clamp_percent};
use crate::engine::suggestion::AnalysisResult;
use crate::scoring::components::{
    cap_potential_score, compute_education_score, compute_experience_score,
    compute_format_score, compute_responsibility_score, compute_skills_score,
    compute_structural_fit, compute_title_score, critical_missing_skills,
};
use crate::scoring::models::{
    AnalysisReport, EducationBreakdown, ExperienceBreakdown, ExtractionResult, MatchType,
    MatchedSkill, ScoreBreakdown, ScoringResult,
};
use crate::scoring::simulate::simulate_aggressive_improvements;
use crate::scoring::skill_matcher::apply_skill_matches;
use crate::scoring::suggestions::{generate_deterministic_suggestions, merge_suggestions};

/// The potential score always shows at least this much uplift.
pub const MIN_POTENTIAL_UPLIFT: i32 = 5;

const TOP_KEYWORD_LIMIT: usize = 10;
const FALLBACK_JD_TITLE: &str = "the target role";

pub fn score_breakdown(data: &ExtractionResult) -> ScoreBreakdown {
    let critical = critical_missing_skills(&data.missing_skills, &data.required_skills);
    ScoreBreakdown {
        skills: compute_skills_score(&data.required_skills, &data.resume_skills, &critical),
        experience: compute_experience_score(&data.experience),
        education: compute_education_score(&data.education),
        responsibilities: compute_responsibility_score(&data.responsibilities),
        title: compute_title_score(&data.titles),
        format: compute_format_score(&data.format_signals),
    }
}

pub fn calculate_scores(data: &ExtractionResult) -> ScoringResult {
    let critical = critical_missing_skills(&data.missing_skills, &data.required_skills);
    let structural_fit = compute_structural_fit(
        &data.missing_skills,
        &data.required_skills,
        &data.experience,
        &data.education,
    );

    let breakdown = score_breakdown(data);
    let current_score = clamp_percent(breakdown.total());

    let improved = simulate_aggressive_improvements(data);
    let improved_critical =
        critical_missing_skills(&improved.missing_skills, &improved.required_skills);
    let improved_fit = compute_structural_fit(
        &improved.missing_skills,
        &improved.required_skills,
        &improved.experience,
        &improved.education,
    );
    let simulated_score = clamp_percent(score_breakdown(&improved).total());

    let mut potential_score =
        cap_potential_score(current_score, simulated_score, structural_fit, &critical);
    if potential_score < current_score + MIN_POTENTIAL_UPLIFT {
        potential_score = (current_score + MIN_POTENTIAL_UPLIFT).min(100);
    }

    ScoringResult {
        structural_fit,
        current_score,
        potential_score,
        current_callback: adjust_probability(
            base_callback_probability(current_score),
            structural_fit,
            &critical,
        ),
        potential_callback: adjust_probability(
            base_callback_probability(potential_score),
            improved_fit,
            &improved_critical,
        ),
        score_breakdown: breakdown,
    }
}

/// Full analysis for one resume/JD pair.
pub fn build_analysis(extraction: ExtractionResult) -> AnalysisReport {
    let data = apply_skill_matches(extraction);
    let scores = calculate_scores(&data);

    let title_similarity = f64::from(scores.score_breakdown.title) / 10.0;
    let jd_title = [Some(data.titles.jd_title.as_str()), data.candidate_title.as_deref()]
        .into_iter()
        .flatten()
        .find(|t| !t.trim().is_empty())
        .unwrap_or(FALLBACK_JD_TITLE);

    let deterministic =
        generate_deterministic_suggestions(&data, scores.structural_fit, title_similarity, jd_title);
    let suggestions = merge_suggestions(deterministic, &data.suggestions, scores.current_score);

    let mut ranked: Vec<_> = data.required_skills.iter().collect();
    ranked.sort_by(|a, b| b.importance.cmp(&a.importance));
    let top_required_keywords = ranked
        .into_iter()
        .take(TOP_KEYWORD_LIMIT)
        .map(|r| r.name.clone())
        .collect();
    let missing_keywords = data
        .missing_skills
        .iter()
        .take(TOP_KEYWORD_LIMIT)
        .cloned()
        .collect();
    let matched_skills = data
        .resume_skills
        .iter()
        .filter(|s| s.match_type != MatchType::None && !s.jd_skill_name.is_empty())
        .take(TOP_KEYWORD_LIMIT)
        .map(|s| MatchedSkill {
            skill: s.name.clone(),
            match_type: s.match_type,
            locations: s.locations.clone(),
        })
        .collect();

    info!(
        current = scores.current_score,
        potential = scores.potential_score,
        structural_fit = scores.structural_fit,
        suggestions = suggestions.len(),
        "analysis scored"
    );

    AnalysisReport {
        analysis: AnalysisResult {
            current_score: scores.current_score,
            potential_score: scores.potential_score,
            structural_fit: scores.structural_fit,
            suggestions,
            current_callback: Some(scores.current_callback),
            potential_callback: Some(scores.potential_callback),
            critical_missing_skills: critical_missing_skills(
                &data.missing_skills,
                &data.required_skills,
            ),
        },
        score_breakdown: scores.score_breakdown,
        keywords: data.resume_skills.iter().map(|s| s.name.clone()).collect(),
        top_required_keywords,
        missing_keywords,
        matched_skills,
        experience_breakdown: ExperienceBreakdown::from(&data.experience),
        education_breakdown: EducationBreakdown::from(&data.education),
    }
}
