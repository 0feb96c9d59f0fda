//! Component scores — deterministic point allocation for each part of the
//! resume-vs-JD comparison. The six components sum to at most 100.

use std::collections::HashSet;

use crate::scoring::models::{
    DegreeLevel, EducationInfo, ExperienceInfo, FormatSignals, MatchType, RequiredSkill,
    ResponsibilityInfo, ResumeSkill, TitlesInfo,
};

pub const SKILLS_MAX: i32 = 35;
pub const EXPERIENCE_MAX: i32 = 20;
pub const EDUCATION_MAX: i32 = 15;
pub const RESPONSIBILITIES_MAX: i32 = 15;
pub const FORMAT_MAX: i32 = 5;

/// Required skills with this importance are must-haves.
pub const MUST_HAVE_IMPORTANCE: u8 = 3;

/// Fraction of required years that still counts as enough experience.
const MIN_YEARS_RATIO: f64 = 0.7;

/// Skills ranked in the top N by importance get extra weight.
const TOP_SKILL_COUNT: usize = 10;
const TOP_SKILL_MULTIPLIER: f64 = 1.5;

const MISSING_MUST_HAVE_PENALTY: i32 = 5;
/// Two or more missing must-haves cap the skills score at ~65% of max.
const MULTI_MISSING_CAP: i32 = 22;

const LOCATION_BOOSTS: &[(&str, f64)] = &[
    ("title", 0.3),
    ("summary", 0.2),
    ("skills", 0.2),
    ("recent_experience", 0.2),
];
const MAX_LOCATION_BOOST: f64 = 1.6;

/// `(min similarity, points)`, checked top-down.
const TITLE_THRESHOLDS: &[(f64, i32)] = &[(0.9, 10), (0.7, 8), (0.5, 5), (0.3, 3)];

pub fn base_match_weight(match_type: MatchType) -> f64 {
    match match_type {
        MatchType::Exact => 1.0,
        MatchType::Synonym => 0.9,
        MatchType::Related => 0.6,
        MatchType::None => 0.0,
    }
}

/// Multiplier for where on the resume a skill shows up.
pub fn location_boost(locations: &[String]) -> f64 {
    let seen: HashSet<String> = locations.iter().map(|l| l.to_lowercase()).collect();
    let boost = LOCATION_BOOSTS
        .iter()
        .filter(|(location, _)| seen.contains(*location))
        .fold(1.0_f64, |acc, (_, b)| acc + b);
    boost.min(MAX_LOCATION_BOOST)
}

pub fn degree_rank(level: DegreeLevel) -> i32 {
    match level {
        DegreeLevel::None => 0,
        DegreeLevel::Diploma => 1,
        DegreeLevel::Bachelor => 2,
        DegreeLevel::Master => 3,
        DegreeLevel::Phd => 4,
    }
}

/// Missing skills whose requirement has at least `min_importance`.
/// Names with no matching requirement are dropped.
pub fn missing_with_importance(
    missing: &[String],
    required: &[RequiredSkill],
    min_importance: u8,
) -> Vec<String> {
    missing
        .iter()
        .filter(|name| {
            required
                .iter()
                .any(|r| &r.name == *name && r.importance >= min_importance)
        })
        .cloned()
        .collect()
}

pub fn critical_missing_skills(missing: &[String], required: &[RequiredSkill]) -> Vec<String> {
    missing_with_importance(missing, required, MUST_HAVE_IMPORTANCE)
}

/// Boolean gate: all must-haves present, ≥70% of required years, degree met.
pub fn compute_structural_fit(
    missing: &[String],
    required: &[RequiredSkill],
    experience: &ExperienceInfo,
    education: &EducationInfo,
) -> bool {
    let has_all_must_haves = critical_missing_skills(missing, required).is_empty();

    let years_ratio = if experience.required_years > 0.0 {
        experience.candidate_years / experience.required_years
    } else {
        1.0
    };

    has_all_must_haves && years_ratio >= MIN_YEARS_RATIO && education.meets_minimum
}

/// Skills score (0–35). `critical_missing` should hold only must-have gaps.
pub fn compute_skills_score(
    required: &[RequiredSkill],
    resume_skills: &[ResumeSkill],
    critical_missing: &[String],
) -> i32 {
    let mut ranked: Vec<&RequiredSkill> = required.iter().collect();
    ranked.sort_by(|a, b| b.importance.cmp(&a.importance));
    let top: HashSet<&str> = ranked
        .iter()
        .take(TOP_SKILL_COUNT)
        .map(|r| r.name.as_str())
        .collect();

    let mut raw = 0.0_f64;
    let mut importance_sum = 0.0_f64;

    for jd_skill in required {
        let best_coverage = resume_skills
            .iter()
            .filter(|rs| rs.jd_skill_name == jd_skill.name)
            .map(|rs| base_match_weight(rs.match_type) * location_boost(&rs.locations))
            .fold(0.0_f64, f64::max);

        let mut weight = f64::from(jd_skill.importance);
        if top.contains(jd_skill.name.as_str()) {
            weight *= TOP_SKILL_MULTIPLIER;
        }

        raw += best_coverage * weight;
        importance_sum += weight;
    }

    let coverage = if importance_sum > 0.0 {
        raw / importance_sum
    } else {
        0.0
    };
    let mut score = (f64::from(SKILLS_MAX) * coverage.min(1.0)).floor() as i32;

    if !critical_missing.is_empty() {
        score = (score - MISSING_MUST_HAVE_PENALTY).max(0);
    }
    if critical_missing.len() >= 2 {
        score = score.min(MULTI_MISSING_CAP);
    }

    score
}

/// Binary: full marks when the candidate has the required years.
pub fn compute_experience_score(experience: &ExperienceInfo) -> i32 {
    if experience.candidate_years >= experience.required_years {
        EXPERIENCE_MAX
    } else {
        0
    }
}

pub fn compute_education_score(education: &EducationInfo) -> i32 {
    let required = degree_rank(education.required_degree_level);
    let candidate = degree_rank(education.candidate_degree_level);

    if !education.meets_minimum {
        return match required - candidate {
            1 => 6,
            2 => 3,
            _ => 0,
        };
    }

    let mut score = if candidate > required { 14 } else { 13 };
    if education.bonus_tier_institution {
        score = (score + 1).min(EDUCATION_MAX);
    }
    score
}

pub fn compute_responsibility_score(responsibilities: &ResponsibilityInfo) -> i32 {
    let denom = responsibilities.total_responsibilities_considered.max(1);
    let ratio =
        (f64::from(responsibilities.matched_responsibilities_count) / f64::from(denom)).min(1.0);
    (f64::from(RESPONSIBILITIES_MAX) * ratio).floor() as i32
}

pub fn compute_title_score(titles: &TitlesInfo) -> i32 {
    TITLE_THRESHOLDS
        .iter()
        .find(|(min, _)| titles.title_similarity >= *min)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

pub fn compute_format_score(format: &FormatSignals) -> i32 {
    let mut score = FORMAT_MAX;
    if !format.has_standard_sections {
        score -= 2;
    }
    if !format.is_parseable {
        score -= 3;
    }
    if !format.has_contact_info {
        score -= 1;
    }
    score.max(0)
}

/// Caps the simulated score: conservative without structural fit, and
/// never a perfect 100 even with it.
pub fn cap_potential_score(
    current: i32,
    simulated: i32,
    structural_fit: bool,
    critical_missing: &[String],
) -> i32 {
    let cap = if !structural_fit {
        60
    } else if critical_missing.is_empty() {
        95
    } else {
        90
    };
    simulated.min(cap).max(current)
}
