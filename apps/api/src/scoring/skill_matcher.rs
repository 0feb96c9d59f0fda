//! Skill matcher — fuzzy comparison of JD skill names against resume skills.
//!
//! Order of checks: normalized equality, acronym table, substring (both sides
//! longer than 2 chars), then a single typo (both sides longer than 3 chars).

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::scoring::models::{ExtractionResult, MatchType};

static NON_SKILL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9+#.]").expect("Invalid skill char regex"));
static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Acronym → accepted long forms. Checked in both directions.
const ACRONYMS: &[(&str, &[&str])] = &[
    ("aws", &["amazon web services"]),
    ("gcp", &["google cloud platform"]),
    ("azure", &["microsoft azure"]),
    ("js", &["javascript"]),
    ("ts", &["typescript"]),
    ("ml", &["machine learning"]),
    ("ai", &["artificial intelligence"]),
    ("ui", &["user interface"]),
    ("ux", &["user experience"]),
    ("ci/cd", &["continuous integration", "continuous deployment"]),
    ("k8s", &["kubernetes"]),
    ("react", &["reactjs", "react.js"]),
    ("node", &["nodejs", "node.js"]),
    ("vue", &["vuejs", "vue.js"]),
    ("dotnet", &[".net"]),
    ("c#", &["c sharp"]),
    ("cpp", &["c++", "c plus plus"]),
    ("qa", &["quality assurance"]),
    ("seo", &["search engine optimization"]),
    ("llm", &["large language model"]),
    ("nlp", &["natural language processing"]),
    ("db", &["database"]),
    ("sql", &["structured query language"]),
    ("nosql", &["non relational", "non-relational"]),
    ("rest", &["restful"]),
    ("api", &["application programming interface"]),
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillPair {
    pub required: String,
    pub candidate: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillMatches {
    pub matched: Vec<SkillPair>,
    pub missing: Vec<String>,
}

/// Lowercases and replaces everything except `[a-z0-9+#.]` with single spaces.
pub fn normalize_skill(skill: &str) -> String {
    let lowered = skill.to_lowercase();
    let spaced = NON_SKILL_CHARS.replace_all(&lowered, " ");
    WHITESPACE_RUNS.replace_all(&spaced, " ").trim().to_string()
}

pub fn skills_match(a: &str, b: &str) -> bool {
    let s1 = normalize_skill(a);
    let s2 = normalize_skill(b);

    if s1 == s2 {
        return true;
    }
    if acronym_match(&s1, &s2) {
        return true;
    }

    let (len1, len2) = (s1.chars().count(), s2.chars().count());

    if len1 > 2 && len2 > 2 && (s1.contains(&s2) || s2.contains(&s1)) {
        return true;
    }

    len1.abs_diff(len2) <= 2 && len1.min(len2) > 3 && strsim::levenshtein(&s1, &s2) <= 1
}

fn acronym_match(s1: &str, s2: &str) -> bool {
    let expands = |short: &str, other: &str| {
        ACRONYMS
            .iter()
            .find(|(acronym, _)| *acronym == short)
            .is_some_and(|(_, long_forms)| {
                long_forms
                    .iter()
                    .any(|full| full.contains(other) || other.contains(full))
            })
    };
    expands(s1, s2) || expands(s2, s1)
}

/// Pairs each required skill with the first candidate skill that matches it.
pub fn match_skill_lists(required: &[String], candidates: &[String]) -> SkillMatches {
    let mut matches = SkillMatches::default();

    for req in required {
        match candidates.iter().find(|cand| skills_match(req, cand)) {
            Some(cand) => matches.matched.push(SkillPair {
                required: req.clone(),
                candidate: cand.clone(),
            }),
            None => matches.missing.push(req.clone()),
        }
    }

    matches
}

/// Recomputes `missing_skills` with fuzzy matching and links resume skills the
/// extractor left unmatched.
pub fn apply_skill_matches(mut data: ExtractionResult) -> ExtractionResult {
    let required: Vec<String> = data.required_skills.iter().map(|r| r.name.clone()).collect();
    let candidates: Vec<String> = data.resume_skills.iter().map(|s| s.name.clone()).collect();

    let matches = match_skill_lists(&required, &candidates);
    data.missing_skills = matches.missing;

    for pair in matches.matched {
        if let Some(skill) = data
            .resume_skills
            .iter_mut()
            .find(|s| s.name == pair.candidate)
        {
            if skill.jd_skill_name.is_empty() || skill.match_type == MatchType::None {
                skill.jd_skill_name = pair.required;
                skill.match_type = MatchType::Synonym;
            }
        }
    }

    data
}
