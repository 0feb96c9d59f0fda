use serde::{Deserialize, Serialize};

use crate::engine::suggestion::{AnalysisResult, Suggestion};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Exact,
    Synonym,
    Related,
    #[default]
    None,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SkillType {
    #[default]
    Hard,
    Soft,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum DegreeLevel {
    #[default]
    None,
    Diploma,
    Bachelor,
    Master,
    Phd,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    Junior,
    Mid,
    Senior,
    Lead,
}

/// Skill the job description asks for. `importance`: 1 nice-to-have,
/// 2 important, 3 must-have.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequiredSkill {
    pub name: String,
    pub importance: u8,
    #[serde(rename = "type", default)]
    pub skill_type: SkillType,
}

/// Skill found on the resume, linked to a required skill by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSkill {
    pub name: String,
    /// Empty when the skill isn't linked to any requirement.
    #[serde(default)]
    pub jd_skill_name: String,
    #[serde(default)]
    pub match_type: MatchType,
    /// e.g. `title`, `summary`, `skills`, `recent_experience`.
    #[serde(default)]
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceInfo {
    #[serde(default)]
    pub candidate_seniority: Option<Seniority>,
    #[serde(default)]
    pub required_seniority: Option<Seniority>,
    #[serde(default)]
    pub required_years: f64,
    /// Full-time experience only.
    #[serde(default)]
    pub candidate_years: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EducationInfo {
    #[serde(default)]
    pub required_degree_level: DegreeLevel,
    #[serde(default)]
    pub candidate_degree_level: DegreeLevel,
    #[serde(default)]
    pub meets_minimum: bool,
    #[serde(default)]
    pub bonus_tier_institution: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResponsibilityInfo {
    #[serde(rename = "topJDResponsibilities", default)]
    pub top_jd_responsibilities: Vec<String>,
    #[serde(default)]
    pub matched_responsibilities_count: u32,
    #[serde(default)]
    pub total_responsibilities_considered: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TitlesInfo {
    #[serde(default)]
    pub jd_title: String,
    #[serde(default)]
    pub candidate_current_title: String,
    #[serde(default)]
    pub candidate_recent_titles: Vec<String>,
    /// 0.0 – 1.0
    #[serde(default)]
    pub title_similarity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormatSignals {
    pub has_standard_sections: bool,
    pub is_parseable: bool,
    pub has_contact_info: bool,
}

impl Default for FormatSignals {
    fn default() -> Self {
        Self {
            has_standard_sections: true,
            is_parseable: true,
            has_contact_info: true,
        }
    }
}

/// Structured resume-vs-JD comparison produced by the upstream extraction step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    #[serde(default)]
    pub required_skills: Vec<RequiredSkill>,
    #[serde(default)]
    pub resume_skills: Vec<ResumeSkill>,
    #[serde(default)]
    pub must_have_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub experience: ExperienceInfo,
    #[serde(default)]
    pub education: EducationInfo,
    #[serde(default)]
    pub responsibilities: ResponsibilityInfo,
    #[serde(default)]
    pub titles: TitlesInfo,
    #[serde(default)]
    pub format_signals: FormatSignals,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_title: Option<String>,
}

impl ExtractionResult {
    pub fn required_skill(&self, name: &str) -> Option<&RequiredSkill> {
        self.required_skills.iter().find(|r| r.name == name)
    }
}

/// Points per component. Maxima: 35 / 20 / 15 / 15 / 10 / 5.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub skills: i32,
    pub experience: i32,
    pub education: i32,
    pub responsibilities: i32,
    pub title: i32,
    pub format: i32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> i32 {
        self.skills
            + self.experience
            + self.education
            + self.responsibilities
            + self.title
            + self.format
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResult {
    pub structural_fit: bool,
    pub current_score: i32,
    pub potential_score: i32,
    pub current_callback: i32,
    pub potential_callback: i32,
    pub score_breakdown: ScoreBreakdown,
}

/// Resume skill linked to a requirement, with where it appears.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchedSkill {
    pub skill: String,
    pub match_type: MatchType,
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceBreakdown {
    pub required_years: f64,
    pub candidate_years: f64,
    pub required_seniority: Option<Seniority>,
    pub candidate_seniority: Option<Seniority>,
}

impl From<&ExperienceInfo> for ExperienceBreakdown {
    fn from(info: &ExperienceInfo) -> Self {
        Self {
            required_years: info.required_years,
            candidate_years: info.candidate_years,
            required_seniority: info.required_seniority,
            candidate_seniority: info.candidate_seniority,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EducationBreakdown {
    pub required_degree: DegreeLevel,
    pub candidate_degree: DegreeLevel,
    pub meets_minimum: bool,
    pub bonus_tier_institution: bool,
}

impl From<&EducationInfo> for EducationBreakdown {
    fn from(info: &EducationInfo) -> Self {
        Self {
            required_degree: info.required_degree_level,
            candidate_degree: info.candidate_degree_level,
            meets_minimum: info.meets_minimum,
            bonus_tier_institution: info.bonus_tier_institution,
        }
    }
}

/// Everything the presentation layer needs after one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub analysis: AnalysisResult,
    pub score_breakdown: ScoreBreakdown,
    /// Every skill name found on the resume.
    pub keywords: Vec<String>,
    pub top_required_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub matched_skills: Vec<MatchedSkill>,
    pub experience_breakdown: ExperienceBreakdown,
    pub education_breakdown: EducationBreakdown,
}
