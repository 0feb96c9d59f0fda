//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::engine::allocator::{compute_point_values, reset, LiveScore, PointValueTable};
use crate::engine::session::ScoringSession;
use crate::engine::suggestion::AnalysisResult;
use crate::errors::AppError;
use crate::scoring::models::{
    EducationBreakdown, ExperienceBreakdown, ExtractionResult, MatchedSkill, ScoreBreakdown,
};
use crate::scoring::pipeline::build_analysis;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub session: ScoringSession,
    pub score_breakdown: ScoreBreakdown,
    pub keywords: Vec<String>,
    pub top_required_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub matched_skills: Vec<MatchedSkill>,
    pub experience_breakdown: ExperienceBreakdown,
    pub education_breakdown: EducationBreakdown,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResponse {
    pub point_values: PointValueTable,
    pub live: LiveScore,
}

/// POST /api/v1/analyses
///
/// Scores an upstream extraction and opens a session over the result.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(extraction): Json<ExtractionResult>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    if extraction.required_skills.is_empty() {
        return Err(AppError::Validation(
            "requiredSkills cannot be empty".to_string(),
        ));
    }

    let report = build_analysis(extraction);
    let session = ScoringSession::new(report.analysis);
    state.sessions.put(session.clone()).await?;

    info!(session_id = %session.id, "analysis session opened");

    Ok(Json(AnalyzeResponse {
        session,
        score_breakdown: report.score_breakdown,
        keywords: report.keywords,
        top_required_keywords: report.top_required_keywords,
        missing_keywords: report.missing_keywords,
        matched_skills: report.matched_skills,
        experience_breakdown: report.experience_breakdown,
        education_breakdown: report.education_breakdown,
    }))
}

/// POST /api/v1/analyses/allocate
///
/// Stateless: point values and baseline live values for a result.
pub async fn handle_allocate(
    Json(result): Json<AnalysisResult>,
) -> Result<Json<AllocationResponse>, AppError> {
    Ok(Json(AllocationResponse {
        point_values: compute_point_values(&result),
        live: reset(&result).live,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;

    fn state() -> AppState {
        AppState::in_memory(Config {
            port: 0,
            rust_log: "info".to_string(),
            session_capacity: 4,
        })
    }

    #[tokio::test]
    async fn test_allocate_is_stateless() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "currentScore": 50,
            "potentialScore": 50,
            "structuralFit": false,
            "suggestions": [
                { "suggestion": "Add \"Go\"", "originalText": "", "improvedText": "", "category": "keyword" }
            ]
        }))
        .unwrap();

        let Json(response) = handle_allocate(Json(result)).await.unwrap();
        assert!(response.point_values.is_empty());
        assert_eq!(response.live.score, 50);
    }

    #[tokio::test]
    async fn test_analyze_rejects_empty_requirements() {
        let err = handle_analyze(State(state()), Json(ExtractionResult::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_analyze_persists_session() {
        let state = state();
        let extraction: ExtractionResult = serde_json::from_value(json!({
            "requiredSkills": [
                { "name": "Rust", "importance": 3, "type": "hard" },
                { "name": "Docker", "importance": 2, "type": "hard" }
            ],
            "resumeSkills": [
                { "name": "Rust", "jdSkillName": "Rust", "matchType": "exact", "locations": ["skills"] }
            ],
            "missingSkills": ["Docker"],
            "experience": { "requiredYears": 2, "candidateYears": 3 },
            "education": {
                "requiredDegreeLevel": "bachelor",
                "candidateDegreeLevel": "master",
                "meetsMinimum": true,
                "bonusTierInstitution": false
            },
            "responsibilities": {
                "topJDResponsibilities": ["Own the ingestion service"],
                "matchedResponsibilitiesCount": 1,
                "totalResponsibilitiesConsidered": 3
            },
            "titles": { "jdTitle": "Backend Engineer", "titleSimilarity": 0.8 },
            "formatSignals": { "hasStandardSections": true, "isParseable": true, "hasContactInfo": true }
        }))
        .unwrap();

        let Json(response) = handle_analyze(State(state.clone()), Json(extraction))
            .await
            .unwrap();

        let stored = state.sessions.get(response.session.id).await.unwrap();
        assert_eq!(stored.as_ref(), Some(&response.session));
        assert_eq!(response.missing_keywords, vec!["Docker"]);
        assert_eq!(response.matched_skills.len(), 1);
        assert_eq!(response.matched_skills[0].skill, "Rust");
        assert!(response.education_breakdown.meets_minimum);
        assert!(response.session.result.potential_score > response.session.result.current_score);
        assert!(!response.session.point_values.is_empty());
    }
}
