//! Axum route handlers for the résumé API: analyze (PDF upload or pasted
//! text), history, fetch/delete by id, and the two derived outputs
//! (improved résumé, career roadmap).

use axum::{
    extract::{FromRequest, Multipart, Path, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::analysis::engine;
use crate::analysis::models::{AnalysisResult, CareerRoadmap, GeneratedResume};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::state::AppState;

const MIN_TEXT_CHARS: usize = 50;
const MAX_TEXT_CHARS: usize = 50_000;

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub text: String,
}

/// History projection: enough for a list view, no raw text or full analysis.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: Uuid,
    pub file_name: String,
    pub overall_score: i64,
    pub ats_score: i64,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

/// Narrow row for the history query: scores come out of the jsonb as text
/// (`->>`), so a malformed stored value degrades to 0 instead of a cast error.
#[derive(Debug, sqlx::FromRow)]
struct HistorySourceRow {
    id: Uuid,
    file_name: String,
    overall_score: Option<String>,
    ats_score: Option<String>,
    summary: Option<String>,
    created_at: DateTime<Utc>,
}

/// POST /api/resume/analyze
///
/// Accepts either a multipart upload (`resume` PDF field) or a JSON body
/// `{ "text": ... }`. One model call, then the record is persisted and
/// returned.
pub async fn handle_analyze(
    State(state): State<AppState>,
    user: AuthUser,
    request: Request,
) -> Result<(StatusCode, Json<ResumeRow>), AppError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let (file_name, resume_text) = if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?;
        read_pdf_upload(multipart).await?
    } else {
        let Json(body) = Json::<AnalyzeTextRequest>::from_request(request, &state)
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?;
        validate_resume_text(&body.text)?;
        ("Pasted Text".to_string(), body.text)
    };

    let analysis = engine::analyze_resume(&state.llm, &resume_text).await?;
    let analysis_value =
        serde_json::to_value(&analysis).map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;

    let row: ResumeRow = sqlx::query_as(
        "INSERT INTO resumes (id, user_id, file_name, raw_text, analysis) \
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .bind(&file_name)
    .bind(&resume_text)
    .bind(&analysis_value)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/resume/history
pub async fn handle_history(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<HistoryItem>>, AppError> {
    // Projects in the query; raw_text and the full analysis blob stay in the
    // database.
    let rows: Vec<HistorySourceRow> = sqlx::query_as(
        "SELECT id, file_name, \
                analysis->>'overallScore' AS overall_score, \
                analysis->>'atsScore' AS ats_score, \
                analysis->>'summary' AS summary, \
                created_at \
         FROM resumes WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows.into_iter().map(history_item).collect()))
}

/// GET /api/resume/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    let row = find_owned(&state, id, user.id).await?;
    Ok(Json(row))
}

/// DELETE /api/resume/:id
pub async fn handle_delete_analysis(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Analysis not found".to_string()));
    }

    Ok(Json(
        serde_json::json!({ "message": "Analysis deleted successfully" }),
    ))
}

/// POST /api/resume/:id/generate
///
/// Derives an improved résumé from the stored text and analysis. The result
/// is returned but not persisted; repeated calls re-query the model.
pub async fn handle_generate(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<GeneratedResume>, AppError> {
    let row = find_owned(&state, id, user.id).await?;

    // A malformed or pre-contract stored analysis falls back to defaults;
    // the prompt builder renders placeholders instead of failing.
    let analysis: AnalysisResult =
        serde_json::from_value(row.analysis.clone()).unwrap_or_default();

    let generated = engine::generate_improved_resume(&state.llm, &row.raw_text, &analysis).await?;
    Ok(Json(generated))
}

/// POST /api/resume/:id/roadmap
pub async fn handle_roadmap(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CareerRoadmap>, AppError> {
    let row = find_owned(&state, id, user.id).await?;
    let roadmap = engine::career_roadmap(&state.llm, &row.raw_text).await?;
    Ok(Json(roadmap))
}

async fn find_owned(state: &AppState, id: Uuid, user_id: Uuid) -> Result<ResumeRow, AppError> {
    let row: Option<ResumeRow> =
        sqlx::query_as("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&state.db)
            .await?;

    row.ok_or_else(|| AppError::NotFound("Analysis not found".to_string()))
}

async fn read_pdf_upload(mut multipart: Multipart) -> Result<(String, String), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        if field.name() != Some("resume") {
            continue;
        }
        if field.content_type() != Some("application/pdf") {
            return Err(AppError::Validation(
                "Only PDF files are allowed".to_string(),
            ));
        }

        let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let text = pdf_extract::extract_text_from_mem(&data)
            .map_err(|e| AppError::Validation(format!("Could not read PDF file: {e}")))?;

        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "Could not extract text from the file. Please try pasting the text directly."
                    .to_string(),
            ));
        }

        return Ok((file_name, text));
    }

    Err(AppError::Validation(
        "Please upload a PDF file or paste resume text".to_string(),
    ))
}

fn validate_resume_text(text: &str) -> Result<(), AppError> {
    let chars = text.chars().count();
    if chars < MIN_TEXT_CHARS {
        return Err(AppError::Validation(
            "Resume text must be at least 50 characters".to_string(),
        ));
    }
    if chars > MAX_TEXT_CHARS {
        return Err(AppError::Validation(
            "Resume text must not exceed 50,000 characters".to_string(),
        ));
    }
    Ok(())
}

fn history_item(row: HistorySourceRow) -> HistoryItem {
    HistoryItem {
        id: row.id,
        file_name: row.file_name,
        overall_score: parse_score(row.overall_score.as_deref()),
        ats_score: parse_score(row.ats_score.as_deref()),
        summary: row.summary.unwrap_or_default(),
        created_at: row.created_at,
    }
}

fn parse_score(text: Option<&str>) -> i64 {
    text.and_then(|s| s.parse().ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn text_validation_enforces_length_bounds() {
        assert!(validate_resume_text("too short").is_err());
        assert!(validate_resume_text(&"a".repeat(50)).is_ok());
        assert!(validate_resume_text(&"a".repeat(50_000)).is_ok());
        assert!(validate_resume_text(&"a".repeat(50_001)).is_err());
    }

    #[test]
    fn history_item_projects_scores_from_stored_analysis() {
        let row = HistorySourceRow {
            id: Uuid::new_v4(),
            file_name: "cv.pdf".to_string(),
            overall_score: Some("81".to_string()),
            ats_score: Some("77".to_string()),
            summary: Some("Strong resume.".to_string()),
            created_at: Utc::now(),
        };

        let item = history_item(row);
        assert_eq!(item.overall_score, 81);
        assert_eq!(item.ats_score, 77);
        assert_eq!(item.summary, "Strong resume.");
    }

    #[test]
    fn history_item_defaults_when_analysis_is_sparse() {
        let row = HistorySourceRow {
            id: Uuid::new_v4(),
            file_name: "Pasted Text".to_string(),
            overall_score: None,
            ats_score: Some("not a number".to_string()),
            summary: None,
            created_at: Utc::now(),
        };

        let item = history_item(row);
        assert_eq!(item.overall_score, 0);
        assert_eq!(item.ats_score, 0);
        assert_eq!(item.summary, "");
    }

    async fn multipart_from(body: &str) -> Multipart {
        let request = Request::builder()
            .header(CONTENT_TYPE, "multipart/form-data; boundary=BOUNDARY")
            .body(Body::from(body.to_string()))
            .unwrap();
        Multipart::from_request(request, &()).await.unwrap()
    }

    #[tokio::test]
    async fn upload_rejects_non_pdf_resume_field() {
        let body = concat!(
            "--BOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"resume\"; filename=\"resume.txt\"\r\n",
            "Content-Type: text/plain\r\n",
            "\r\n",
            "ten years of Rust experience\r\n",
            "--BOUNDARY--\r\n",
        );

        let result = read_pdf_upload(multipart_from(body).await).await;
        assert!(matches!(
            result,
            Err(AppError::Validation(msg)) if msg == "Only PDF files are allowed"
        ));
    }

    #[tokio::test]
    async fn upload_rejects_multipart_without_resume_field() {
        let body = concat!(
            "--BOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"attachment\"; filename=\"cv.pdf\"\r\n",
            "Content-Type: application/pdf\r\n",
            "\r\n",
            "%PDF-1.4\r\n",
            "--BOUNDARY--\r\n",
        );

        let result = read_pdf_upload(multipart_from(body).await).await;
        assert!(matches!(
            result,
            Err(AppError::Validation(msg)) if msg == "Please upload a PDF file or paste resume text"
        ));
    }
}
