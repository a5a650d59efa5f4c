//! Task orchestrator — builds the task-specific messages, issues exactly one
//! model call per operation, and wraps failures with a task prefix.
//!
//! No retries and no partial-result fallback: every client or normalizer
//! failure propagates to the HTTP boundary as `AppError::Llm`.

use crate::analysis::models::{AnalysisResult, CareerRoadmap, GeneratedResume};
use crate::analysis::prompts::{
    ANALYZE_RESUME_SYSTEM, CAREER_ROADMAP_SYSTEM, GENERATE_RESUME_SYSTEM,
};
use crate::errors::AppError;
use crate::llm_client::{ChatMessage, LlmClient};

// Task-specific sampling defaults. Analysis is the most constrained task,
// the roadmap the most open-ended.
const ANALYSIS_TEMPERATURE: f32 = 0.3;
const ANALYSIS_MAX_TOKENS: u32 = 4000;
const GENERATION_TEMPERATURE: f32 = 0.4;
const GENERATION_MAX_TOKENS: u32 = 5000;
const ROADMAP_TEMPERATURE: f32 = 0.5;
const ROADMAP_MAX_TOKENS: u32 = 3000;

/// Scores a résumé. Text length validation (50–50,000 chars) happens at the
/// HTTP boundary; this function sends whatever it is given.
pub async fn analyze_resume(
    llm: &LlmClient,
    resume_text: &str,
) -> Result<AnalysisResult, AppError> {
    let user_message = analysis_user_message(resume_text);
    let messages = [
        ChatMessage::system(ANALYZE_RESUME_SYSTEM),
        ChatMessage::user(&user_message),
    ];

    llm.call_json(&messages, ANALYSIS_TEMPERATURE, ANALYSIS_MAX_TOKENS)
        .await
        .map_err(|e| AppError::Llm(format!("AI analysis failed: {e}")))
}

/// Rewrites a résumé using its stored analysis as feedback. A partial or
/// defaulted analysis is fine: empty sections/priorities drop their blocks
/// from the prompt instead of rendering empty headers.
pub async fn generate_improved_resume(
    llm: &LlmClient,
    resume_text: &str,
    analysis: &AnalysisResult,
) -> Result<GeneratedResume, AppError> {
    let user_message = generation_user_message(resume_text, analysis);
    let messages = [
        ChatMessage::system(GENERATE_RESUME_SYSTEM),
        ChatMessage::user(&user_message),
    ];

    llm.call_json(&messages, GENERATION_TEMPERATURE, GENERATION_MAX_TOKENS)
        .await
        .map_err(|e| AppError::Llm(format!("Resume generation failed: {e}")))
}

/// Single-shot roadmap; no dependency on a prior analysis.
pub async fn career_roadmap(
    llm: &LlmClient,
    resume_text: &str,
) -> Result<CareerRoadmap, AppError> {
    let user_message = roadmap_user_message(resume_text);
    let messages = [
        ChatMessage::system(CAREER_ROADMAP_SYSTEM),
        ChatMessage::user(&user_message),
    ];

    llm.call_json(&messages, ROADMAP_TEMPERATURE, ROADMAP_MAX_TOKENS)
        .await
        .map_err(|e| AppError::Llm(format!("Roadmap generation failed: {e}")))
}

fn analysis_user_message(resume_text: &str) -> String {
    format!(
        "Please analyze the following resume and provide your structured evaluation:\n\n{resume_text}"
    )
}

fn roadmap_user_message(resume_text: &str) -> String {
    format!("Based on this resume, provide a career growth roadmap:\n\n{resume_text}")
}

fn generation_user_message(resume_text: &str, analysis: &AnalysisResult) -> String {
    let summary = if analysis.summary.is_empty() {
        "No summary available"
    } else {
        &analysis.summary
    };

    let mut parts = vec![
        format!("Here is the original resume:\n\n{resume_text}"),
        "\nHere is the analysis feedback:".to_string(),
        format!("\nOverall Score: {}/100", analysis.overall_score),
        format!("ATS Score: {}/100", analysis.ats_score),
        format!("Summary: {summary}"),
    ];

    if !analysis.sections.is_empty() {
        let feedback = analysis
            .sections
            .iter()
            .map(|s| format!("{}: {}", s.name, s.feedback))
            .collect::<Vec<_>>()
            .join("\n");
        parts.push(format!("\nSection Feedback:\n{feedback}"));
    }

    if !analysis.improvement_priorities.is_empty() {
        parts.push(format!(
            "\nImprovement Priorities:\n{}",
            analysis.improvement_priorities.join("\n")
        ));
    }

    parts.push("\nPlease generate an improved version of this resume.".to_string());
    parts.join("\n")
}
