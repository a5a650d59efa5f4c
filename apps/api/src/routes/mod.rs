pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as resume;
use crate::auth::handlers as auth;
use crate::state::AppState;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth API
        .route("/api/auth/register", post(auth::handle_register))
        .route("/api/auth/login", post(auth::handle_login))
        .route("/api/auth/me", get(auth::handle_me))
        // Resume API — every route filters on the authenticated owner
        .route("/api/resume/analyze", post(resume::handle_analyze))
        .route("/api/resume/history", get(resume::handle_history))
        .route(
            "/api/resume/:id",
            get(resume::handle_get_analysis).delete(resume::handle_delete_analysis),
        )
        .route("/api/resume/:id/generate", post(resume::handle_generate))
        .route("/api/resume/:id/roadmap", post(resume::handle_roadmap))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
