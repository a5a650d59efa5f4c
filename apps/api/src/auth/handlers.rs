//! Axum route handlers for registration, login, and the current-user lookup.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{issue_token, AuthUser};
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// POST /api/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let name = req.name.trim().to_string();
    let email = req.email.trim().to_lowercase();
    validate_registration(&name, &email, &req.password)?;

    let existing: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Validation("User already exists".to_string()));
    }

    let password_hash = bcrypt::hash(&req.password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;

    // The SELECT above is only the friendly fast path; a concurrent
    // registration can still hit the email UNIQUE constraint here.
    let user: User = sqlx::query_as(
        "INSERT INTO users (id, name, email, password_hash) \
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&name)
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(&state.db)
    .await
    .map_err(map_registration_error)?;

    let token = issue_token(user.id, &state.config.jwt_secret)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            token,
        }),
    ))
}

/// POST /api/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = req.email.trim().to_lowercase();

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;

    // Same message for unknown email and bad password.
    let user =
        user.ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let matches = bcrypt::verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;
    if !matches {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = issue_token(user.id, &state.config.jwt_secret)?;

    Ok(Json(AuthResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        token,
    }))
}

/// GET /api/auth/me
pub async fn handle_me(user: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        id: user.id,
        name: user.name,
        email: user.email,
    })
}

/// A duplicate email that races past the existence check surfaces as a
/// unique violation on insert; report it as the same 400 the check gives.
fn map_registration_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Validation("User already exists".to_string())
        }
        _ => AppError::Database(e),
    }
}

fn validate_registration(name: &str, email: &str, password: &str) -> Result<(), AppError> {
    if name.chars().count() < 2 || name.chars().count() > 50 {
        return Err(AppError::Validation(
            "Name must be between 2 and 50 characters".to_string(),
        ));
    }
    if !is_plausible_email(email) {
        return Err(AppError::Validation("Invalid email address".to_string()));
    }
    if password.len() < 6 || password.len() > 128 {
        return Err(AppError::Validation(
            "Password must be between 6 and 128 characters".to_string(),
        ));
    }
    Ok(())
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_validation_accepts_normal_input() {
        assert!(validate_registration("Ada", "ada@example.com", "hunter22").is_ok());
    }

    #[test]
    fn registration_validation_rejects_short_name() {
        assert!(validate_registration("A", "ada@example.com", "hunter22").is_err());
    }

    #[test]
    fn registration_validation_rejects_bad_email() {
        for email in ["", "noat.example.com", "a@b", "@example.com"] {
            assert!(
                validate_registration("Ada", email, "hunter22").is_err(),
                "accepted: {email}"
            );
        }
    }

    #[test]
    fn registration_validation_rejects_short_password() {
        assert!(validate_registration("Ada", "ada@example.com", "12345").is_err());
    }

    #[test]
    fn bcrypt_round_trip_verifies() {
        let hash = bcrypt::hash("hunter22", 4).unwrap(); // low cost, test only
        assert!(bcrypt::verify("hunter22", &hash).unwrap());
        assert!(!bcrypt::verify("wrong", &hash).unwrap());
    }

    #[derive(Debug)]
    struct UniqueViolation;

    impl std::fmt::Display for UniqueViolation {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("duplicate key value violates unique constraint")
        }
    }

    impl std::error::Error for UniqueViolation {}

    impl sqlx::error::DatabaseError for UniqueViolation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    #[test]
    fn concurrent_duplicate_email_maps_to_validation_error() {
        let e = sqlx::Error::Database(Box::new(UniqueViolation));
        assert!(matches!(
            map_registration_error(e),
            AppError::Validation(msg) if msg == "User already exists"
        ));
    }

    #[test]
    fn other_insert_errors_stay_database_errors() {
        assert!(matches!(
            map_registration_error(sqlx::Error::RowNotFound),
            AppError::Database(_)
        ));
    }
}
