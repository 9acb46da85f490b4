use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        password::hash_password,
        session::{ensure_session, SessionUser},
    },
    error::AppError,
    meals::{
        metrics::{summarize, DietSummary},
        repo::Meal,
    },
    state::AppState,
};

use super::{dto::RegisterRequest, repo::User};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, jar, payload))]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(CookieJar, StatusCode), AppError> {
    payload.email = payload.email.trim().to_lowercase();

    if payload.name.trim().is_empty() {
        warn!("empty name");
        return Err(AppError::Validation("Name is required".into()));
    }
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(AppError::Validation("Invalid email".into()));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(AppError::Validation("Password too short".into()));
    }

    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(AppError::Conflict("Email already registered".into()));
    }

    // A browser that already carries a session keeps it; otherwise mint
    // one and set the cookie on the response.
    let (session_id, jar) = ensure_session(jar, state.config.session.ttl_days);

    let hash = hash_password(&payload.password)?;
    let user = User::create(&state.db, &payload.name, &payload.email, &hash, session_id).await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((jar, StatusCode::CREATED))
}

/// GET /user/info/:id — diet adherence summary. The path id is
/// validated as a UUID but the summary is always computed for the
/// session user; client-supplied identities are never trusted.
#[instrument(skip(state))]
pub async fn diet_summary(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    Path(path_id): Path<Uuid>,
) -> Result<Json<DietSummary>, AppError> {
    if path_id != user_id {
        debug!(%path_id, "path id differs from session user; using session identity");
    }

    let meals = Meal::list_by_user(&state.db, user_id).await?;
    Ok(Json(summarize(&meals)))
}
