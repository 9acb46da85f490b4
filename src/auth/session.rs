use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use time::Duration;
use tracing::warn;
use uuid::Uuid;

use crate::{error::AppError, state::AppState, users::repo::User};

pub const SESSION_COOKIE: &str = "sessionId";

/// Session-resolved user identity, extracted per request. Handlers that
/// take this argument are gated: a request without a resolvable session
/// is rejected with 401 before the handler runs.
pub struct SessionUser(pub Uuid);

/// An absent, empty, or non-UUID cookie all count as "no session".
pub fn session_id_from_jar(jar: &CookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
}

pub fn session_cookie(session_id: Uuid, ttl_days: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .path("/")
        .max_age(Duration::days(ttl_days))
        .http_only(true)
        .build()
}

/// Reuses the session already carried by the jar, or mints a fresh one
/// and adds its cookie to the jar.
pub fn ensure_session(jar: CookieJar, ttl_days: i64) -> (Uuid, CookieJar) {
    match session_id_from_jar(&jar) {
        Some(session_id) => (session_id, jar),
        None => {
            let session_id = Uuid::new_v4();
            let jar = jar.add(session_cookie(session_id, ttl_days));
            (session_id, jar)
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session_id = session_id_from_jar(&jar).ok_or_else(|| {
            warn!("missing or malformed session cookie");
            AppError::Unauthorized
        })?;

        let user_id = User::find_by_session(&state.db, session_id)
            .await?
            .ok_or_else(|| {
                warn!("session does not resolve to a user");
                AppError::Unauthorized
            })?;

        Ok(SessionUser(user_id))
    }
}
