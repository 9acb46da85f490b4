use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub session_id: Uuid,
    pub created_at: OffsetDateTime,
}

impl User {
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        password_hash: &str,
        session_id: Uuid,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash, session_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password_hash, session_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(session_id)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, session_id, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Resolves a session id to a user id. Repeated registrations from
    /// one browser share the session cookie, so several rows may carry
    /// the same session id; the most recent registration wins.
    pub async fn find_by_session(db: &PgPool, session_id: Uuid) -> anyhow::Result<Option<Uuid>> {
        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id
            FROM users
            WHERE session_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(session_id)
        .fetch_optional(db)
        .await?;
        Ok(user_id)
    }
}
