use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub date: Date,
    pub hour: String,
    pub is_in_diet: bool,
    pub created_at: OffsetDateTime,
}

/// Caller-supplied meal fields; the id and owner are decided server-side.
#[derive(Debug)]
pub struct MealDraft<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub date: Date,
    pub hour: &'a str,
    pub is_in_diet: bool,
}

impl Meal {
    pub async fn create(db: &PgPool, user_id: Uuid, draft: &MealDraft<'_>) -> anyhow::Result<Meal> {
        let meal = sqlx::query_as::<_, Meal>(
            r#"
            INSERT INTO meals (id, user_id, name, description, date, hour, is_in_diet)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, name, description, date, hour, is_in_diet, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(draft.name)
        .bind(draft.description)
        .bind(draft.date)
        .bind(draft.hour)
        .bind(draft.is_in_diet)
        .fetch_one(db)
        .await?;
        Ok(meal)
    }

    /// Updates only the row matching both the meal id and the owner.
    /// Returns the affected-row count; zero is a no-op, not an error.
    pub async fn update_owned(
        db: &PgPool,
        meal_id: Uuid,
        user_id: Uuid,
        draft: &MealDraft<'_>,
    ) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE meals
            SET name = $3, description = $4, date = $5, hour = $6, is_in_diet = $7
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(meal_id)
        .bind(user_id)
        .bind(draft.name)
        .bind(draft.description)
        .bind(draft.date)
        .bind(draft.hour)
        .bind(draft.is_in_diet)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_owned(db: &PgPool, meal_id: Uuid, user_id: Uuid) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM meals
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(meal_id)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    /// All of a user's meals, sorted chronologically on (date, hour) so
    /// the streak computation is well-defined.
    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Meal>> {
        let rows = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, user_id, name, description, date, hour, is_in_diet, created_at
            FROM meals
            WHERE user_id = $1
            ORDER BY date ASC, hour ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_owned(
        db: &PgPool,
        meal_id: Uuid,
        user_id: Uuid,
    ) -> anyhow::Result<Option<Meal>> {
        let meal = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, user_id, name, description, date, hour, is_in_diet, created_at
            FROM meals
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(meal_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(meal)
    }
}
