use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{auth::session::SessionUser, error::AppError, state::AppState};

use super::dto::{CreateMealRequest, MealByIdResponse, MealListResponse, UpdateMealRequest};
use super::repo::{Meal, MealDraft};

pub(crate) fn is_valid_hour(hour: &str) -> bool {
    lazy_static! {
        static ref HOUR_RE: Regex = Regex::new(r"^([01]\d|2[0-3]):[0-5]\d(:[0-5]\d)?$").unwrap();
    }
    HOUR_RE.is_match(hour)
}

fn validate_meal_fields(name: &str, hour: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".into()));
    }
    if !is_valid_hour(hour) {
        return Err(AppError::Validation("Invalid hour".into()));
    }
    Ok(())
}

#[instrument(skip(state, payload))]
pub async fn create_meal(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    Json(payload): Json<CreateMealRequest>,
) -> Result<StatusCode, AppError> {
    validate_meal_fields(&payload.name, &payload.hour)?;
    if payload.user_id.is_some() {
        debug!("ignoring client-supplied userId; owner comes from the session");
    }

    let draft = MealDraft {
        name: &payload.name,
        description: &payload.description,
        date: payload.date,
        hour: &payload.hour,
        is_in_diet: payload.is_in_diet,
    };
    let meal = Meal::create(&state.db, user_id, &draft).await?;

    info!(meal_id = %meal.id, %user_id, "meal created");
    Ok(StatusCode::CREATED)
}

#[instrument(skip(state, payload))]
pub async fn update_meal(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMealRequest>,
) -> Result<StatusCode, AppError> {
    validate_meal_fields(&payload.name, &payload.hour)?;
    if payload.id.is_some() || payload.user_id.is_some() {
        debug!("ignoring client-supplied id/userId; path id and session owner win");
    }

    let draft = MealDraft {
        name: &payload.name,
        description: &payload.description,
        date: payload.date,
        hour: &payload.hour,
        is_in_diet: payload.is_in_diet,
    };
    let affected = Meal::update_owned(&state.db, id, user_id, &draft).await?;

    // Zero rows means no meal with this id belongs to the session user;
    // that is a silent no-op, not an error.
    debug!(meal_id = %id, %user_id, affected, "meal update");
    Ok(StatusCode::CREATED)
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let affected = Meal::delete_owned(&state.db, id, user_id).await?;
    debug!(meal_id = %id, %user_id, affected, "meal delete");
    Ok(StatusCode::OK)
}

/// GET /meal/user/:user_id — the path parameter is validated as a UUID
/// but listing is always scoped to the session user, so one user can
/// never enumerate another's meals.
#[instrument(skip(state))]
pub async fn list_meals_for_user(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    Path(path_user): Path<Uuid>,
) -> Result<Json<MealListResponse>, AppError> {
    if path_user != user_id {
        debug!(%path_user, "path user ignored; listing for the session user");
    }

    let meal_arr = Meal::list_by_user(&state.db, user_id).await?;
    Ok(Json(MealListResponse { meal_arr }))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MealByIdResponse>, AppError> {
    let meal_by_id = Meal::find_owned(&state.db, id, user_id).await?;
    Ok(Json(MealByIdResponse { meal_by_id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn hour_accepts_hh_mm_and_hh_mm_ss() {
        assert!(is_valid_hour("00:00"));
        assert!(is_valid_hour("12:30"));
        assert!(is_valid_hour("23:59:59"));
    }

    #[test]
    fn hour_rejects_out_of_range_and_garbage() {
        assert!(!is_valid_hour(""));
        assert!(!is_valid_hour("24:00"));
        assert!(!is_valid_hour("12:60"));
        assert!(!is_valid_hour("9:00"));
        assert!(!is_valid_hour("noonish"));
    }

    fn create_payload(name: &str, hour: &str) -> CreateMealRequest {
        CreateMealRequest {
            name: name.into(),
            description: "d".into(),
            date: date!(2024 - 01 - 15),
            hour: hour.into(),
            is_in_diet: true,
            user_id: None,
        }
    }

    // Validation fails before the database is touched, so the fake
    // state's lazy pool is never exercised.

    #[tokio::test]
    async fn create_rejects_bad_hour() {
        let state = AppState::fake();
        let err = create_meal(
            State(state),
            SessionUser(Uuid::new_v4()),
            Json(create_payload("Lunch", "25:00")),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_empty_name() {
        let state = AppState::fake();
        let err = create_meal(
            State(state),
            SessionUser(Uuid::new_v4()),
            Json(create_payload("", "12:00")),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn update_rejects_bad_hour() {
        let state = AppState::fake();
        let payload = UpdateMealRequest {
            id: None,
            name: "Lunch".into(),
            description: "d".into(),
            date: date!(2024 - 01 - 15),
            hour: "bad".into(),
            is_in_diet: false,
            user_id: None,
        };
        let err = update_meal(
            State(state),
            SessionUser(Uuid::new_v4()),
            Path(Uuid::new_v4()),
            Json(payload),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
