use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use super::repo::Meal;

/// Body for POST /meal. A `userId` field is accepted for wire
/// compatibility but never trusted: the owner is the session identity.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealRequest {
    pub name: String,
    pub description: String,
    pub date: Date,
    pub hour: String,
    pub is_in_diet: bool,
    pub user_id: Option<String>,
}

/// Body for PUT /meal/:id. `id` and `userId` are accepted but ignored
/// in favor of the path id and the session identity, so a meal can
/// never be reassigned to another user.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMealRequest {
    pub id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub date: Date,
    pub hour: String,
    pub is_in_diet: bool,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealListResponse {
    pub meal_arr: Vec<Meal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealByIdResponse {
    pub meal_by_id: Option<Meal>,
}
