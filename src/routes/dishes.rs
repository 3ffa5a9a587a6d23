use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::DishRecord,
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct DishResponse {
    pub name: String,
    pub category: String,
    pub description: String,
    pub acidity: f64,
    pub body: f64,
    pub recommended_wine_types: Vec<String>,
    pub key_ingredients: Vec<String>,
    pub allergens: Vec<String>,
}

impl From<&DishRecord> for DishResponse {
    fn from(dish: &DishRecord) -> Self {
        Self {
            name: dish.name.clone(),
            category: dish.category.clone(),
            description: dish.description.clone(),
            acidity: dish.acidity,
            body: dish.body,
            recommended_wine_types: dish.recommended_wine_types.clone(),
            key_ingredients: dish.key_ingredients.clone(),
            allergens: dish.allergens.clone(),
        }
    }
}

/// All dish categories, sorted
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let data = state.sessions.snapshot().await?;
    Ok(Json(data.categories()))
}

/// Dish names in a category, sorted; unknown categories yield an empty
/// list rather than an error
pub async fn list_dishes(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<Vec<String>>> {
    let data = state.sessions.snapshot().await?;
    Ok(Json(data.dishes_in_category(&category)))
}

/// Full profile of a single dish
pub async fn get_dish(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<DishResponse>> {
    let data = state.sessions.snapshot().await?;
    let dish = data
        .find_dish(&name)
        .ok_or_else(|| AppError::NotFound(format!("Dish '{}' not found", name)))?;
    Ok(Json(DishResponse::from(dish)))
}
