use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{Candidate, DishProfile},
    pairing,
    services::{describe_pairing, NarrativeSource},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct PairingResponse {
    pub dish: String,
    #[serde(flatten)]
    pub profile: DishProfile,
    pub recommendations: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct NarrativeRequest {
    pub dish: String,
    pub wine: String,
}

#[derive(Debug, Serialize)]
pub struct NarrativeResponse {
    pub dish: String,
    pub wine: String,
    pub narrative: String,
    pub source: NarrativeSource,
}

/// Wine recommendations for a dish
///
/// An empty `recommendations` list means no compatible pairing exists
/// for this dish; that is a normal response, not an error.
pub async fn recommend_for_dish(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<PairingResponse>> {
    let data = state.sessions.snapshot().await?;
    let dish = data
        .find_dish(&name)
        .ok_or_else(|| AppError::NotFound(format!("Dish '{}' not found", name)))?;

    let profile = dish.profile();
    let recommendations = pairing::recommend(
        &data.catalog,
        profile.acidity,
        profile.body,
        &profile.recommended_wine_types,
    );

    tracing::info!(
        dish = %name,
        recommendations = recommendations.len(),
        "Pairing recommendations computed"
    );

    Ok(Json(PairingResponse {
        dish: dish.name.clone(),
        profile,
        recommendations,
    }))
}

/// Pairing narrative for a chosen wine and dish
///
/// Generator failures never reach the client; the deterministic
/// fallback text is returned instead, with `source` set accordingly.
pub async fn narrative(
    State(state): State<AppState>,
    Json(request): Json<NarrativeRequest>,
) -> AppResult<Json<NarrativeResponse>> {
    if request.dish.trim().is_empty() || request.wine.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Both 'dish' and 'wine' must be non-empty".to_string(),
        ));
    }

    let data = state.sessions.snapshot().await?;
    let dish = data
        .find_dish(&request.dish)
        .ok_or_else(|| AppError::NotFound(format!("Dish '{}' not found", request.dish)))?;
    let wine = data
        .find_wine(&request.wine)
        .ok_or_else(|| AppError::NotFound(format!("Wine '{}' not found", request.wine)))?;

    let (narrative, source) =
        describe_pairing(&state.cache, state.narrator.as_ref(), wine, dish).await;

    Ok(Json(NarrativeResponse {
        dish: dish.name.clone(),
        wine: wine.wine.clone(),
        narrative,
        source,
    }))
}
