use crate::{error::AppError, extractors::RecordId, AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Html,
    Json,
};
use core_types::{validate_description, validate_strength, Hero, HeroPower, HeroWithPowers, Power};
use database::DbError;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

const HERO_NOT_FOUND: &str = "Hero not found";
const POWER_NOT_FOUND: &str = "Power not found";
const MISSING_FIELDS: &str = "Missing field(s)";
const INVALID_REFERENCE: &str = "Invalid hero or power id";
const INVALID_STRENGTH: &str = "Invalid strength";

/// Body of `PATCH /powers/:id`. Any field other than `description` is ignored.
#[derive(Debug, Deserialize)]
pub struct PowerUpdate {
    pub description: Option<String>,
}

/// Body of `POST /hero_powers`. Every field is optional here so that absence
/// can be reported as "Missing field(s)" rather than a deserialization error.
///
/// `strength` is kept as raw JSON: a non-string strength is an invalid
/// strength, and that is only reported after the referenced rows are checked.
#[derive(Debug, Deserialize)]
pub struct NewHeroPower {
    pub hero_id: Option<i64>,
    pub power_id: Option<i64>,
    pub strength: Option<Value>,
}

/// # GET /
pub async fn index() -> Html<&'static str> {
    Html("<h1>Code challenge</h1>")
}

/// # GET /heroes
pub async fn get_heroes(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Hero>>, AppError> {
    let heroes = state.db_repo.get_all_heroes().await?;
    Ok(Json(heroes))
}

/// # GET /heroes/:id
/// Fetches a hero with its hero powers embedded.
pub async fn get_hero(
    RecordId(hero_id): RecordId,
    State(state): State<Arc<AppState>>,
) -> Result<Json<HeroWithPowers>, AppError> {
    match state.db_repo.get_hero_with_powers(hero_id).await {
        Ok(hero) => Ok(Json(hero)),
        Err(DbError::NotFound) => Err(AppError::NotFound(HERO_NOT_FOUND.to_string())),
        Err(e) => Err(e.into()),
    }
}

/// # GET /powers
pub async fn get_powers(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Power>>, AppError> {
    let powers = state.db_repo.get_all_powers().await?;
    Ok(Json(powers))
}

/// # GET /powers/:id
pub async fn get_power(
    RecordId(power_id): RecordId,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Power>, AppError> {
    let power = state
        .db_repo
        .find_power(power_id)
        .await?
        .ok_or_else(|| AppError::NotFound(POWER_NOT_FOUND.to_string()))?;
    Ok(Json(power))
}

/// # PATCH /powers/:id
/// Replaces the description when one is given; otherwise returns the power unchanged.
///
/// The power is looked up before the body is read, so an unknown id is a 404
/// whatever the body contains.
pub async fn update_power(
    RecordId(power_id): RecordId,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PowerUpdate>, JsonRejection>,
) -> Result<Json<Power>, AppError> {
    let power = state
        .db_repo
        .find_power(power_id)
        .await?
        .ok_or_else(|| AppError::NotFound(POWER_NOT_FOUND.to_string()))?;

    let Json(update) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let Some(description) = update.description else {
        return Ok(Json(power));
    };

    if let Err(e) = validate_description(Some(description.as_str())) {
        tracing::warn!(power_id, "Rejected power description update.");
        return Err(AppError::BadRequest(e.to_string()));
    }

    let power = state
        .db_repo
        .update_power_description(power_id, &description)
        .await?;
    tracing::info!(power_id, "Power description updated.");
    Ok(Json(power))
}

/// # POST /hero_powers
/// Links an existing hero to an existing power.
///
/// Checks run in a fixed order, and the first failure wins: all fields present,
/// both referenced rows exist, strength is one of the enumerated values.
pub async fn create_hero_power(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewHeroPower>, JsonRejection>,
) -> Result<(StatusCode, Json<HeroPower>), AppError> {
    let Json(new_hero_power) =
        payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let NewHeroPower {
        hero_id: Some(hero_id),
        power_id: Some(power_id),
        strength: Some(strength),
    } = new_hero_power
    else {
        return Err(AppError::BadRequest(MISSING_FIELDS.to_string()));
    };

    let hero = state.db_repo.find_hero(hero_id).await?;
    let power = state.db_repo.find_power(power_id).await?;
    if hero.is_none() || power.is_none() {
        return Err(AppError::NotFound(INVALID_REFERENCE.to_string()));
    }

    let strength = strength
        .as_str()
        .and_then(|s| validate_strength(s).ok())
        .ok_or_else(|| AppError::BadRequest(INVALID_STRENGTH.to_string()))?;

    let hero_power = state
        .db_repo
        .save_hero_power(hero_id, power_id, strength.as_str())
        .await?;
    tracing::info!(
        hero_power_id = hero_power.id,
        hero_id,
        power_id,
        strength = %strength,
        "Hero power created."
    );

    Ok((StatusCode::CREATED, Json(hero_power)))
}
