//! Planet endpoints
//!
//! The read paths live under the plural `/planets`, the write paths under
//! the singular `/planet`; both shapes are part of the published API.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Planet, PlanetRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::PlanetDraft;

/// Create/update planet request
#[derive(Deserialize)]
pub struct PlanetRequest {
    pub name: Option<String>,
    pub climate: Option<String>,
}

/// Planet response
#[derive(Serialize)]
pub struct PlanetResponse {
    pub id: i64,
    pub name: String,
    pub climate: String,
}

impl From<Planet> for PlanetResponse {
    fn from(p: Planet) -> Self {
        Self {
            id: p.id,
            name: p.name,
            climate: p.climate,
        }
    }
}

/// GET /planets - list all planets
async fn list_planets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PlanetResponse>>, ApiError> {
    let planets = PlanetRepo::new(&state.pool).list().await?;
    Ok(Json(planets.into_iter().map(PlanetResponse::from).collect()))
}

/// GET /planets/{id} - get a single planet
async fn get_planet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<PlanetResponse>, ApiError> {
    let planet = PlanetRepo::new(&state.pool).get(id).await?;
    Ok(Json(PlanetResponse::from(planet)))
}

/// POST /planet - create a planet
async fn create_planet(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PlanetRequest>,
) -> Result<(StatusCode, Json<PlanetResponse>), ApiError> {
    let draft = PlanetDraft::new(req.name, req.climate)?;
    let planet = PlanetRepo::new(&state.pool).create(draft).await?;
    Ok((StatusCode::CREATED, Json(PlanetResponse::from(planet))))
}

/// PUT /planet/{id} - overwrite name and climate
async fn update_planet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<PlanetRequest>,
) -> Result<Json<PlanetResponse>, ApiError> {
    let draft = PlanetDraft::new(req.name, req.climate)?;
    let planet = PlanetRepo::new(&state.pool).update(id, draft).await?;
    Ok(Json(PlanetResponse::from(planet)))
}

/// DELETE /planet/{id} - delete a planet
///
/// Residents of the planet are left in place.
async fn delete_planet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<PlanetResponse>, ApiError> {
    let planet = PlanetRepo::new(&state.pool).delete(id).await?;
    Ok(Json(PlanetResponse::from(planet)))
}

/// Planet routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/planets", get(list_planets))
        .route("/planets/{id}", get(get_planet))
        .route("/planet", post(create_planet))
        .route("/planet/{id}", put(update_planet).delete(delete_planet))
}
