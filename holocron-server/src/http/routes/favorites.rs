//! Favorites endpoints
//!
//! Mutations act for a fixed actor: the catalog predates its
//! authentication layer, so every favorite belongs to `DEFAULT_ACTOR_ID`
//! until a session-derived user replaces it. The repository already takes
//! the actor explicitly; only these handlers know about the constant.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::db::repos::{FavoriteRepo, PeopleFavorite, PlanetFavorite};
use crate::http::error::ApiError;
use crate::http::routes::planets::PlanetResponse;
use crate::http::routes::users::UserResponse;
use crate::http::server::AppState;

/// Stand-in actor for favorites mutations until authentication exists.
const DEFAULT_ACTOR_ID: i64 = 1;

/// Planet favorite response
#[derive(Serialize)]
pub struct PlanetFavoriteResponse {
    pub id: i64,
    pub user_id: i64,
    pub planet_id: i64,
}

impl From<PlanetFavorite> for PlanetFavoriteResponse {
    fn from(f: PlanetFavorite) -> Self {
        Self {
            id: f.id,
            user_id: f.user_id,
            planet_id: f.planet_id,
        }
    }
}

/// People favorite response
#[derive(Serialize)]
pub struct PeopleFavoriteResponse {
    pub id: i64,
    pub user_id: i64,
    pub people_id: i64,
}

impl From<PeopleFavorite> for PeopleFavoriteResponse {
    fn from(f: PeopleFavorite) -> Self {
        Self {
            id: f.id,
            user_id: f.user_id,
            people_id: f.people_id,
        }
    }
}

/// GET /favorite_planets/{user_id} response
#[derive(Serialize)]
pub struct FavoritePlanetsResponse {
    pub user_info: UserResponse,
    pub favorite_planets: Vec<PlanetResponse>,
}

/// GET /favorite_planets/{user_id} - a user's favorite planets, resolved
async fn list_favorite_planets(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<FavoritePlanetsResponse>, ApiError> {
    let (user, planets) = FavoriteRepo::new(&state.pool)
        .planets_for_user(user_id)
        .await?;

    Ok(Json(FavoritePlanetsResponse {
        user_info: user.into(),
        favorite_planets: planets.into_iter().map(PlanetResponse::from).collect(),
    }))
}

/// POST /favorite/planet/{planet_id} - favorite a planet
async fn add_favorite_planet(
    State(state): State<Arc<AppState>>,
    Path(planet_id): Path<i64>,
) -> Result<(StatusCode, Json<PlanetFavoriteResponse>), ApiError> {
    let favorite = FavoriteRepo::new(&state.pool)
        .add_planet(DEFAULT_ACTOR_ID, planet_id)
        .await?;
    Ok((StatusCode::CREATED, Json(favorite.into())))
}

/// DELETE /favorite/planet/{planet_id} - unfavorite a planet
async fn remove_favorite_planet(
    State(state): State<Arc<AppState>>,
    Path(planet_id): Path<i64>,
) -> Result<Json<PlanetFavoriteResponse>, ApiError> {
    let favorite = FavoriteRepo::new(&state.pool)
        .remove_planet(DEFAULT_ACTOR_ID, planet_id)
        .await?;
    Ok(Json(favorite.into()))
}

/// POST /favorite/people/{people_id} - favorite a person
async fn add_favorite_person(
    State(state): State<Arc<AppState>>,
    Path(people_id): Path<i64>,
) -> Result<(StatusCode, Json<PeopleFavoriteResponse>), ApiError> {
    let favorite = FavoriteRepo::new(&state.pool)
        .add_person(DEFAULT_ACTOR_ID, people_id)
        .await?;
    Ok((StatusCode::CREATED, Json(favorite.into())))
}

/// DELETE /favorite/people/{people_id} - unfavorite a person
async fn remove_favorite_person(
    State(state): State<Arc<AppState>>,
    Path(people_id): Path<i64>,
) -> Result<Json<PeopleFavoriteResponse>, ApiError> {
    let favorite = FavoriteRepo::new(&state.pool)
        .remove_person(DEFAULT_ACTOR_ID, people_id)
        .await?;
    Ok(Json(favorite.into()))
}

/// Favorites routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/favorite_planets/{user_id}", get(list_favorite_planets))
        .route(
            "/favorite/planet/{planet_id}",
            post(add_favorite_planet).delete(remove_favorite_planet),
        )
        .route(
            "/favorite/people/{people_id}",
            post(add_favorite_person).delete(remove_favorite_person),
        )
}
