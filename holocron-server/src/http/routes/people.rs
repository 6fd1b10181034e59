//! People endpoints
//!
//! Reads attach the resolved home planet as `planet_info`. The bare
//! `GET /people` returns the first record only, not a list; clients that
//! want everyone go through `GET /people/{id}`.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{PeopleRepo, Person, PersonWithPlanet};
use crate::http::error::ApiError;
use crate::http::routes::planets::PlanetResponse;
use crate::http::server::AppState;
use crate::models::PersonDraft;

/// Create/update person request
#[derive(Deserialize)]
pub struct PersonRequest {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub planet_id: Option<i64>,
}

/// Person response (write paths; no planet resolution)
#[derive(Serialize)]
pub struct PersonResponse {
    pub id: i64,
    pub name: String,
    pub gender: String,
}

impl From<Person> for PersonResponse {
    fn from(p: Person) -> Self {
        Self {
            id: p.id,
            name: p.name,
            gender: p.gender,
        }
    }
}

/// Person response with the home planet attached (read paths)
#[derive(Serialize)]
pub struct PersonWithPlanetResponse {
    pub id: i64,
    pub name: String,
    pub gender: String,
    pub planet_info: PlanetResponse,
}

impl From<PersonWithPlanet> for PersonWithPlanetResponse {
    fn from(p: PersonWithPlanet) -> Self {
        Self {
            id: p.person.id,
            name: p.person.name,
            gender: p.person.gender,
            planet_info: PlanetResponse::from(p.planet),
        }
    }
}

/// GET /people - the first person on record, with planet info
async fn first_person(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PersonWithPlanetResponse>, ApiError> {
    let people = PeopleRepo::new(&state.pool).list_with_planets().await?;
    let first = people.into_iter().next().ok_or(ApiError::NotFound {
        resource: "person",
        id: "first".to_string(),
    })?;
    Ok(Json(first.into()))
}

/// GET /people/{id} - get a single person, with planet info
async fn get_person(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<PersonWithPlanetResponse>, ApiError> {
    let person = PeopleRepo::new(&state.pool).get(id).await?;
    Ok(Json(person.into()))
}

/// POST /people - create a person
async fn create_person(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PersonRequest>,
) -> Result<(StatusCode, Json<PersonResponse>), ApiError> {
    let draft = PersonDraft::new(req.name, req.gender, req.planet_id)?;
    let person = PeopleRepo::new(&state.pool).create(draft).await?;
    Ok((StatusCode::CREATED, Json(PersonResponse::from(person))))
}

/// PUT /people/{id} - overwrite name, gender, and home planet
async fn update_person(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<PersonRequest>,
) -> Result<Json<PersonResponse>, ApiError> {
    let draft = PersonDraft::new(req.name, req.gender, req.planet_id)?;
    let person = PeopleRepo::new(&state.pool).update(id, draft).await?;
    Ok(Json(PersonResponse::from(person)))
}

/// DELETE /people/{id} - delete a person
async fn delete_person(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<PersonResponse>, ApiError> {
    let person = PeopleRepo::new(&state.pool).delete(id).await?;
    Ok(Json(PersonResponse::from(person)))
}

/// People routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/people", get(first_person).post(create_person))
        .route(
            "/people/{id}",
            get(get_person).put(update_person).delete(delete_person),
        )
}
