//! Planet repository
//!
//! Full CRUD. UPDATE and DELETE use RETURNING so a missing row surfaces
//! as NotFound without a second query.

use sqlx::{FromRow, SqlitePool};

use crate::models::PlanetDraft;

/// Planet record from database
#[derive(Debug, Clone, FromRow)]
pub struct Planet {
    pub id: i64,
    pub name: String,
    pub climate: String,
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("unknown {resource} '{id}'")]
    MissingReference { resource: &'static str, id: String },

    #[error("{message}")]
    Conflict { message: String },
}

/// Planet repository
pub struct PlanetRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PlanetRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a planet and return the stored row.
    pub async fn create(&self, draft: PlanetDraft) -> Result<Planet, DbError> {
        let planet = sqlx::query_as::<_, Planet>(
            r#"
            INSERT INTO planets (name, climate)
            VALUES (?, ?)
            RETURNING id, name, climate
            "#,
        )
        .bind(draft.name())
        .bind(draft.climate())
        .fetch_one(self.pool)
        .await?;

        Ok(planet)
    }

    /// List every planet.
    pub async fn list(&self) -> Result<Vec<Planet>, DbError> {
        let planets =
            sqlx::query_as::<_, Planet>("SELECT id, name, climate FROM planets ORDER BY id")
                .fetch_all(self.pool)
                .await?;

        Ok(planets)
    }

    /// Get a single planet by id.
    pub async fn get(&self, id: i64) -> Result<Planet, DbError> {
        sqlx::query_as::<_, Planet>("SELECT id, name, climate FROM planets WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "planet",
                id: id.to_string(),
            })
    }

    /// Overwrite name and climate in place.
    pub async fn update(&self, id: i64, draft: PlanetDraft) -> Result<Planet, DbError> {
        sqlx::query_as::<_, Planet>(
            r#"
            UPDATE planets
            SET name = ?, climate = ?
            WHERE id = ?
            RETURNING id, name, climate
            "#,
        )
        .bind(draft.name())
        .bind(draft.climate())
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "planet",
            id: id.to_string(),
        })
    }

    /// Delete a planet, returning the removed row.
    ///
    /// Residents are not touched: people keep their planet_id even after
    /// the planet is gone.
    pub async fn delete(&self, id: i64) -> Result<Planet, DbError> {
        sqlx::query_as::<_, Planet>(
            "DELETE FROM planets WHERE id = ? RETURNING id, name, climate",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "planet",
            id: id.to_string(),
        })
    }
}
