//! People repository
//!
//! Create and update verify the referenced planet inside the same
//! transaction as the write; reads resolve the home planet with a JOIN.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use crate::models::PersonDraft;

use super::{DbError, Planet};

/// Person record from database
#[derive(Debug, Clone, FromRow)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub gender: String,
    pub planet_id: i64,
}

/// Person with the home planet resolved
#[derive(Debug, Clone)]
pub struct PersonWithPlanet {
    pub person: Person,
    pub planet: Planet,
}

/// People repository
pub struct PeopleRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PeopleRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a person after verifying the home planet exists (atomic).
    pub async fn create(&self, draft: PersonDraft) -> Result<Person, DbError> {
        let mut tx = self.pool.begin().await?;

        let planet_exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM planets WHERE id = ?)")
                .bind(draft.planet_id())
                .fetch_one(&mut *tx)
                .await?;

        if !planet_exists.0 {
            return Err(DbError::MissingReference {
                resource: "planet",
                id: draft.planet_id().to_string(),
            });
        }

        let person = sqlx::query_as::<_, Person>(
            r#"
            INSERT INTO people (name, gender, planet_id)
            VALUES (?, ?, ?)
            RETURNING id, name, gender, planet_id
            "#,
        )
        .bind(draft.name())
        .bind(draft.gender())
        .bind(draft.planet_id())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(person)
    }

    /// List everyone with their home planet resolved, lowest id first.
    pub async fn list_with_planets(&self) -> Result<Vec<PersonWithPlanet>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                pe.id, pe.name, pe.gender, pe.planet_id,
                pl.id AS home_id, pl.name AS home_name, pl.climate AS home_climate
            FROM people pe
            JOIN planets pl ON pl.id = pe.planet_id
            ORDER BY pe.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.iter().map(person_with_planet).collect())
    }

    /// Get a single person by id with their home planet.
    pub async fn get(&self, id: i64) -> Result<PersonWithPlanet, DbError> {
        let row = sqlx::query(
            r#"
            SELECT
                pe.id, pe.name, pe.gender, pe.planet_id,
                pl.id AS home_id, pl.name AS home_name, pl.climate AS home_climate
            FROM people pe
            JOIN planets pl ON pl.id = pe.planet_id
            WHERE pe.id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "person",
            id: id.to_string(),
        })?;

        Ok(person_with_planet(&row))
    }

    /// Overwrite name, gender, and home planet in place.
    ///
    /// The person is looked up before the planet so an unknown person
    /// reports NotFound even when the new planet is also unknown.
    pub async fn update(&self, id: i64, draft: PersonDraft) -> Result<Person, DbError> {
        let mut tx = self.pool.begin().await?;

        let person_exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM people WHERE id = ?)")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        if !person_exists.0 {
            return Err(DbError::NotFound {
                resource: "person",
                id: id.to_string(),
            });
        }

        let planet_exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM planets WHERE id = ?)")
                .bind(draft.planet_id())
                .fetch_one(&mut *tx)
                .await?;

        if !planet_exists.0 {
            return Err(DbError::MissingReference {
                resource: "planet",
                id: draft.planet_id().to_string(),
            });
        }

        let person = sqlx::query_as::<_, Person>(
            r#"
            UPDATE people
            SET name = ?, gender = ?, planet_id = ?
            WHERE id = ?
            RETURNING id, name, gender, planet_id
            "#,
        )
        .bind(draft.name())
        .bind(draft.gender())
        .bind(draft.planet_id())
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(person)
    }

    /// Delete a person, returning the removed row.
    pub async fn delete(&self, id: i64) -> Result<Person, DbError> {
        sqlx::query_as::<_, Person>(
            "DELETE FROM people WHERE id = ? RETURNING id, name, gender, planet_id",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "person",
            id: id.to_string(),
        })
    }
}

fn person_with_planet(row: &SqliteRow) -> PersonWithPlanet {
    PersonWithPlanet {
        person: Person {
            id: row.get("id"),
            name: row.get("name"),
            gender: row.get("gender"),
            planet_id: row.get("planet_id"),
        },
        planet: Planet {
            id: row.get("home_id"),
            name: row.get("home_name"),
            climate: row.get("home_climate"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;
    use crate::db::repos::PlanetRepo;
    use crate::models::{PersonDraft, PlanetDraft};

    async fn test_pool() -> SqlitePool {
        // Mirror the production pool construction (foreign keys unenforced),
        // so deleting a planet leaves its residents in place with their old
        // planet_id — see `crate::db::pool`.
        let pool = crate::db::pool::create_pool_with_options("sqlite::memory:", 1)
            .await
            .unwrap();
        migrations::run(&pool).await.unwrap();
        pool
    }

    async fn seed_planet(pool: &SqlitePool, name: &str) -> i64 {
        PlanetRepo::new(pool)
            .create(PlanetDraft::new(Some(name.to_string()), Some("arid".to_string())).unwrap())
            .await
            .unwrap()
            .id
    }

    fn draft(name: &str, gender: &str, planet_id: i64) -> PersonDraft {
        PersonDraft::new(
            Some(name.to_string()),
            Some(gender.to_string()),
            Some(planet_id),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn create_resolves_home_planet() {
        let pool = test_pool().await;
        let planet_id = seed_planet(&pool, "Tatooine").await;
        let repo = PeopleRepo::new(&pool);

        let created = repo.create(draft("Luke", "male", planet_id)).await.unwrap();
        let fetched = repo.get(created.id).await.unwrap();

        assert_eq!(fetched.person.name, "Luke");
        assert_eq!(fetched.planet.name, "Tatooine");
    }

    #[tokio::test]
    async fn create_with_unknown_planet_writes_nothing() {
        let pool = test_pool().await;
        let repo = PeopleRepo::new(&pool);

        let err = repo.create(draft("Leia", "female", 99)).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::MissingReference { resource: "planet", .. }
        ));

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM people")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0, 0);
    }

    #[tokio::test]
    async fn update_checks_person_before_planet() {
        let pool = test_pool().await;
        let repo = PeopleRepo::new(&pool);

        // Both the person and the planet are unknown; the person wins.
        let err = repo.update(42, draft("Luke", "male", 99)).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "person", .. }));
    }

    #[tokio::test]
    async fn update_rejects_unknown_planet() {
        let pool = test_pool().await;
        let planet_id = seed_planet(&pool, "Tatooine").await;
        let repo = PeopleRepo::new(&pool);

        let created = repo.create(draft("Luke", "male", planet_id)).await.unwrap();
        let err = repo
            .update(created.id, draft("Luke", "male", 99))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DbError::MissingReference { resource: "planet", .. }
        ));
    }

    #[tokio::test]
    async fn update_moves_person_to_new_planet() {
        let pool = test_pool().await;
        let tatooine = seed_planet(&pool, "Tatooine").await;
        let dagobah = seed_planet(&pool, "Dagobah").await;
        let repo = PeopleRepo::new(&pool);

        let created = repo.create(draft("Luke", "male", tatooine)).await.unwrap();
        let updated = repo
            .update(created.id, draft("Luke", "male", dagobah))
            .await
            .unwrap();

        assert_eq!(updated.planet_id, dagobah);
    }

    #[tokio::test]
    async fn residents_survive_planet_delete() {
        let pool = test_pool().await;
        let planet_id = seed_planet(&pool, "Alderaan").await;
        let repo = PeopleRepo::new(&pool);

        let created = repo.create(draft("Leia", "female", planet_id)).await.unwrap();
        PlanetRepo::new(&pool).delete(planet_id).await.unwrap();

        // The row is still there, dangling planet_id and all. JOIN-backed
        // reads no longer surface it.
        let survivor = sqlx::query_as::<_, Person>(
            "SELECT id, name, gender, planet_id FROM people WHERE id = ?",
        )
        .bind(created.id)
        .fetch_one(&pool)
        .await
        .unwrap();

        assert_eq!(survivor.name, "Leia");
        assert_eq!(survivor.planet_id, planet_id);
    }

    #[tokio::test]
    async fn delete_unknown_is_not_found() {
        let pool = test_pool().await;
        let err = PeopleRepo::new(&pool).delete(7).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "person", .. }));
    }
}
