//! Favorites repository
//!
//! Maintains the user-to-planet and user-to-person favorite relations,
//! both with the same contract: the actor and the target must exist, and
//! each (actor, target) pair appears at most once. Writes run inside a
//! transaction; the uniqueness check is backstopped by a UNIQUE
//! constraint on the join table.

use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};

use super::{DbError, Planet, User};

/// planet_favorites row
#[derive(Debug, Clone, FromRow)]
pub struct PlanetFavorite {
    pub id: i64,
    pub user_id: i64,
    pub planet_id: i64,
}

/// people_favorites row
#[derive(Debug, Clone, FromRow)]
pub struct PeopleFavorite {
    pub id: i64,
    pub user_id: i64,
    pub people_id: i64,
}

/// Favorites repository
pub struct FavoriteRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FavoriteRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record that `user_id` favorites `planet_id`.
    pub async fn add_planet(
        &self,
        user_id: i64,
        planet_id: i64,
    ) -> Result<PlanetFavorite, DbError> {
        let mut tx = self.pool.begin().await?;

        ensure_exists(&mut tx, "users", "user", user_id).await?;
        ensure_exists(&mut tx, "planets", "planet", planet_id).await?;

        let existing: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM planet_favorites WHERE user_id = ? AND planet_id = ?",
        )
        .bind(user_id)
        .bind(planet_id)
        .fetch_optional(&mut *tx)
        .await?;

        if existing.is_some() {
            return Err(DbError::Conflict {
                message: format!("planet {planet_id} is already a favorite of user {user_id}"),
            });
        }

        let favorite = sqlx::query_as::<_, PlanetFavorite>(
            r#"
            INSERT INTO planet_favorites (user_id, planet_id)
            VALUES (?, ?)
            RETURNING id, user_id, planet_id
            "#,
        )
        .bind(user_id)
        .bind(planet_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(favorite)
    }

    /// Remove `planet_id` from `user_id`'s favorites, returning the
    /// deleted row.
    pub async fn remove_planet(
        &self,
        user_id: i64,
        planet_id: i64,
    ) -> Result<PlanetFavorite, DbError> {
        let mut tx = self.pool.begin().await?;

        ensure_exists(&mut tx, "users", "user", user_id).await?;
        ensure_exists(&mut tx, "planets", "planet", planet_id).await?;

        let favorite: PlanetFavorite = sqlx::query_as(
            "SELECT id, user_id, planet_id FROM planet_favorites WHERE user_id = ? AND planet_id = ?",
        )
        .bind(user_id)
        .bind(planet_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::Conflict {
            message: format!("planet {planet_id} is not in user {user_id}'s favorites"),
        })?;

        sqlx::query("DELETE FROM planet_favorites WHERE id = ?")
            .bind(favorite.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(favorite)
    }

    /// Record that `user_id` favorites `people_id`.
    pub async fn add_person(
        &self,
        user_id: i64,
        people_id: i64,
    ) -> Result<PeopleFavorite, DbError> {
        let mut tx = self.pool.begin().await?;

        ensure_exists(&mut tx, "users", "user", user_id).await?;
        ensure_exists(&mut tx, "people", "person", people_id).await?;

        let existing: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM people_favorites WHERE user_id = ? AND people_id = ?",
        )
        .bind(user_id)
        .bind(people_id)
        .fetch_optional(&mut *tx)
        .await?;

        if existing.is_some() {
            return Err(DbError::Conflict {
                message: format!("person {people_id} is already a favorite of user {user_id}"),
            });
        }

        let favorite = sqlx::query_as::<_, PeopleFavorite>(
            r#"
            INSERT INTO people_favorites (user_id, people_id)
            VALUES (?, ?)
            RETURNING id, user_id, people_id
            "#,
        )
        .bind(user_id)
        .bind(people_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(favorite)
    }

    /// Remove `people_id` from `user_id`'s favorites, returning the
    /// deleted row.
    pub async fn remove_person(
        &self,
        user_id: i64,
        people_id: i64,
    ) -> Result<PeopleFavorite, DbError> {
        let mut tx = self.pool.begin().await?;

        ensure_exists(&mut tx, "users", "user", user_id).await?;
        ensure_exists(&mut tx, "people", "person", people_id).await?;

        let favorite: PeopleFavorite = sqlx::query_as(
            "SELECT id, user_id, people_id FROM people_favorites WHERE user_id = ? AND people_id = ?",
        )
        .bind(user_id)
        .bind(people_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::Conflict {
            message: format!("person {people_id} is not in user {user_id}'s favorites"),
        })?;

        sqlx::query("DELETE FROM people_favorites WHERE id = ?")
            .bind(favorite.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(favorite)
    }

    /// A user's record plus every planet they have favorited, resolved
    /// through the join table in favoriting order.
    pub async fn planets_for_user(&self, user_id: i64) -> Result<(User, Vec<Planet>), DbError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password, is_active FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "user",
            id: user_id.to_string(),
        })?;

        let planets = sqlx::query_as::<_, Planet>(
            r#"
            SELECT p.id, p.name, p.climate
            FROM planet_favorites f
            JOIN planets p ON p.id = f.planet_id
            WHERE f.user_id = ?
            ORDER BY f.id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok((user, planets))
    }
}

/// Fail with NotFound unless a row with this id exists.
///
/// Table names come from this module, never from user input.
async fn ensure_exists(
    tx: &mut Transaction<'_, Sqlite>,
    table: &str,
    resource: &'static str,
    id: i64,
) -> Result<(), DbError> {
    let exists: (bool,) =
        sqlx::query_as(&format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?)"))
            .bind(id)
            .fetch_one(&mut **tx)
            .await?;

    if exists.0 {
        Ok(())
    } else {
        Err(DbError::NotFound {
            resource,
            id: id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;
    use crate::db::repos::{PeopleRepo, PlanetRepo, UserRepo};
    use crate::models::{PersonDraft, PlanetDraft};
    use sqlx::sqlite::SqlitePoolOptions;

    struct Fixture {
        pool: SqlitePool,
        user_id: i64,
        planet_id: i64,
        person_id: i64,
    }

    async fn fixture() -> Fixture {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        migrations::run(&pool).await.unwrap();

        let user_id = UserRepo::new(&pool)
            .create("luke@rebellion.example", "speeder", true)
            .await
            .unwrap()
            .id;
        let planet_id = PlanetRepo::new(&pool)
            .create(PlanetDraft::new(Some("Tatooine".into()), Some("arid".into())).unwrap())
            .await
            .unwrap()
            .id;
        let person_id = PeopleRepo::new(&pool)
            .create(
                PersonDraft::new(Some("Biggs".into()), Some("male".into()), Some(planet_id))
                    .unwrap(),
            )
            .await
            .unwrap()
            .id;

        Fixture {
            pool,
            user_id,
            planet_id,
            person_id,
        }
    }

    async fn planet_favorite_count(pool: &SqlitePool) -> i64 {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM planet_favorites")
            .fetch_one(pool)
            .await
            .unwrap();
        count.0
    }

    #[tokio::test]
    async fn add_planet_creates_one_row() {
        let fx = fixture().await;
        let repo = FavoriteRepo::new(&fx.pool);

        let favorite = repo.add_planet(fx.user_id, fx.planet_id).await.unwrap();
        assert_eq!(favorite.user_id, fx.user_id);
        assert_eq!(favorite.planet_id, fx.planet_id);
        assert_eq!(planet_favorite_count(&fx.pool).await, 1);
    }

    #[tokio::test]
    async fn duplicate_add_conflicts_without_second_row() {
        let fx = fixture().await;
        let repo = FavoriteRepo::new(&fx.pool);

        repo.add_planet(fx.user_id, fx.planet_id).await.unwrap();
        let err = repo.add_planet(fx.user_id, fx.planet_id).await.unwrap_err();

        assert!(matches!(err, DbError::Conflict { .. }));
        assert_eq!(planet_favorite_count(&fx.pool).await, 1);
    }

    #[tokio::test]
    async fn add_unknown_planet_is_not_found() {
        let fx = fixture().await;
        let err = FavoriteRepo::new(&fx.pool)
            .add_planet(fx.user_id, 99)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "planet", .. }));
    }

    #[tokio::test]
    async fn add_for_unknown_user_is_not_found() {
        let fx = fixture().await;
        let err = FavoriteRepo::new(&fx.pool)
            .add_planet(99, fx.planet_id)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "user", .. }));
    }

    #[tokio::test]
    async fn remove_returns_the_deleted_row() {
        let fx = fixture().await;
        let repo = FavoriteRepo::new(&fx.pool);

        let added = repo.add_planet(fx.user_id, fx.planet_id).await.unwrap();
        let removed = repo.remove_planet(fx.user_id, fx.planet_id).await.unwrap();

        assert_eq!(removed.id, added.id);
        assert_eq!(planet_favorite_count(&fx.pool).await, 0);
    }

    #[tokio::test]
    async fn remove_nonexistent_conflicts_and_changes_nothing() {
        let fx = fixture().await;
        let err = FavoriteRepo::new(&fx.pool)
            .remove_planet(fx.user_id, fx.planet_id)
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Conflict { .. }));
        assert_eq!(planet_favorite_count(&fx.pool).await, 0);
    }

    #[tokio::test]
    async fn people_favorites_mirror_the_contract() {
        let fx = fixture().await;
        let repo = FavoriteRepo::new(&fx.pool);

        let favorite = repo.add_person(fx.user_id, fx.person_id).await.unwrap();
        assert_eq!(favorite.people_id, fx.person_id);

        let err = repo.add_person(fx.user_id, fx.person_id).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { .. }));

        repo.remove_person(fx.user_id, fx.person_id).await.unwrap();
        let err = repo.remove_person(fx.user_id, fx.person_id).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { .. }));
    }

    #[tokio::test]
    async fn planets_for_user_resolves_targets() {
        let fx = fixture().await;
        let repo = FavoriteRepo::new(&fx.pool);

        let hoth = PlanetRepo::new(&fx.pool)
            .create(PlanetDraft::new(Some("Hoth".into()), Some("frozen".into())).unwrap())
            .await
            .unwrap();

        repo.add_planet(fx.user_id, fx.planet_id).await.unwrap();
        repo.add_planet(fx.user_id, hoth.id).await.unwrap();

        let (user, planets) = repo.planets_for_user(fx.user_id).await.unwrap();
        assert_eq!(user.email, "luke@rebellion.example");

        let names: Vec<&str> = planets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Tatooine", "Hoth"]);
    }

    #[tokio::test]
    async fn planets_for_unknown_user_is_not_found() {
        let fx = fixture().await;
        let err = FavoriteRepo::new(&fx.pool)
            .planets_for_user(99)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "user", .. }));
    }
}
