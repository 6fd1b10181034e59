//! User repository
//!
//! Users are provisioned out-of-band; the HTTP layer only lists them.

use sqlx::{FromRow, SqlitePool};

use super::DbError;

/// User record from database.
///
/// `password` never leaves the persistence layer in serialized form; see
/// the user routes.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub is_active: bool,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a user (provisioning and tests; no HTTP surface).
    pub async fn create(
        &self,
        email: &str,
        password: &str,
        is_active: bool,
    ) -> Result<User, DbError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password, is_active)
            VALUES (?, ?, ?)
            RETURNING id, email, password, is_active
            "#,
        )
        .bind(email)
        .bind(password)
        .bind(is_active)
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }

    /// List every user.
    pub async fn list(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, email, password, is_active FROM users ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Get a single user by id.
    pub async fn get(&self, id: i64) -> Result<User, DbError> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password, is_active FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "user",
            id: id.to_string(),
        })
    }
}
