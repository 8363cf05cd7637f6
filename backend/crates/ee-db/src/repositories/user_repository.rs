//! User repository.
//!
//! `email` and `external_identity_id` are both unique; inserts that collide
//! surface as `DbError::UniqueViolation` so callers can tell a lost race
//! apart from a real failure.

use crate::Result as DbErrorResult;

use ee_core::{NewUser, User};

use chrono::Utc;
use sqlx::{FromRow, SqlitePool};

#[derive(FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password_hash: Option<String>,
    external_identity_id: Option<String>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            email: r.email,
            password_hash: r.password_hash,
            external_identity_id: r.external_identity_id,
        }
    }
}

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &NewUser) -> DbErrorResult<User> {
        let created_at = Utc::now().timestamp();

        let result = sqlx::query(
            r#"
                INSERT INTO users (name, email, password_hash, external_identity_id, created_at)
                VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.external_identity_id)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            external_identity_id: user.external_identity_id.clone(),
        })
    }

    pub async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, name, email, password_hash, external_identity_id
                FROM users
                WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, name, email, password_hash, external_identity_id
                FROM users
                WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    pub async fn find_by_external_id(
        &self,
        external_identity_id: &str,
    ) -> DbErrorResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, name, email, password_hash, external_identity_id
                FROM users
                WHERE external_identity_id = ?
            "#,
        )
        .bind(external_identity_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    /// Set the external id on a user that has none yet.
    ///
    /// Returns false when the user already carries an external id (or does
    /// not exist); an existing link is never overwritten.
    pub async fn attach_external_id(
        &self,
        id: i64,
        external_identity_id: &str,
    ) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET external_identity_id = ?
                WHERE id = ? AND external_identity_id IS NULL
            "#,
        )
        .bind(external_identity_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Insert a user with a fixed id unless that id or email is taken.
    ///
    /// Returns true when a row was inserted.
    pub async fn ensure_with_id(&self, id: i64, name: &str, email: &str) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                INSERT OR IGNORE INTO users (id, name, email, created_at)
                VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> DbErrorResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
