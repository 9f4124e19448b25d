use async_trait::async_trait;
use sqlx::PgPool;

use super::{model::User, repo_types::UserRow};
use crate::{
    db::map_db_error,
    error::{AppError, AppResult},
};

/// Storage operations the user service depends on.
///
/// Implementations report failures already translated into [`AppError`].
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return the id storage assigned to it.
    async fn save(&self, user: &User) -> AppResult<i64>;

    /// Fetch a user by id; `NotFound` when no row matches.
    async fn get(&self, id: i64) -> AppResult<User>;

    /// Overwrite names and email of an existing user.
    async fn update(&self, user: &User) -> AppResult<()>;

    async fn delete(&self, id: i64) -> AppResult<()>;

    async fn find_by_status(&self, status: &str) -> AppResult<Vec<User>>;

    /// Look up a user by email, password hash and status in one query.
    async fn find_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
        status: &str,
    ) -> AppResult<Option<User>>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn no_matching_row() -> AppError {
    AppError::not_found("No record matching given ID.")
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn save(&self, user: &User) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (first_name, last_name, email, date_created, status, password)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.date_created)
        .bind(&user.status)
        .bind(&user.password)
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_db_error(e, "Error when trying to save user."))
    }

    async fn get(&self, id: i64) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, first_name, last_name, email, date_created, status
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_db_error(e, "Error when trying to get user."))?;
        Ok(row.into())
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET first_name = $1, last_name = $2, email = $3
            WHERE id = $4
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(user.id)
        .execute(&self.db)
        .await
        .map_err(|e| map_db_error(e, "Error when trying to update user."))?;

        if result.rows_affected() == 0 {
            return Err(no_matching_row());
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| map_db_error(e, "Error when trying to delete user."))?;

        if result.rows_affected() == 0 {
            return Err(no_matching_row());
        }
        Ok(())
    }

    async fn find_by_status(&self, status: &str) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, first_name, last_name, email, date_created, status
            FROM users
            WHERE status = $1
            ORDER BY id
            "#,
        )
        .bind(status)
        .fetch_all(&self.db)
        .await
        .map_err(|e| map_db_error(e, "Error when trying to find users by status."))?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
        status: &str,
    ) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, first_name, last_name, email, date_created, status
            FROM users
            WHERE email = $1 AND password = $2 AND status = $3
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(status)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| map_db_error(e, "Error when trying to get user by e-mail and password."))?;
        Ok(row.map(User::from))
    }
}
