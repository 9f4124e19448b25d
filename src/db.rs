use anyhow::Context;
use sqlx::{error::ErrorKind, postgres::PgPoolOptions, PgPool};
use tracing::error;

use crate::{config::AppConfig, error::AppError};

pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("connect to database")
}

/// Translates a driver error into the API taxonomy.
///
/// Repositories call this on every failed statement, so nothing above the
/// storage layer ever sees a `sqlx::Error`. `context` becomes the client
/// message for failures that are neither a duplicate key nor a missing row.
pub fn map_db_error(err: sqlx::Error, context: &str) -> AppError {
    match err {
        sqlx::Error::Database(db) if matches!(db.kind(), ErrorKind::UniqueViolation) => {
            AppError::bad_request("Invalid data.")
        }
        sqlx::Error::RowNotFound => AppError::not_found("No record matching given ID."),
        other => {
            error!(error = %other, "{}", context);
            AppError::internal(context, other)
        }
    }
}
