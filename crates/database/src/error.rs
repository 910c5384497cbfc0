use core_types::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid database connection settings: {0}")]
    ConnectionConfigError(String),

    #[error("Database query failed: {0}")]
    QueryError(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    /// A write was refused before reaching the database.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("The requested data was not found in the database.")]
    NotFound,
}
