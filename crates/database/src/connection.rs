use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// The schema, embedded at compile time from `./migrations`.
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Establishes a connection pool to the SQLite database.
///
/// The database file is created if it does not exist yet, and foreign keys are
/// enforced on every pooled connection.
pub async fn connect(settings: &DatabaseSettings) -> Result<SqlitePool, DbError> {
    if settings.url.trim().is_empty() {
        return Err(DbError::ConnectionConfigError(
            "a database URL must be set.".to_string(),
        ));
    }

    let options = SqliteConnectOptions::from_str(&settings.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    tracing::debug!(url = %settings.url, "Database pool established.");
    Ok(pool)
}

/// Opens a private in-memory database.
///
/// Every SQLite in-memory connection is its own database, so the pool is pinned
/// to a single connection that is never recycled.
pub async fn connect_in_memory() -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Applies every pending migration, creating the three tables if needed.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("Database migrations applied.");
    Ok(())
}

/// Reverts every applied migration, dropping the three tables.
pub async fn revert_migrations(pool: &SqlitePool) -> Result<(), DbError> {
    MIGRATOR.undo(pool, 0).await?;
    tracing::info!("Database migrations reverted.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn table_names(pool: &SqlitePool) -> Vec<String> {
        sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE '\\_sqlx%' ESCAPE '\\' ORDER BY name",
        )
        .fetch_all(pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn migrations_create_and_drop_the_schema() {
        let pool = connect_in_memory().await.unwrap();

        run_migrations(&pool).await.unwrap();
        assert_eq!(table_names(&pool).await, vec!["hero_powers", "heroes", "powers"]);

        revert_migrations(&pool).await.unwrap();
        assert!(table_names(&pool).await.is_empty());
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = connect_in_memory().await.unwrap();
        run_migrations(&pool).await.unwrap();
        run_migrations(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn foreign_keys_follow_the_naming_convention() {
        let pool = connect_in_memory().await.unwrap();
        run_migrations(&pool).await.unwrap();

        let sql: String =
            sqlx::query_scalar("SELECT sql FROM sqlite_master WHERE name = 'hero_powers'")
                .fetch_one(&pool)
                .await
                .unwrap();

        assert!(sql.contains("fk_hero_powers_hero_id_heroes"));
        assert!(sql.contains("fk_hero_powers_power_id_powers"));
    }

    #[tokio::test]
    async fn connect_creates_a_missing_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.db");
        assert!(!path.exists());

        let settings = DatabaseSettings {
            url: format!("sqlite://{}", path.display()),
            max_connections: 1,
        };
        let pool = connect(&settings).await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool.close().await;

        assert!(path.exists());
    }

    #[tokio::test]
    async fn empty_url_is_a_config_error() {
        let settings = DatabaseSettings {
            url: "  ".into(),
            max_connections: 1,
        };
        assert!(matches!(
            connect(&settings).await,
            Err(DbError::ConnectionConfigError(_))
        ));
    }
}
