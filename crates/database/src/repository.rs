use crate::DbError;
use core_types::{
    validate_description, validate_strength, Hero, HeroPower, HeroWithPowers, Power,
};
use sqlx::sqlite::SqlitePool;

const HERO_COLUMNS: &str = "id, name, super_name, created_at, updated_at";
const POWER_COLUMNS: &str = "id, name, description, created_at, updated_at";
const HERO_POWER_COLUMNS: &str = "id, strength, hero_id, power_id, created_at, updated_at";

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
///
/// Every write of a power description or hero power strength is validated
/// here, independently of whatever the caller already checked.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: SqlitePool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // ==========================================================================
    // Heroes
    // ==========================================================================

    /// Fetches every hero, in id order.
    pub async fn get_all_heroes(&self) -> Result<Vec<Hero>, DbError> {
        let heroes = sqlx::query_as::<_, Hero>(&format!(
            "SELECT {HERO_COLUMNS} FROM heroes ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(heroes)
    }

    pub async fn find_hero(&self, hero_id: i64) -> Result<Option<Hero>, DbError> {
        let hero = sqlx::query_as::<_, Hero>(&format!(
            "SELECT {HERO_COLUMNS} FROM heroes WHERE id = ?"
        ))
        .bind(hero_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(hero)
    }

    /// Fetches a hero together with every hero power that references it.
    pub async fn get_hero_with_powers(&self, hero_id: i64) -> Result<HeroWithPowers, DbError> {
        let hero = sqlx::query_as::<_, Hero>(&format!(
            "SELECT {HERO_COLUMNS} FROM heroes WHERE id = ?"
        ))
        .bind(hero_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| if let sqlx::Error::RowNotFound = e { DbError::NotFound } else { e.into() })?;

        let hero_powers = self.hero_powers_for_hero(hero.id).await?;

        Ok(HeroWithPowers { hero, hero_powers })
    }

    /// Inserts a hero. Heroes are only created by direct inserts, never over HTTP.
    pub async fn save_hero(
        &self,
        name: Option<&str>,
        super_name: Option<&str>,
    ) -> Result<Hero, DbError> {
        let hero = sqlx::query_as::<_, Hero>(&format!(
            "INSERT INTO heroes (name, super_name) VALUES (?, ?) RETURNING {HERO_COLUMNS}"
        ))
        .bind(name)
        .bind(super_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(hero)
    }

    // ==========================================================================
    // Powers
    // ==========================================================================

    /// Fetches every power, in id order.
    pub async fn get_all_powers(&self) -> Result<Vec<Power>, DbError> {
        let powers = sqlx::query_as::<_, Power>(&format!(
            "SELECT {POWER_COLUMNS} FROM powers ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(powers)
    }

    pub async fn find_power(&self, power_id: i64) -> Result<Option<Power>, DbError> {
        let power = sqlx::query_as::<_, Power>(&format!(
            "SELECT {POWER_COLUMNS} FROM powers WHERE id = ?"
        ))
        .bind(power_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(power)
    }

    /// Inserts a power after checking its description.
    pub async fn save_power(
        &self,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Power, DbError> {
        let description = validate_description(description)?;

        let power = sqlx::query_as::<_, Power>(&format!(
            "INSERT INTO powers (name, description) VALUES (?, ?) RETURNING {POWER_COLUMNS}"
        ))
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        Ok(power)
    }

    /// Replaces a power's description and stamps `updated_at`.
    ///
    /// An invalid description is refused before the statement is issued, so the
    /// stored value is left untouched.
    pub async fn update_power_description(
        &self,
        power_id: i64,
        description: &str,
    ) -> Result<Power, DbError> {
        let description = validate_description(Some(description))?;

        let power = sqlx::query_as::<_, Power>(&format!(
            r#"
            UPDATE powers
            SET description = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            RETURNING {POWER_COLUMNS}
            "#
        ))
        .bind(description)
        .bind(power_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(power)
    }

    // ==========================================================================
    // Hero powers
    // ==========================================================================

    pub async fn find_hero_power(&self, hero_power_id: i64) -> Result<Option<HeroPower>, DbError> {
        let hero_power = sqlx::query_as::<_, HeroPower>(&format!(
            "SELECT {HERO_POWER_COLUMNS} FROM hero_powers WHERE id = ?"
        ))
        .bind(hero_power_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(hero_power)
    }

    /// Fetches all hero powers held by a specific hero.
    pub async fn hero_powers_for_hero(&self, hero_id: i64) -> Result<Vec<HeroPower>, DbError> {
        let hero_powers = sqlx::query_as::<_, HeroPower>(&format!(
            "SELECT {HERO_POWER_COLUMNS} FROM hero_powers WHERE hero_id = ? ORDER BY id ASC"
        ))
        .bind(hero_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(hero_powers)
    }

    /// Fetches all hero powers that grant a specific power.
    pub async fn hero_powers_for_power(&self, power_id: i64) -> Result<Vec<HeroPower>, DbError> {
        let hero_powers = sqlx::query_as::<_, HeroPower>(&format!(
            "SELECT {HERO_POWER_COLUMNS} FROM hero_powers WHERE power_id = ? ORDER BY id ASC"
        ))
        .bind(power_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(hero_powers)
    }

    /// Links a hero to a power after checking the strength.
    ///
    /// The referenced rows are not looked up here; a dangling id is refused by
    /// the foreign key constraint and surfaces as a database error.
    pub async fn save_hero_power(
        &self,
        hero_id: i64,
        power_id: i64,
        strength: &str,
    ) -> Result<HeroPower, DbError> {
        let strength = validate_strength(strength)?;

        let hero_power = sqlx::query_as::<_, HeroPower>(&format!(
            "INSERT INTO hero_powers (strength, hero_id, power_id) VALUES (?, ?, ?) RETURNING {HERO_POWER_COLUMNS}"
        ))
        .bind(strength.as_str())
        .bind(hero_id)
        .bind(power_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(hero_power)
    }
}
