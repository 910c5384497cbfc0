use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `heroes` table. Serializes to the basic hero record.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Hero {
    pub id: i64,
    pub name: Option<String>,
    pub super_name: Option<String>,
    #[serde(skip_serializing)]
    pub created_at: NaiveDateTime,
    #[serde(skip_serializing)]
    pub updated_at: Option<NaiveDateTime>,
}

/// A row from the `powers` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Power {
    pub id: i64,
    pub name: Option<String>,
    pub description: String,
    #[serde(skip_serializing)]
    pub created_at: NaiveDateTime,
    #[serde(skip_serializing)]
    pub updated_at: Option<NaiveDateTime>,
}

/// A row from the `hero_powers` table, the edge between one hero and one power.
///
/// Only the foreign keys are carried; the hero and power themselves are never
/// embedded, so a hero's expanded record cannot recurse back into itself.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct HeroPower {
    pub id: i64,
    pub strength: String,
    pub hero_id: i64,
    pub power_id: i64,
    #[serde(skip_serializing)]
    pub created_at: NaiveDateTime,
    #[serde(skip_serializing)]
    pub updated_at: Option<NaiveDateTime>,
}

/// The expanded hero record served by `GET /heroes/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroWithPowers {
    #[serde(flatten)]
    pub hero: Hero,
    pub hero_powers: Vec<HeroPower>,
}
