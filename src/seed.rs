//! Sample data for a fresh database.
//!
//! Everything goes through `DbRepository`, so descriptions and strengths are
//! validated exactly as they are for API writes.

use core_types::Strength;
use database::{DbError, DbRepository};

const HEROES: &[(&str, &str)] = &[
    ("Kamala Khan", "Ms. Marvel"),
    ("Doreen Green", "Squirrel Girl"),
    ("Gwen Stacy", "Spider-Gwen"),
    ("Janet Van Dyne", "The Wasp"),
    ("Wanda Maximoff", "Scarlet Witch"),
    ("Carol Danvers", "Captain Marvel"),
    ("Jean Grey", "Dark Phoenix"),
    ("Ororo Munroe", "Storm"),
    ("Kitty Pryde", "Shadowcat"),
    ("Elektra Natchios", "Elektra"),
];

const POWERS: &[(&str, &str)] = &[
    ("super strength", "gives the wielder super-human strengths"),
    ("flight", "gives the wielder the ability to fly through the skies at supersonic speed"),
    ("super human senses", "allows the wielder to use her senses at a super-human level"),
    ("elasticity", "can stretch the human body to extreme lengths"),
];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub heroes: usize,
    pub powers: usize,
    pub hero_powers: usize,
}

/// Inserts every sample hero and power, then gives each hero one power.
///
/// Powers are handed out round-robin and strengths cycle through every variant.
pub async fn seed(db_repo: &DbRepository) -> Result<SeedSummary, DbError> {
    let mut summary = SeedSummary::default();

    let mut heroes = Vec::with_capacity(HEROES.len());
    for &(name, super_name) in HEROES {
        heroes.push(db_repo.save_hero(Some(name), Some(super_name)).await?);
        summary.heroes += 1;
    }

    let mut powers = Vec::with_capacity(POWERS.len());
    for &(name, description) in POWERS {
        powers.push(db_repo.save_power(Some(name), Some(description)).await?);
        summary.powers += 1;
    }

    for (i, hero) in heroes.iter().enumerate() {
        let power = &powers[i % powers.len()];
        let strength = Strength::ALL[i % Strength::ALL.len()];
        db_repo
            .save_hero_power(hero.id, power.id, strength.as_str())
            .await?;
        summary.hero_powers += 1;
    }

    tracing::debug!(?summary, "Sample data inserted.");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeds_every_hero_with_one_power() {
        let pool = database::connect_in_memory().await.unwrap();
        database::run_migrations(&pool).await.unwrap();
        let db_repo = DbRepository::new(pool);

        let summary = seed(&db_repo).await.unwrap();

        assert_eq!(
            summary,
            SeedSummary {
                heroes: HEROES.len(),
                powers: POWERS.len(),
                hero_powers: HEROES.len(),
            }
        );
        for hero in db_repo.get_all_heroes().await.unwrap() {
            assert_eq!(db_repo.hero_powers_for_hero(hero.id).await.unwrap().len(), 1);
        }
    }
}
