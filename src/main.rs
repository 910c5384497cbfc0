use clap::{Parser, Subcommand};
use configuration::{ServerOverrides, Settings};
use database::{connect, revert_migrations, run_migrations, DbRepository};

mod seed;

/// The entry point for the superheroes API.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if there is one
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut settings = configuration::load_config()?;
    let _log_guard = configuration::init_tracing(&settings.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(overrides) => {
            settings.server.apply(&overrides);
            handle_serve(settings).await
        }
        Commands::Migrate { direction } => handle_migrate(settings, direction).await,
        Commands::Seed => handle_seed(settings).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A small relational API for heroes, powers, and the hero powers linking them.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bring the schema up to date and serve the HTTP API.
    Serve(ServerOverrides),
    /// Create or drop the heroes, powers, and hero_powers tables.
    Migrate {
        #[command(subcommand)]
        direction: Direction,
    },
    /// Insert a sample set of heroes, powers, and hero powers.
    Seed,
}

#[derive(Subcommand)]
enum Direction {
    /// Apply every pending migration.
    Up,
    /// Revert every applied migration.
    Down,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(settings: Settings) -> anyhow::Result<()> {
    web_server::run_server(&settings).await
}

async fn handle_migrate(settings: Settings, direction: Direction) -> anyhow::Result<()> {
    let db_pool = connect(&settings.database).await?;
    match direction {
        Direction::Up => run_migrations(&db_pool).await?,
        Direction::Down => revert_migrations(&db_pool).await?,
    }
    db_pool.close().await;
    Ok(())
}

async fn handle_seed(settings: Settings) -> anyhow::Result<()> {
    let db_pool = connect(&settings.database).await?;
    run_migrations(&db_pool).await?;

    let db_repo = DbRepository::new(db_pool);
    let summary = seed::seed(&db_repo).await?;
    tracing::info!(
        heroes = summary.heroes,
        powers = summary.powers,
        hero_powers = summary.hero_powers,
        "Seeding complete."
    );

    db_repo.pool().close().await;
    Ok(())
}
