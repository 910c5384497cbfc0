//! # Superheroes Database Crate
//!
//! This crate is the application-specific interface to the SQLite database that
//! stores heroes, powers, and the hero powers linking them.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All SQL lives here. The rest of the application talks to a
//!   `DbRepository` and never sees a query string.
//! - **Validated Writes:** Power descriptions and hero power strengths are
//!   checked before every insert or update, no matter who the caller is. The
//!   schema repeats both checks as `CHECK` constraints.
//! - **Asynchronous & Pooled:** All operations are asynchronous over a
//!   `SqlitePool` that is built once at startup and handed to whoever needs it.
//!
//! ## Public API
//!
//! - `connect` / `connect_in_memory`: establish the connection pool.
//! - `run_migrations` / `revert_migrations`: create or drop the schema.
//! - `DbRepository`: the data access methods (e.g., `save_hero_power`).
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, connect_in_memory, revert_migrations, run_migrations};
pub use error::DbError;
pub use repository::DbRepository;
