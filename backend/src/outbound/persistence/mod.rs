//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Provides the concrete `JourneyRepository` backed by PostgreSQL via
//! `diesel-async` and a `bb8` pool.
//!
//! - **Thin adapter**: the repository only translates between rows and domain
//!   types. Reconciliation lives in the domain.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: every database failure becomes a
//!   `JourneyRepositoryError`.
//!
//! # Example
//!
//! ```ignore
//! use weight_journey::outbound::persistence::{DbPool, DieselJourneyRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/journey")).await?;
//! let repo = DieselJourneyRepository::new(pool);
//! ```

mod diesel_journey_repository;
mod journey_error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_journey_repository::DieselJourneyRepository;
pub use migrations::{
    MIGRATIONS, MigrationError, run_pending_migrations, run_pending_migrations_blocking,
};
pub use pool::{DbPool, PoolConfig, PoolError};
