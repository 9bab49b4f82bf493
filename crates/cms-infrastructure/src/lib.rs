//! # CMS Infrastructure
//! 
//! PostgreSQL adapters for the cms-core repository ports.

pub mod database;

pub use database::{create_pool, run_migrations, PgActorRepository, PgGrantRepository, PgMenuRepository};
