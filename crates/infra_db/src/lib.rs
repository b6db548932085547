//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for parking claims using SQLx: connection pool
//! setup, embedded migrations, row-level repositories and the adapters that
//! plug those repositories into the `domain_claims` ports.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresClaimStore};
//!
//! let pool = create_pool(DatabaseConfig::from_env()?).await?;
//! run_migrations(&pool).await?;
//! let store = PostgresClaimStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use adapters::{PostgresClaimStore, PostgresUserDirectory};
