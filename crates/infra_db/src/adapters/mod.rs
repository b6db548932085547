//! Domain Adapters
//!
//! Implementations of the `domain_claims` ports backed by PostgreSQL. Each
//! adapter delegates SQL to the repository layer and translates rows into
//! domain types.
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresClaimStore;
//! use domain_claims::ClaimStore;
//!
//! let store = PostgresClaimStore::new(pool);
//! let claim = store.get_claim(claim_id).await?;
//! ```

pub mod claims;

pub use claims::{PostgresClaimStore, PostgresUserDirectory};
