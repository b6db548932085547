//! Repository implementations
//!
//! Repositories speak in rows and plain SQL types; mapping to domain types
//! happens in the adapters. Queries are checked at runtime so the crate
//! builds without a live database.

pub mod claims;
pub mod users;

pub use claims::{ClaimsRepository, ClaimRow, ClaimFilter};
pub use users::UsersRepository;
