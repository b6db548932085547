//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! parking claims test suite.
//!
//! # Modules
//!
//! - `fixtures`: Fixed identifiers and ready-made submissions
//! - `builders`: Builders for submissions and already-stored claims
//! - `database`: PostgreSQL testcontainer management
//! - `assertions`: Assertion helpers for triage outcomes and review queues
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Installs a test-writer tracing subscriber once per test binary
///
/// Honors `RUST_LOG`, defaulting to `debug` for the claims crates.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("domain_claims=debug,infra_db=debug"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}
