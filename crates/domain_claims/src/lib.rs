//! Parking Claims Domain
//!
//! Claims raised by customers against a parking lot (spot occupied, payment
//! issue, security, other), from submission through triage to moderation.
//!
//! # Claim Lifecycle
//!
//! ```text
//! submit -> triage (score + initial status) -> stored
//!        -> Pending | Validated -> Resolved | Rejected
//! ```
//!
//! Triage runs exactly once, inside [`ClaimSubmissionService::submit`], before
//! the claim is first stored. See [`triage`] for the scoring rule.

pub mod claim;
pub mod role;
pub mod triage;
pub mod ports;
pub mod submission;
pub mod moderation;
pub mod queue;
pub mod config;
pub mod error;

pub use claim::{Claim, ClaimCategory, ClaimStatus, ClaimSubmission, UnknownStatus};
pub use role::UserRole;
pub use triage::{ClaimTriageEngine, TriageWeights, TriageSignals, TriageOutcome, ScoreBreakdown};
pub use ports::{ClaimStore, UserDirectory, ClaimQuery, ListingOrder};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{InMemoryClaimStore, InMemoryUserDirectory};
pub use submission::ClaimSubmissionService;
pub use moderation::ModerationDecision;
pub use queue::{review_order, recency_order};
pub use config::TriageSettings;
pub use error::ClaimError;
