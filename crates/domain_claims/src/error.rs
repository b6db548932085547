//! Claims domain errors

use thiserror::Error;

use core_kernel::{CoreError, PortError};

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim not found: {0}")]
    ClaimNotFound(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    /// A collaborator failed; nothing was persisted
    #[error("Port error: {0}")]
    Port(#[from] PortError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ClaimError {
    /// Returns true if retrying the same call may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, ClaimError::Port(e) if e.is_transient())
    }
}
