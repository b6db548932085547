//! Operator moderation of submitted claims
//!
//! After triage, operators move claims along:
//!
//! ```text
//! Pending ──► Validated ──► Resolved | Rejected
//!    └────────────────────► Resolved | Rejected
//! ```
//!
//! Moderation never touches the priority score.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::claim::{Claim, ClaimStatus};
use crate::error::ClaimError;

/// An operator's decision on a claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationDecision {
    pub status: ClaimStatus,
    pub feedback: Option<String>,
}

impl ModerationDecision {
    pub fn validate() -> Self {
        Self { status: ClaimStatus::Validated, feedback: None }
    }

    pub fn resolve(feedback: impl Into<String>) -> Self {
        Self { status: ClaimStatus::Resolved, feedback: Some(feedback.into()) }
    }

    pub fn reject(feedback: impl Into<String>) -> Self {
        Self { status: ClaimStatus::Rejected, feedback: Some(feedback.into()) }
    }
}

impl Claim {
    /// Applies an operator decision
    ///
    /// Blank feedback leaves any earlier feedback in place.
    pub fn moderate(&mut self, decision: ModerationDecision) -> Result<(), ClaimError> {
        if !self.can_transition_to(decision.status) {
            return Err(ClaimError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: decision.status.to_string(),
            });
        }

        self.status = decision.status;
        if let Some(feedback) = decision.feedback.filter(|f| !f.trim().is_empty()) {
            self.operator_feedback = Some(feedback);
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Checks if transition is valid
    pub fn can_transition_to(&self, target: ClaimStatus) -> bool {
        use ClaimStatus::*;
        if self.status.is_terminal() {
            return false;
        }
        matches!(
            (self.status, target),
            (Pending, Validated) |
            (Pending, Resolved) |
            (Pending, Rejected) |
            (Validated, Resolved) |
            (Validated, Rejected)
        )
    }

    /// Message sent to the submitter for the claim's current status
    pub fn status_notification(&self) -> Option<String> {
        let feedback = self.operator_feedback.as_deref().unwrap_or("N/A");
        match self.status {
            ClaimStatus::Resolved => Some(format!("Your claim has been resolved. Feedback: {}", feedback)),
            ClaimStatus::Rejected => Some(format!("Your claim has been rejected. Feedback: {}", feedback)),
            ClaimStatus::Validated => Some("Your claim is being processed.".to_string()),
            ClaimStatus::Pending => None,
        }
    }
}
