//! Claim aggregate

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, ParkingLotId, UserId};
use crate::triage::TriageOutcome;

/// Claim status
///
/// Serializes with the same lowercase labels used for storage and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    /// Accepted for handling; evidence was supplied at submission
    #[serde(alias = "Valid", alias = "Validated")]
    Validated,
    /// Waiting for an operator to look at it
    #[serde(alias = "Pending")]
    Pending,
    #[serde(alias = "Resolved")]
    Resolved,
    #[serde(alias = "Rejected")]
    Rejected,
}

impl ClaimStatus {
    /// Storage label, lowercase
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Validated => "validated",
            ClaimStatus::Pending => "pending",
            ClaimStatus::Resolved => "resolved",
            ClaimStatus::Rejected => "rejected",
        }
    }

    /// Returns true once moderation has closed the claim
    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimStatus::Resolved | ClaimStatus::Rejected)
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status label matches none of the known statuses
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown claim status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ClaimStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "validated" | "valid" | "validée" => Ok(ClaimStatus::Validated),
            "pending" => Ok(ClaimStatus::Pending),
            "resolved" | "résolue" => Ok(ClaimStatus::Resolved),
            "rejected" | "refusée" => Ok(ClaimStatus::Rejected),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// What the claim is about
///
/// Labels outside the closed set are kept verbatim in `Unrecognized` rather
/// than refused, so they can still be counted and scored (at zero).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClaimCategory {
    SpotOccupied,
    PaymentIssue,
    Security,
    Other,
    Unrecognized(String),
}

impl ClaimCategory {
    /// Parses a submitted label. English, French and variant-name spellings
    /// all map onto the same category.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Spot Occupied" | "SpotOccupied" | "Place Occupée" => ClaimCategory::SpotOccupied,
            "Payment Issue" | "PaymentIssue" | "Problème Paiement" => ClaimCategory::PaymentIssue,
            "Security" | "Sécurité" => ClaimCategory::Security,
            "Other" | "Autre" => ClaimCategory::Other,
            other => ClaimCategory::Unrecognized(other.to_string()),
        }
    }

    /// Canonical label, used for storage and for the similar-claims count
    pub fn label(&self) -> &str {
        match self {
            ClaimCategory::SpotOccupied => "Spot Occupied",
            ClaimCategory::PaymentIssue => "Payment Issue",
            ClaimCategory::Security => "Security",
            ClaimCategory::Other => "Other",
            ClaimCategory::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, ClaimCategory::Unrecognized(_))
    }
}

impl From<String> for ClaimCategory {
    fn from(label: String) -> Self {
        ClaimCategory::from_label(&label)
    }
}

impl From<&str> for ClaimCategory {
    fn from(label: &str) -> Self {
        ClaimCategory::from_label(label)
    }
}

impl From<ClaimCategory> for String {
    fn from(category: ClaimCategory) -> String {
        match category {
            ClaimCategory::Unrecognized(raw) => raw,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for ClaimCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A claim as handed over by the submission workflow, before it is scored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSubmission {
    pub submitter_id: UserId,
    pub parking_lot_id: ParkingLotId,
    pub category: ClaimCategory,
    /// Reference to an uploaded file; only presence matters
    pub evidence_attachment: Option<String>,
    pub message: Option<String>,
}

impl ClaimSubmission {
    pub fn new(
        submitter_id: UserId,
        parking_lot_id: ParkingLotId,
        category: impl Into<ClaimCategory>,
    ) -> Self {
        Self {
            submitter_id,
            parking_lot_id,
            category: category.into(),
            evidence_attachment: None,
            message: None,
        }
    }

    pub fn with_evidence(mut self, attachment: impl Into<String>) -> Self {
        self.evidence_attachment = Some(attachment.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Any non-blank attachment reference counts as evidence. Its content is
    /// never inspected.
    pub fn has_evidence(&self) -> bool {
        attachment_present(self.evidence_attachment.as_deref())
    }
}

/// A parking claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub submitter_id: UserId,
    pub parking_lot_id: ParkingLotId,
    pub category: ClaimCategory,
    pub evidence_attachment: Option<String>,
    pub message: Option<String>,
    pub status: ClaimStatus,
    /// Computed once at creation, never recomputed
    pub priority_score: u32,
    /// Set by moderation
    pub operator_feedback: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Claim {
    /// Creates a claim from a scored submission
    ///
    /// The priority score and the initial status come from the triage outcome
    /// and are fixed from here on.
    pub fn from_submission(submission: ClaimSubmission, outcome: &TriageOutcome) -> Self {
        let now = Utc::now();

        Self {
            id: ClaimId::new_v7(),
            submitter_id: submission.submitter_id,
            parking_lot_id: submission.parking_lot_id,
            category: submission.category,
            evidence_attachment: submission.evidence_attachment,
            message: submission.message,
            status: outcome.status,
            priority_score: outcome.priority_score,
            operator_feedback: None,
            submitted_at: now,
            updated_at: now,
        }
    }

    pub fn has_evidence(&self) -> bool {
        attachment_present(self.evidence_attachment.as_deref())
    }
}

fn attachment_present(attachment: Option<&str>) -> bool {
    attachment.is_some_and(|a| !a.trim().is_empty())
}
