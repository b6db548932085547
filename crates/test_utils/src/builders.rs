//! Test Data Builders
//!
//! Builders for submissions and for claims that are already stored. Tests
//! set only the fields they care about; everything else gets a sensible
//! default.

use chrono::{DateTime, Utc};
use core_kernel::{ClaimId, ParkingLotId, UserId};
use domain_claims::{Claim, ClaimCategory, ClaimStatus, ClaimSubmission};
use fake::faker::lorem::en::Sentence;
use fake::Fake;

use crate::fixtures::{IdFixtures, TemporalFixtures};

/// Builder for claim submissions
pub struct ClaimSubmissionBuilder {
    submitter_id: UserId,
    parking_lot_id: ParkingLotId,
    category: ClaimCategory,
    evidence_attachment: Option<String>,
    message: Option<String>,
}

impl Default for ClaimSubmissionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimSubmissionBuilder {
    pub fn new() -> Self {
        Self {
            submitter_id: IdFixtures::customer_id(),
            parking_lot_id: IdFixtures::downtown_lot(),
            category: ClaimCategory::SpotOccupied,
            evidence_attachment: None,
            message: Some(Sentence(3..8).fake()),
        }
    }

    pub fn submitter(mut self, id: UserId) -> Self {
        self.submitter_id = id;
        self
    }

    pub fn parking_lot(mut self, id: ParkingLotId) -> Self {
        self.parking_lot_id = id;
        self
    }

    pub fn category(mut self, category: impl Into<ClaimCategory>) -> Self {
        self.category = category.into();
        self
    }

    pub fn evidence(mut self, attachment: impl Into<String>) -> Self {
        self.evidence_attachment = Some(attachment.into());
        self
    }

    /// Sets the attachment as-is, including `None` or a blank reference
    pub fn attachment(mut self, attachment: Option<String>) -> Self {
        self.evidence_attachment = attachment;
        self
    }

    pub fn without_message(mut self) -> Self {
        self.message = None;
        self
    }

    pub fn build(self) -> ClaimSubmission {
        ClaimSubmission {
            submitter_id: self.submitter_id,
            parking_lot_id: self.parking_lot_id,
            category: self.category,
            evidence_attachment: self.evidence_attachment,
            message: self.message,
        }
    }
}

/// Builder for claims as they would sit in a store
///
/// Used to seed stores with history that triage will count.
pub struct StoredClaimBuilder {
    id: ClaimId,
    submitter_id: UserId,
    parking_lot_id: ParkingLotId,
    category: ClaimCategory,
    evidence_attachment: Option<String>,
    status: ClaimStatus,
    priority_score: u32,
    operator_feedback: Option<String>,
    submitted_at: DateTime<Utc>,
}

impl Default for StoredClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StoredClaimBuilder {
    pub fn new() -> Self {
        Self {
            id: ClaimId::new_v7(),
            submitter_id: IdFixtures::customer_id(),
            parking_lot_id: IdFixtures::downtown_lot(),
            category: ClaimCategory::SpotOccupied,
            evidence_attachment: None,
            status: ClaimStatus::Pending,
            priority_score: 6,
            operator_feedback: None,
            submitted_at: TemporalFixtures::base_time(),
        }
    }

    pub fn id(mut self, id: ClaimId) -> Self {
        self.id = id;
        self
    }

    pub fn submitter(mut self, id: UserId) -> Self {
        self.submitter_id = id;
        self
    }

    pub fn parking_lot(mut self, id: ParkingLotId) -> Self {
        self.parking_lot_id = id;
        self
    }

    pub fn category(mut self, category: impl Into<ClaimCategory>) -> Self {
        self.category = category.into();
        self
    }

    pub fn evidence(mut self, attachment: impl Into<String>) -> Self {
        self.evidence_attachment = Some(attachment.into());
        self
    }

    pub fn status(mut self, status: ClaimStatus) -> Self {
        self.status = status;
        self
    }

    pub fn priority(mut self, score: u32) -> Self {
        self.priority_score = score;
        self
    }

    pub fn feedback(mut self, feedback: impl Into<String>) -> Self {
        self.operator_feedback = Some(feedback.into());
        self
    }

    pub fn submitted_at(mut self, at: DateTime<Utc>) -> Self {
        self.submitted_at = at;
        self
    }

    pub fn build(self) -> Claim {
        Claim {
            id: self.id,
            submitter_id: self.submitter_id,
            parking_lot_id: self.parking_lot_id,
            category: self.category,
            evidence_attachment: self.evidence_attachment,
            message: None,
            status: self.status,
            priority_score: self.priority_score,
            operator_feedback: self.operator_feedback,
            submitted_at: self.submitted_at,
            updated_at: self.submitted_at,
        }
    }

    /// `count` claims sharing this builder's fields, each with a fresh id
    pub fn build_many(self, count: usize) -> Vec<Claim> {
        let template = self.build();
        (0..count)
            .map(|_| Claim {
                id: ClaimId::new_v7(),
                ..template.clone()
            })
            .collect()
    }
}
