//! Pre-built Test Fixtures
//!
//! Fixed identifiers and ready-made submissions so tests read as scenarios
//! rather than setup.

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::{ClaimId, ParkingLotId, UserId};
use domain_claims::{ClaimCategory, ClaimSubmission, UserRole};
use uuid::Uuid;

/// Deterministic identifiers
pub struct IdFixtures;

impl IdFixtures {
    pub fn admin_id() -> UserId {
        UserId::from_uuid(Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_00a1))
    }

    pub fn customer_id() -> UserId {
        UserId::from_uuid(Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_00c1))
    }

    pub fn provider_id() -> UserId {
        UserId::from_uuid(Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_00b1))
    }

    /// A user that no directory knows about
    pub fn unknown_user_id() -> UserId {
        UserId::from_uuid(Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0ff1))
    }

    pub fn downtown_lot() -> ParkingLotId {
        ParkingLotId::from_uuid(Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_1001))
    }

    pub fn airport_lot() -> ParkingLotId {
        ParkingLotId::from_uuid(Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_1002))
    }

    pub fn claim_id() -> ClaimId {
        ClaimId::new_v7()
    }

    /// The seeded users and their roles
    pub fn directory_roles() -> Vec<(UserId, UserRole)> {
        vec![
            (Self::admin_id(), UserRole::Admin),
            (Self::customer_id(), UserRole::Customer),
            (Self::provider_id(), UserRole::Provider),
        ]
    }
}

/// Fixed points in time
pub struct TemporalFixtures;

impl TemporalFixtures {
    pub fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }

    /// `base_time` shifted by whole minutes
    pub fn minutes_after_base(minutes: i64) -> DateTime<Utc> {
        Self::base_time() + chrono::Duration::minutes(minutes)
    }
}

/// Ready-made submissions
pub struct SubmissionFixtures;

impl SubmissionFixtures {
    /// A customer reporting a payment problem with a receipt photo
    pub fn payment_issue_with_receipt() -> ClaimSubmission {
        ClaimSubmission::new(
            IdFixtures::customer_id(),
            IdFixtures::downtown_lot(),
            ClaimCategory::PaymentIssue,
        )
        .with_evidence("uploads/receipt-0042.jpg")
        .with_message("The terminal charged me twice")
    }

    /// An admin reporting a security incident with camera footage
    pub fn admin_security_report() -> ClaimSubmission {
        ClaimSubmission::new(
            IdFixtures::admin_id(),
            IdFixtures::airport_lot(),
            ClaimCategory::Security,
        )
        .with_evidence("uploads/cctv-gate-3.mp4")
    }

    /// A spot complaint with nothing attached
    pub fn spot_occupied_without_evidence() -> ClaimSubmission {
        ClaimSubmission::new(
            IdFixtures::customer_id(),
            IdFixtures::downtown_lot(),
            ClaimCategory::SpotOccupied,
        )
    }

    /// A submission whose category label the system does not recognize
    pub fn unrecognized_category() -> ClaimSubmission {
        ClaimSubmission::new(
            IdFixtures::customer_id(),
            IdFixtures::downtown_lot(),
            "Lost ticket",
        )
    }
}
