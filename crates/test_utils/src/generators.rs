//! Property-Based Test Generators
//!
//! Proptest strategies for triage inputs and stored claims.

use chrono::{Duration, TimeZone, Utc};
use core_kernel::{ClaimId, ParkingLotId, UserId};
use domain_claims::{Claim, ClaimCategory, ClaimStatus, TriageSignals};
use proptest::prelude::*;
use uuid::Uuid;

/// Any of the four recognized categories
pub fn recognized_category_strategy() -> impl Strategy<Value = ClaimCategory> {
    prop_oneof![
        Just(ClaimCategory::Security),
        Just(ClaimCategory::PaymentIssue),
        Just(ClaimCategory::SpotOccupied),
        Just(ClaimCategory::Other),
    ]
}

/// Recognized categories plus arbitrary unrecognized labels
pub fn category_strategy() -> impl Strategy<Value = ClaimCategory> {
    prop_oneof![
        4 => recognized_category_strategy(),
        1 => "[a-z]{3,12}( [a-z]{3,12})?".prop_map(ClaimCategory::from),
    ]
}

pub fn status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Validated),
        Just(ClaimStatus::Pending),
        Just(ClaimStatus::Resolved),
        Just(ClaimStatus::Rejected),
    ]
}

/// Attachment references, blank ones included
pub fn evidence_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        Just(Some("   ".to_string())),
        "[a-z0-9_-]{1,16}\\.(jpg|png|pdf)".prop_map(Some),
    ]
}

pub fn triage_signals_strategy() -> impl Strategy<Value = TriageSignals> {
    (category_strategy(), 0u64..50, 0u64..50, any::<bool>(), any::<bool>()).prop_map(
        |(category, similar_active_claims, lot_active_claims, submitter_is_admin, has_evidence)| {
            TriageSignals {
                category,
                similar_active_claims,
                lot_active_claims,
                submitter_is_admin,
                has_evidence,
            }
        },
    )
}

fn uuid_strategy() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

/// Stored claims with arbitrary status, score and submission time
pub fn claim_strategy() -> impl Strategy<Value = Claim> {
    (
        uuid_strategy(),
        uuid_strategy(),
        uuid_strategy(),
        category_strategy(),
        status_strategy(),
        0u32..=23,
        0i64..10_000,
    )
        .prop_map(|(id, submitter, lot, category, status, priority_score, minutes)| {
            let base = Utc
                .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
                .single()
                .unwrap_or_else(Utc::now);
            let submitted_at = base + Duration::minutes(minutes);

            Claim {
                id: ClaimId::from_uuid(id),
                submitter_id: UserId::from_uuid(submitter),
                parking_lot_id: ParkingLotId::from_uuid(lot),
                category,
                evidence_attachment: None,
                message: None,
                status,
                priority_score,
                operator_feedback: None,
                submitted_at,
                updated_at: submitted_at,
            }
        })
}
