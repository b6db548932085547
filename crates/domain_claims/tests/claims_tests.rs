//! Comprehensive tests for domain_claims

use proptest::prelude::*;

use core_kernel::{ParkingLotId, UserId};

use domain_claims::claim::{Claim, ClaimCategory, ClaimStatus, ClaimSubmission};
use domain_claims::moderation::ModerationDecision;
use domain_claims::queue::review_order;
use domain_claims::triage::{ClaimTriageEngine, TriageOutcome, TriageSignals};
use domain_claims::ClaimError;

fn signals(category: ClaimCategory) -> TriageSignals {
    TriageSignals {
        category,
        similar_active_claims: 0,
        lot_active_claims: 0,
        submitter_is_admin: false,
        has_evidence: false,
    }
}

fn evaluate(signals: &TriageSignals) -> TriageOutcome {
    ClaimTriageEngine::default().evaluate(signals)
}

// ============================================================================
// Triage Scoring Tests
// ============================================================================

mod triage_tests {
    use super::*;

    #[test]
    fn test_category_weights() {
        assert_eq!(evaluate(&signals(ClaimCategory::Security)).priority_score, 10);
        assert_eq!(evaluate(&signals(ClaimCategory::PaymentIssue)).priority_score, 8);
        assert_eq!(evaluate(&signals(ClaimCategory::SpotOccupied)).priority_score, 6);
        assert_eq!(evaluate(&signals(ClaimCategory::Other)).priority_score, 4);
    }

    #[test]
    fn test_security_plain_claim_is_pending() {
        let outcome = evaluate(&signals(ClaimCategory::Security));
        assert_eq!(outcome.priority_score, 10);
        assert_eq!(outcome.status, ClaimStatus::Pending);
    }

    #[test]
    fn test_other_with_evidence_is_validated() {
        let mut s = signals(ClaimCategory::Other);
        s.has_evidence = true;

        let outcome = evaluate(&s);
        assert_eq!(outcome.priority_score, 6);
        assert_eq!(outcome.status, ClaimStatus::Validated);
    }

    #[test]
    fn test_similar_claims_threshold_boundary() {
        let mut s = signals(ClaimCategory::Other);

        s.similar_active_claims = 2;
        assert_eq!(evaluate(&s).breakdown.similar_claims, 0);

        s.similar_active_claims = 3;
        assert_eq!(evaluate(&s).breakdown.similar_claims, 5);

        // Flat bonus, not per extra claim
        s.similar_active_claims = 9;
        assert_eq!(evaluate(&s).breakdown.similar_claims, 5);
        assert_eq!(evaluate(&s).priority_score, 9);
    }

    #[test]
    fn test_combined_maximum() {
        let s = TriageSignals {
            category: ClaimCategory::Security,
            similar_active_claims: 3,
            lot_active_claims: 3,
            submitter_is_admin: true,
            has_evidence: true,
        };

        let outcome = evaluate(&s);
        assert_eq!(outcome.priority_score, 23);
        assert_eq!(outcome.status, ClaimStatus::Validated);
    }

    #[test]
    fn test_unrecognized_category_scores_zero_but_keeps_bonuses() {
        let s = TriageSignals {
            category: ClaimCategory::from_label(""),
            similar_active_claims: 5,
            lot_active_claims: 3,
            submitter_is_admin: true,
            has_evidence: false,
        };

        let outcome = evaluate(&s);
        assert_eq!(outcome.breakdown.category, 0);
        assert_eq!(outcome.priority_score, 5 + 3 + 3);
        assert_eq!(outcome.status, ClaimStatus::Pending);
    }

    #[test]
    fn test_payment_issue_scenario() {
        let s = TriageSignals {
            category: ClaimCategory::from_label("Payment Issue"),
            similar_active_claims: 4,
            lot_active_claims: 1,
            submitter_is_admin: false,
            has_evidence: true,
        };

        let outcome = evaluate(&s);
        assert_eq!(outcome.priority_score, 8 + 5 + 2);
        assert_eq!(outcome.status, ClaimStatus::Validated);
    }

    #[test]
    fn test_evaluate_is_repeatable() {
        let engine = ClaimTriageEngine::default();
        let s = TriageSignals {
            category: ClaimCategory::SpotOccupied,
            similar_active_claims: 3,
            lot_active_claims: 7,
            submitter_is_admin: false,
            has_evidence: true,
        };

        assert_eq!(engine.evaluate(&s), engine.evaluate(&s));
    }
}

// ============================================================================
// Moderation Tests
// ============================================================================

mod moderation_tests {
    use super::*;

    fn create_test_claim(with_evidence: bool) -> Claim {
        let mut submission = ClaimSubmission::new(UserId::new_v7(), ParkingLotId::new_v7(), "Security");
        if with_evidence {
            submission = submission.with_evidence("photo.jpg");
        }
        let outcome = evaluate(&TriageSignals {
            has_evidence: submission.has_evidence(),
            ..signals(submission.category.clone())
        });
        Claim::from_submission(submission, &outcome)
    }

    #[test]
    fn test_claim_starts_with_triage_outcome() {
        let claim = create_test_claim(true);

        assert_eq!(claim.status, ClaimStatus::Validated);
        assert_eq!(claim.priority_score, 12);
        assert!(claim.operator_feedback.is_none());
        assert_eq!(claim.submitted_at, claim.updated_at);
    }

    #[test]
    fn test_pending_to_validated() {
        let mut claim = create_test_claim(false);
        assert!(claim.moderate(ModerationDecision::validate()).is_ok());
        assert_eq!(claim.status, ClaimStatus::Validated);
        assert_eq!(
            claim.status_notification().as_deref(),
            Some("Your claim is being processed.")
        );
    }

    #[test]
    fn test_validated_to_resolved_with_feedback() {
        let mut claim = create_test_claim(true);
        claim.moderate(ModerationDecision::resolve("Tow truck dispatched")).unwrap();

        assert_eq!(claim.status, ClaimStatus::Resolved);
        assert_eq!(
            claim.status_notification().as_deref(),
            Some("Your claim has been resolved. Feedback: Tow truck dispatched")
        );
    }

    #[test]
    fn test_rejection_without_feedback_says_na() {
        let mut claim = create_test_claim(false);
        claim
            .moderate(ModerationDecision { status: ClaimStatus::Rejected, feedback: None })
            .unwrap();

        assert_eq!(
            claim.status_notification().as_deref(),
            Some("Your claim has been rejected. Feedback: N/A")
        );
    }

    #[test]
    fn test_terminal_statuses_are_final() {
        let mut claim = create_test_claim(true);
        claim.moderate(ModerationDecision::reject("Duplicate")).unwrap();

        let result = claim.moderate(ModerationDecision::validate());
        assert!(matches!(result, Err(ClaimError::InvalidStatusTransition { .. })));
        assert_eq!(claim.status, ClaimStatus::Rejected);
    }

    #[test]
    fn test_validated_cannot_go_back_to_pending() {
        let mut claim = create_test_claim(true);
        assert!(!claim.can_transition_to(ClaimStatus::Pending));
    }

    #[test]
    fn test_moderation_never_rescores() {
        let mut claim = create_test_claim(false);
        let score = claim.priority_score;
        claim.moderate(ModerationDecision::validate()).unwrap();
        claim.moderate(ModerationDecision::resolve("done")).unwrap();
        assert_eq!(claim.priority_score, score);
    }

    #[test]
    fn test_pending_has_no_notification() {
        assert!(create_test_claim(false).status_notification().is_none());
    }
}

// ============================================================================
// Review Queue Tests
// ============================================================================

mod queue_tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn claim_with(score: u32, minutes_ago: i64) -> Claim {
        let submission = ClaimSubmission::new(UserId::new(), ParkingLotId::new(), "Other");
        let outcome = evaluate(&signals(ClaimCategory::Other));
        let mut claim = Claim::from_submission(submission, &outcome);
        claim.priority_score = score;
        claim.submitted_at = Utc::now() - Duration::minutes(minutes_ago);
        claim
    }

    #[test]
    fn test_review_order_priority_then_newest() {
        let old_high = claim_with(15, 60);
        let new_high = claim_with(15, 1);
        let low = claim_with(4, 0);

        let mut claims = vec![low.clone(), old_high.clone(), new_high.clone()];
        review_order(&mut claims);

        let ids: Vec<_> = claims.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![new_high.id, old_high.id, low.id]);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

fn category_strategy() -> impl Strategy<Value = ClaimCategory> {
    prop_oneof![
        Just(ClaimCategory::Security),
        Just(ClaimCategory::PaymentIssue),
        Just(ClaimCategory::SpotOccupied),
        Just(ClaimCategory::Other),
        "[a-z ]{0,12}".prop_map(|s| ClaimCategory::from_label(&s)),
    ]
}

prop_compose! {
    fn signals_strategy()(
        category in category_strategy(),
        similar_active_claims in 0u64..20,
        lot_active_claims in 0u64..20,
        submitter_is_admin in any::<bool>(),
        has_evidence in any::<bool>(),
    ) -> TriageSignals {
        TriageSignals { category, similar_active_claims, lot_active_claims, submitter_is_admin, has_evidence }
    }
}

proptest! {
    #[test]
    fn prop_score_within_bounds(s in signals_strategy()) {
        let outcome = evaluate(&s);
        prop_assert!(outcome.priority_score <= 23);
        prop_assert_eq!(outcome.priority_score, outcome.breakdown.total());
    }

    #[test]
    fn prop_status_follows_evidence(s in signals_strategy()) {
        let outcome = evaluate(&s);
        let expected = if s.has_evidence { ClaimStatus::Validated } else { ClaimStatus::Pending };
        prop_assert_eq!(outcome.status, expected);
    }

    #[test]
    fn prop_more_active_claims_never_lowers_score(s in signals_strategy(), extra in 0u64..10) {
        let mut busier = s.clone();
        busier.similar_active_claims += extra;
        busier.lot_active_claims += extra;
        prop_assert!(evaluate(&busier).priority_score >= evaluate(&s).priority_score);
    }
}
