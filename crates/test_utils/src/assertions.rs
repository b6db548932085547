//! Custom Test Assertions
//!
//! Assertion helpers for triage outcomes and review queues that report the
//! offending values instead of a bare `false`.

use domain_claims::{Claim, ClaimStatus, TriageOutcome, TriageWeights};

/// Asserts the score is the sum of its breakdown and within the maximum
pub fn assert_outcome_consistent(outcome: &TriageOutcome, weights: &TriageWeights) {
    assert_eq!(
        outcome.priority_score,
        outcome.breakdown.total(),
        "Score {} does not match breakdown {:?}",
        outcome.priority_score,
        outcome.breakdown
    );
    assert!(
        outcome.priority_score <= weights.max_score(),
        "Score {} exceeds maximum {}",
        outcome.priority_score,
        weights.max_score()
    );
}

/// Asserts the initial status follows evidence presence
pub fn assert_initial_status(status: ClaimStatus, has_evidence: bool) {
    let expected = if has_evidence {
        ClaimStatus::Validated
    } else {
        ClaimStatus::Pending
    };
    assert_eq!(
        status, expected,
        "Expected initial status {} (evidence: {}), got {}",
        expected, has_evidence, status
    );
}

/// Asserts claims are ordered by priority descending, newest first on ties
pub fn assert_review_ordered(claims: &[Claim]) {
    for pair in claims.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let ordered = a.priority_score > b.priority_score
            || (a.priority_score == b.priority_score && a.submitted_at >= b.submitted_at);
        assert!(
            ordered,
            "Claims out of review order: {} (score {}, {}) before {} (score {}, {})",
            a.id, a.priority_score, a.submitted_at, b.id, b.priority_score, b.submitted_at
        );
    }
}

/// Asserts a stored claim still carries the score it was created with
pub fn assert_score_unchanged(before: &Claim, after: &Claim) {
    assert_eq!(before.id, after.id, "Comparing different claims");
    assert_eq!(
        before.priority_score, after.priority_score,
        "Priority score of {} changed from {} to {}",
        before.id, before.priority_score, after.priority_score
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::StoredClaimBuilder;
    use crate::fixtures::TemporalFixtures;

    #[test]
    fn test_review_order_accepts_sorted() {
        let claims = vec![
            StoredClaimBuilder::new().priority(15).build(),
            StoredClaimBuilder::new()
                .priority(6)
                .submitted_at(TemporalFixtures::minutes_after_base(10))
                .build(),
            StoredClaimBuilder::new().priority(6).build(),
        ];
        assert_review_ordered(&claims);
    }

    #[test]
    #[should_panic(expected = "out of review order")]
    fn test_review_order_rejects_unsorted() {
        let claims = vec![
            StoredClaimBuilder::new().priority(4).build(),
            StoredClaimBuilder::new().priority(10).build(),
        ];
        assert_review_ordered(&claims);
    }
}
