//! Review ordering for claim listings

use std::cmp::Ordering;

use crate::claim::Claim;

/// Orders claims the way operators review them: highest priority first,
/// newest first among equal scores.
pub fn review_order(claims: &mut [Claim]) {
    claims.sort_by(compare_for_review);
}

pub fn compare_for_review(a: &Claim, b: &Claim) -> Ordering {
    b.priority_score
        .cmp(&a.priority_score)
        .then_with(|| b.submitted_at.cmp(&a.submitted_at))
}

/// Newest first, regardless of priority
pub fn recency_order(claims: &mut [Claim]) {
    claims.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::{ClaimStatus, ClaimSubmission};
    use crate::triage::{ScoreBreakdown, TriageOutcome};
    use chrono::Duration;
    use core_kernel::{ParkingLotId, UserId};

    fn claim(score: u32, minutes_ago: i64) -> Claim {
        let outcome = TriageOutcome {
            priority_score: score,
            status: ClaimStatus::Pending,
            breakdown: ScoreBreakdown::default(),
        };
        let mut claim = Claim::from_submission(
            ClaimSubmission::new(UserId::new(), ParkingLotId::new(), "Other"),
            &outcome,
        );
        claim.submitted_at -= Duration::minutes(minutes_ago);
        claim
    }

    #[test]
    fn test_recency_ignores_priority() {
        let mut claims = vec![claim(20, 30), claim(0, 1), claim(10, 10)];
        recency_order(&mut claims);

        let scores: Vec<u32> = claims.iter().map(|c| c.priority_score).collect();
        assert_eq!(scores, vec![0, 10, 20]);
    }
}
