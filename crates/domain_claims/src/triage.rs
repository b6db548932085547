//! Claim triage and priority scoring
//!
//! A new claim gets a priority score from five signals, added up in a fixed
//! order:
//!
//! ```text
//! category weight           Security 10 | Payment Issue 8 | Spot Occupied 6 | Other 4 | unknown 0
//! + similar active claims   +5 once the same category has >= 3 active claims
//! + lot active claims       +3 once the same parking lot has >= 3 active claims
//! + submitter role          +3 for admins
//! + evidence                +2, and the claim starts Validated instead of Pending
//! ```
//!
//! Frequency bonuses are flat: reaching the threshold grants the bonus once,
//! extra claims above it add nothing. With the default weights the score
//! ranges from 0 to 23.
//!
//! [`ClaimTriageEngine::evaluate`] is the pure rule over already-gathered
//! [`TriageSignals`]. [`ClaimTriageEngine::score`] gathers those signals from
//! the [`ClaimStore`] and [`UserDirectory`] ports first. Port failures are
//! returned untouched; degraded inputs (unknown category, unknown user) only
//! ever cost points.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use core_kernel::PortError;

use crate::claim::{ClaimCategory, ClaimStatus, ClaimSubmission};
use crate::config::TriageSettings;
use crate::ports::{ClaimStore, UserDirectory};

/// Points and thresholds used by the scoring rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageWeights {
    pub security: u32,
    pub payment_issue: u32,
    pub spot_occupied: u32,
    pub other: u32,
    /// Active claims of the same category needed for the similar-claims bonus
    pub similar_claims_threshold: u64,
    pub similar_claims_bonus: u32,
    /// Active claims on the same lot needed for the lot bonus
    pub lot_claims_threshold: u64,
    pub lot_claims_bonus: u32,
    pub admin_bonus: u32,
    pub evidence_bonus: u32,
}

impl Default for TriageWeights {
    fn default() -> Self {
        Self {
            security: 10,
            payment_issue: 8,
            spot_occupied: 6,
            other: 4,
            similar_claims_threshold: 3,
            similar_claims_bonus: 5,
            lot_claims_threshold: 3,
            lot_claims_bonus: 3,
            admin_bonus: 3,
            evidence_bonus: 2,
        }
    }
}

impl TriageWeights {
    pub fn category_weight(&self, category: &ClaimCategory) -> u32 {
        match category {
            ClaimCategory::Security => self.security,
            ClaimCategory::PaymentIssue => self.payment_issue,
            ClaimCategory::SpotOccupied => self.spot_occupied,
            ClaimCategory::Other => self.other,
            ClaimCategory::Unrecognized(_) => 0,
        }
    }

    /// Highest reachable score: top category plus every bonus. Saturates at
    /// `u32::MAX`; see [`checked_max_score`](Self::checked_max_score).
    pub fn max_score(&self) -> u32 {
        self.checked_max_score().unwrap_or(u32::MAX)
    }

    /// Highest reachable score, or `None` if the weights overflow `u32`
    pub fn checked_max_score(&self) -> Option<u32> {
        let top_category = [self.security, self.payment_issue, self.spot_occupied, self.other]
            .into_iter()
            .max()
            .unwrap_or(0);

        [
            self.similar_claims_bonus,
            self.lot_claims_bonus,
            self.admin_bonus,
            self.evidence_bonus,
        ]
        .into_iter()
        .try_fold(top_category, u32::checked_add)
    }
}

/// Inputs to the scoring rule, gathered at submission time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageSignals {
    pub category: ClaimCategory,
    /// Active claims already filed with the same category
    pub similar_active_claims: u64,
    /// Active claims already filed against the same parking lot
    pub lot_active_claims: u64,
    /// False when the submitter could not be found
    pub submitter_is_admin: bool,
    pub has_evidence: bool,
}

/// Points contributed by each scoring step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub category: u32,
    pub similar_claims: u32,
    pub lot_claims: u32,
    pub submitter_role: u32,
    pub evidence: u32,
}

impl ScoreBreakdown {
    /// Sum of the steps, saturating at `u32::MAX`
    pub fn total(&self) -> u32 {
        self.category
            .saturating_add(self.similar_claims)
            .saturating_add(self.lot_claims)
            .saturating_add(self.submitter_role)
            .saturating_add(self.evidence)
    }
}

/// Result of triaging a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageOutcome {
    pub priority_score: u32,
    /// Always `Validated` or `Pending`
    pub status: ClaimStatus,
    pub breakdown: ScoreBreakdown,
}

/// Computes the priority score and initial status of new claims
///
/// The engine holds only its configuration, so one instance can be shared
/// freely between concurrent submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimTriageEngine {
    weights: TriageWeights,
    active_statuses: Vec<ClaimStatus>,
}

impl Default for ClaimTriageEngine {
    fn default() -> Self {
        Self::new(TriageSettings::default())
    }
}

impl ClaimTriageEngine {
    pub fn new(settings: TriageSettings) -> Self {
        Self {
            weights: settings.weights,
            active_statuses: settings.active_statuses,
        }
    }

    pub fn weights(&self) -> &TriageWeights {
        &self.weights
    }

    /// Statuses passed to the count queries as "active"
    pub fn active_statuses(&self) -> &[ClaimStatus] {
        &self.active_statuses
    }

    /// Applies the scoring rule to already-gathered signals
    pub fn evaluate(&self, signals: &TriageSignals) -> TriageOutcome {
        let w = &self.weights;

        let mut breakdown = ScoreBreakdown {
            category: w.category_weight(&signals.category),
            ..ScoreBreakdown::default()
        };

        if signals.similar_active_claims >= w.similar_claims_threshold {
            breakdown.similar_claims = w.similar_claims_bonus;
        }

        if signals.lot_active_claims >= w.lot_claims_threshold {
            breakdown.lot_claims = w.lot_claims_bonus;
        }

        if signals.submitter_is_admin {
            breakdown.submitter_role = w.admin_bonus;
        }

        let status = if signals.has_evidence {
            breakdown.evidence = w.evidence_bonus;
            ClaimStatus::Validated
        } else {
            ClaimStatus::Pending
        };

        let outcome = TriageOutcome {
            priority_score: breakdown.total(),
            status,
            breakdown,
        };

        debug!(
            category = %signals.category,
            score = outcome.priority_score,
            status = %outcome.status,
            breakdown = ?outcome.breakdown,
            "Claim triaged"
        );

        outcome
    }

    /// Gathers the signals for a submission and scores it
    ///
    /// Runs the category count, the lot count and the role lookup in that
    /// order. A submitter the directory does not know simply earns no role
    /// bonus. Any port error aborts scoring and is returned as is.
    #[instrument(
        skip(self, submission, claims, users),
        fields(
            category = %submission.category,
            parking_lot_id = %submission.parking_lot_id,
            submitter_id = %submission.submitter_id,
        )
    )]
    pub async fn score(
        &self,
        submission: &ClaimSubmission,
        claims: &dyn ClaimStore,
        users: &dyn UserDirectory,
    ) -> Result<TriageOutcome, PortError> {
        let similar_active_claims = claims
            .count_similar_active_claims(&submission.category, &self.active_statuses)
            .await?;

        let lot_active_claims = claims
            .count_active_claims_for_lot(submission.parking_lot_id, &self.active_statuses)
            .await?;

        let submitter_is_admin = users
            .find_user_role(submission.submitter_id)
            .await?
            .is_some_and(|role| role.is_admin());

        let signals = TriageSignals {
            category: submission.category.clone(),
            similar_active_claims,
            lot_active_claims,
            submitter_is_admin,
            has_evidence: submission.has_evidence(),
        };

        Ok(self.evaluate(&signals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(category: ClaimCategory) -> TriageSignals {
        TriageSignals {
            category,
            similar_active_claims: 0,
            lot_active_claims: 0,
            submitter_is_admin: false,
            has_evidence: false,
        }
    }

    #[test]
    fn test_security_without_bonuses_is_pending_ten() {
        let outcome = ClaimTriageEngine::default().evaluate(&signals(ClaimCategory::Security));
        assert_eq!(outcome.priority_score, 10);
        assert_eq!(outcome.status, ClaimStatus::Pending);
    }

    #[test]
    fn test_other_with_evidence_is_validated_six() {
        let mut s = signals(ClaimCategory::Other);
        s.has_evidence = true;

        let outcome = ClaimTriageEngine::default().evaluate(&s);
        assert_eq!(outcome.priority_score, 6);
        assert_eq!(outcome.status, ClaimStatus::Validated);
        assert_eq!(outcome.breakdown.evidence, 2);
    }

    #[test]
    fn test_default_max_score() {
        assert_eq!(TriageWeights::default().max_score(), 23);
    }

    #[test]
    fn test_lot_threshold_is_flat() {
        let engine = ClaimTriageEngine::default();
        let mut s = signals(ClaimCategory::SpotOccupied);

        s.lot_active_claims = 2;
        assert_eq!(engine.evaluate(&s).breakdown.lot_claims, 0);

        s.lot_active_claims = 3;
        assert_eq!(engine.evaluate(&s).breakdown.lot_claims, 3);

        s.lot_active_claims = 40;
        assert_eq!(engine.evaluate(&s).priority_score, 6 + 3);
    }

    #[test]
    fn test_custom_weights_are_honoured() {
        let settings = TriageSettings {
            weights: TriageWeights {
                security: 20,
                similar_claims_threshold: 1,
                ..TriageWeights::default()
            },
            ..TriageSettings::default()
        };
        let engine = ClaimTriageEngine::new(settings);

        let mut s = signals(ClaimCategory::Security);
        s.similar_active_claims = 1;
        assert_eq!(engine.evaluate(&s).priority_score, 25);
    }

    #[test]
    fn test_oversized_weights_saturate_instead_of_overflowing() {
        let weights = TriageWeights {
            security: u32::MAX,
            ..TriageWeights::default()
        };
        assert_eq!(weights.checked_max_score(), None);
        assert_eq!(weights.max_score(), u32::MAX);

        let engine = ClaimTriageEngine::new(TriageSettings {
            weights,
            ..TriageSettings::default()
        });
        let mut s = signals(ClaimCategory::Security);
        s.has_evidence = true;

        let outcome = engine.evaluate(&s);
        assert_eq!(outcome.priority_score, u32::MAX);
        assert_eq!(outcome.status, ClaimStatus::Validated);
    }
}
