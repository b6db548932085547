//! Claim submission and moderation service
//!
//! The service is the only place that invokes the triage engine, right
//! before a claim is first stored. Later edits go through [`moderate`] and
//! never re-score.
//!
//! [`moderate`]: ClaimSubmissionService::moderate

use std::sync::Arc;

use tracing::{info, instrument, warn};

use core_kernel::{ClaimId, PortError, UserId};

use crate::claim::{Claim, ClaimSubmission};
use crate::error::ClaimError;
use crate::moderation::ModerationDecision;
use crate::ports::{ClaimQuery, ClaimStore, UserDirectory};
use crate::queue::{recency_order, review_order};
use crate::triage::ClaimTriageEngine;

/// Creates, lists and moderates claims on top of the claim ports
#[derive(Clone)]
pub struct ClaimSubmissionService {
    engine: ClaimTriageEngine,
    claims: Arc<dyn ClaimStore>,
    users: Arc<dyn UserDirectory>,
}

impl ClaimSubmissionService {
    pub fn new(
        engine: ClaimTriageEngine,
        claims: Arc<dyn ClaimStore>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self { engine, claims, users }
    }

    pub fn engine(&self) -> &ClaimTriageEngine {
        &self.engine
    }

    /// Scores and stores a new claim
    ///
    /// If any collaborator fails, the error is returned and no claim is
    /// stored. Retrying is up to the caller.
    #[instrument(skip(self, submission), fields(parking_lot_id = %submission.parking_lot_id))]
    pub async fn submit(&self, submission: ClaimSubmission) -> Result<Claim, ClaimError> {
        let outcome = self
            .engine
            .score(&submission, self.claims.as_ref(), self.users.as_ref())
            .await
            .inspect_err(|e| warn!(error = %e, "Triage failed, claim not created"))?;

        let claim = Claim::from_submission(submission, &outcome);
        self.claims.insert_claim(&claim).await?;

        info!(
            claim_id = %claim.id,
            priority_score = claim.priority_score,
            status = %claim.status,
            "Claim submitted"
        );

        Ok(claim)
    }

    pub async fn get(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        self.claims.get_claim(id).await.map_err(|e| not_found_or_port(e, id))
    }

    /// Applies an operator decision to a stored claim
    #[instrument(skip(self, decision), fields(claim_id = %id, status = %decision.status))]
    pub async fn moderate(
        &self,
        id: ClaimId,
        decision: ModerationDecision,
    ) -> Result<Claim, ClaimError> {
        let mut claim = self.get(id).await?;
        claim.moderate(decision)?;
        self.claims.update_moderation(&claim).await?;

        info!(status = %claim.status, "Claim moderated");
        Ok(claim)
    }

    /// Claims matching the query, highest priority first
    pub async fn review_queue(&self, query: &ClaimQuery) -> Result<Vec<Claim>, ClaimError> {
        let mut claims = self.claims.find_claims(query).await?;
        review_order(&mut claims);
        Ok(claims)
    }

    /// A submitter's claims, highest priority first. Empty if they have none.
    pub async fn claims_for_submitter(&self, submitter_id: UserId) -> Result<Vec<Claim>, ClaimError> {
        self.review_queue(&ClaimQuery::by_submitter(submitter_id)).await
    }

    /// Pending claims, newest first
    pub async fn archived_claims(&self) -> Result<Vec<Claim>, ClaimError> {
        let mut claims = self.claims.find_claims(&ClaimQuery::archived()).await?;
        recency_order(&mut claims);
        Ok(claims)
    }

    /// Deletes a claim together with its moderation history
    #[instrument(skip(self), fields(claim_id = %id))]
    pub async fn delete(&self, id: ClaimId) -> Result<(), ClaimError> {
        self.claims
            .delete_claim(id)
            .await
            .map_err(|e| not_found_or_port(e, id))?;

        info!("Claim deleted");
        Ok(())
    }
}

fn not_found_or_port(error: PortError, id: ClaimId) -> ClaimError {
    if error.is_not_found() {
        ClaimError::ClaimNotFound(id.to_string())
    } else {
        ClaimError::Port(error)
    }
}
