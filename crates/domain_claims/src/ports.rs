//! Claims Domain Ports
//!
//! The triage engine and the submission service never talk to a database
//! directly. They depend on two ports:
//!
//! - [`ClaimStore`]: active-claim counts used by scoring, plus the storage
//!   operations the submission and moderation workflows need
//! - [`UserDirectory`]: role lookup for the submitter
//!
//! `infra_db` provides the PostgreSQL adapters; the [`mock`] module provides
//! in-memory ones for tests (enable the `mock` feature outside this crate).
//!
//! ```rust,ignore
//! use domain_claims::{ClaimSubmissionService, ClaimTriageEngine};
//! use infra_db::adapters::{PostgresClaimStore, PostgresUserDirectory};
//! use std::sync::Arc;
//!
//! let service = ClaimSubmissionService::new(
//!     ClaimTriageEngine::default(),
//!     Arc::new(PostgresClaimStore::new(pool.clone())),
//!     Arc::new(PostgresUserDirectory::new(pool)),
//! );
//! ```

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, HealthCheckable, ParkingLotId, PortError, UserId};

use crate::claim::{Claim, ClaimCategory, ClaimStatus};
use crate::role::UserRole;

/// Order in which a listing comes back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListingOrder {
    /// Priority descending, newest first on ties
    #[default]
    Review,
    /// Newest first, priority ignored
    MostRecent,
}

/// Filter for claim listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimQuery {
    pub submitter_id: Option<UserId>,
    pub parking_lot_id: Option<ParkingLotId>,
    pub status: Option<ClaimStatus>,
    pub limit: Option<u32>,
    pub order: ListingOrder,
}

impl ClaimQuery {
    /// Every claim
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_submitter(submitter_id: UserId) -> Self {
        Self {
            submitter_id: Some(submitter_id),
            ..Default::default()
        }
    }

    pub fn by_status(status: ClaimStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Pending claims, newest first
    pub fn archived() -> Self {
        Self {
            status: Some(ClaimStatus::Pending),
            order: ListingOrder::MostRecent,
            ..Default::default()
        }
    }

    pub fn for_lot(mut self, parking_lot_id: ParkingLotId) -> Self {
        self.parking_lot_id = Some(parking_lot_id);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns true if the claim passes every filter that is set
    pub fn matches(&self, claim: &Claim) -> bool {
        self.submitter_id.map_or(true, |id| claim.submitter_id == id)
            && self.parking_lot_id.map_or(true, |id| claim.parking_lot_id == id)
            && self.status.map_or(true, |status| claim.status == status)
    }
}

/// Port over the stored claims
#[async_trait]
pub trait ClaimStore: DomainPort + HealthCheckable {
    /// Counts stored claims with the given category whose status is one of
    /// `active_statuses`
    async fn count_similar_active_claims(
        &self,
        category: &ClaimCategory,
        active_statuses: &[ClaimStatus],
    ) -> Result<u64, PortError>;

    /// Counts stored claims filed against the lot whose status is one of
    /// `active_statuses`
    async fn count_active_claims_for_lot(
        &self,
        parking_lot_id: ParkingLotId,
        active_statuses: &[ClaimStatus],
    ) -> Result<u64, PortError>;

    /// Persists a newly created claim
    ///
    /// Returns `PortError::Conflict` if a claim with the same id exists.
    async fn insert_claim(&self, claim: &Claim) -> Result<(), PortError>;

    /// Retrieves a claim by id, or `PortError::NotFound`
    async fn get_claim(&self, id: ClaimId) -> Result<Claim, PortError>;

    /// Persists the moderation fields of an existing claim: status, operator
    /// feedback and `updated_at`. The priority score is never rewritten.
    async fn update_moderation(&self, claim: &Claim) -> Result<(), PortError>;

    /// Removes a claim and its moderation history, or `PortError::NotFound`
    async fn delete_claim(&self, id: ClaimId) -> Result<(), PortError>;

    /// Lists claims matching the query in `query.order`. The limit applies
    /// after ordering.
    async fn find_claims(&self, query: &ClaimQuery) -> Result<Vec<Claim>, PortError>;
}

/// Port over the user accounts
#[async_trait]
pub trait UserDirectory: DomainPort + HealthCheckable {
    /// Returns the user's role, or `None` if no such user exists
    async fn find_user_role(&self, user_id: UserId) -> Result<Option<UserRole>, PortError>;
}

/// In-memory port implementations for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::RwLock;

    use core_kernel::HealthCheckResult;

    fn unavailable_error(service: &str) -> PortError {
        PortError::ServiceUnavailable {
            service: service.to_string(),
        }
    }

    /// In-memory claim store
    #[derive(Debug, Default)]
    pub struct InMemoryClaimStore {
        claims: RwLock<HashMap<ClaimId, Claim>>,
        unavailable: AtomicBool,
    }

    impl InMemoryClaimStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_claims(claims: impl IntoIterator<Item = Claim>) -> Self {
            let claims = claims.into_iter().map(|c| (c.id, c)).collect();
            Self {
                claims: RwLock::new(claims),
                unavailable: AtomicBool::new(false),
            }
        }

        /// While set, every operation fails with `PortError::ServiceUnavailable`
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        pub async fn len(&self) -> usize {
            self.claims.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.claims.read().await.is_empty()
        }

        fn check_available(&self) -> Result<(), PortError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(unavailable_error("in-memory-claim-store"));
            }
            Ok(())
        }
    }

    impl DomainPort for InMemoryClaimStore {}

    #[async_trait]
    impl HealthCheckable for InMemoryClaimStore {
        async fn health_check(&self) -> HealthCheckResult {
            match self.check_available() {
                Ok(()) => HealthCheckResult::healthy("in-memory-claim-store", 0),
                Err(e) => HealthCheckResult::unhealthy("in-memory-claim-store", 0, e.to_string()),
            }
        }
    }

    #[async_trait]
    impl ClaimStore for InMemoryClaimStore {
        async fn count_similar_active_claims(
            &self,
            category: &ClaimCategory,
            active_statuses: &[ClaimStatus],
        ) -> Result<u64, PortError> {
            self.check_available()?;
            let claims = self.claims.read().await;
            Ok(claims
                .values()
                .filter(|c| &c.category == category && active_statuses.contains(&c.status))
                .count() as u64)
        }

        async fn count_active_claims_for_lot(
            &self,
            parking_lot_id: ParkingLotId,
            active_statuses: &[ClaimStatus],
        ) -> Result<u64, PortError> {
            self.check_available()?;
            let claims = self.claims.read().await;
            Ok(claims
                .values()
                .filter(|c| c.parking_lot_id == parking_lot_id && active_statuses.contains(&c.status))
                .count() as u64)
        }

        async fn insert_claim(&self, claim: &Claim) -> Result<(), PortError> {
            self.check_available()?;
            let mut claims = self.claims.write().await;
            if claims.contains_key(&claim.id) {
                return Err(PortError::Conflict {
                    message: format!("claim {} already exists", claim.id),
                });
            }
            claims.insert(claim.id, claim.clone());
            Ok(())
        }

        async fn get_claim(&self, id: ClaimId) -> Result<Claim, PortError> {
            self.check_available()?;
            self.claims
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Claim", id))
        }

        async fn update_moderation(&self, claim: &Claim) -> Result<(), PortError> {
            self.check_available()?;
            let mut claims = self.claims.write().await;
            let stored = claims
                .get_mut(&claim.id)
                .ok_or_else(|| PortError::not_found("Claim", claim.id))?;
            stored.status = claim.status;
            stored.operator_feedback = claim.operator_feedback.clone();
            stored.updated_at = claim.updated_at;
            Ok(())
        }

        async fn delete_claim(&self, id: ClaimId) -> Result<(), PortError> {
            self.check_available()?;
            self.claims
                .write()
                .await
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| PortError::not_found("Claim", id))
        }

        async fn find_claims(&self, query: &ClaimQuery) -> Result<Vec<Claim>, PortError> {
            self.check_available()?;
            let claims = self.claims.read().await;
            let mut matching: Vec<Claim> =
                claims.values().filter(|c| query.matches(c)).cloned().collect();
            match query.order {
                ListingOrder::Review => crate::queue::review_order(&mut matching),
                ListingOrder::MostRecent => crate::queue::recency_order(&mut matching),
            }
            if let Some(limit) = query.limit {
                matching.truncate(limit as usize);
            }
            Ok(matching)
        }
    }

    /// In-memory user directory
    #[derive(Debug, Default)]
    pub struct InMemoryUserDirectory {
        roles: RwLock<HashMap<UserId, UserRole>>,
        unavailable: AtomicBool,
    }

    impl InMemoryUserDirectory {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_roles(roles: impl IntoIterator<Item = (UserId, UserRole)>) -> Self {
            Self {
                roles: RwLock::new(roles.into_iter().collect()),
                unavailable: AtomicBool::new(false),
            }
        }

        pub async fn insert(&self, user_id: UserId, role: UserRole) {
            self.roles.write().await.insert(user_id, role);
        }

        /// While set, lookups fail with `PortError::ServiceUnavailable`
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }
    }

    impl DomainPort for InMemoryUserDirectory {}

    #[async_trait]
    impl HealthCheckable for InMemoryUserDirectory {
        async fn health_check(&self) -> HealthCheckResult {
            if self.unavailable.load(Ordering::SeqCst) {
                HealthCheckResult::unhealthy("in-memory-user-directory", 0, "marked unavailable")
            } else {
                HealthCheckResult::healthy("in-memory-user-directory", 0)
            }
        }
    }

    #[async_trait]
    impl UserDirectory for InMemoryUserDirectory {
        async fn find_user_role(&self, user_id: UserId) -> Result<Option<UserRole>, PortError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(unavailable_error("in-memory-user-directory"));
            }
            Ok(self.roles.read().await.get(&user_id).cloned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::mock::{InMemoryClaimStore, InMemoryUserDirectory};
    use crate::claim::ClaimSubmission;
    use crate::triage::ClaimTriageEngine;

    fn stored_claim(lot: ParkingLotId, category: &str, status: ClaimStatus) -> Claim {
        let engine = ClaimTriageEngine::default();
        let submission = ClaimSubmission::new(UserId::new(), lot, category);
        let outcome = engine.evaluate(&crate::triage::TriageSignals {
            category: submission.category.clone(),
            similar_active_claims: 0,
            lot_active_claims: 0,
            submitter_is_admin: false,
            has_evidence: false,
        });
        let mut claim = Claim::from_submission(submission, &outcome);
        claim.status = status;
        claim
    }

    #[tokio::test]
    async fn test_mock_counts_only_active_statuses() {
        let lot = ParkingLotId::new();
        let store = InMemoryClaimStore::with_claims(vec![
            stored_claim(lot, "Security", ClaimStatus::Validated),
            stored_claim(lot, "Security", ClaimStatus::Pending),
            stored_claim(lot, "Security", ClaimStatus::Resolved),
            stored_claim(ParkingLotId::new(), "Other", ClaimStatus::Pending),
        ]);
        let active = [ClaimStatus::Validated, ClaimStatus::Pending];

        let similar = store
            .count_similar_active_claims(&ClaimCategory::Security, &active)
            .await
            .unwrap();
        assert_eq!(similar, 2);

        let for_lot = store.count_active_claims_for_lot(lot, &active).await.unwrap();
        assert_eq!(for_lot, 2);

        let validated_only = store
            .count_active_claims_for_lot(lot, &[ClaimStatus::Validated])
            .await
            .unwrap();
        assert_eq!(validated_only, 1);
    }

    #[tokio::test]
    async fn test_mock_get_not_found() {
        let store = InMemoryClaimStore::new();
        let err = store.get_claim(ClaimId::new()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_mock_insert_conflict() {
        let store = InMemoryClaimStore::new();
        let claim = stored_claim(ParkingLotId::new(), "Other", ClaimStatus::Pending);
        store.insert_claim(&claim).await.unwrap();
        assert!(matches!(
            store.insert_claim(&claim).await,
            Err(PortError::Conflict { .. })
        ));
    }

    #[tokio::test]
    async fn test_mock_unavailable_store_fails() {
        let store = InMemoryClaimStore::new();
        store.set_unavailable(true);
        let err = store
            .count_active_claims_for_lot(ParkingLotId::new(), &[ClaimStatus::Pending])
            .await
            .unwrap_err();
        assert!(err.is_transient());
        assert!(!store.health_check().await.is_healthy());
    }

    #[tokio::test]
    async fn test_mock_directory_lookup() {
        let admin = UserId::new();
        let users = InMemoryUserDirectory::with_roles([(admin, UserRole::Admin)]);

        assert_eq!(users.find_user_role(admin).await.unwrap(), Some(UserRole::Admin));
        assert_eq!(users.find_user_role(UserId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_mock_delete() {
        let claim = stored_claim(ParkingLotId::new(), "Other", ClaimStatus::Pending);
        let store = InMemoryClaimStore::with_claims(vec![claim.clone()]);

        store.delete_claim(claim.id).await.unwrap();
        assert!(store.is_empty().await);
        assert!(store.delete_claim(claim.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_mock_archived_listing_is_newest_pending_first() {
        let lot = ParkingLotId::new();
        let mut older_urgent = stored_claim(lot, "Security", ClaimStatus::Pending);
        older_urgent.submitted_at -= chrono::Duration::hours(2);
        let newer_minor = stored_claim(lot, "Other", ClaimStatus::Pending);
        let validated = stored_claim(lot, "Security", ClaimStatus::Validated);
        let store = InMemoryClaimStore::with_claims(vec![
            older_urgent.clone(),
            newer_minor.clone(),
            validated,
        ]);

        let archived = store.find_claims(&ClaimQuery::archived()).await.unwrap();
        let ids: Vec<ClaimId> = archived.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![newer_minor.id, older_urgent.id]);
    }

    #[test]
    fn test_query_matches() {
        let lot = ParkingLotId::new();
        let claim = stored_claim(lot, "Other", ClaimStatus::Pending);

        assert!(ClaimQuery::all().matches(&claim));
        assert!(ClaimQuery::by_status(ClaimStatus::Pending).for_lot(lot).matches(&claim));
        assert!(!ClaimQuery::by_status(ClaimStatus::Validated).matches(&claim));
        assert!(!ClaimQuery::by_submitter(UserId::new()).matches(&claim));
    }
}
