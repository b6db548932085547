//! PostgreSQL adapters for the claims domain ports
//!
//! `PostgresClaimStore` implements `ClaimStore` on top of
//! [`ClaimsRepository`], and `PostgresUserDirectory` implements
//! `UserDirectory` on top of [`UsersRepository`]. Both translate rows to
//! domain types and `DatabaseError` to `PortError`.
//!
//! ```rust,ignore
//! use infra_db::adapters::{PostgresClaimStore, PostgresUserDirectory};
//! use domain_claims::{ClaimSubmissionService, ClaimTriageEngine, TriageSettings};
//! use std::sync::Arc;
//!
//! let service = ClaimSubmissionService::new(
//!     ClaimTriageEngine::new(TriageSettings::from_env()?),
//!     Arc::new(PostgresClaimStore::new(pool.clone())),
//!     Arc::new(PostgresUserDirectory::new(pool)),
//! );
//! ```

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    ClaimId, DomainPort, HealthCheckResult, HealthCheckable, ParkingLotId, PortError, UserId,
};
use domain_claims::{
    Claim, ClaimCategory, ClaimQuery, ClaimStatus, ClaimStore, ListingOrder, UserDirectory, UserRole,
};

use crate::error::DatabaseError;
use crate::repositories::{ClaimFilter, ClaimRow, ClaimsRepository, UsersRepository};

async fn ping(pool: &PgPool, adapter_id: &str) -> HealthCheckResult {
    let start = std::time::Instant::now();

    let result = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await;

    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthCheckResult::healthy(adapter_id, latency_ms),
        Err(e) => HealthCheckResult::unhealthy(adapter_id, latency_ms, format!("Database error: {}", e)),
    }
}

fn status_labels(statuses: &[ClaimStatus]) -> Vec<String> {
    statuses.iter().map(|s| s.as_str().to_string()).collect()
}

/// PostgreSQL-backed implementation of `ClaimStore`
#[derive(Debug, Clone)]
pub struct PostgresClaimStore {
    repository: ClaimsRepository,
    pool: PgPool,
}

impl PostgresClaimStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClaimsRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresClaimStore {}

#[async_trait]
impl HealthCheckable for PostgresClaimStore {
    async fn health_check(&self) -> HealthCheckResult {
        ping(&self.pool, "postgres-claim-store").await
    }
}

#[async_trait]
impl ClaimStore for PostgresClaimStore {
    #[instrument(skip(self, active_statuses), fields(category = %category))]
    async fn count_similar_active_claims(
        &self,
        category: &ClaimCategory,
        active_statuses: &[ClaimStatus],
    ) -> Result<u64, PortError> {
        let count = self
            .repository
            .count_by_category(category.label(), &status_labels(active_statuses))
            .await?;
        debug!(count, "Counted similar active claims");
        Ok(count.max(0) as u64)
    }

    #[instrument(skip(self, active_statuses), fields(parking_lot_id = %parking_lot_id))]
    async fn count_active_claims_for_lot(
        &self,
        parking_lot_id: ParkingLotId,
        active_statuses: &[ClaimStatus],
    ) -> Result<u64, PortError> {
        let count = self
            .repository
            .count_by_parking_lot(parking_lot_id.into(), &status_labels(active_statuses))
            .await?;
        debug!(count, "Counted active claims for lot");
        Ok(count.max(0) as u64)
    }

    #[instrument(skip(self, claim), fields(claim_id = %claim.id))]
    async fn insert_claim(&self, claim: &Claim) -> Result<(), PortError> {
        let row = claim_to_row(claim)?;
        self.repository.insert(&row).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    async fn get_claim(&self, id: ClaimId) -> Result<Claim, PortError> {
        match self.repository.get_by_id(id.into()).await {
            Ok(row) => Ok(row_to_claim(row)?),
            Err(e) if e.is_not_found() => Err(PortError::not_found("Claim", id)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, claim), fields(claim_id = %claim.id, status = %claim.status))]
    async fn update_moderation(&self, claim: &Claim) -> Result<(), PortError> {
        let result = self
            .repository
            .update_moderation(
                claim.id.into(),
                claim.status.as_str(),
                claim.operator_feedback.as_deref(),
                claim.updated_at,
            )
            .await;

        match result {
            Ok(()) => Ok(()),
            Err(e) if e.is_not_found() => Err(PortError::not_found("Claim", claim.id)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    async fn delete_claim(&self, id: ClaimId) -> Result<(), PortError> {
        match self.repository.delete(id.into()).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_not_found() => Err(PortError::not_found("Claim", id)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, query))]
    async fn find_claims(&self, query: &ClaimQuery) -> Result<Vec<Claim>, PortError> {
        let rows = self.repository.find(&query_to_filter(query)).await?;
        debug!(count = rows.len(), "Listed claims");

        rows.into_iter()
            .map(|row| row_to_claim(row).map_err(PortError::from))
            .collect()
    }
}

/// PostgreSQL-backed implementation of `UserDirectory`
#[derive(Debug, Clone)]
pub struct PostgresUserDirectory {
    repository: UsersRepository,
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UsersRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresUserDirectory {}

#[async_trait]
impl HealthCheckable for PostgresUserDirectory {
    async fn health_check(&self) -> HealthCheckResult {
        ping(&self.pool, "postgres-user-directory").await
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn find_user_role(&self, user_id: UserId) -> Result<Option<UserRole>, PortError> {
        let role = self.repository.find_role(user_id.into()).await?;
        Ok(role.map(UserRole::from))
    }
}

pub(crate) fn query_to_filter(query: &ClaimQuery) -> ClaimFilter {
    ClaimFilter {
        submitter_id: query.submitter_id.map(Into::into),
        parking_lot_id: query.parking_lot_id.map(Into::into),
        status: query.status.map(|s| s.as_str().to_string()),
        limit: query.limit.map(i64::from),
        most_recent_first: query.order == ListingOrder::MostRecent,
    }
}

pub(crate) fn claim_to_row(claim: &Claim) -> Result<ClaimRow, DatabaseError> {
    let priority_score = i32::try_from(claim.priority_score).map_err(|_| {
        DatabaseError::RowMapping(format!("priority score {} out of range", claim.priority_score))
    })?;

    Ok(ClaimRow {
        claim_id: claim.id.into(),
        submitter_id: claim.submitter_id.into(),
        parking_lot_id: claim.parking_lot_id.into(),
        category: claim.category.label().to_string(),
        evidence_attachment: claim.evidence_attachment.clone(),
        message: claim.message.clone(),
        status: claim.status.as_str().to_string(),
        priority_score,
        operator_feedback: claim.operator_feedback.clone(),
        submitted_at: claim.submitted_at,
        updated_at: claim.updated_at,
    })
}

pub(crate) fn row_to_claim(row: ClaimRow) -> Result<Claim, DatabaseError> {
    let status: ClaimStatus = row
        .status
        .parse()
        .map_err(|e: domain_claims::UnknownStatus| DatabaseError::RowMapping(e.to_string()))?;

    let priority_score = u32::try_from(row.priority_score).map_err(|_| {
        DatabaseError::RowMapping(format!("negative priority score {}", row.priority_score))
    })?;

    Ok(Claim {
        id: ClaimId::from_uuid(row.claim_id),
        submitter_id: UserId::from_uuid(row.submitter_id),
        parking_lot_id: ParkingLotId::from_uuid(row.parking_lot_id),
        category: ClaimCategory::from(row.category),
        evidence_attachment: row.evidence_attachment,
        message: row.message,
        status,
        priority_score,
        operator_feedback: row.operator_feedback,
        submitted_at: row.submitted_at,
        updated_at: row.updated_at,
    })
}
