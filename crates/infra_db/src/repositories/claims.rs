//! Claims repository implementation
//!
//! SQL access for the `claims` table: the two frequency counts triage
//! needs, plus insert, lookup, moderation updates and filtered listings.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

const CLAIM_COLUMNS: &str = r#"
    claim_id, submitter_id, parking_lot_id, category, evidence_attachment,
    message, status, priority_score, operator_feedback, submitted_at, updated_at
"#;

/// Repository for managing claims data
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Counts claims with the given category label whose status is in `statuses`
    pub async fn count_by_category(
        &self,
        category: &str,
        statuses: &[String],
    ) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM claims WHERE category = $1 AND status = ANY($2)",
        )
        .bind(category)
        .bind(statuses)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Counts claims filed against the lot whose status is in `statuses`
    pub async fn count_by_parking_lot(
        &self,
        parking_lot_id: Uuid,
        statuses: &[String],
    ) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM claims WHERE parking_lot_id = $1 AND status = ANY($2)",
        )
        .bind(parking_lot_id)
        .bind(statuses)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Inserts a scored claim
    pub async fn insert(&self, claim: &ClaimRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO claims (
                claim_id, submitter_id, parking_lot_id, category, evidence_attachment,
                message, status, priority_score, operator_feedback, submitted_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(claim.claim_id)
        .bind(claim.submitter_id)
        .bind(claim.parking_lot_id)
        .bind(&claim.category)
        .bind(&claim.evidence_attachment)
        .bind(&claim.message)
        .bind(&claim.status)
        .bind(claim.priority_score)
        .bind(&claim.operator_feedback)
        .bind(claim.submitted_at)
        .bind(claim.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Retrieves a claim by its identifier
    pub async fn get_by_id(&self, claim_id: Uuid) -> Result<ClaimRow, DatabaseError> {
        let query = format!("SELECT {} FROM claims WHERE claim_id = $1", CLAIM_COLUMNS);

        sqlx::query_as::<_, ClaimRow>(&query)
            .bind(claim_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Claim", claim_id))
    }

    /// Writes the moderation fields and records the change in the history table
    pub async fn update_moderation(
        &self,
        claim_id: Uuid,
        status: &str,
        operator_feedback: Option<&str>,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE claims
            SET status = $2, operator_feedback = $3, updated_at = $4
            WHERE claim_id = $1
            "#,
        )
        .bind(claim_id)
        .bind(status)
        .bind(operator_feedback)
        .bind(updated_at)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Claim", claim_id));
        }

        sqlx::query(
            r#"
            INSERT INTO claim_status_history (history_id, claim_id, status, feedback, changed_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(claim_id)
        .bind(status)
        .bind(operator_feedback)
        .bind(updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Deletes a claim; its history rows go with it (`ON DELETE CASCADE`)
    pub async fn delete(&self, claim_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM claims WHERE claim_id = $1")
            .bind(claim_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Claim", claim_id));
        }
        Ok(())
    }

    /// Lists claims; `None` filters match everything
    pub async fn find(&self, filter: &ClaimFilter) -> Result<Vec<ClaimRow>, DatabaseError> {
        let order_by = if filter.most_recent_first {
            "submitted_at DESC"
        } else {
            "priority_score DESC, submitted_at DESC"
        };

        let query = format!(
            r#"
            SELECT {}
            FROM claims
            WHERE ($1::uuid IS NULL OR submitter_id = $1)
              AND ($2::uuid IS NULL OR parking_lot_id = $2)
              AND ($3::text IS NULL OR status = $3)
            ORDER BY {}
            LIMIT $4
            "#,
            CLAIM_COLUMNS, order_by
        );

        let rows = sqlx::query_as::<_, ClaimRow>(&query)
            .bind(filter.submitter_id)
            .bind(filter.parking_lot_id)
            .bind(&filter.status)
            .bind(filter.limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}

/// A row of the `claims` table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ClaimRow {
    pub claim_id: Uuid,
    pub submitter_id: Uuid,
    pub parking_lot_id: Uuid,
    pub category: String,
    pub evidence_attachment: Option<String>,
    pub message: Option<String>,
    pub status: String,
    pub priority_score: i32,
    pub operator_feedback: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing filter in storage terms
#[derive(Debug, Clone, Default)]
pub struct ClaimFilter {
    pub submitter_id: Option<Uuid>,
    pub parking_lot_id: Option<Uuid>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    /// Order by submission time only instead of review order
    pub most_recent_first: bool,
}
