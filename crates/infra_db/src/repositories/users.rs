//! Users repository implementation
//!
//! Claims only ever need a user's role, so this is a read-only lookup.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

#[derive(Debug, Clone)]
pub struct UsersRepository {
    pool: PgPool,
}

impl UsersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the stored role label, or `None` if the user does not exist
    pub async fn find_role(&self, user_id: Uuid) -> Result<Option<String>, DatabaseError> {
        let role = sqlx::query_scalar::<_, String>("SELECT role FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(role)
    }
}
