//! PostgreSQL implementation of EconomyRepository

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;

use ledger_core::{EconomyRecord, EconomyRepository, RepoResult};

use crate::models::EconomyModel;

use super::error::map_db_error;

/// PostgreSQL implementation of EconomyRepository
#[derive(Clone)]
pub struct PgEconomyRepository {
    pool: PgPool,
}

impl PgEconomyRepository {
    /// Create a new PgEconomyRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EconomyRepository for PgEconomyRepository {
    #[instrument(skip(self))]
    async fn latest(&self, source: &str) -> RepoResult<Option<EconomyRecord>> {
        let result = sqlx::query_as::<_, EconomyModel>(
            r"
            SELECT time, data
            FROM economy
            WHERE source = $1
            ORDER BY time DESC
            LIMIT 1
            ",
        )
        .bind(source)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(EconomyRecord::from))
    }

    #[instrument(skip(self, data))]
    async fn replace(&self, source: &str, data: &serde_json::Value) -> RepoResult<EconomyRecord> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            DELETE FROM economy WHERE source = $1
            ",
        )
        .bind(source)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let row = sqlx::query_as::<_, EconomyModel>(
            r"
            INSERT INTO economy (source, time, data)
            VALUES ($1, NOW(), $2)
            RETURNING time, data
            ",
        )
        .bind(source)
        .bind(Json(data))
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(EconomyRecord::from(row))
    }
}
