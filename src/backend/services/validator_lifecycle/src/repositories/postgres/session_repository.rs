use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use chain_models::ids::TxHash;
use chain_models::session::LifecycleSession;

use crate::repositories::traits::SessionRepository;
use crate::utils::errors::Result;

/// Postgres-backed session store.
///
/// The full session is stored as JSONB; phase and initiate tx hash are
/// lifted into indexed columns for lookups.
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS lifecycle_sessions (
                id UUID PRIMARY KEY,
                phase TEXT NOT NULL,
                initiate_tx_hash BYTEA,
                body JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS lifecycle_sessions_initiate_tx
                ON lifecycle_sessions (initiate_tx_hash)
                WHERE initiate_tx_hash IS NOT NULL
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    fn row_to_session(row: &sqlx::postgres::PgRow) -> Result<LifecycleSession> {
        let body: serde_json::Value = row.try_get("body")?;
        Ok(serde_json::from_value(body)?)
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn create(&self, session: LifecycleSession) -> Result<()> {
        let body = serde_json::to_value(&session)?;
        sqlx::query(
            r#"
            INSERT INTO lifecycle_sessions (
                id, phase, initiate_tx_hash, body, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(session.id)
        .bind(session.phase.to_string())
        .bind(
            session
                .artifacts
                .initiate_tx_hash
                .map(|tx| tx.as_bytes().to_vec()),
        )
        .bind(body)
        .bind(session.created_at)
        .bind(session.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<LifecycleSession>> {
        let row = sqlx::query("SELECT body FROM lifecycle_sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_session(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_initiate_tx(&self, tx_hash: TxHash) -> Result<Option<LifecycleSession>> {
        let row = sqlx::query("SELECT body FROM lifecycle_sessions WHERE initiate_tx_hash = $1")
            .bind(tx_hash.as_bytes().to_vec())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_session(&row)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, session: &LifecycleSession) -> Result<()> {
        let body = serde_json::to_value(session)?;
        sqlx::query(
            r#"
            UPDATE lifecycle_sessions
            SET phase = $1, initiate_tx_hash = $2, body = $3, updated_at = $4
            WHERE id = $5
            "#,
        )
        .bind(session.phase.to_string())
        .bind(
            session
                .artifacts
                .initiate_tx_hash
                .map(|tx| tx.as_bytes().to_vec()),
        )
        .bind(body)
        .bind(session.updated_at)
        .bind(session.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM lifecycle_sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_active(&self) -> Result<Vec<LifecycleSession>> {
        let rows = sqlx::query("SELECT body FROM lifecycle_sessions WHERE phase != 'completed'")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_session).collect()
    }
}
