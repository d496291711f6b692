// src/db/sync_log_repo.rs

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::sync::{SyncEventType, SyncLogEntry, SyncStatus},
};

// Trilha de auditoria da sincronização. Append-only: este repositório não
// expõe UPDATE; o único DELETE é a limpeza administrativa por vendedor.
#[derive(Clone)]
pub struct SyncLogRepository {
    pool: PgPool,
}

impl SyncLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        &self,
        sales_rep_id: Option<Uuid>,
        event_type: SyncEventType,
        data_type: &str,
        records_count: i32,
        status: SyncStatus,
        error_message: Option<&str>,
        metadata: Value,
    ) -> Result<SyncLogEntry, AppError> {
        let entry = sqlx::query_as::<_, SyncLogEntry>(
            r#"
            INSERT INTO sync_logs (
                sales_rep_id, event_type, data_type, records_count,
                status, error_message, metadata
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                id, sales_rep_id, event_type, data_type, records_count,
                status, error_message, metadata, created_at
            "#,
        )
        .bind(sales_rep_id)
        .bind(event_type)
        .bind(data_type)
        .bind(records_count)
        .bind(status)
        .bind(error_message)
        .bind(metadata)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    // "Meu lote chegou?" é a pergunta que o vendedor faz depois de uma
    // conexão cair no meio do upload. Mais recente primeiro.
    pub async fn list_by_rep(&self, sales_rep_id: Uuid) -> Result<Vec<SyncLogEntry>, AppError> {
        let entries = sqlx::query_as::<_, SyncLogEntry>(
            r#"
            SELECT
                id, sales_rep_id, event_type, data_type, records_count,
                status, error_message, metadata, created_at
            FROM sync_logs
            WHERE sales_rep_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(sales_rep_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn clear_by_rep(&self, sales_rep_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM sync_logs WHERE sales_rep_id = $1")
            .bind(sales_rep_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
