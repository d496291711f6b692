// src/services/sync_log_service.rs

use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::SyncLogRepository,
    models::sync::{ImportResults, SyncEventType, SyncLogEntry, SyncStatus},
};

// Fachada de auditoria. Os `register_*` são fire-and-forget: uma falha ao
// gravar o log NUNCA pode transformar um lote importado com sucesso num
// erro para o aparelho; ela vai para o canal operacional (tracing) e só.
#[derive(Clone)]
pub struct SyncLogService {
    repo: SyncLogRepository,
}

impl SyncLogService {
    pub fn new(repo: SyncLogRepository) -> Self {
        Self { repo }
    }

    pub async fn register_upload(&self, sales_rep_id: Uuid, results: &ImportResults) {
        let metadata = json!({
            "imported": results.imported,
            "failed": results.failed,
            "errors": results.errors,
        });
        let error_message = if results.errors.is_empty() {
            None
        } else {
            Some(results.errors.join("; "))
        };

        let outcome = self
            .repo
            .insert(
                Some(sales_rep_id),
                SyncEventType::Upload,
                "orders",
                (results.imported + results.failed) as i32,
                results.status(),
                error_message.as_deref(),
                metadata,
            )
            .await;

        if let Err(e) = outcome {
            tracing::error!("🔥 Falha ao registrar log de upload: {}", e);
        }
    }

    pub async fn register_download(&self, sales_rep_id: Uuid, records_count: i32) {
        let outcome = self
            .repo
            .insert(
                Some(sales_rep_id),
                SyncEventType::Download,
                "primeira_sincronizacao",
                records_count,
                SyncStatus::Completed,
                None,
                json!({ "recordsCount": records_count }),
            )
            .await;

        if let Err(e) = outcome {
            tracing::error!("🔥 Falha ao registrar log de download: {}", e);
        }
    }

    // Erros de nível de lote (credencial recusada, envelope malformado).
    // Pode não haver vendedor resolvido ainda, daí o Option.
    pub async fn register_error(&self, sales_rep_id: Option<Uuid>, data_type: &str, message: &str) {
        let outcome = self
            .repo
            .insert(
                sales_rep_id,
                SyncEventType::Error,
                data_type,
                0,
                SyncStatus::Failed,
                Some(message),
                json!({}),
            )
            .await;

        if let Err(e) = outcome {
            tracing::error!("🔥 Falha ao registrar log de erro de sincronização: {}", e);
        }
    }

    // Consulta e limpeza propagam erro normalmente: aqui quem chama é a
    // API administrativa, não o fluxo de importação.
    pub async fn list(&self, sales_rep_id: Uuid) -> Result<Vec<SyncLogEntry>, AppError> {
        self.repo.list_by_rep(sales_rep_id).await
    }

    pub async fn clear(&self, sales_rep_id: Uuid) -> Result<u64, AppError> {
        self.repo.clear_by_rep(sales_rep_id).await
    }
}
