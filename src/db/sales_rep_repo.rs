// src/db/sales_rep_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{auth::SalesRep, sync::SyncGrant},
};

// Repositório de vendedores e das credenciais de sincronização emitidas
// para os aparelhos. Só leitura: o pipeline nunca cria nem revoga nada aqui.
#[derive(Clone)]
pub struct SalesRepRepository {
    pool: PgPool,
}

impl SalesRepRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<SalesRep>, AppError> {
        let maybe_rep = sqlx::query_as::<_, SalesRep>(
            r#"
            SELECT id, code, name, email, phone, active, created_at, updated_at
            FROM sales_reps
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(maybe_rep)
    }

    // Caminho legado: o vendedor digita o próprio código no aparelho.
    // Vendedor desativado é tratado como inexistente.
    pub async fn find_active_by_code(&self, code: i32) -> Result<Option<SalesRep>, AppError> {
        let maybe_rep = sqlx::query_as::<_, SalesRep>(
            r#"
            SELECT id, code, name, email, phone, active, created_at, updated_at
            FROM sales_reps
            WHERE code = $1 AND active = TRUE
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(maybe_rep)
    }

    pub async fn find_grant_by_token(&self, token: &str) -> Result<Option<SyncGrant>, AppError> {
        let maybe_grant = sqlx::query_as::<_, SyncGrant>(
            r#"
            SELECT id, token, sales_rep_id, active, expires_at, created_at
            FROM sync_grants
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(maybe_grant)
    }
}
