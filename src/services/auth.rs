// src/services/auth.rs

use chrono::Utc;

use crate::{
    common::error::AppError,
    db::SalesRepRepository,
    models::auth::SalesRep,
};

// O gate de credenciais do pipeline de sincronização. Resolve uma credencial
// (token do aparelho, ou código de vendedor no caminho legado) para a
// identidade do vendedor que vai assinar o lote. Só leitura, sem efeitos.
#[derive(Clone)]
pub struct SyncAuthService {
    sales_rep_repo: SalesRepRepository,
}

impl SyncAuthService {
    pub fn new(sales_rep_repo: SalesRepRepository) -> Self {
        Self { sales_rep_repo }
    }

    // Caminho do token: procura a credencial emitida para o aparelho e
    // recusa com Unauthorized se ela não existir, estiver revogada ou
    // vencida. O vendedor resolvido também precisa continuar ativo, pois a
    // credencial pode ter sobrevivido ao desligamento do dono.
    pub async fn authenticate_token(&self, token: &str) -> Result<SalesRep, AppError> {
        let grant = self
            .sales_rep_repo
            .find_grant_by_token(token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !grant.is_usable(Utc::now()) {
            return Err(AppError::Unauthorized);
        }

        let rep = self
            .sales_rep_repo
            .find_by_id(grant.sales_rep_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !rep.active {
            return Err(AppError::Unauthorized);
        }

        Ok(rep)
    }

    // Caminho legado: o vendedor se identifica pelo código numérico
    // impresso no crachá. Usado só pelo provisionamento inicial.
    pub async fn authenticate_rep_code(&self, code: i32) -> Result<SalesRep, AppError> {
        self.sales_rep_repo
            .find_active_by_code(code)
            .await?
            .ok_or(AppError::SalesRepNotFound)
    }
}
