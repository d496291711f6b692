// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::db::{
    CatalogRepository, CrmRepository, OrderRepository, SalesRepRepository, SyncLogRepository,
};
use crate::services::{
    auth::SyncAuthService, snapshot_service::SnapshotService, sync_log_service::SyncLogService,
    sync_service::SyncService,
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub sync_auth_service: SyncAuthService,
    pub sync_service: SyncService,
    pub snapshot_service: SnapshotService,
    pub sync_log_service: SyncLogService,
}

impl AppState {
    // A assinatura retorna um Result: se a configuração falhar, quem decide
    // o que fazer é o main (que não deve subir o servidor).
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        // .expect() é aceitável aqui: sem DATABASE_URL a aplicação não tem
        // como funcionar.
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool))
    }

    // Monta o gráfico de dependências a partir de uma pool já aberta.
    // Os testes de integração entram por aqui.
    pub fn from_pool(db_pool: PgPool) -> Self {
        let sales_rep_repo = SalesRepRepository::new(db_pool.clone());
        let crm_repo = CrmRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let order_repo = OrderRepository::new(db_pool.clone());
        let sync_log_repo = SyncLogRepository::new(db_pool.clone());

        let sync_log_service = SyncLogService::new(sync_log_repo);
        let sync_auth_service = SyncAuthService::new(sales_rep_repo.clone());
        let sync_service = SyncService::new(
            crm_repo.clone(),
            order_repo,
            sync_log_service.clone(),
        );
        let snapshot_service = SnapshotService::new(
            sales_rep_repo,
            crm_repo,
            catalog_repo,
            sync_log_service.clone(),
        );

        Self {
            db_pool,
            sync_auth_service,
            sync_service,
            snapshot_service,
            sync_log_service,
        }
    }
}
