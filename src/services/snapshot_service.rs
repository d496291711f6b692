// src/services/snapshot_service.rs

use chrono::Utc;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, CrmRepository, SalesRepRepository},
    models::sync::DeviceSnapshot,
    services::sync_log_service::SyncLogService,
};

// Monta o pacote de provisionamento que um aparelho recém-instalado baixa
// antes de conseguir operar offline. Diferente do importador, aqui não
// existe sucesso parcial: ou o snapshot inteiro sai, ou nada sai.
#[derive(Clone)]
pub struct SnapshotService {
    sales_rep_repo: SalesRepRepository,
    crm_repo: CrmRepository,
    catalog_repo: CatalogRepository,
    sync_log: SyncLogService,
}

impl SnapshotService {
    pub fn new(
        sales_rep_repo: SalesRepRepository,
        crm_repo: CrmRepository,
        catalog_repo: CatalogRepository,
        sync_log: SyncLogService,
    ) -> Self {
        Self {
            sales_rep_repo,
            crm_repo,
            catalog_repo,
            sync_log,
        }
    }

    pub async fn build_snapshot(&self, rep_code: i32) -> Result<DeviceSnapshot, AppError> {
        // Revalida o vendedor na hora da montagem: uma credencial pode ter
        // sobrevivido ao desligamento do seu dono.
        let Some(rep) = self.sales_rep_repo.find_active_by_code(rep_code).await? else {
            self.sync_log
                .register_error(
                    None,
                    "primeira_sincronizacao",
                    &format!("Vendedor de código {} não encontrado ou inativo.", rep_code),
                )
                .await;
            return Err(AppError::SalesRepNotFound);
        };

        let products = self.catalog_repo.list_active_products().await?;
        let customers = self.crm_repo.list_customers_by_rep(rep.id).await?;
        let routes = self.crm_repo.list_routes_by_rep(rep.id).await?;
        let price_tables = self.catalog_repo.list_active_price_tables().await?;
        let payment_terms = self.catalog_repo.list_active_payment_terms().await?;

        let snapshot = DeviceSnapshot {
            sales_rep: rep,
            products,
            customers,
            routes,
            price_tables,
            payment_terms,
            generated_at: Utc::now(),
        };

        tracing::info!(
            "✅ Snapshot montado para o vendedor {}: {} produtos, {} clientes",
            snapshot.sales_rep.code,
            snapshot.products.len(),
            snapshot.customers.len()
        );

        self.sync_log
            .register_download(snapshot.sales_rep.id, snapshot.record_count())
            .await;

        Ok(snapshot)
    }
}
