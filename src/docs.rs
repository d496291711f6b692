// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Sync ---
        handlers::sync::upload_orders,
        handlers::sync::first_sync,
        handlers::sync::list_sync_logs,
        handlers::sync::clear_sync_logs,
    ),
    components(
        schemas(
            // --- Payloads ---
            models::sync::UploadOrdersPayload,
            models::sync::InboundOrder,
            models::sync::InboundOrderItem,

            // --- Respostas ---
            models::sync::UploadOrdersResponse,
            models::sync::ImportResults,
            models::sync::DeviceSnapshot,
            models::sync::SyncLogEntry,
            models::sync::SyncEventType,
            models::sync::SyncStatus,

            // --- Cadastro / catálogo ---
            models::auth::SalesRep,
            models::crm::Customer,
            models::crm::DeliveryRoute,
            models::catalog::CatalogProduct,
            models::catalog::PriceTable,
            models::catalog::PaymentTerm,

            // --- Pedidos ---
            models::orders::Order,
            models::orders::OrderItem,
            models::orders::OrderStatus,
            models::orders::PaymentStatus,
        )
    ),
    tags(
        (name = "Sync", description = "Sincronização com os aparelhos da força de vendas")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "sync_token",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
