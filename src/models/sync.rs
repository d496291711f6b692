// src/models/sync.rs
//
// Tipos de fronteira do pipeline de sincronização mobile: o que o aparelho
// envia (lote de pedidos capturados offline), o que ele recebe de volta
// (resumo da importação / snapshot inicial) e a trilha de auditoria.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::auth::SalesRep;
use crate::models::catalog::{CatalogProduct, PaymentTerm, PriceTable};
use crate::models::crm::{Customer, DeliveryRoute};
use crate::models::orders::{OrderStatus, PaymentStatus};

// =============================================================================
//  PAYLOAD DE ENTRADA (aparelho -> servidor)
// =============================================================================

// Um pedido capturado offline, exatamente como o aparelho o enviou.
// Nunca é mutado pelo pipeline: só é transformado num pedido persistido.
//
// O aparelho pode mandar `code` (código atribuído externamente) e/ou
// `mobileOrderId` (identificador gerado pelo app). São identidades
// ALTERNATIVAS do mesmo documento lógico; sem nenhuma das duas o pedido
// fica fora da proteção de deduplicação.
//
// O vendedor dono do lote vem SEMPRE da credencial autenticada; nenhum
// campo do payload é confiável para atribuição.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InboundOrder {
    #[schema(example = 10042)]
    pub code: Option<i32>,
    #[schema(example = "A7F3-0012")]
    pub mobile_order_id: Option<String>,
    pub customer_id: Option<Uuid>,
    pub date: Option<DateTime<Utc>>,
    pub items: Vec<InboundOrderItem>,
    #[schema(example = "350.00")]
    pub total: Decimal,
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
}

impl InboundOrder {
    // Identificador usado nas mensagens de erro devolvidas ao aparelho.
    // Preferimos o id do app (é o que a tela do vendedor mostra).
    pub fn identifier(&self) -> String {
        if let Some(mobile_id) = &self.mobile_order_id {
            return mobile_id.clone();
        }
        match self.code {
            Some(code) => code.to_string(),
            None => "(sem identificador)".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InboundOrderItem {
    pub product_id: Option<Uuid>,
    #[schema(example = "Refrigerante Cola 2L")]
    pub product_name: String,
    #[schema(example = "PRD-0001")]
    pub product_code: Option<String>,
    #[schema(example = "2.0")]
    pub quantity: Decimal,
    #[schema(example = "89.90")]
    pub unit_price: Decimal,
    #[schema(example = "179.80")]
    pub total: Decimal,
}

// Envelope do upload. Lote vazio é erro de requisição (400), não um lote
// "vazio com sucesso".
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadOrdersPayload {
    #[validate(length(min = 1, message = "required"))]
    pub orders: Vec<InboundOrder>,
}

// =============================================================================
//  RESULTADO DA IMPORTAÇÃO (servidor -> aparelho)
// =============================================================================

// Motivos de rejeição de UM pedido dentro do lote. Isso é dado da resposta,
// não erro HTTP: um lote com 9 de 10 importados continua sendo um upload
// bem-sucedido com uma anomalia reportada.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderRejection {
    #[error("CustomerNotFound")]
    CustomerNotFound,

    #[error("EmptyOrder")]
    EmptyOrder,

    #[error("InvalidItem[{index}]: {detail}")]
    InvalidItem { index: usize, detail: String },

    #[error("SalesRepInactive")]
    SalesRepInactive,

    #[error("DuplicateOrder")]
    DuplicateOrder,

    #[error("WriteError: {0}")]
    WriteError(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportResults {
    #[schema(example = 9)]
    pub imported: u32,
    #[schema(example = 1)]
    pub failed: u32,
    #[schema(example = json!(["A7F3-0012: DuplicateOrder"]))]
    pub errors: Vec<String>,
}

impl ImportResults {
    pub fn status(&self) -> SyncStatus {
        if self.failed == 0 {
            SyncStatus::Completed
        } else {
            SyncStatus::Partial
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadOrdersResponse {
    pub success: bool,
    #[schema(example = "Sincronização concluída: 9 pedidos importados, 1 recusado.")]
    pub message: String,
    pub results: ImportResults,
}

// =============================================================================
//  SNAPSHOT DE PROVISIONAMENTO (primeira sincronização)
// =============================================================================

// Tudo que o aparelho precisa para operar offline: o perfil do vendedor,
// o catálogo ativo, a carteira de clientes, as rotas e as tabelas
// comerciais. Montado de uma vez só; não existe sucesso parcial aqui.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSnapshot {
    pub sales_rep: SalesRep,
    pub products: Vec<CatalogProduct>,
    pub customers: Vec<Customer>,
    pub routes: Vec<DeliveryRoute>,
    pub price_tables: Vec<PriceTable>,
    pub payment_terms: Vec<PaymentTerm>,
    pub generated_at: DateTime<Utc>,
}

impl DeviceSnapshot {
    // Contagem registrada na trilha de auditoria do download.
    pub fn record_count(&self) -> i32 {
        (self.products.len() + self.customers.len()) as i32
    }
}

// =============================================================================
//  CREDENCIAL E TRILHA DE AUDITORIA
// =============================================================================

// Credencial de sincronização emitida para um aparelho. O pipeline só lê;
// criação e revogação acontecem num fluxo administrativo à parte.
#[derive(Debug, Clone, FromRow)]
pub struct SyncGrant {
    pub id: Uuid,
    pub token: String,
    pub sales_rep_id: Uuid,
    pub active: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl SyncGrant {
    // Credencial revogada ou vencida nunca passa do gate.
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        self.active && now < self.expires_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "sync_event_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "lowercase")]
pub enum SyncEventType {
    Upload,
    Download,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "sync_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Completed,
    Partial,
    Failed,
}

// Uma linha da trilha de auditoria. Append-only: criada uma vez por
// invocação do pipeline e nunca editada.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncLogEntry {
    pub id: Uuid,
    pub sales_rep_id: Option<Uuid>,
    pub event_type: SyncEventType,
    #[schema(example = "orders")]
    pub data_type: String,
    #[schema(example = 10)]
    pub records_count: i32,
    pub status: SyncStatus,
    pub error_message: Option<String>,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn grant(active: bool, expires_in_hours: i64) -> SyncGrant {
        let now = Utc::now();
        SyncGrant {
            id: Uuid::new_v4(),
            token: "tok-123".to_string(),
            sales_rep_id: Uuid::new_v4(),
            active,
            expires_at: now + Duration::hours(expires_in_hours),
            created_at: now,
        }
    }

    #[test]
    fn grant_usable_only_when_active_and_unexpired() {
        let now = Utc::now();
        assert!(grant(true, 24).is_usable(now));
        assert!(!grant(true, -1).is_usable(now));
        assert!(!grant(false, 24).is_usable(now));
        assert!(!grant(false, -1).is_usable(now));
    }

    #[test]
    fn identifier_prefers_mobile_order_id() {
        let mut order: InboundOrder = serde_json::from_value(serde_json::json!({
            "mobileOrderId": "M1",
            "code": 77,
            "items": [],
            "total": 0.0
        }))
        .unwrap();
        assert_eq!(order.identifier(), "M1");

        order.mobile_order_id = None;
        assert_eq!(order.identifier(), "77");

        order.code = None;
        assert_eq!(order.identifier(), "(sem identificador)");
    }

    #[test]
    fn inbound_order_wire_format_is_camel_case() {
        let json = serde_json::json!({
            "mobileOrderId": "A7F3-0012",
            "customerId": "550e8400-e29b-41d4-a716-446655440000",
            "items": [{
                "productName": "Refrigerante Cola 2L",
                "productCode": "PRD-0001",
                "quantity": 2.0,
                "unitPrice": 10.0,
                "total": 20.0
            }],
            "total": 20.0,
            "status": "PENDING",
            "paymentStatus": "PENDING"
        });

        let order: InboundOrder = serde_json::from_value(json).unwrap();
        assert_eq!(order.mobile_order_id.as_deref(), Some("A7F3-0012"));
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, Decimal::from(2));
        assert_eq!(order.status, Some(OrderStatus::Pending));
    }

    #[test]
    fn empty_batch_fails_envelope_validation() {
        let payload = UploadOrdersPayload { orders: vec![] };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn rejection_messages_are_stable_tokens() {
        assert_eq!(OrderRejection::DuplicateOrder.to_string(), "DuplicateOrder");
        assert_eq!(OrderRejection::EmptyOrder.to_string(), "EmptyOrder");
        assert_eq!(
            OrderRejection::InvalidItem {
                index: 2,
                detail: "quantidade deve ser maior que zero".to_string()
            }
            .to_string(),
            "InvalidItem[2]: quantidade deve ser maior que zero"
        );
    }

    #[test]
    fn batch_status_is_partial_when_any_order_failed() {
        let ok = ImportResults { imported: 3, failed: 0, errors: vec![] };
        assert_eq!(ok.status(), SyncStatus::Completed);

        let partial = ImportResults {
            imported: 2,
            failed: 1,
            errors: vec!["M1: DuplicateOrder".to_string()],
        };
        assert_eq!(partial.status(), SyncStatus::Partial);
    }
}
