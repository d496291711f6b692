// src/models/orders.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums ---

// Mapeia o CREATE TYPE order_status do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
}

// --- O pedido persistido (sistema de registro) ---

// Invariante de escrita: um pedido nunca existe sem itens e vice-versa.
// Quem garante isso durante a importação é o SyncService (inserção dos
// itens em transação + delete compensatório do cabeçalho).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    #[schema(example = 10042)]
    pub code: i32,
    #[schema(example = "A7F3-0012")]
    pub mobile_order_id: Option<String>,
    pub customer_id: Uuid,
    pub sales_rep_id: Uuid,
    pub order_date: DateTime<Utc>,
    #[schema(example = "350.00")]
    pub total: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
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
    pub created_at: DateTime<Utc>,
}
