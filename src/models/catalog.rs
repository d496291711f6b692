// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Produto do catálogo já desnormalizado para o aparelho: o rótulo da
// unidade de medida vai embutido para a listagem offline não precisar
// de nenhum JOIN local.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: Uuid,
    #[schema(example = "PRD-0001")]
    pub code: String,
    #[schema(example = "Refrigerante Cola 2L")]
    pub name: String,
    #[schema(example = "CX")]
    pub unit_label: Option<String>,
    #[schema(example = "89.90")]
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceTable {
    pub id: Uuid,
    #[schema(example = "Tabela Atacado")]
    pub name: String,
    #[schema(example = "-5.00")]
    pub adjustment_percent: Decimal,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTerm {
    pub id: Uuid,
    #[schema(example = "28/56 dias")]
    pub description: String,
    #[schema(example = 2)]
    pub installments: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
