// src/models/crm.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// O cliente atendido em campo. Cada cliente pertence à carteira de um
// vendedor (`sales_rep_id`), e é essa carteira que desce no snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub sales_rep_id: Option<Uuid>,

    #[schema(example = "Mercado Bom Preço LTDA")]
    pub name: String,
    pub trade_name: Option<String>,
    pub document: Option<String>,

    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,

    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Rota de entrega do vendedor. `weekday` segue o padrão 0 = domingo.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRoute {
    pub id: Uuid,
    pub sales_rep_id: Uuid,
    #[schema(example = "Zona Norte - Terça")]
    pub name: String,
    pub weekday: Option<i32>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
