// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// O vendedor externo. O `code` é o número que o vendedor digita no aparelho
// no fluxo legado de provisionamento (antes de existir token).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesRep {
    pub id: Uuid,
    #[schema(example = 42)]
    pub code: i32,
    #[schema(example = "Carlos Andrade")]
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
