// src/db/crm_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::crm::{Customer, DeliveryRoute},
};

#[derive(Clone)]
pub struct CrmRepository {
    pool: PgPool,
}

impl CrmRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Checagem referencial usada pelo validador do importador.
    pub async fn customer_exists(&self, id: Uuid) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM customers WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    // A carteira do vendedor, para o snapshot de provisionamento.
    pub async fn list_customers_by_rep(&self, sales_rep_id: Uuid) -> Result<Vec<Customer>, AppError> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT
                id, sales_rep_id, name, trade_name, document,
                phone, address, city, state, active, created_at, updated_at
            FROM customers
            WHERE sales_rep_id = $1 AND active = TRUE
            ORDER BY name ASC
            "#,
        )
        .bind(sales_rep_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    pub async fn list_routes_by_rep(&self, sales_rep_id: Uuid) -> Result<Vec<DeliveryRoute>, AppError> {
        let routes = sqlx::query_as::<_, DeliveryRoute>(
            r#"
            SELECT id, sales_rep_id, name, weekday, active, created_at
            FROM delivery_routes
            WHERE sales_rep_id = $1 AND active = TRUE
            ORDER BY weekday ASC, name ASC
            "#,
        )
        .bind(sales_rep_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(routes)
    }
}
