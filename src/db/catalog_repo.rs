// src/db/catalog_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::catalog::{CatalogProduct, PaymentTerm, PriceTable},
};

// Leituras do catálogo comercial para montar o snapshot do aparelho.
#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Catálogo ativo já desnormalizado: o rótulo da unidade vai junto
    // para o app não depender de nenhuma tabela auxiliar local.
    pub async fn list_active_products(&self) -> Result<Vec<CatalogProduct>, AppError> {
        let products = sqlx::query_as::<_, CatalogProduct>(
            r#"
            SELECT
                p.id, p.code, p.name,
                u.abbreviation AS unit_label,
                p.unit_price
            FROM products p
            LEFT JOIN units_of_measure u ON p.unit_id = u.id
            WHERE p.active = TRUE
            ORDER BY p.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    pub async fn list_active_price_tables(&self) -> Result<Vec<PriceTable>, AppError> {
        let tables = sqlx::query_as::<_, PriceTable>(
            r#"
            SELECT id, name, adjustment_percent, active, created_at
            FROM price_tables
            WHERE active = TRUE
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tables)
    }

    pub async fn list_active_payment_terms(&self) -> Result<Vec<PaymentTerm>, AppError> {
        let terms = sqlx::query_as::<_, PaymentTerm>(
            r#"
            SELECT id, description, installments, active, created_at
            FROM payment_terms
            WHERE active = TRUE
            ORDER BY installments ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(terms)
    }
}
