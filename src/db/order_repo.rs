// src/db/order_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        orders::{Order, OrderItem, OrderStatus, PaymentStatus},
        sync::InboundOrderItem,
    },
};

// Primitivas de escrita do importador. Durante a ingestão este repositório
// é o ÚNICO escritor da tabela de pedidos; depois disso a posse passa para
// o restante da aplicação (CRUD comum).
#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  DEDUPLICAÇÃO
    // =========================================================================

    pub async fn exists_with_code(&self, code: i32) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM orders WHERE code = $1)",
        )
        .bind(code)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn exists_with_mobile_id(&self, mobile_order_id: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM orders WHERE mobile_order_id = $1)",
        )
        .bind(mobile_order_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    // =========================================================================
    //  ALOCAÇÃO DE CÓDIGO
    // =========================================================================

    // Próximo código sequencial para pedidos que chegam sem código próprio.
    // `nextval` é atômico no Postgres, então uploads concorrentes nunca
    // recebem o mesmo código.
    pub async fn next_order_code(&self) -> Result<i32, AppError> {
        let code = sqlx::query_scalar::<_, i32>("SELECT nextval('order_code_seq')::INT")
            .fetch_one(&self.pool)
            .await?;

        Ok(code)
    }

    // =========================================================================
    //  INSERÇÃO E COMPENSAÇÃO
    // =========================================================================

    // Insere o cabeçalho do pedido. Violação de unicidade (código ou id
    // mobile) vira UniqueConstraintViolation para o importador reclassificar
    // como duplicado: é a corrida check-then-act perdendo para outro upload.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert_order(
        &self,
        code: i32,
        mobile_order_id: Option<&str>,
        customer_id: Uuid,
        sales_rep_id: Uuid,
        order_date: DateTime<Utc>,
        total: Decimal,
        status: OrderStatus,
        payment_status: PaymentStatus,
        delivery_address: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Order, AppError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (
                code, mobile_order_id, customer_id, sales_rep_id, order_date,
                total, status, payment_status, delivery_address, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING
                id, code, mobile_order_id, customer_id, sales_rep_id, order_date,
                total, status, payment_status, delivery_address, notes, created_at
            "#,
        )
        .bind(code)
        .bind(mobile_order_id)
        .bind(customer_id)
        .bind(sales_rep_id)
        .bind(order_date)
        .bind(total)
        .bind(status)
        .bind(payment_status)
        .bind(delivery_address)
        .bind(notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(format!(
                        "Já existe pedido com o código {}.",
                        code
                    ));
                }
            }
            e.into()
        })?;

        Ok(order)
    }

    // Insere TODOS os itens do pedido como uma unidade: ou a transação
    // inteira commita, ou nada fica gravado e o chamador compensa o
    // cabeçalho com `delete_order`.
    pub async fn insert_order_items(
        &self,
        order_id: Uuid,
        items: &[InboundOrderItem],
    ) -> Result<Vec<OrderItem>, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut inserted = Vec::with_capacity(items.len());
        for item in items {
            let row = self.insert_order_item(&mut *tx, order_id, item).await?;
            inserted.push(row);
        }

        tx.commit().await?;

        Ok(inserted)
    }

    async fn insert_order_item<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        item: &InboundOrderItem,
    ) -> Result<OrderItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, OrderItem>(
            r#"
            INSERT INTO order_items (
                order_id, product_id, product_name, product_code,
                quantity, unit_price, total
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                id, order_id, product_id, product_name, product_code,
                quantity, unit_price, total, created_at
            "#,
        )
        .bind(order_id)
        .bind(item.product_id)
        .bind(&item.product_name)
        .bind(&item.product_code)
        .bind(item.quantity)
        .bind(item.unit_price)
        .bind(item.total)
        .fetch_one(executor)
        .await?;

        Ok(row)
    }

    // Delete compensatório do cabeçalho quando a inserção dos itens falha.
    // O ON DELETE CASCADE garante que nenhum item órfão sobrevive.
    pub async fn delete_order(&self, order_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(order_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
