// src/services/sync_service.rs
//
// O importador de lotes: o coração da sincronização mobile. Cada pedido do
// lote atravessa sozinho o funil validação -> deduplicação -> inserção, e o
// destino de um pedido nunca contamina os irmãos: um pedido malformado não
// pode bloquear os 49 bons do mesmo upload.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CrmRepository, OrderRepository},
    models::{
        auth::SalesRep,
        orders::{Order, OrderStatus, PaymentStatus},
        sync::{ImportResults, InboundOrder, InboundOrderItem, OrderRejection},
    },
    services::sync_log_service::SyncLogService,
};

#[derive(Clone)]
pub struct SyncService {
    crm_repo: CrmRepository,
    order_repo: OrderRepository,
    sync_log: SyncLogService,
}

impl SyncService {
    pub fn new(
        crm_repo: CrmRepository,
        order_repo: OrderRepository,
        sync_log: SyncLogService,
    ) -> Self {
        Self {
            crm_repo,
            order_repo,
            sync_log,
        }
    }

    // Importa um lote inteiro. O lote nunca sofre rollback como um todo:
    // rejeições individuais viram dados do resumo devolvido ao aparelho.
    //
    // O processamento é estritamente sequencial. Se o mesmo lote trouxer a
    // mesma chave natural duas vezes, a primeira ocorrência vence e a
    // segunda cai na deduplicação contra o registro recém-persistido.
    pub async fn import_batch(
        &self,
        rep: &SalesRep,
        orders: &[InboundOrder],
    ) -> Result<ImportResults, AppError> {
        tracing::info!(
            "📦 Lote recebido: {} pedidos do vendedor {} ({})",
            orders.len(),
            rep.code,
            rep.name
        );

        let mut imported = 0u32;
        let mut failed = 0u32;
        let mut errors = Vec::new();

        for inbound in orders {
            match self.import_one(rep, inbound).await {
                Ok(order) => {
                    imported += 1;
                    tracing::info!("✅ Pedido {} importado (código {})", inbound.identifier(), order.code);
                }
                Err(rejection) => {
                    failed += 1;
                    tracing::warn!("⚠️ Pedido {} recusado: {}", inbound.identifier(), rejection);
                    errors.push(format!("{}: {}", inbound.identifier(), rejection));
                }
            }
        }

        let results = ImportResults {
            imported,
            failed,
            errors,
        };

        // Exatamente um registro de auditoria por lote, melhor esforço.
        self.sync_log.register_upload(rep.id, &results).await;

        Ok(results)
    }

    // O funil de um único pedido. Qualquer falha aqui é uma rejeição DESTE
    // pedido; erros de banco degradam para WriteError em vez de abortar o
    // lote.
    async fn import_one(
        &self,
        rep: &SalesRep,
        inbound: &InboundOrder,
    ) -> Result<Order, OrderRejection> {
        // 1. Validação referencial
        let customer_id = self.validate_order(rep, inbound).await?;

        // 2. Deduplicação (pré-check; a UNIQUE do banco é a garantia real)
        if self.is_duplicate(inbound).await? {
            return Err(OrderRejection::DuplicateOrder);
        }

        // 3. Código natural do aparelho, ou o próximo da sequência
        let code = match inbound.code {
            Some(code) => code,
            None => self
                .order_repo
                .next_order_code()
                .await
                .map_err(write_rejection)?,
        };

        // 4. Cabeçalho. Violação de unicidade aqui é outro upload ganhando
        // a corrida check-then-act: reclassifica como duplicado.
        let order = self
            .order_repo
            .insert_order(
                code,
                inbound.mobile_order_id.as_deref(),
                customer_id,
                rep.id,
                inbound.date.unwrap_or_else(Utc::now),
                inbound.total,
                inbound.status.unwrap_or(OrderStatus::Pending),
                inbound.payment_status.unwrap_or(PaymentStatus::Pending),
                inbound.delivery_address.as_deref(),
                inbound.notes.as_deref(),
            )
            .await
            .map_err(write_rejection)?;

        // 5. Itens como uma unidade. Se falhar, compensa o cabeçalho para
        // manter o invariante "pedido sem item não existe".
        if let Err(item_err) = self
            .order_repo
            .insert_order_items(order.id, &inbound.items)
            .await
        {
            if let Err(del_err) = self.order_repo.delete_order(order.id).await {
                tracing::error!(
                    "🔥 Falha ao compensar cabeçalho do pedido {}: {}",
                    order.id,
                    del_err
                );
            }
            return Err(write_rejection(item_err));
        }

        Ok(order)
    }

    // Validação referencial de UM pedido, na ordem do contrato, parando na
    // primeira falha. Nunca consulta outros pedidos do lote: é função só do
    // pedido mais os dados de referência.
    async fn validate_order(
        &self,
        rep: &SalesRep,
        inbound: &InboundOrder,
    ) -> Result<Uuid, OrderRejection> {
        // 1. Cliente presente e existente no sistema de registro
        let customer_id = inbound
            .customer_id
            .ok_or(OrderRejection::CustomerNotFound)?;
        let exists = self
            .crm_repo
            .customer_exists(customer_id)
            .await
            .map_err(write_rejection)?;
        if !exists {
            return Err(OrderRejection::CustomerNotFound);
        }

        // 2 e 3. Itens: não-vazio, quantidades e preços dentro dos limites
        check_items(&inbound.items)?;

        // 4. O vendedor atribuído (vem da credencial) segue ativo
        if !rep.active {
            return Err(OrderRejection::SalesRepInactive);
        }

        Ok(customer_id)
    }

    // Um pedido é duplicado se QUALQUER uma das identidades naturais já
    // estiver persistida. São identidades alternativas do mesmo documento,
    // não uma chave composta. Sem nenhuma das duas o pedido é aceito como
    // inédito: aparelhos que omitem os dois campos abrem mão da proteção
    // exactly-once.
    async fn is_duplicate(&self, inbound: &InboundOrder) -> Result<bool, OrderRejection> {
        if let Some(code) = inbound.code {
            if self
                .order_repo
                .exists_with_code(code)
                .await
                .map_err(write_rejection)?
            {
                return Ok(true);
            }
        }

        if let Some(mobile_id) = &inbound.mobile_order_id {
            if self
                .order_repo
                .exists_with_mobile_id(mobile_id)
                .await
                .map_err(write_rejection)?
            {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

// Checagem pura dos itens (passos 2 e 3 da validação).
fn check_items(items: &[InboundOrderItem]) -> Result<(), OrderRejection> {
    if items.is_empty() {
        return Err(OrderRejection::EmptyOrder);
    }

    for (index, item) in items.iter().enumerate() {
        if item.quantity <= Decimal::ZERO {
            return Err(OrderRejection::InvalidItem {
                index,
                detail: "quantidade deve ser maior que zero".to_string(),
            });
        }
        if item.unit_price < Decimal::ZERO {
            return Err(OrderRejection::InvalidItem {
                index,
                detail: "preço unitário não pode ser negativo".to_string(),
            });
        }
    }

    Ok(())
}

// Traduz um erro de escrita na rejeição do pedido corrente. Violação de
// unicidade vira DuplicateOrder (nunca WriteError genérico); o resto carrega
// a causa subjacente para o diagnóstico no aparelho.
fn write_rejection(err: AppError) -> OrderRejection {
    match err {
        AppError::UniqueConstraintViolation(_) => OrderRejection::DuplicateOrder,
        AppError::DatabaseError(e) => OrderRejection::WriteError(e.to_string()),
        other => OrderRejection::WriteError(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i64, unit_price: i64) -> InboundOrderItem {
        InboundOrderItem {
            product_id: None,
            product_name: "Refrigerante Cola 2L".to_string(),
            product_code: Some("PRD-0001".to_string()),
            quantity: Decimal::from(quantity),
            unit_price: Decimal::from(unit_price),
            total: Decimal::from(quantity * unit_price),
        }
    }

    #[test]
    fn empty_item_list_is_rejected() {
        assert_eq!(check_items(&[]), Err(OrderRejection::EmptyOrder));
    }

    #[test]
    fn zero_quantity_reports_item_index() {
        let items = vec![item(2, 10), item(0, 10)];
        match check_items(&items) {
            Err(OrderRejection::InvalidItem { index, .. }) => assert_eq!(index, 1),
            other => panic!("esperava InvalidItem, veio {:?}", other),
        }
    }

    #[test]
    fn negative_unit_price_reports_item_index() {
        let items = vec![item(1, -5)];
        match check_items(&items) {
            Err(OrderRejection::InvalidItem { index, .. }) => assert_eq!(index, 0),
            other => panic!("esperava InvalidItem, veio {:?}", other),
        }
    }

    #[test]
    fn free_sample_with_zero_price_is_valid() {
        let items = vec![item(3, 0)];
        assert_eq!(check_items(&items), Ok(()));
    }

    #[test]
    fn unique_violation_becomes_duplicate_rejection() {
        let err = AppError::UniqueConstraintViolation("código 10042".to_string());
        assert_eq!(write_rejection(err), OrderRejection::DuplicateOrder);
    }

    #[test]
    fn other_database_errors_become_write_errors() {
        let err = AppError::DatabaseError(sqlx::Error::RowNotFound);
        match write_rejection(err) {
            OrderRejection::WriteError(_) => {}
            other => panic!("esperava WriteError, veio {:?}", other),
        }
    }
}
