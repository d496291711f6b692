// src/handlers/sync.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedRep,
    models::sync::{
        DeviceSnapshot, SyncLogEntry, UploadOrdersPayload, UploadOrdersResponse,
    },
};

// =============================================================================
//  1. UPLOAD DE PEDIDOS (aparelho -> sistema de registro)
// =============================================================================

// POST /api/sync/orders
//
// A resposta é 200 sempre que o lote foi PROCESSADO: rejeições individuais
// são dados do corpo, não erro de protocolo. 401/400 só acontecem antes de
// qualquer pedido ser tocado.
#[utoipa::path(
    post,
    path = "/api/sync/orders",
    tag = "Sync",
    request_body = UploadOrdersPayload,
    responses(
        (status = 200, description = "Lote processado (sucesso parcial vai no corpo)", body = UploadOrdersResponse),
        (status = 400, description = "Envelope malformado ou lote vazio"),
        (status = 401, description = "Token de sincronização recusado")
    ),
    security(("sync_token" = []))
)]
pub async fn upload_orders(
    State(app_state): State<AppState>,
    rep: AuthenticatedRep,
    Json(payload): Json<UploadOrdersPayload>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        // Erro de nível de lote: registra na auditoria e aborta sem tocar
        // em pedido nenhum.
        app_state
            .sync_log_service
            .register_error(Some(rep.0.id), "orders", "Lote de pedidos vazio ou malformado.")
            .await;
        return Err(AppError::ValidationError(validation_errors));
    }

    let results = app_state
        .sync_service
        .import_batch(&rep.0, &payload.orders)
        .await?;

    let message = format!(
        "Sincronização concluída: {} pedidos importados, {} recusados.",
        results.imported, results.failed
    );

    Ok(Json(UploadOrdersResponse {
        success: true,
        message,
        results,
    }))
}

// =============================================================================
//  2. PROVISIONAMENTO INICIAL (primeira sincronização)
// =============================================================================

// GET /api/sync/first-sync/{rep_code}
//
// Caminho legado: o código do vendedor é a credencial. O aparelho chama
// isso uma única vez, antes de existir token, para baixar o pacote offline.
#[utoipa::path(
    get,
    path = "/api/sync/first-sync/{rep_code}",
    tag = "Sync",
    responses(
        (status = 200, description = "Pacote de provisionamento do aparelho", body = DeviceSnapshot),
        (status = 404, description = "Vendedor desconhecido ou inativo")
    ),
    params(
        ("rep_code" = i32, Path, description = "Código numérico do vendedor")
    )
)]
pub async fn first_sync(
    State(app_state): State<AppState>,
    Path(rep_code): Path<i32>,
) -> Result<Json<DeviceSnapshot>, AppError> {
    let snapshot = app_state.snapshot_service.build_snapshot(rep_code).await?;
    Ok(Json(snapshot))
}

// =============================================================================
//  3. TRILHA DE AUDITORIA
// =============================================================================

// GET /api/sync/logs
#[utoipa::path(
    get,
    path = "/api/sync/logs",
    tag = "Sync",
    responses(
        (status = 200, description = "Histórico de sincronização do vendedor, mais recente primeiro", body = [SyncLogEntry]),
        (status = 401, description = "Token de sincronização recusado")
    ),
    security(("sync_token" = []))
)]
pub async fn list_sync_logs(
    State(app_state): State<AppState>,
    rep: AuthenticatedRep,
) -> Result<Json<Vec<SyncLogEntry>>, AppError> {
    let entries = app_state.sync_log_service.list(rep.0.id).await?;
    Ok(Json(entries))
}

// DELETE /api/sync/logs
//
// Limpeza administrativa do histórico. Não afeta nenhuma garantia de
// correção do pipeline: os pedidos importados ficam onde estão.
#[utoipa::path(
    delete,
    path = "/api/sync/logs",
    tag = "Sync",
    responses(
        (status = 204, description = "Histórico do vendedor removido"),
        (status = 401, description = "Token de sincronização recusado")
    ),
    security(("sync_token" = []))
)]
pub async fn clear_sync_logs(
    State(app_state): State<AppState>,
    rep: AuthenticatedRep,
) -> Result<impl IntoResponse, AppError> {
    let removed = app_state.sync_log_service.clear(rep.0.id).await?;
    tracing::info!("🧹 Histórico de sincronização limpo: {} registros do vendedor {}", removed, rep.0.code);
    Ok(StatusCode::NO_CONTENT)
}
