// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{common::error::AppError, config::AppState, models::auth::SalesRep};

// O guard das rotas de sincronização: valida o token do aparelho ANTES de
// qualquer pedido do lote ser tocado. Rejeição aqui é erro de nível de
// lote: nada é processado, e a trilha de auditoria recebe um registro de
// erro (melhor esforço).
pub async fn sync_guard(
    State(app_state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(TypedHeader(Authorization(bearer))) = bearer else {
        app_state
            .sync_log_service
            .register_error(None, "auth", "Requisição sem cabeçalho Authorization.")
            .await;
        return Err(AppError::Unauthorized);
    };

    match app_state
        .sync_auth_service
        .authenticate_token(bearer.token())
        .await
    {
        Ok(rep) => {
            // Insere o vendedor nos "extensions" da requisição
            request.extensions_mut().insert(rep);
            Ok(next.run(request).await)
        }
        Err(err) => {
            app_state
                .sync_log_service
                .register_error(None, "auth", &err.to_string())
                .await;
            Err(err)
        }
    }
}

// Extrator para obter o vendedor autenticado diretamente nos handlers
pub struct AuthenticatedRep(pub SalesRep);

impl<S> FromRequestParts<S> for AuthenticatedRep
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SalesRep>()
            .cloned()
            .map(AuthenticatedRep)
            .ok_or(AppError::Unauthorized)
    }
}
