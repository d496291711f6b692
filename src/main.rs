//src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use rotavendas_backend::{
    config::AppState, docs::ApiDoc, handlers, middleware::auth::sync_guard,
};

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de sincronização protegidas pelo token do aparelho
    let sync_routes = Router::new()
        .route("/orders", post(handlers::sync::upload_orders))
        .route(
            "/logs",
            get(handlers::sync::list_sync_logs).delete(handlers::sync::clear_sync_logs),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            sync_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        // Provisionamento inicial: o código do vendedor é a credencial (legado),
        // então a rota fica FORA do guard de token.
        .route(
            "/api/sync/first-sync/{rep_code}",
            get(handlers::sync::first_sync),
        )
        .nest("/api/sync", sync_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
