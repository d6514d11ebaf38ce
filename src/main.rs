mod dto;
mod handlers;
mod models;
mod repository;
mod service;

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use std::{env, sync::Arc};

use handlers::rest;
use repository::{NoteStore, Repository};

use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use service::NoteService;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Fetch env variables
    let database_dsn =
        env::var("PG_DSN").expect("database dsn must be provided as an ENV variable");

    // Repository creation and migration
    let mut repo = Repository::new(database_dsn).await.unwrap_or_else(|e| {
        tracing::error!("Failed to establish database connection: {e}");
        panic!("failed to establish database connection: {e}");
    });

    repo.migrate().await.unwrap_or_else(|e| {
        tracing::error!("Failed to migrate database: {e}");
        panic!("failed to migrate database: {e}");
    });

    let repo_ptr: Arc<tokio::sync::Mutex<dyn NoteStore + Send>> =
        Arc::new(tokio::sync::Mutex::new(repo));

    // Service creation
    let service = Arc::new(NoteService::new(repo_ptr));

    // Router config
    let router = Router::new()
        .route("/", get(root))
        .nest("/api", rest::router(service))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tracing::info!("REST server starting, listening on {}", addr);

    axum::serve(listener, router).await.unwrap_or_else(|e| {
        tracing::error!("HTTP server error: {e}");
        panic!("failed to start HTTP server: {e}");
    });
}

async fn root() -> Response {
    (StatusCode::OK, "Hello from notes server!").into_response()
}
