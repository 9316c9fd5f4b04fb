pub mod docs;
pub mod result;
pub mod routes;
pub mod state;
use std::{net::SocketAddr, time::Duration};

use anyhow::{Context, Result};
use axum::{
    error_handling::HandleErrorLayer,
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    BoxError, Json, Router,
};
use docs::ApiDoc;
use serde_json::json;
use state::AppState;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(|| async { "BGLD holdings portal" }))
        .merge(routes::holdings::router())
        .merge(routes::profile::router())
        .merge(routes::wallet::router())
        .merge(routes::admin::router())
        .merge(routes::project::router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .timeout(request_timeout),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .fallback(handler_404)
}

pub async fn main(state: AppState, addr: SocketAddr, request_timeout: Duration) -> Result<()> {
    let app = build_router(state, request_timeout);

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn handler_404(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("No route for {}", uri.path()) })),
    )
}

async fn handle_timeout_error(method: Method, uri: Uri, err: BoxError) -> impl IntoResponse {
    let (status, message) = if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            format!("`{method} {uri}` timed out"),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("`{method} {uri}` failed with {err}"),
        )
    };
    (status, Json(json!({ "error": message })))
}
