//! Local development server
//!
//! Every HTTP request goes through the same normalization and dispatcher the
//! Lambda entry point uses, so routing and rendering behave identically.

use axum::{
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::router;
use crate::state::AppState;

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Build the router serving the catalogue
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(gateway_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to the configured port and serve until the process exits
pub async fn serve(state: Arc<AppState>) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        "Game catalogue listening on http://{}{}",
        addr,
        state.route_prefix()
    );

    axum::serve(listener, app(state)).await?;
    Ok(())
}

async fn gateway_handler(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let body_bytes = match axum::body::to_bytes(request.into_body(), MAX_BODY_BYTES).await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!("Failed to read body: {}", e);
            return (StatusCode::BAD_REQUEST, "Failed to read body").into_response();
        }
    };

    let body = if body_bytes.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(&body_bytes).to_string())
    };

    let normalized =
        game_catalogue_sdk::Request::normalize(method, &path, body, false, state.route_prefix());

    let sdk_response = match normalized {
        Ok(request) => router::dispatch(&state, request).await,
        Err(err) => router::error_response(&state, &err),
    };

    let mut builder = Response::builder()
        .status(StatusCode::from_u16(sdk_response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR));
    for (key, value) in &sdk_response.headers {
        builder = builder.header(key, value);
    }

    match builder.body(Body::from(sdk_response.body)) {
        Ok(response) => response,
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to build response").into_response(),
    }
}
