//! Routing of normalized requests to handlers
//!
//! Every failure is turned into a rendered error page here, so callers always
//! get a response envelope back.

use game_catalogue_sdk::{GatewayEvent, HandlerError, Request, Response};

use crate::handlers;
use crate::paths;
use crate::render::Page;
use crate::state::AppState;

/// Handler selected for a (method, path) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    ListOwned,
    ListWishlist,
    ListPlatform(String),
    AddGame,
    AddToWishlist,
    MarkPurchased,
    DeleteGame,
    DeleteFromWishlist,
    NotFound,
}

impl Route {
    /// Method matching is exact; any GET path other than `/` and `/wishlist`
    /// names a platform.
    pub fn resolve(method: &str, path: &str) -> Self {
        match (method, path) {
            ("GET", "/") => Route::ListOwned,
            ("GET", "/wishlist") => Route::ListWishlist,
            ("GET", other) => Route::ListPlatform(paths::decode_segment(other.trim_start_matches('/'))),
            ("POST", "/add") => Route::AddGame,
            ("POST", "/wishlist/add") => Route::AddToWishlist,
            ("POST", "/wishlist/purchased") => Route::MarkPurchased,
            ("DELETE", "/delete") => Route::DeleteGame,
            ("DELETE", "/wishlist/delete") => Route::DeleteFromWishlist,
            _ => Route::NotFound,
        }
    }
}

/// Normalize a gateway event and dispatch it
pub async fn handle_event(state: &AppState, event: GatewayEvent) -> Response {
    match event.into_request(state.route_prefix()) {
        Ok(request) => dispatch(state, request).await,
        Err(err) => error_response(state, &err),
    }
}

/// Route a normalized request and run its handler
pub async fn dispatch(state: &AppState, request: Request) -> Response {
    let route = Route::resolve(&request.method, &request.path);
    tracing::info!(
        method = %request.method,
        path = %request.path,
        route = ?route,
        "Using the path"
    );

    match handlers::handle(state, route, &request).await {
        Ok(response) => response,
        Err(err) => error_response(state, &err),
    }
}

/// Render `err` as an error page, falling back to plain text if that fails too
pub fn error_response(state: &AppState, err: &HandlerError) -> Response {
    let status_code = err.status_code();
    let message = err.to_string();

    if status_code >= 500 {
        tracing::error!(status_code, "Error: {}", message);
    } else {
        tracing::info!(status_code, "Unknown method or path");
    }

    let page = Page::Error {
        status_code,
        message: &message,
    };

    state.renderer.respond(&page).unwrap_or_else(|render_err| {
        tracing::error!("Failed to render error page: {}", render_err);
        Response::text(status_code, message.clone())
    })
}
