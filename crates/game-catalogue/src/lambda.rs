//! AWS Lambda entry point
//!
//! Accepts Function URL and API Gateway proxy events and replies in the same
//! envelope the event arrived in.

use game_catalogue_sdk::{GatewayEvent, GatewayResponse};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::sync::Arc;

use crate::router;
use crate::state::AppState;

/// Serve invocations until the runtime shuts the process down
pub async fn serve(state: Arc<AppState>) -> anyhow::Result<()> {
    tracing::info!("Starting Lambda runtime loop");

    run(service_fn(move |event: LambdaEvent<GatewayEvent>| {
        let state = state.clone();
        async move { function_handler(&state, event).await }
    }))
    .await
    .map_err(|e| anyhow::anyhow!(e))
}

async fn function_handler(
    state: &AppState,
    event: LambdaEvent<GatewayEvent>,
) -> Result<GatewayResponse, Error> {
    let (payload, context) = event.into_parts();
    let kind = payload.kind();
    tracing::debug!(request_id = %context.request_id, envelope = ?kind, "Received event");

    let response = router::handle_event(state, payload).await;
    Ok(GatewayResponse::new(kind, response)?)
}
