//! Game Catalogue - Main entry point
//!
//! One binary, two ways to run:
//! - inside AWS Lambda, answering Function URL or API Gateway proxy events
//! - as a local HTTP server for development

mod config;
mod handlers;
mod lambda;
mod model;
mod paths;
mod render;
mod router;
mod server;
mod state;
mod store;

use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    init_tracing(config.is_lambda());

    tracing::info!("Configuration loaded: {:?}", config);

    let state = Arc::new(AppState::from_config(config).await?);

    if state.config.is_lambda() {
        lambda::serve(state).await
    } else {
        server::serve(state).await
    }
}

fn init_tracing(lambda: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,game_catalogue=debug".into());

    // CloudWatch stamps each line itself and does not render colors
    if lambda {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_ansi(false).without_time())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
