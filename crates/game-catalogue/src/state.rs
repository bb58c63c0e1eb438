//! Process-wide state shared by every invocation

use anyhow::Result;
use std::sync::Arc;

use crate::config::{AppConfig, StoreKind};
use crate::render::{HtmlRenderer, Renderer};
use crate::store::{CatalogueStore, DynamoDbStore, MemoryStore};

/// Shared application state
///
/// Built once at startup and read-only afterwards. Handlers receive it by
/// reference, so tests can swap the store or renderer for fakes.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn CatalogueStore>,
    pub renderer: Arc<dyn Renderer>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn CatalogueStore>, renderer: Arc<dyn Renderer>) -> Self {
        Self {
            config,
            store,
            renderer,
        }
    }

    /// Build the store and renderer described by `config`
    pub async fn from_config(config: AppConfig) -> Result<Self> {
        let store: Arc<dyn CatalogueStore> = match config.store {
            StoreKind::DynamoDb => {
                let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
                let store = DynamoDbStore::new(&sdk_config, &config);
                tracing::info!(table = %store.table_name(), "Using DynamoDB store");
                Arc::new(store)
            }
            StoreKind::Memory => {
                tracing::warn!("Using in-memory store, records are lost on restart");
                Arc::new(MemoryStore::new())
            }
        };

        let renderer = Arc::new(HtmlRenderer::new(config.route_prefix.clone()));
        Ok(Self::new(config, store, renderer))
    }

    /// Memory-backed state with the built-in templates
    pub fn in_memory(config: AppConfig) -> Self {
        let renderer = Arc::new(HtmlRenderer::new(config.route_prefix.clone()));
        Self::new(config, Arc::new(MemoryStore::new()), renderer)
    }

    pub fn route_prefix(&self) -> &str {
        &self.config.route_prefix
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("store", &self.store.backend())
            .finish()
    }
}
