//! Application configuration

use anyhow::{bail, Result};
use std::env;
use std::str::FromStr;

/// Which storage backend holds the catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    DynamoDb,
    Memory,
}

impl FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dynamodb" | "dynamo" => Ok(StoreKind::DynamoDb),
            "memory" => Ok(StoreKind::Memory),
            other => bail!("Unknown store kind '{}', expected 'dynamodb' or 'memory'", other),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// DynamoDB table holding every game record
    pub table_name: String,

    /// Path prefix added by the upstream reverse proxy (e.g. "/gc")
    pub route_prefix: String,

    /// Storage backend
    pub store: StoreKind,

    /// Endpoint override for DynamoDB (LocalStack, dynamodb-local)
    pub dynamodb_endpoint: Option<String>,

    /// Region override, SDK default chain otherwise
    pub region: Option<String>,

    /// Port for the local development server
    pub port: u16,

    /// Set when running inside the Lambda execution environment
    pub lambda_runtime_api: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = match lookup("GAME_CATALOGUE_STORE") {
            Some(kind) => kind.parse()?,
            None => StoreKind::DynamoDb,
        };

        Ok(Self {
            table_name: lookup("GAME_CATALOGUE_TABLE")
                .unwrap_or_else(|| "games-catalogue".to_string()),

            route_prefix: lookup("GAME_CATALOGUE_ROUTE_PREFIX")
                .map(|p| p.trim_end_matches('/').to_string())
                .unwrap_or_else(|| "/gc".to_string()),

            store,

            dynamodb_endpoint: lookup("GAME_CATALOGUE_DYNAMODB_ENDPOINT").filter(|s| !s.is_empty()),

            region: lookup("GAME_CATALOGUE_REGION").filter(|s| !s.is_empty()),

            port: lookup("GAME_CATALOGUE_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),

            lambda_runtime_api: lookup("AWS_LAMBDA_RUNTIME_API"),
        })
    }

    /// Whether the process was started by the Lambda service
    pub fn is_lambda(&self) -> bool {
        self.lambda_runtime_api.is_some()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            table_name: "games-catalogue".to_string(),
            route_prefix: "/gc".to_string(),
            store: StoreKind::Memory,
            dynamodb_endpoint: None,
            region: None,
            port: 8080,
            lambda_runtime_api: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.table_name, "games-catalogue");
        assert_eq!(config.route_prefix, "/gc");
        assert_eq!(config.store, StoreKind::DynamoDb);
        assert_eq!(config.port, 8080);
        assert!(config.dynamodb_endpoint.is_none());
        assert!(!config.is_lambda());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("GAME_CATALOGUE_TABLE", "games-test"),
            ("GAME_CATALOGUE_ROUTE_PREFIX", "/games/"),
            ("GAME_CATALOGUE_STORE", "Memory"),
            ("GAME_CATALOGUE_DYNAMODB_ENDPOINT", "http://localhost:4566"),
            ("GAME_CATALOGUE_PORT", "9000"),
            ("AWS_LAMBDA_RUNTIME_API", "127.0.0.1:9001"),
        ])
        .unwrap();
        assert_eq!(config.table_name, "games-test");
        assert_eq!(config.route_prefix, "/games");
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.dynamodb_endpoint.as_deref(), Some("http://localhost:4566"));
        assert_eq!(config.port, 9000);
        assert!(config.is_lambda());
    }

    #[test]
    fn test_unknown_store_kind() {
        assert!(config_from(&[("GAME_CATALOGUE_STORE", "sqlite")]).is_err());
    }
}
