//! DynamoDB storage backend

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use std::collections::HashMap;

use super::{CatalogueStore, StoreError};
use crate::config::AppConfig;
use crate::model::{GameKey, GameRecord, GameStatus, ATTR_GAME_ID, ATTR_PLATFORM, ATTR_STATUS};

const OWNED_FILTER: &str = "attribute_not_exists(#s) OR #s = :owned";
const WISHLIST_FILTER: &str = "#s = :wishlist";

type Item = HashMap<String, AttributeValue>;

/// Catalogue table in DynamoDB
#[derive(Clone)]
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
}

impl std::fmt::Debug for DynamoDbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoDbStore")
            .field("table_name", &self.table_name)
            .finish()
    }
}

impl DynamoDbStore {
    /// Build a client from the shared SDK config, applying the region and
    /// endpoint overrides from `config`.
    pub fn new(sdk_config: &aws_config::SdkConfig, config: &AppConfig) -> Self {
        let mut builder = aws_sdk_dynamodb::config::Builder::from(sdk_config);

        if let Some(region) = &config.region {
            builder = builder.region(aws_sdk_dynamodb::config::Region::new(region.clone()));
        }

        if let Some(endpoint) = &config.dynamodb_endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Self::from_client(Client::from_conf(builder.build()), config.table_name.clone())
    }

    /// Create from a pre-built client
    pub fn from_client(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn key_of(key: &GameKey) -> Item {
        HashMap::from([
            (ATTR_PLATFORM.to_string(), AttributeValue::S(key.platform.clone())),
            (ATTR_GAME_ID.to_string(), AttributeValue::S(key.game_id.clone())),
        ])
    }

    fn status_value(status: GameStatus) -> AttributeValue {
        AttributeValue::S(status.as_str().to_string())
    }

    fn decode(items: Option<Vec<Item>>) -> Result<Vec<GameRecord>, StoreError> {
        serde_dynamo::aws_sdk_dynamodb_1::from_items(items.unwrap_or_default())
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

fn request_error<E>(operation: &str, err: E) -> StoreError
where
    E: std::error::Error + 'static,
{
    let message = DisplayErrorContext(&err).to_string();
    tracing::error!(operation, "DynamoDB request failed: {}", message);
    StoreError::Request(format!("DynamoDB {} failed: {}", operation, message))
}

#[async_trait]
impl CatalogueStore for DynamoDbStore {
    fn backend(&self) -> &'static str {
        "dynamodb"
    }

    async fn list_owned(&self) -> Result<Vec<GameRecord>, StoreError> {
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .filter_expression(OWNED_FILTER)
            .expression_attribute_names("#s", ATTR_STATUS)
            .expression_attribute_values(":owned", Self::status_value(GameStatus::Owned))
            .send()
            .await
            .map_err(|e| request_error("Scan", e))?;

        Self::decode(output.items)
    }

    async fn list_owned_by_platform(&self, platform: &str) -> Result<Vec<GameRecord>, StoreError> {
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("#p = :platform")
            .filter_expression(OWNED_FILTER)
            .expression_attribute_names("#p", ATTR_PLATFORM)
            .expression_attribute_names("#s", ATTR_STATUS)
            .expression_attribute_values(":platform", AttributeValue::S(platform.to_string()))
            .expression_attribute_values(":owned", Self::status_value(GameStatus::Owned))
            .send()
            .await
            .map_err(|e| request_error("Query", e))?;

        Self::decode(output.items)
    }

    async fn list_wishlist(&self) -> Result<Vec<GameRecord>, StoreError> {
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .filter_expression(WISHLIST_FILTER)
            .expression_attribute_names("#s", ATTR_STATUS)
            .expression_attribute_values(":wishlist", Self::status_value(GameStatus::Wishlist))
            .send()
            .await
            .map_err(|e| request_error("Scan", e))?;

        Self::decode(output.items)
    }

    async fn put(&self, record: &GameRecord) -> Result<(), StoreError> {
        let item: Item = serde_dynamo::aws_sdk_dynamodb_1::to_item(record)
            .map_err(|e| StoreError::Encode(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| request_error("PutItem", e))?;

        Ok(())
    }

    async fn delete(&self, key: &GameKey) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(Self::key_of(key)))
            .send()
            .await
            .map_err(|e| request_error("DeleteItem", e))?;

        Ok(())
    }

    async fn set_status_owned(&self, key: &GameKey) -> Result<(), StoreError> {
        self.client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(Self::key_of(key)))
            .update_expression("SET #s = :owned")
            .expression_attribute_names("#s", ATTR_STATUS)
            .expression_attribute_values(":owned", Self::status_value(GameStatus::Owned))
            .send()
            .await
            .map_err(|e| request_error("UpdateItem", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_item_shape() {
        let record = GameRecord {
            platform: "SNES".to_string(),
            game_id: "id-1".to_string(),
            game_name: "Zelda".to_string(),
            genre: None,
            year: Some("1991".to_string()),
            status: Some(GameStatus::Wishlist),
            added_date: "2024-03-01T12:30:45.123456".to_string(),
        };

        let item: Item = serde_dynamo::aws_sdk_dynamodb_1::to_item(&record).unwrap();
        assert_eq!(item.get("platform"), Some(&AttributeValue::S("SNES".into())));
        assert_eq!(item.get("year"), Some(&AttributeValue::S("1991".into())));
        assert_eq!(item.get("status"), Some(&AttributeValue::S("wishlist".into())));
        assert_eq!(item.get("genre"), Some(&AttributeValue::Null(true)));

        let decoded = DynamoDbStore::decode(Some(vec![item])).unwrap();
        assert_eq!(decoded, vec![record]);
    }

    #[test]
    fn test_decode_legacy_item_without_status() {
        let item: Item = HashMap::from([
            ("platform".to_string(), AttributeValue::S("GameCube".into())),
            ("game_id".to_string(), AttributeValue::S("legacy".into())),
            ("game_name".to_string(), AttributeValue::S("Metroid Prime".into())),
        ]);
        let decoded = DynamoDbStore::decode(Some(vec![item])).unwrap();
        assert_eq!(decoded[0].status(), GameStatus::Owned);
        assert!(DynamoDbStore::decode(None).unwrap().is_empty());
    }

    #[test]
    fn test_key_of() {
        let key = DynamoDbStore::key_of(&GameKey::new("PS5", "abc"));
        assert_eq!(key.len(), 2);
        assert_eq!(key.get("game_id"), Some(&AttributeValue::S("abc".into())));
    }
}
