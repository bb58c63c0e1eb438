//! Storage collaborator for game records
//!
//! Every backend exposes the same handful of single-call operations over one
//! table keyed by (`platform`, `game_id`):
//! - DynamoDB - the deployed table
//! - Memory - an in-process map for tests and local development

pub mod dynamodb;
pub mod memory;

use async_trait::async_trait;
use game_catalogue_sdk::HandlerError;

use crate::model::{GameKey, GameRecord, GameStatus, NewGame};

pub use dynamodb::DynamoDbStore;
pub use memory::MemoryStore;

/// Errors raised by a storage backend
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Request(String),

    #[error("Failed to decode stored record: {0}")]
    Decode(String),

    #[error("Failed to encode record: {0}")]
    Encode(String),
}

impl From<StoreError> for HandlerError {
    fn from(err: StoreError) -> Self {
        HandlerError::Storage(err.to_string())
    }
}

/// Operations the catalogue needs from its table.
///
/// None of them retry, paginate or use conditions: each is one call that
/// either succeeds or fails.
#[async_trait]
pub trait CatalogueStore: Send + Sync {
    /// Short backend name for logs
    fn backend(&self) -> &'static str;

    /// Full scan of records whose status is absent or `owned`
    async fn list_owned(&self) -> Result<Vec<GameRecord>, StoreError>;

    /// Partition query on `platform`, same status filter as [`Self::list_owned`]
    async fn list_owned_by_platform(&self, platform: &str) -> Result<Vec<GameRecord>, StoreError>;

    /// Full scan of records whose status is `wishlist`
    async fn list_wishlist(&self) -> Result<Vec<GameRecord>, StoreError>;

    /// Write a full record, replacing any record with the same key
    async fn put(&self, record: &GameRecord) -> Result<(), StoreError>;

    /// Delete by key; a missing key is not an error
    async fn delete(&self, key: &GameKey) -> Result<(), StoreError>;

    /// Set `status = owned` on the keyed record
    async fn set_status_owned(&self, key: &GameKey) -> Result<(), StoreError>;

    /// Validate the submitted fields, assign an id and timestamp, and write the record.
    async fn create(&self, new: NewGame, status: GameStatus) -> Result<GameRecord, HandlerError> {
        let record = GameRecord::create(new, status)?;
        self.put(&record).await?;
        tracing::debug!(
            backend = self.backend(),
            platform = %record.platform,
            game_id = %record.game_id,
            status = %status,
            "Record created"
        );
        Ok(record)
    }
}
