//! In-process storage backend
//!
//! Mirrors the DynamoDB table's observable behavior closely enough for tests
//! and local runs: scans come back in key order, partition queries in sort-key
//! order, and an update on a missing key creates a bare item.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{CatalogueStore, StoreError};
use crate::model::{GameKey, GameRecord, GameStatus};

/// Catalogue table held in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<GameKey, GameRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records
    #[cfg(test)]
    pub fn with_records(records: impl IntoIterator<Item = GameRecord>) -> Self {
        let records = records.into_iter().map(|r| (r.key(), r)).collect();
        Self {
            records: RwLock::new(records),
        }
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    #[cfg(test)]
    pub async fn get(&self, key: &GameKey) -> Option<GameRecord> {
        self.records.read().await.get(key).cloned()
    }

    async fn filtered<F>(&self, keep: F) -> Vec<GameRecord>
    where
        F: Fn(&GameRecord) -> bool,
    {
        self.records
            .read()
            .await
            .values()
            .filter(|r| keep(*r))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CatalogueStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list_owned(&self) -> Result<Vec<GameRecord>, StoreError> {
        Ok(self.filtered(|r| r.status() == GameStatus::Owned).await)
    }

    async fn list_owned_by_platform(&self, platform: &str) -> Result<Vec<GameRecord>, StoreError> {
        Ok(self
            .filtered(|r| r.platform == platform && r.status() == GameStatus::Owned)
            .await)
    }

    async fn list_wishlist(&self) -> Result<Vec<GameRecord>, StoreError> {
        Ok(self.filtered(|r| r.status == Some(GameStatus::Wishlist)).await)
    }

    async fn put(&self, record: &GameRecord) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .insert(record.key(), record.clone());
        Ok(())
    }

    async fn delete(&self, key: &GameKey) -> Result<(), StoreError> {
        self.records.write().await.remove(key);
        Ok(())
    }

    async fn set_status_owned(&self, key: &GameKey) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let record = records.entry(key.clone()).or_insert_with(|| GameRecord {
            platform: key.platform.clone(),
            game_id: key.game_id.clone(),
            game_name: String::new(),
            genre: None,
            year: None,
            status: None,
            added_date: String::new(),
        });
        record.status = Some(GameStatus::Owned);
        Ok(())
    }
}
