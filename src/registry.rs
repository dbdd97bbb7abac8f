use crate::error::{RegistryError, Result};
use crate::model::{Item, NewItem};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Item>>;
    async fn get(&self, id: u64) -> Result<Item>;
    async fn create(&self, fields: NewItem) -> Result<Item>;
    async fn update(&self, id: u64, fields: NewItem) -> Result<Item>;
    async fn delete(&self, id: u64) -> Result<()>;
}

struct Inner {
    items: Vec<Item>,
    next_id: u64,
}

/// In-memory item registry.
///
/// Items are kept in insertion order. Ids start at 1 and are never reused,
/// even after a delete. The list and the id counter sit behind one lock so
/// concurrent creates cannot hand out the same id.
pub struct ItemRegistry {
    inner: RwLock<Inner>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                items: Vec::new(),
                next_id: 1,
            }),
        }
    }

    pub fn shared() -> Arc<dyn ItemStore> {
        Arc::new(Self::new())
    }
}

impl Default for ItemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemStore for ItemRegistry {
    async fn list(&self) -> Result<Vec<Item>> {
        Ok(self.inner.read().await.items.clone())
    }

    async fn get(&self, id: u64) -> Result<Item> {
        debug!("Looking up item {}", id);
        self.inner
            .read()
            .await
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(RegistryError::NotFound(id))
    }

    async fn create(&self, fields: NewItem) -> Result<Item> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let item = Item::stamp(id, Utc::now(), fields);
        inner.items.push(item.clone());

        info!("Created item {} ({})", item.id, item.name);
        Ok(item)
    }

    async fn update(&self, id: u64, fields: NewItem) -> Result<Item> {
        let mut inner = self.inner.write().await;
        let slot = inner
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(RegistryError::NotFound(id))?;

        *slot = Item::stamp(id, slot.created_at, fields);

        info!("Updated item {}", id);
        Ok(slot.clone())
    }

    async fn delete(&self, id: u64) -> Result<()> {
        let mut inner = self.inner.write().await;
        let index = inner
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(RegistryError::NotFound(id))?;

        inner.items.remove(index);

        info!("Deleted item {}", id);
        Ok(())
    }
}
