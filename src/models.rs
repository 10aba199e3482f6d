use super::{
    config::{Config, ITEM_PAGE_SIZE},
    definitions::DefinitionRegistry,
    details::{Details, Value},
};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: Uuid,
    /// Names the `ItemDefinition` this item is edited through.
    pub discriminator: String,
    pub title: String,
    #[serde(default)]
    pub details: Details,
}

impl ContentItem {
    pub fn new(discriminator: &str, title: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            discriminator: discriminator.to_string(),
            title: title.to_string(),
            details: Details::new(),
        }
    }

    /// The raw stored value, if any.
    pub fn detail(&self, name: &str) -> Option<&Value> {
        self.details.raw(name)
    }
}

/// Where content items live between requests. Saving an item replaces it
/// whole, so a batch of editable updates lands together or not at all.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<ContentItem>>;
    /// Ordered by title; `page` is zero-based.
    async fn list(&self, page: usize) -> Result<Vec<ContentItem>>;
    async fn save(&self, item: ContentItem) -> Result<()>;
    /// Save a batch of items in one go; readers see all of them or none.
    async fn save_all(&self, items: Vec<ContentItem>) -> Result<()>;
    /// Every item, for site-wide operations.
    async fn all(&self) -> Result<Vec<ContentItem>>;
}

#[derive(Default)]
pub struct MemoryRepository {
    items: RwLock<HashMap<Uuid, ContentItem>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for MemoryRepository {
    async fn get(&self, id: Uuid) -> Result<Option<ContentItem>> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn list(&self, page: usize) -> Result<Vec<ContentItem>> {
        let mut items = self.all().await?;
        items.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(items
            .into_iter()
            .skip(page * ITEM_PAGE_SIZE)
            .take(ITEM_PAGE_SIZE)
            .collect())
    }

    async fn save(&self, item: ContentItem) -> Result<()> {
        self.items.write().await.insert(item.id, item);
        Ok(())
    }

    async fn save_all(&self, items: Vec<ContentItem>) -> Result<()> {
        let mut stored = self.items.write().await;
        for item in items {
            stored.insert(item.id, item);
        }
        Ok(())
    }

    async fn all(&self) -> Result<Vec<ContentItem>> {
        Ok(self.items.read().await.values().cloned().collect())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub items: Arc<dyn ItemRepository>,
    pub definitions: Arc<DefinitionRegistry>,
    pub config: Arc<Config>,
}
