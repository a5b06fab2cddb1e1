//! In-memory [`Store`] implementation for tests and embedding.
//!
//! Uses `HashMap`s behind `std::sync::RwLock`. Locks are never held across
//! an `.await`; every trait method completes synchronously.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::models::{ClothingItem, ItemType, OutfitRecord, OutfitUsage};

use super::Store;

type UsageKey = (String, String, String);

/// In-memory store. History records are keyed by (owner, top, bottom).
pub struct InMemoryStore {
    items: RwLock<HashMap<String, ClothingItem>>,
    outfits: RwLock<HashMap<UsageKey, OutfitRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
            outfits: RwLock::new(HashMap::new()),
        }
    }

    /// Number of history records across all owners.
    pub fn outfit_count(&self) -> usize {
        self.outfits.read().map(|o| o.len()).unwrap_or(0)
    }

    fn items_read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, ClothingItem>>> {
        self.items.read().map_err(|_| anyhow!("item map lock poisoned"))
    }

    fn items_write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, ClothingItem>>> {
        self.items.write().map_err(|_| anyhow!("item map lock poisoned"))
    }

    fn outfits_read(&self) -> Result<RwLockReadGuard<'_, HashMap<UsageKey, OutfitRecord>>> {
        self.outfits.read().map_err(|_| anyhow!("outfit map lock poisoned"))
    }

    fn outfits_write(&self) -> Result<RwLockWriteGuard<'_, HashMap<UsageKey, OutfitRecord>>> {
        self.outfits.write().map_err(|_| anyhow!("outfit map lock poisoned"))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn usage_key(owner: &str, top: &str, bottom: &str) -> UsageKey {
    (owner.to_string(), top.to_string(), bottom.to_string())
}

#[async_trait]
impl Store for InMemoryStore {
    async fn list_active_items(&self, owner: &str) -> Result<Vec<ClothingItem>> {
        let items = self.items_read()?;
        let mut out: Vec<ClothingItem> = items
            .values()
            .filter(|i| i.owner_id == owner && i.is_active)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(out)
    }

    async fn insert_item(&self, item: &ClothingItem) -> Result<()> {
        let mut items = self.items_write()?;
        if items.contains_key(&item.id) {
            return Err(anyhow!("duplicate clothing item id: {}", item.id));
        }
        items.insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn get_item(&self, owner: &str, id: &str) -> Result<Option<ClothingItem>> {
        let items = self.items_read()?;
        Ok(items.get(id).filter(|i| i.owner_id == owner).cloned())
    }

    async fn list_items(
        &self,
        owner: &str,
        active: bool,
        item_type: Option<ItemType>,
    ) -> Result<Vec<ClothingItem>> {
        let items = self.items_read()?;
        let mut out: Vec<ClothingItem> = items
            .values()
            .filter(|i| i.owner_id == owner && i.is_active == active)
            .filter(|i| item_type.map_or(true, |t| i.item_type == t))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(out)
    }

    async fn set_item_active(&self, owner: &str, id: &str, active: bool) -> Result<bool> {
        let mut items = self.items_write()?;
        match items.get_mut(id) {
            Some(item) if item.owner_id == owner && item.is_active != active => {
                item.is_active = active;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn find_usage(
        &self,
        owner: &str,
        top: &str,
        bottom: &str,
    ) -> Result<Option<OutfitRecord>> {
        let outfits = self.outfits_read()?;
        Ok(outfits.get(&usage_key(owner, top, bottom)).cloned())
    }

    async fn upsert_usage(
        &self,
        owner: &str,
        top: &str,
        bottom: &str,
        usage: &OutfitUsage,
    ) -> Result<OutfitRecord> {
        let mut outfits = self.outfits_write()?;
        let record = outfits
            .entry(usage_key(owner, top, bottom))
            .and_modify(|r| {
                r.last_worn_at = r.last_worn_at.max(usage.last_worn_at);
                r.footwear_id = usage.footwear_id.clone();
                r.outerwear_id = usage.outerwear_id.clone();
                r.accessory_ids = usage.accessory_ids.clone();
            })
            .or_insert_with(|| OutfitRecord {
                id: uuid::Uuid::new_v4().to_string(),
                owner_id: owner.to_string(),
                top_id: top.to_string(),
                bottom_id: bottom.to_string(),
                footwear_id: usage.footwear_id.clone(),
                outerwear_id: usage.outerwear_id.clone(),
                accessory_ids: usage.accessory_ids.clone(),
                last_worn_at: usage.last_worn_at,
            });
        Ok(record.clone())
    }

    async fn recent_usage(&self, owner: &str, limit: usize) -> Result<Vec<OutfitRecord>> {
        let outfits = self.outfits_read()?;
        let mut out: Vec<OutfitRecord> = outfits
            .values()
            .filter(|r| r.owner_id == owner)
            .cloned()
            .collect();
        out.sort_by(|a, b| {
            b.last_worn_at
                .cmp(&a.last_worn_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        out.truncate(limit);
        Ok(out)
    }
}
