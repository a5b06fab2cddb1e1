//! Storage abstraction for WearSuggest.
//!
//! The [`Store`] trait covers the wardrobe reads the outfit engine needs,
//! the outfit history it reads and writes, and the catalogue operations
//! behind item management. Backends: [`memory::InMemoryStore`] here and
//! a SQLite store in the application crate.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{ClothingItem, ItemType, OutfitRecord, OutfitUsage};

/// Abstract storage backend.
///
/// Every method is scoped to a single owner; no operation reads or writes
/// another owner's data.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`list_active_items`](Store::list_active_items) | Wardrobe snapshot for the engine |
/// | [`insert_item`](Store::insert_item) | Store a validated new item |
/// | [`get_item`](Store::get_item) | Fetch one item regardless of state |
/// | [`list_items`](Store::list_items) | Catalogue listing, newest first |
/// | [`set_item_active`](Store::set_item_active) | Soft delete / restore |
/// | [`find_usage`](Store::find_usage) | History for one combination |
/// | [`upsert_usage`](Store::upsert_usage) | Atomic history write |
/// | [`recent_usage`](Store::recent_usage) | History, most recent first |
#[async_trait]
pub trait Store: Send + Sync {
    /// Active items for `owner`, oldest first (ties broken by id).
    ///
    /// Never returns soft-deleted items.
    async fn list_active_items(&self, owner: &str) -> Result<Vec<ClothingItem>>;

    async fn insert_item(&self, item: &ClothingItem) -> Result<()>;

    async fn get_item(&self, owner: &str, id: &str) -> Result<Option<ClothingItem>>;

    /// Items with `is_active == active`, newest first, optionally by type.
    async fn list_items(
        &self,
        owner: &str,
        active: bool,
        item_type: Option<ItemType>,
    ) -> Result<Vec<ClothingItem>>;

    /// Sets `is_active` on an item whose current state is `!active`.
    ///
    /// Returns `false` when no such item exists.
    async fn set_item_active(&self, owner: &str, id: &str, active: bool) -> Result<bool>;

    async fn find_usage(&self, owner: &str, top: &str, bottom: &str)
        -> Result<Option<OutfitRecord>>;

    /// Inserts or overwrites the record for (owner, top, bottom) in one
    /// conditional write. `last_worn_at` never moves backward.
    async fn upsert_usage(
        &self,
        owner: &str,
        top: &str,
        bottom: &str,
        usage: &OutfitUsage,
    ) -> Result<OutfitRecord>;

    async fn recent_usage(&self, owner: &str, limit: usize) -> Result<Vec<OutfitRecord>>;
}
