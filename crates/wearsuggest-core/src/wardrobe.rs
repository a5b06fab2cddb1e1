//! Wardrobe catalogue operations: create, fetch, list, soft delete, restore.
//!
//! Item creation is where the palette invariant is enforced: a color the
//! palette cannot resolve is rejected here, so every stored item carries a
//! valid color group and the outfit engine never sees malformed data.

use chrono::Utc;
use serde::{Deserialize, Deserializer};
use tracing::info;

use crate::error::WardrobeError;
use crate::models::{ClothingItem, ItemType, Occasion, Season};
use crate::palette::ColorTable;
use crate::store::Store;

/// Input for [`create_item`].
///
/// `seasons` and `occasions` accept either a single value or a list.
#[derive(Debug, Clone, Deserialize)]
pub struct NewClothingItem {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub category: String,
    pub color: String,
    #[serde(default, alias = "season", deserialize_with = "one_or_many")]
    pub seasons: Vec<Season>,
    #[serde(default, alias = "occasion", deserialize_with = "one_or_many")]
    pub occasions: Vec<Occasion>,
    #[serde(default)]
    pub image_url: String,
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        One(T),
        Many(Vec<T>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(v) => vec![v],
        OneOrMany::Many(v) => v,
    })
}

/// Validates and stores a new active item for `owner`.
pub async fn create_item(
    store: &dyn Store,
    palette: &ColorTable,
    owner: &str,
    input: NewClothingItem,
) -> Result<ClothingItem, WardrobeError> {
    let category = input.category.trim();
    if category.is_empty() {
        return Err(WardrobeError::InvalidItem(
            "type, category and color are required".to_string(),
        ));
    }
    if input.image_url.trim().is_empty() {
        return Err(WardrobeError::InvalidItem(
            "clothing image is required".to_string(),
        ));
    }
    if input.seasons.is_empty() || input.occasions.is_empty() {
        return Err(WardrobeError::InvalidItem(
            "season and occasion are required".to_string(),
        ));
    }

    let color = input.color.trim().to_lowercase();
    let color_group = palette.resolve_group(&color)?.to_string();

    let item = ClothingItem {
        id: uuid::Uuid::new_v4().to_string(),
        owner_id: owner.to_string(),
        item_type: input.item_type,
        category: category.to_string(),
        color,
        color_group,
        seasons: unique(input.seasons),
        occasions: unique(input.occasions),
        is_active: true,
        image_url: input.image_url.trim().to_string(),
        created_at: Utc::now(),
    };
    store.insert_item(&item).await?;

    info!(owner, id = %item.id, item_type = %item.item_type, "clothing item added");
    Ok(item)
}

fn unique<T: PartialEq>(values: Vec<T>) -> Vec<T> {
    let mut out = Vec::with_capacity(values.len());
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

/// Fetches an active item.
pub async fn get_item(
    store: &dyn Store,
    owner: &str,
    id: &str,
) -> Result<ClothingItem, WardrobeError> {
    store
        .get_item(owner, id)
        .await?
        .filter(|i| i.is_active)
        .ok_or_else(|| WardrobeError::ItemNotFound(id.to_string()))
}

pub async fn list_items(
    store: &dyn Store,
    owner: &str,
    item_type: Option<ItemType>,
) -> Result<Vec<ClothingItem>, WardrobeError> {
    Ok(store.list_items(owner, true, item_type).await?)
}

pub async fn list_deleted_items(
    store: &dyn Store,
    owner: &str,
) -> Result<Vec<ClothingItem>, WardrobeError> {
    Ok(store.list_items(owner, false, None).await?)
}

/// Soft-deletes an active item.
pub async fn remove_item(store: &dyn Store, owner: &str, id: &str) -> Result<(), WardrobeError> {
    if !store.set_item_active(owner, id, false).await? {
        return Err(WardrobeError::ItemNotFound(id.to_string()));
    }
    info!(owner, id, "clothing item removed");
    Ok(())
}

/// Restores a soft-deleted item.
pub async fn restore_item(
    store: &dyn Store,
    owner: &str,
    id: &str,
) -> Result<ClothingItem, WardrobeError> {
    if !store.set_item_active(owner, id, true).await? {
        return Err(WardrobeError::ItemNotFound(id.to_string()));
    }
    info!(owner, id, "clothing item restored");
    get_item(store, owner, id).await
}
