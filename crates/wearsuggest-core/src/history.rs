//! Recent-outfit history view.
//!
//! Hydrates [`OutfitRecord`]s with the clothing items they reference.
//! Items soft-deleted since the outfit was worn are still shown; a
//! reference to an item that no longer exists at all is dropped.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::WardrobeError;
use crate::models::{ClothingItem, OutfitRecord};
use crate::store::Store;

pub const DEFAULT_RECENT_LIMIT: usize = 7;
pub const MAX_RECENT_LIMIT: usize = 20;

#[derive(Debug, Clone, Serialize)]
pub struct RecentOutfit {
    pub id: String,
    pub top: Option<ClothingItem>,
    pub bottom: Option<ClothingItem>,
    pub footwear: Option<ClothingItem>,
    pub outerwear: Option<ClothingItem>,
    pub accessories: Vec<ClothingItem>,
    pub last_worn_at: DateTime<Utc>,
}

/// Clamps a caller-supplied limit: missing or zero means the default,
/// anything above the maximum is capped.
pub fn effective_limit(limit: Option<usize>) -> usize {
    match limit {
        Some(0) | None => DEFAULT_RECENT_LIMIT,
        Some(n) => n.min(MAX_RECENT_LIMIT),
    }
}

/// Most recently worn outfits for `owner`, newest first.
pub async fn recent_outfits(
    store: &dyn Store,
    owner: &str,
    limit: Option<usize>,
) -> Result<Vec<RecentOutfit>, WardrobeError> {
    let records = store.recent_usage(owner, effective_limit(limit)).await?;
    let mut out = Vec::with_capacity(records.len());
    for record in records {
        out.push(hydrate(store, owner, record).await?);
    }
    Ok(out)
}

async fn hydrate(
    store: &dyn Store,
    owner: &str,
    record: OutfitRecord,
) -> Result<RecentOutfit, WardrobeError> {
    let fetch = |id: Option<String>| async move {
        match id {
            Some(id) => store.get_item(owner, &id).await,
            None => Ok(None),
        }
    };

    let top = fetch(Some(record.top_id)).await?;
    let bottom = fetch(Some(record.bottom_id)).await?;
    let footwear = fetch(record.footwear_id).await?;
    let outerwear = fetch(record.outerwear_id).await?;
    let mut accessories = Vec::with_capacity(record.accessory_ids.len());
    for id in record.accessory_ids {
        if let Some(item) = fetch(Some(id)).await? {
            accessories.push(item);
        }
    }

    Ok(RecentOutfit {
        id: record.id,
        top,
        bottom,
        footwear,
        outerwear,
        accessories,
        last_worn_at: record.last_worn_at,
    })
}
