//! Core data models used throughout WearSuggest.
//!
//! These types represent the clothing items a user catalogues and the
//! outfit history records the engine keeps per (owner, top, bottom).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// The slot an item fills in an outfit.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ItemType {
    Top,
    Bottom,
    Footwear,
    Outerwear,
    Accessory,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Season {
    Summer,
    Winter,
    Rainy,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Occasion {
    Casual,
    Formal,
    Party,
}

/// A catalogued clothing item.
///
/// `color_group` is always the palette group of `color`; items with an
/// unmapped color are rejected before they reach a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingItem {
    pub id: String,
    pub owner_id: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub category: String,
    pub color: String,
    pub color_group: String,
    pub seasons: Vec<Season>,
    pub occasions: Vec<Occasion>,
    pub is_active: bool,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// Usage history for one (owner, top, bottom) combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitRecord {
    pub id: String,
    pub owner_id: String,
    pub top_id: String,
    pub bottom_id: String,
    pub footwear_id: Option<String>,
    pub outerwear_id: Option<String>,
    pub accessory_ids: Vec<String>,
    pub last_worn_at: DateTime<Utc>,
}

impl OutfitRecord {
    /// True when the combination was worn less than `window` before `now`.
    pub fn is_recent(&self, now: DateTime<Utc>, window: chrono::Duration) -> bool {
        now.signed_duration_since(self.last_worn_at) < window
    }
}

/// The values written on every selection of a combination.
#[derive(Debug, Clone, PartialEq)]
pub struct OutfitUsage {
    pub last_worn_at: DateTime<Utc>,
    pub footwear_id: Option<String>,
    pub outerwear_id: Option<String>,
    pub accessory_ids: Vec<String>,
}
