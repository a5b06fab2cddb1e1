//! Context filters that narrow a wardrobe to a requested occasion,
//! season, and tone.
//!
//! Every filter is an order-preserving reduction. [`ContextFilter::apply`]
//! composes them in a fixed order (occasion, then season, then tone) so
//! identical inputs always produce identical candidate lists.

use crate::models::{ClothingItem, ItemType, Occasion, Season};

pub fn by_occasion(mut items: Vec<ClothingItem>, occasion: Occasion) -> Vec<ClothingItem> {
    items.retain(|i| i.occasions.contains(&occasion));
    items
}

/// Keeps items wearable in `season`. `None` keeps everything.
pub fn by_season(mut items: Vec<ClothingItem>, season: Option<Season>) -> Vec<ClothingItem> {
    if let Some(season) = season {
        items.retain(|i| i.seasons.contains(&season));
    }
    items
}

pub fn by_tone(mut items: Vec<ClothingItem>, tone: &str) -> Vec<ClothingItem> {
    items.retain(|i| i.color_group == tone);
    items
}

#[derive(Debug, Clone)]
pub struct ContextFilter<'a> {
    pub occasion: Occasion,
    pub season: Option<Season>,
    pub tone: Option<&'a str>,
}

impl ContextFilter<'_> {
    pub fn apply(&self, items: Vec<ClothingItem>) -> Vec<ClothingItem> {
        let items = by_occasion(items, self.occasion);
        let items = by_season(items, self.season);
        match self.tone {
            Some(tone) => by_tone(items, tone),
            None => items,
        }
    }
}

/// A filtered wardrobe split by outfit slot, each slot in input order.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    pub tops: Vec<ClothingItem>,
    pub bottoms: Vec<ClothingItem>,
    pub footwear: Vec<ClothingItem>,
    pub outerwear: Vec<ClothingItem>,
    pub accessories: Vec<ClothingItem>,
}

impl Partition {
    pub fn new(items: Vec<ClothingItem>) -> Self {
        let mut p = Partition::default();
        for item in items {
            match item.item_type {
                ItemType::Top => p.tops.push(item),
                ItemType::Bottom => p.bottoms.push(item),
                ItemType::Footwear => p.footwear.push(item),
                ItemType::Outerwear => p.outerwear.push(item),
                ItemType::Accessory => p.accessories.push(item),
            }
        }
        p
    }

    /// Tops, bottoms and footwear are mandatory for an outfit.
    pub fn has_mandatory_slots(&self) -> bool {
        !self.tops.is_empty() && !self.bottoms.is_empty() && !self.footwear.is_empty()
    }
}
