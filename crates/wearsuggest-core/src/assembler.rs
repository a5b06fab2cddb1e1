//! Outfit assembly engine.
//!
//! Turns an owner's active wardrobe into one complete outfit and records
//! the choice in the outfit history. The engine operates entirely through
//! the [`Store`] trait; randomness and the current time are injected so
//! callers (and tests) control both.
//!
//! # Algorithm
//!
//! 1. Load the owner's active items (`EmptyWardrobe` if none).
//! 2. Filter by occasion, then season.
//! 3. Partition by slot; tops, bottoms and footwear are mandatory
//!    (`InsufficientWardrobe`).
//! 4. Enumerate color-compatible (top, bottom) pairs (`NoCompatiblePair`
//!    if none).
//! 5. Take the first pair not worn within the freshness window. If every
//!    pair is fresh, fall back to the first pair and say so in the note.
//! 6. Pick footwear, optional outerwear and a capped accessory subset at
//!    random.
//! 7. Upsert the history record for the pair, then return the outfit.
//!
//! The tone-based variant narrows the pool to one color group and picks
//! every slot at random; a single-group pool needs no pairing rule and
//! no recency scan.

use chrono::{DateTime, Duration, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::WardrobeError;
use crate::filter::{ContextFilter, Partition};
use crate::models::{ClothingItem, Occasion, OutfitUsage, Season};
use crate::palette::ColorTable;
use crate::store::Store;

pub const DEFAULT_FRESHNESS_HOURS: i64 = 24;
pub const DEFAULT_ACCESSORY_CAP: usize = 2;

const FALLBACK_NOTE: &str = "Only one possible outfit available: every compatible combination was worn recently";

/// Tuning knobs for the assembler, decoupled from application config.
#[derive(Debug, Clone)]
pub struct AssemblyPolicy {
    /// A combination worn less than this long ago counts as recently worn.
    pub freshness_window: Duration,
    /// Upper bound on accessories per outfit.
    pub accessory_cap: usize,
}

impl Default for AssemblyPolicy {
    fn default() -> Self {
        Self {
            freshness_window: Duration::hours(DEFAULT_FRESHNESS_HOURS),
            accessory_cap: DEFAULT_ACCESSORY_CAP,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutfitRequest {
    pub owner_id: String,
    pub occasion: Occasion,
    pub season: Option<Season>,
}

/// How the top/bottom pair of a suggestion was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    /// First compatible pair outside the freshness window.
    Fresh,
    /// Every compatible pair was recently worn; the first one is repeated.
    Fallback,
    /// Random pick from a single-tone pool.
    Tone,
}

/// A fully populated outfit.
#[derive(Debug, Clone, Serialize)]
pub struct OutfitSuggestion {
    pub top: ClothingItem,
    pub bottom: ClothingItem,
    pub footwear: ClothingItem,
    pub outerwear: Option<ClothingItem>,
    pub accessories: Vec<ClothingItem>,
    pub kind: SelectionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl OutfitSuggestion {
    pub fn is_fallback(&self) -> bool {
        self.kind == SelectionKind::Fallback
    }
}

/// Selects outfits using an injected palette and policy.
#[derive(Debug, Clone)]
pub struct OutfitAssembler {
    palette: Arc<ColorTable>,
    policy: AssemblyPolicy,
}

impl OutfitAssembler {
    pub fn new(palette: Arc<ColorTable>, policy: AssemblyPolicy) -> Self {
        Self { palette, policy }
    }

    pub fn palette(&self) -> &ColorTable {
        &self.palette
    }

    /// Suggests a color-compatible outfit, preferring combinations not worn
    /// within the freshness window.
    pub async fn generate<R: Rng + Send + ?Sized>(
        &self,
        store: &dyn Store,
        rng: &mut R,
        req: &OutfitRequest,
        now: DateTime<Utc>,
    ) -> Result<OutfitSuggestion, WardrobeError> {
        let items = store.list_active_items(&req.owner_id).await?;
        if items.is_empty() {
            return Err(WardrobeError::EmptyWardrobe);
        }

        let filter = ContextFilter {
            occasion: req.occasion,
            season: req.season,
            tone: None,
        };
        let slots = Partition::new(filter.apply(items));
        if !slots.has_mandatory_slots() {
            return Err(WardrobeError::InsufficientWardrobe);
        }

        let pairs = self.palette.valid_pairs(&slots.tops, &slots.bottoms);
        let Some(&first) = pairs.first() else {
            return Err(WardrobeError::NoCompatiblePair);
        };

        let mut chosen = None;
        for &(top, bottom) in &pairs {
            let history = store.find_usage(&req.owner_id, &top.id, &bottom.id).await?;
            if history.is_some_and(|h| h.is_recent(now, self.policy.freshness_window)) {
                debug!(top = %top.id, bottom = %bottom.id, "skipping recently worn combination");
                continue;
            }
            chosen = Some((top, bottom));
            break;
        }

        let (kind, (top, bottom)) = match chosen {
            Some(pair) => (SelectionKind::Fresh, pair),
            None => (SelectionKind::Fallback, first),
        };

        let footwear = slots
            .footwear
            .choose(rng)
            .cloned()
            .ok_or(WardrobeError::InsufficientWardrobe)?;
        let outerwear = slots.outerwear.choose(rng).cloned();
        let accessories = pick_accessories(rng, &slots.accessories, 0, self.policy.accessory_cap);

        let suggestion = OutfitSuggestion {
            top: top.clone(),
            bottom: bottom.clone(),
            footwear,
            outerwear,
            accessories,
            note: (kind == SelectionKind::Fallback).then(|| FALLBACK_NOTE.to_string()),
            kind,
        };

        self.record(store, &req.owner_id, &suggestion, now).await?;

        info!(
            owner = %req.owner_id,
            occasion = %req.occasion,
            candidates = pairs.len(),
            kind = ?suggestion.kind,
            "outfit assembled"
        );

        Ok(suggestion)
    }

    /// Suggests an outfit drawn entirely from one color group.
    ///
    /// Every slot is a uniform random pick from the toned pool; when any
    /// accessories match, at least one is included.
    pub async fn generate_tone_based<R: Rng + Send + ?Sized>(
        &self,
        store: &dyn Store,
        rng: &mut R,
        req: &OutfitRequest,
        tone: &str,
        now: DateTime<Utc>,
    ) -> Result<OutfitSuggestion, WardrobeError> {
        let tone = tone.trim().to_lowercase();

        let items = store.list_active_items(&req.owner_id).await?;
        if items.is_empty() {
            return Err(WardrobeError::EmptyWardrobe);
        }

        let filter = ContextFilter {
            occasion: req.occasion,
            season: req.season,
            tone: Some(&tone),
        };
        let slots = Partition::new(filter.apply(items));

        let insufficient = || WardrobeError::InsufficientTonedWardrobe {
            tone: tone.clone(),
            occasion: req.occasion.to_string(),
            season: req
                .season
                .map(|s| s.to_string())
                .unwrap_or_else(|| "any".to_string()),
        };

        let top = slots.tops.choose(rng).cloned().ok_or_else(insufficient)?;
        let bottom = slots.bottoms.choose(rng).cloned().ok_or_else(insufficient)?;
        let footwear = slots.footwear.choose(rng).cloned().ok_or_else(insufficient)?;
        let outerwear = slots.outerwear.choose(rng).cloned();
        let accessories = pick_accessories(rng, &slots.accessories, 1, self.policy.accessory_cap);

        let suggestion = OutfitSuggestion {
            top,
            bottom,
            footwear,
            outerwear,
            accessories,
            kind: SelectionKind::Tone,
            note: Some(format!("Generated based on {} tone preference", tone)),
        };

        self.record(store, &req.owner_id, &suggestion, now).await?;

        info!(owner = %req.owner_id, tone = %tone, "toned outfit assembled");

        Ok(suggestion)
    }

    async fn record(
        &self,
        store: &dyn Store,
        owner: &str,
        outfit: &OutfitSuggestion,
        now: DateTime<Utc>,
    ) -> Result<(), WardrobeError> {
        let usage = OutfitUsage {
            last_worn_at: now,
            footwear_id: Some(outfit.footwear.id.clone()),
            outerwear_id: outfit.outerwear.as_ref().map(|o| o.id.clone()),
            accessory_ids: outfit.accessories.iter().map(|a| a.id.clone()).collect(),
        };
        store
            .upsert_usage(owner, &outfit.top.id, &outfit.bottom.id, &usage)
            .await?;
        Ok(())
    }
}

/// Samples between `min` and `cap` accessories without replacement,
/// clamped to what is available.
fn pick_accessories<R: Rng + ?Sized>(
    rng: &mut R,
    pool: &[ClothingItem],
    min: usize,
    cap: usize,
) -> Vec<ClothingItem> {
    if pool.is_empty() || cap == 0 {
        return Vec::new();
    }
    let count = rng.random_range(min.min(cap)..=cap).min(pool.len());
    pool.choose_multiple(rng, count).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemType;
    use crate::store::memory::InMemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    struct Fixture {
        store: InMemoryStore,
        palette: Arc<ColorTable>,
        next: i64,
        base: DateTime<Utc>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                palette: Arc::new(ColorTable::default()),
                next: 0,
                base: Utc::now() - Duration::days(30),
            }
        }

        async fn add(&mut self, id: &str, item_type: ItemType, color: &str) -> ClothingItem {
            self.add_with(id, item_type, color, &[Season::Summer], &[Occasion::Casual])
                .await
        }

        async fn add_with(
            &mut self,
            id: &str,
            item_type: ItemType,
            color: &str,
            seasons: &[Season],
            occasions: &[Occasion],
        ) -> ClothingItem {
            self.next += 1;
            let item = ClothingItem {
                id: id.to_string(),
                owner_id: "u1".to_string(),
                item_type,
                category: "test".to_string(),
                color: color.to_string(),
                color_group: self.palette.resolve_group(color).unwrap().to_string(),
                seasons: seasons.to_vec(),
                occasions: occasions.to_vec(),
                is_active: true,
                image_url: format!("https://img/{}.png", id),
                created_at: self.base + Duration::minutes(self.next),
            };
            self.store.insert_item(&item).await.unwrap();
            item
        }

        fn assembler(&self) -> OutfitAssembler {
            OutfitAssembler::new(self.palette.clone(), AssemblyPolicy::default())
        }
    }

    fn casual_summer() -> OutfitRequest {
        OutfitRequest {
            owner_id: "u1".to_string(),
            occasion: Occasion::Casual,
            season: Some(Season::Summer),
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    async fn basic_wardrobe() -> Fixture {
        let mut fx = Fixture::new();
        fx.add("blue-top", ItemType::Top, "blue").await;
        fx.add("white-bottom", ItemType::Bottom, "white").await;
        fx.add("black-footwear", ItemType::Footwear, "black").await;
        fx
    }

    #[tokio::test]
    async fn test_single_pair_scenario_creates_one_record() {
        let fx = basic_wardrobe().await;
        let now = Utc::now();
        let outfit = fx
            .assembler()
            .generate(&fx.store, &mut rng(), &casual_summer(), now)
            .await
            .unwrap();

        assert_eq!(outfit.top.id, "blue-top");
        assert_eq!(outfit.bottom.id, "white-bottom");
        assert_eq!(outfit.footwear.id, "black-footwear");
        assert!(outfit.outerwear.is_none());
        assert!(outfit.accessories.is_empty());
        assert_eq!(outfit.kind, SelectionKind::Fresh);
        assert!(outfit.note.is_none());

        assert_eq!(fx.store.outfit_count(), 1);
        let record = fx
            .store
            .find_usage("u1", "blue-top", "white-bottom")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.last_worn_at, now);
        assert_eq!(record.footwear_id.as_deref(), Some("black-footwear"));
    }

    #[tokio::test]
    async fn test_repeat_within_window_falls_back_without_duplicating() {
        let fx = basic_wardrobe().await;
        let asm = fx.assembler();
        let first_at = Utc::now();
        let second_at = first_at + Duration::hours(1);

        asm.generate(&fx.store, &mut rng(), &casual_summer(), first_at)
            .await
            .unwrap();
        let again = asm
            .generate(&fx.store, &mut rng(), &casual_summer(), second_at)
            .await
            .unwrap();

        assert_eq!(again.top.id, "blue-top");
        assert_eq!(again.bottom.id, "white-bottom");
        assert!(again.is_fallback());
        assert!(again.note.is_some());
        assert_eq!(fx.store.outfit_count(), 1);
        let record = fx
            .store
            .find_usage("u1", "blue-top", "white-bottom")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.last_worn_at, second_at);
    }

    #[tokio::test]
    async fn test_recently_worn_pair_is_skipped() {
        let mut fx = basic_wardrobe().await;
        fx.add("grey-bottom", ItemType::Bottom, "grey").await;
        let now = Utc::now();
        let usage = OutfitUsage {
            last_worn_at: now - Duration::hours(2),
            footwear_id: None,
            outerwear_id: None,
            accessory_ids: vec![],
        };
        fx.store
            .upsert_usage("u1", "blue-top", "white-bottom", &usage)
            .await
            .unwrap();

        let outfit = fx
            .assembler()
            .generate(&fx.store, &mut rng(), &casual_summer(), now)
            .await
            .unwrap();
        assert_eq!(outfit.bottom.id, "grey-bottom");
        assert_eq!(outfit.kind, SelectionKind::Fresh);
        assert_eq!(fx.store.outfit_count(), 2);
    }

    #[tokio::test]
    async fn test_stale_history_is_reusable() {
        let mut fx = basic_wardrobe().await;
        fx.add("grey-bottom", ItemType::Bottom, "grey").await;
        let now = Utc::now();
        let usage = OutfitUsage {
            last_worn_at: now - Duration::hours(25),
            footwear_id: None,
            outerwear_id: None,
            accessory_ids: vec![],
        };
        fx.store
            .upsert_usage("u1", "blue-top", "white-bottom", &usage)
            .await
            .unwrap();

        let outfit = fx
            .assembler()
            .generate(&fx.store, &mut rng(), &casual_summer(), now)
            .await
            .unwrap();
        assert_eq!(outfit.bottom.id, "white-bottom");
        assert_eq!(outfit.kind, SelectionKind::Fresh);
    }

    #[tokio::test]
    async fn test_fallback_uses_first_compatible_pair() {
        let mut fx = basic_wardrobe().await;
        fx.add("grey-bottom", ItemType::Bottom, "grey").await;
        let asm = fx.assembler();
        let now = Utc::now();

        let a = asm.generate(&fx.store, &mut rng(), &casual_summer(), now).await.unwrap();
        let b = asm.generate(&fx.store, &mut rng(), &casual_summer(), now).await.unwrap();
        let c = asm.generate(&fx.store, &mut rng(), &casual_summer(), now).await.unwrap();

        assert_eq!(a.bottom.id, "white-bottom");
        assert_eq!(b.bottom.id, "grey-bottom");
        assert!(c.is_fallback());
        assert_eq!(c.bottom.id, "white-bottom");
        assert_eq!(fx.store.outfit_count(), 2);
    }

    #[tokio::test]
    async fn test_missing_footwear_is_insufficient() {
        let mut fx = Fixture::new();
        fx.add("t", ItemType::Top, "blue").await;
        fx.add("b", ItemType::Bottom, "white").await;
        fx.add("a", ItemType::Accessory, "gold").await;
        let err = fx
            .assembler()
            .generate(&fx.store, &mut rng(), &casual_summer(), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, WardrobeError::InsufficientWardrobe));
        assert_eq!(fx.store.outfit_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_wardrobe() {
        let fx = Fixture::new();
        let err = fx
            .assembler()
            .generate(&fx.store, &mut rng(), &casual_summer(), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, WardrobeError::EmptyWardrobe));
    }

    #[tokio::test]
    async fn test_soft_deleted_items_are_ignored() {
        let fx = basic_wardrobe().await;
        fx.store.set_item_active("u1", "black-footwear", false).await.unwrap();
        let err = fx
            .assembler()
            .generate(&fx.store, &mut rng(), &casual_summer(), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, WardrobeError::InsufficientWardrobe));
    }

    #[tokio::test]
    async fn test_no_compatible_pair() {
        let mut fx = Fixture::new();
        fx.add("t", ItemType::Top, "navy").await;
        fx.add("b", ItemType::Bottom, "purple").await;
        fx.add("f", ItemType::Footwear, "black").await;
        let err = fx
            .assembler()
            .generate(&fx.store, &mut rng(), &casual_summer(), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, WardrobeError::NoCompatiblePair));
    }

    #[tokio::test]
    async fn test_season_and_occasion_filters_apply() {
        let mut fx = basic_wardrobe().await;
        fx.add_with(
            "winter-coat",
            ItemType::Outerwear,
            "camel",
            &[Season::Winter],
            &[Occasion::Casual],
        )
        .await;
        fx.add_with(
            "party-scarf",
            ItemType::Accessory,
            "red",
            &[Season::Summer],
            &[Occasion::Party],
        )
        .await;

        for seed in 0..20 {
            let outfit = fx
                .assembler()
                .generate(
                    &fx.store,
                    &mut StdRng::seed_from_u64(seed),
                    &casual_summer(),
                    Utc::now(),
                )
                .await
                .unwrap();
            assert!(outfit.outerwear.is_none());
            assert!(outfit.accessories.is_empty());
        }

        let no_season = OutfitRequest {
            season: None,
            ..casual_summer()
        };
        let mut saw_coat = false;
        for seed in 0..20 {
            let outfit = fx
                .assembler()
                .generate(&fx.store, &mut StdRng::seed_from_u64(seed), &no_season, Utc::now())
                .await
                .unwrap();
            saw_coat |= outfit.outerwear.is_some();
        }
        assert!(saw_coat);

        let formal = OutfitRequest {
            occasion: Occasion::Formal,
            ..casual_summer()
        };
        let err = fx
            .assembler()
            .generate(&fx.store, &mut rng(), &formal, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, WardrobeError::InsufficientWardrobe));
    }

    #[tokio::test]
    async fn test_accessories_capped_and_distinct() {
        let mut fx = basic_wardrobe().await;
        for (i, color) in ["gold", "silver", "red", "olive", "pink"].iter().enumerate() {
            fx.add(&format!("acc-{}", i), ItemType::Accessory, color).await;
        }
        let asm = fx.assembler();
        let mut sizes = HashSet::new();
        for seed in 0..64 {
            let outfit = asm
                .generate(
                    &fx.store,
                    &mut StdRng::seed_from_u64(seed),
                    &casual_summer(),
                    Utc::now(),
                )
                .await
                .unwrap();
            let ids: HashSet<&str> = outfit.accessories.iter().map(|a| a.id.as_str()).collect();
            assert!(outfit.accessories.len() <= DEFAULT_ACCESSORY_CAP);
            assert_eq!(ids.len(), outfit.accessories.len());
            sizes.insert(outfit.accessories.len());
        }
        assert!(sizes.contains(&0));
        assert!(sizes.contains(&2));
    }

    #[tokio::test]
    async fn test_returned_pair_is_always_compatible() {
        let mut fx = Fixture::new();
        for (i, c) in ["navy", "red", "olive", "brown"].iter().enumerate() {
            fx.add(&format!("t{}", i), ItemType::Top, c).await;
        }
        for (i, c) in ["purple", "khaki", "maroon"].iter().enumerate() {
            fx.add(&format!("b{}", i), ItemType::Bottom, c).await;
        }
        fx.add("f", ItemType::Footwear, "black").await;
        let asm = fx.assembler();
        for _ in 0..6 {
            let outfit = asm
                .generate(&fx.store, &mut rng(), &casual_summer(), Utc::now())
                .await
                .unwrap();
            let top_group = fx.palette.resolve_group(&outfit.top.color).unwrap();
            let bottom_group = fx.palette.resolve_group(&outfit.bottom.color).unwrap();
            assert!(fx.palette.pair_compatible(top_group, bottom_group));
        }
    }

    #[tokio::test]
    async fn test_same_seed_same_outfit() {
        let build = || async {
            let mut fx = basic_wardrobe().await;
            fx.add("f2", ItemType::Footwear, "brown").await;
            fx.add("coat", ItemType::Outerwear, "navy").await;
            fx.add("coat2", ItemType::Outerwear, "grey").await;
            fx.add("a1", ItemType::Accessory, "gold").await;
            fx.add("a2", ItemType::Accessory, "silver").await;
            fx.add("a3", ItemType::Accessory, "red").await;
            fx
        };
        let now = Utc::now();
        let one = build().await;
        let two = build().await;
        let x = one
            .assembler()
            .generate(&one.store, &mut StdRng::seed_from_u64(42), &casual_summer(), now)
            .await
            .unwrap();
        let y = two
            .assembler()
            .generate(&two.store, &mut StdRng::seed_from_u64(42), &casual_summer(), now)
            .await
            .unwrap();
        assert_eq!(x.footwear.id, y.footwear.id);
        assert_eq!(
            x.outerwear.map(|o| o.id),
            y.outerwear.map(|o| o.id)
        );
        let xa: Vec<String> = x.accessories.into_iter().map(|a| a.id).collect();
        let ya: Vec<String> = y.accessories.into_iter().map(|a| a.id).collect();
        assert_eq!(xa, ya);
    }

    #[tokio::test]
    async fn test_tone_based_outfit() {
        let mut fx = Fixture::new();
        fx.add("t-olive", ItemType::Top, "olive").await;
        fx.add("t-blue", ItemType::Top, "blue").await;
        fx.add("b-khaki", ItemType::Bottom, "khaki").await;
        fx.add("f-tan", ItemType::Footwear, "tan").await;
        fx.add("a-camel", ItemType::Accessory, "camel").await;
        fx.add("a-gold", ItemType::Accessory, "gold").await;

        let asm = fx.assembler();
        for seed in 0..10 {
            let outfit = asm
                .generate_tone_based(
                    &fx.store,
                    &mut StdRng::seed_from_u64(seed),
                    &casual_summer(),
                    "Earth",
                    Utc::now(),
                )
                .await
                .unwrap();
            assert_eq!(outfit.kind, SelectionKind::Tone);
            assert_eq!(outfit.top.id, "t-olive");
            assert_eq!(outfit.bottom.id, "b-khaki");
            assert_eq!(outfit.footwear.id, "f-tan");
            let acc: Vec<&str> = outfit.accessories.iter().map(|a| a.id.as_str()).collect();
            assert_eq!(acc, vec!["a-camel"]);
            assert_eq!(
                outfit.note.as_deref(),
                Some("Generated based on earth tone preference")
            );
        }
        assert_eq!(fx.store.outfit_count(), 1);
    }

    #[tokio::test]
    async fn test_tone_based_errors() {
        let fx = basic_wardrobe().await;
        let asm = fx.assembler();

        // A tone no item carries simply leaves the toned pool empty.
        let err = asm
            .generate_tone_based(&fx.store, &mut rng(), &casual_summer(), "Sparkly", Utc::now())
            .await
            .unwrap_err();
        assert!(
            matches!(err, WardrobeError::InsufficientTonedWardrobe { ref tone, .. } if tone == "sparkly")
        );
        assert_eq!(
            err.to_string(),
            "Not enough 'sparkly' items to form an outfit for summer/casual"
        );

        let err = asm
            .generate_tone_based(&fx.store, &mut rng(), &casual_summer(), "neutral", Utc::now())
            .await
            .unwrap_err();
        match err {
            WardrobeError::InsufficientTonedWardrobe { tone, season, .. } => {
                assert_eq!(tone, "neutral");
                assert_eq!(season, "summer");
            }
            other => panic!("unexpected error: {}", other),
        }

        let empty = Fixture::new();
        let err = empty
            .assembler()
            .generate_tone_based(&empty.store, &mut rng(), &casual_summer(), "neutral", Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, WardrobeError::EmptyWardrobe));

        let err = empty
            .assembler()
            .generate_tone_based(&empty.store, &mut rng(), &casual_summer(), "warm", Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, WardrobeError::EmptyWardrobe));
        assert_eq!(empty.store.outfit_count(), 0);
    }

    #[test]
    fn test_pick_accessories_bounds() {
        let mut fx_rng = rng();
        let item = |id: &str| ClothingItem {
            id: id.to_string(),
            owner_id: "u1".to_string(),
            item_type: ItemType::Accessory,
            category: "ring".to_string(),
            color: "gold".to_string(),
            color_group: "warm-light".to_string(),
            seasons: vec![Season::Summer],
            occasions: vec![Occasion::Casual],
            is_active: true,
            image_url: String::new(),
            created_at: Utc::now(),
        };
        let one = vec![item("a")];
        for _ in 0..20 {
            assert_eq!(pick_accessories(&mut fx_rng, &one, 1, 2).len(), 1);
            assert!(pick_accessories(&mut fx_rng, &one, 0, 0).is_empty());
            assert!(pick_accessories(&mut fx_rng, &[], 1, 2).is_empty());
        }
    }
}
