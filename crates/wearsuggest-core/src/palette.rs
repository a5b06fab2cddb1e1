//! Color palette: raw color names, color groups, and pairing rules.
//!
//! A [`ColorTable`] maps a raw color name (`"navy"`) to a coarse color
//! group (`"cool-dark"`) and records which groups may be worn together.
//! The table is built once at startup, either from the built-in default
//! or from the `[palette]` config section, and is immutable afterwards.
//!
//! # Default Groups
//!
//! | Group | Pairs with |
//! |-------|------------|
//! | `neutral` | every group, including itself |
//! | `cool-dark` | `cool-light`, `warm-light`, `neutral` |
//! | `cool-light` | `cool-dark`, `warm-dark`, `earth`, `neutral` |
//! | `warm-dark` | `cool-light`, `warm-light`, `neutral` |
//! | `warm-light` | `cool-dark`, `warm-dark`, `earth`, `neutral` |
//! | `earth` | `earth`, `cool-light`, `warm-light`, `neutral` |

use anyhow::{bail, Result};
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::error::WardrobeError;
use crate::models::ClothingItem;

const DEFAULT_GROUPS: &[(&str, &[&str])] = &[
    (
        "neutral",
        &[
            "black", "white", "grey", "gray", "beige", "cream", "ivory", "charcoal", "silver",
        ],
    ),
    (
        "cool-dark",
        &["navy", "dark green", "teal", "indigo", "purple", "dark blue"],
    ),
    (
        "cool-light",
        &[
            "blue", "light blue", "sky blue", "mint", "lavender", "light green", "green",
            "turquoise",
        ],
    ),
    (
        "warm-dark",
        &["maroon", "burgundy", "brown", "rust", "dark red", "wine"],
    ),
    (
        "warm-light",
        &[
            "red", "orange", "yellow", "pink", "coral", "peach", "mustard", "gold",
        ],
    ),
    ("earth", &["olive", "khaki", "tan", "camel", "sand"]),
];

const DEFAULT_COMPATIBLE: &[(&str, &str)] = &[
    ("neutral", "neutral"),
    ("neutral", "cool-dark"),
    ("neutral", "cool-light"),
    ("neutral", "warm-dark"),
    ("neutral", "warm-light"),
    ("neutral", "earth"),
    ("cool-dark", "cool-light"),
    ("cool-dark", "warm-light"),
    ("cool-light", "warm-dark"),
    ("cool-light", "earth"),
    ("warm-dark", "warm-light"),
    ("warm-light", "earth"),
    ("earth", "earth"),
];

/// Immutable color lookup and pairing table.
#[derive(Debug, Clone)]
pub struct ColorTable {
    groups: HashMap<String, String>,
    compatible: HashSet<(String, String)>,
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

fn normalize_color(color: &str) -> String {
    color.trim().to_lowercase()
}

impl ColorTable {
    /// Builds a table from a color → group map and a list of compatible
    /// group pairs. Pairs are unordered.
    ///
    /// Fails when the map is empty or a pair names a group no color maps to.
    pub fn new(
        groups: HashMap<String, String>,
        compatible: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self> {
        if groups.is_empty() {
            bail!("palette must map at least one color");
        }

        let groups: HashMap<String, String> = groups
            .into_iter()
            .map(|(color, group)| (normalize_color(&color), group.trim().to_lowercase()))
            .collect();
        let known: HashSet<&str> = groups.values().map(String::as_str).collect();

        let mut pairs = HashSet::new();
        for (a, b) in compatible {
            let (a, b) = (a.trim().to_lowercase(), b.trim().to_lowercase());
            for g in [&a, &b] {
                if !known.contains(g.as_str()) {
                    bail!("palette pair references unknown color group '{}'", g);
                }
            }
            pairs.insert(pair_key(&a, &b));
        }

        Ok(Self {
            groups,
            compatible: pairs,
        })
    }

    /// Resolves a raw color name to its group.
    pub fn resolve_group(&self, color: &str) -> Result<&str, WardrobeError> {
        self.groups
            .get(&normalize_color(color))
            .map(String::as_str)
            .ok_or_else(|| WardrobeError::UnsupportedColor(color.to_string()))
    }

    /// Whether a top in `top_group` can be worn with a bottom in `bottom_group`.
    pub fn pair_compatible(&self, top_group: &str, bottom_group: &str) -> bool {
        self.compatible.contains(&pair_key(top_group, bottom_group))
    }

    /// All compatible (top, bottom) combinations, tops in the outer loop and
    /// bottoms in the inner loop, so input order fixes output order.
    pub fn valid_pairs<'a>(
        &self,
        tops: &'a [ClothingItem],
        bottoms: &'a [ClothingItem],
    ) -> Vec<(&'a ClothingItem, &'a ClothingItem)> {
        let mut pairs = Vec::new();
        for top in tops {
            for bottom in bottoms {
                if self.pair_compatible(&top.color_group, &bottom.color_group) {
                    pairs.push((top, bottom));
                }
            }
        }
        pairs
    }

    /// Known color groups, sorted.
    pub fn groups(&self) -> BTreeSet<&str> {
        self.groups.values().map(String::as_str).collect()
    }

    /// Known color names, sorted. Handy for prompting users.
    pub fn colors(&self) -> BTreeSet<&str> {
        self.groups.keys().map(String::as_str).collect()
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        let groups = DEFAULT_GROUPS
            .iter()
            .flat_map(|(group, colors)| {
                colors
                    .iter()
                    .map(move |c| (c.to_string(), group.to_string()))
            })
            .collect::<HashMap<_, _>>();
        let compatible = DEFAULT_COMPATIBLE
            .iter()
            .map(|(a, b)| pair_key(a, b))
            .collect();
        Self { groups, compatible }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemType, Occasion, Season};
    use chrono::Utc;

    fn item(id: &str, item_type: ItemType, group: &str) -> ClothingItem {
        ClothingItem {
            id: id.to_string(),
            owner_id: "u1".to_string(),
            item_type,
            category: "test".to_string(),
            color: "x".to_string(),
            color_group: group.to_string(),
            seasons: vec![Season::Summer],
            occasions: vec![Occasion::Casual],
            is_active: true,
            image_url: "https://img/x.png".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_resolve_known_colors() {
        let table = ColorTable::default();
        assert_eq!(table.resolve_group("navy").unwrap(), "cool-dark");
        assert_eq!(table.resolve_group("  Black ").unwrap(), "neutral");
        assert_eq!(table.resolve_group("Khaki").unwrap(), "earth");
    }

    #[test]
    fn test_resolve_unknown_color() {
        let table = ColorTable::default();
        let err = table.resolve_group("chartreuse").unwrap_err();
        assert!(matches!(err, WardrobeError::UnsupportedColor(c) if c == "chartreuse"));
    }

    #[test]
    fn test_pair_compatible_is_symmetric() {
        let table = ColorTable::default();
        assert!(table.pair_compatible("cool-dark", "neutral"));
        assert!(table.pair_compatible("neutral", "cool-dark"));
        assert!(table.pair_compatible("earth", "earth"));
        assert!(!table.pair_compatible("cool-dark", "cool-dark"));
        assert!(!table.pair_compatible("warm-dark", "earth"));
    }

    #[test]
    fn test_valid_pairs_order_tops_outer() {
        let table = ColorTable::default();
        let tops = vec![
            item("t1", ItemType::Top, "cool-dark"),
            item("t2", ItemType::Top, "neutral"),
        ];
        let bottoms = vec![
            item("b1", ItemType::Bottom, "cool-dark"),
            item("b2", ItemType::Bottom, "neutral"),
        ];
        let ids: Vec<(&str, &str)> = table
            .valid_pairs(&tops, &bottoms)
            .into_iter()
            .map(|(t, b)| (t.id.as_str(), b.id.as_str()))
            .collect();
        assert_eq!(ids, vec![("t1", "b2"), ("t2", "b1"), ("t2", "b2")]);
    }

    #[test]
    fn test_valid_pairs_empty_when_nothing_matches() {
        let table = ColorTable::default();
        let tops = vec![item("t1", ItemType::Top, "warm-dark")];
        let bottoms = vec![item("b1", ItemType::Bottom, "earth")];
        assert!(table.valid_pairs(&tops, &bottoms).is_empty());
    }

    #[test]
    fn test_custom_table() {
        let groups = HashMap::from([
            ("Red".to_string(), "warm".to_string()),
            ("blue".to_string(), "cool".to_string()),
        ]);
        let table = ColorTable::new(groups, vec![("cool".into(), "warm".into())]).unwrap();
        assert_eq!(table.resolve_group("red").unwrap(), "warm");
        assert!(table.pair_compatible("warm", "cool"));
        assert!(!table.pair_compatible("warm", "warm"));
        assert_eq!(table.groups().into_iter().collect::<Vec<_>>(), vec!["cool", "warm"]);
    }

    #[test]
    fn test_custom_table_rejects_unknown_group_in_pair() {
        let groups = HashMap::from([("red".to_string(), "warm".to_string())]);
        let err = ColorTable::new(groups, vec![("warm".into(), "cool".into())]).unwrap_err();
        assert!(err.to_string().contains("unknown color group 'cool'"));
    }

    #[test]
    fn test_every_default_group_is_paired() {
        let table = ColorTable::default();
        for g in table.groups() {
            assert!(table.pair_compatible(g, "neutral"), "{} lacks a neutral pairing", g);
        }
    }
}
