//! Wardrobe catalogue commands (`wear item ...`).
//!
//! Each command opens the SQLite store, runs one catalogue operation, and
//! prints the result to stdout.

use anyhow::Result;

use wearsuggest_core::models::{ClothingItem, ItemType, Occasion, Season};
use wearsuggest_core::wardrobe::{self, NewClothingItem};

use crate::config::Config;
use crate::sqlite_store::SqliteStore;

/// Arguments for `wear item add`.
#[derive(Debug, Clone)]
pub struct AddItemArgs {
    pub item_type: ItemType,
    pub category: String,
    pub color: String,
    pub seasons: Vec<Season>,
    pub occasions: Vec<Occasion>,
    pub image_url: String,
}

pub async fn run_add(config: &Config, owner: &str, args: AddItemArgs) -> Result<()> {
    let store = SqliteStore::open(config).await?;
    let palette = config.color_table()?;
    let input = NewClothingItem {
        item_type: args.item_type,
        category: args.category,
        color: args.color,
        seasons: args.seasons,
        occasions: args.occasions,
        image_url: args.image_url,
    };
    let item = wardrobe::create_item(&store, &palette, owner, input).await?;

    println!("Added {} {} ({}, group {})", item.item_type, item.id, item.color, item.color_group);
    Ok(())
}

pub async fn run_list(
    config: &Config,
    owner: &str,
    item_type: Option<ItemType>,
    deleted: bool,
) -> Result<()> {
    let store = SqliteStore::open(config).await?;
    let items = if deleted {
        wardrobe::list_deleted_items(&store, owner).await?
    } else {
        wardrobe::list_items(&store, owner, item_type).await?
    };

    if items.is_empty() {
        println!("No items.");
        return Ok(());
    }

    println!(
        "{:<36} {:<10} {:<14} {:<12} {:<11} {:<20} OCCASIONS",
        "ID", "TYPE", "CATEGORY", "COLOR", "GROUP", "SEASONS"
    );
    for item in &items {
        println!(
            "{:<36} {:<10} {:<14} {:<12} {:<11} {:<20} {}",
            item.id,
            item.item_type,
            item.category,
            item.color,
            item.color_group,
            join(&item.seasons),
            join(&item.occasions),
        );
    }
    println!("{} item(s)", items.len());
    Ok(())
}

pub async fn run_get(config: &Config, owner: &str, id: &str) -> Result<()> {
    let store = SqliteStore::open(config).await?;
    let item = wardrobe::get_item(&store, owner, id).await?;
    print_item(&item);
    Ok(())
}

pub async fn run_remove(config: &Config, owner: &str, id: &str) -> Result<()> {
    let store = SqliteStore::open(config).await?;
    wardrobe::remove_item(&store, owner, id).await?;
    println!("Removed {}", id);
    Ok(())
}

pub async fn run_restore(config: &Config, owner: &str, id: &str) -> Result<()> {
    let store = SqliteStore::open(config).await?;
    let item = wardrobe::restore_item(&store, owner, id).await?;
    println!("Restored {} {}", item.item_type, item.id);
    Ok(())
}

/// Prints every color group with its colors and the groups it pairs with.
pub fn run_palette(config: &Config) -> Result<()> {
    let table = config.color_table()?;
    let groups = table.groups();
    let colors = table.colors();

    for group in &groups {
        let members: Vec<&str> = colors
            .iter()
            .copied()
            .filter(|c| table.resolve_group(c).ok() == Some(*group))
            .collect();
        let pairs: Vec<&str> = groups
            .iter()
            .copied()
            .filter(|other| table.pair_compatible(group, other))
            .collect();
        println!("{}", group);
        println!("  colors:     {}", members.join(", "));
        println!("  pairs with: {}", pairs.join(", "));
    }
    Ok(())
}

fn print_item(item: &ClothingItem) {
    println!("--- Item ---");
    println!("id:          {}", item.id);
    println!("type:        {}", item.item_type);
    println!("category:    {}", item.category);
    println!("color:       {} ({})", item.color, item.color_group);
    println!("seasons:     {}", join(&item.seasons));
    println!("occasions:   {}", join(&item.occasions));
    println!("image_url:   {}", item.image_url);
    println!(
        "created_at:  {}",
        item.created_at.format("%Y-%m-%dT%H:%M:%SZ")
    );
}

pub(crate) fn join<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
