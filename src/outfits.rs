//! Outfit commands (`wear suggest`, `wear recent`).

use anyhow::Result;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;

use wearsuggest_core::history;
use wearsuggest_core::models::{ClothingItem, Occasion, Season};
use wearsuggest_core::{OutfitAssembler, OutfitRequest, OutfitSuggestion};

use crate::config::Config;
use crate::sqlite_store::SqliteStore;

/// Arguments for `wear suggest`.
#[derive(Debug, Clone)]
pub struct SuggestArgs {
    pub occasion: Occasion,
    pub season: Option<Season>,
    pub tone: Option<String>,
    /// Fixed RNG seed; random from the OS when absent.
    pub seed: Option<u64>,
    pub json: bool,
}

pub async fn run_suggest(config: &Config, owner: &str, args: SuggestArgs) -> Result<()> {
    let store = SqliteStore::open(config).await?;
    let assembler = OutfitAssembler::new(config.color_table()?, config.engine.policy()?);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let req = OutfitRequest {
        owner_id: owner.to_string(),
        occasion: args.occasion,
        season: args.season,
    };

    let outfit = match args.tone.as_deref() {
        Some(tone) => {
            assembler
                .generate_tone_based(&store, &mut rng, &req, tone, Utc::now())
                .await?
        }
        None => assembler.generate(&store, &mut rng, &req, Utc::now()).await?,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outfit)?);
    } else {
        print_outfit(&outfit);
    }
    Ok(())
}

pub async fn run_recent(config: &Config, owner: &str, limit: Option<usize>) -> Result<()> {
    let store = SqliteStore::open(config).await?;
    let outfits = history::recent_outfits(&store, owner, limit).await?;

    if outfits.is_empty() {
        println!("No outfits yet.");
        return Ok(());
    }

    for (i, outfit) in outfits.iter().enumerate() {
        println!(
            "{}. {}  top={}  bottom={}",
            i + 1,
            outfit.last_worn_at.format("%Y-%m-%d %H:%M"),
            label(outfit.top.as_ref()),
            label(outfit.bottom.as_ref()),
        );
    }
    Ok(())
}

fn label(item: Option<&ClothingItem>) -> String {
    match item {
        Some(i) => format!("{} {} ({})", i.color, i.category, i.id),
        None => "(missing)".to_string(),
    }
}

fn print_outfit(outfit: &OutfitSuggestion) {
    println!("--- Outfit ---");
    println!("top:         {}", label(Some(&outfit.top)));
    println!("bottom:      {}", label(Some(&outfit.bottom)));
    println!("footwear:    {}", label(Some(&outfit.footwear)));
    if let Some(ref o) = outfit.outerwear {
        println!("outerwear:   {}", label(Some(o)));
    }
    for a in &outfit.accessories {
        println!("accessory:   {}", label(Some(a)));
    }
    if let Some(ref note) = outfit.note {
        println!();
        println!("note: {}", note);
    }
}
