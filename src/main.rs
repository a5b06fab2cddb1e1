//! # wearsuggest CLI (`wear`)
//!
//! The `wear` binary manages a personal wardrobe and suggests a daily outfit
//! from it. It can also serve the same operations over HTTP.
//!
//! ## Usage
//!
//! ```bash
//! wear --config ./config/wear.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `wear init` | Create the SQLite database and run schema migrations |
//! | `wear item add` | Add a clothing item to a wardrobe |
//! | `wear item list` | List active items, optionally by type |
//! | `wear item deleted` | List soft-deleted items |
//! | `wear item get <id>` | Show one active item |
//! | `wear item remove <id>` | Soft-delete an item |
//! | `wear item restore <id>` | Restore a soft-deleted item |
//! | `wear palette` | Show color groups, their colors and compatible groups |
//! | `wear suggest` | Assemble an outfit and record it as worn |
//! | `wear recent` | Show the most recently worn outfits |
//! | `wear serve` | Start the HTTP server |
//!
//! ## Examples
//!
//! ```bash
//! wear init
//! wear item add --owner u1 --type top --category shirt --color navy \
//!     --seasons summer,winter --occasions casual --image-url https://img/1.png
//! wear suggest --owner u1 --occasion casual --season summer
//! wear suggest --owner u1 --occasion formal --tone neutral --seed 7
//! wear recent --owner u1 --limit 5
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`); logs go to stderr.

mod config;
mod db;
mod items;
mod migrate;
mod outfits;
mod server;
mod sqlite_store;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use wearsuggest_core::models::{ItemType, Occasion, Season};

/// wearsuggest: a personal wardrobe manager with a daily outfit suggestion engine.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/wear.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "wear",
    about = "Personal wardrobe manager and daily outfit suggester",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/wear.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Idempotent; running it multiple times is safe.
    Init,

    /// Manage wardrobe items.
    Item {
        #[command(subcommand)]
        action: ItemAction,
    },

    /// Show the color palette: groups, their colors, and which groups pair.
    Palette,

    /// Suggest an outfit for an occasion and record it as worn.
    Suggest {
        /// Wardrobe owner.
        #[arg(long)]
        owner: String,

        /// `casual`, `formal` or `party`.
        #[arg(long)]
        occasion: Occasion,

        /// `summer`, `winter` or `rainy`; omitted means any season.
        #[arg(long)]
        season: Option<Season>,

        /// Restrict every garment to one color group (e.g. `neutral`).
        #[arg(long)]
        tone: Option<String>,

        /// Seed the random choices for a reproducible suggestion.
        #[arg(long)]
        seed: Option<u64>,

        /// Print the suggestion as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the most recently worn outfits.
    Recent {
        #[arg(long)]
        owner: String,

        /// Number of outfits (default 7, at most 20).
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Start the HTTP server on `[server].bind`.
    Serve,
}

#[derive(Subcommand)]
enum ItemAction {
    /// Add a clothing item.
    Add {
        #[arg(long)]
        owner: String,

        /// `top`, `bottom`, `footwear`, `outerwear` or `accessory`.
        #[arg(long = "type")]
        item_type: ItemType,

        #[arg(long)]
        category: String,

        /// Color name; must be known to the palette.
        #[arg(long)]
        color: String,

        #[arg(long, value_delimiter = ',', required = true)]
        seasons: Vec<Season>,

        #[arg(long, value_delimiter = ',', required = true)]
        occasions: Vec<Occasion>,

        #[arg(long)]
        image_url: String,
    },

    /// List active items, newest first.
    List {
        #[arg(long)]
        owner: String,

        #[arg(long = "type")]
        item_type: Option<ItemType>,
    },

    /// List soft-deleted items.
    Deleted {
        #[arg(long)]
        owner: String,
    },

    /// Show one active item.
    Get {
        #[arg(long)]
        owner: String,
        id: String,
    },

    /// Soft-delete an item. It stops being suggested but stays in history.
    Remove {
        #[arg(long)]
        owner: String,
        id: String,
    },

    /// Restore a soft-deleted item.
    Restore {
        #[arg(long)]
        owner: String,
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Item { action } => match action {
            ItemAction::Add {
                owner,
                item_type,
                category,
                color,
                seasons,
                occasions,
                image_url,
            } => {
                let args = items::AddItemArgs {
                    item_type,
                    category,
                    color,
                    seasons,
                    occasions,
                    image_url,
                };
                items::run_add(&cfg, &owner, args).await?;
            }
            ItemAction::List { owner, item_type } => {
                items::run_list(&cfg, &owner, item_type, false).await?;
            }
            ItemAction::Deleted { owner } => {
                items::run_list(&cfg, &owner, None, true).await?;
            }
            ItemAction::Get { owner, id } => {
                items::run_get(&cfg, &owner, &id).await?;
            }
            ItemAction::Remove { owner, id } => {
                items::run_remove(&cfg, &owner, &id).await?;
            }
            ItemAction::Restore { owner, id } => {
                items::run_restore(&cfg, &owner, &id).await?;
            }
        },
        Commands::Palette => {
            items::run_palette(&cfg)?;
        }
        Commands::Suggest {
            owner,
            occasion,
            season,
            tone,
            seed,
            json,
        } => {
            let args = outfits::SuggestArgs {
                occasion,
                season,
                tone,
                seed,
                json,
            };
            outfits::run_suggest(&cfg, &owner, args).await?;
        }
        Commands::Recent { owner, limit } => {
            outfits::run_recent(&cfg, &owner, limit).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
