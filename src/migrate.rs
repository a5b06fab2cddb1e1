use anyhow::Result;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db;

pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    migrate_pool(&pool).await?;
    pool.close().await;
    Ok(())
}

/// Creates all tables and indexes. Idempotent.
pub async fn migrate_pool(pool: &SqlitePool) -> Result<()> {
    // Timestamps are microseconds since the Unix epoch.

    // Create clothing_items table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS clothing_items (
            id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL,
            item_type TEXT NOT NULL,
            category TEXT NOT NULL,
            color TEXT NOT NULL,
            color_group TEXT NOT NULL,
            seasons_json TEXT NOT NULL DEFAULT '[]',
            occasions_json TEXT NOT NULL DEFAULT '[]',
            is_active INTEGER NOT NULL DEFAULT 1,
            image_url TEXT NOT NULL,
            created_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create outfits table; one row per (owner, top, bottom)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS outfits (
            id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL,
            top_id TEXT NOT NULL,
            bottom_id TEXT NOT NULL,
            footwear_id TEXT,
            outerwear_id TEXT,
            accessory_ids_json TEXT NOT NULL DEFAULT '[]',
            last_worn_at INTEGER NOT NULL,
            UNIQUE(owner_id, top_id, bottom_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_items_owner_active ON clothing_items(owner_id, is_active, item_type)",
    )
    .execute(pool)
    .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_outfits_owner_worn ON outfits(owner_id, last_worn_at DESC)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
