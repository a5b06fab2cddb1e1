//! SQLite-backed [`Store`] implementation.
//!
//! Items live in `clothing_items`; outfit history lives in `outfits`, whose
//! `UNIQUE(owner_id, top_id, bottom_id)` constraint backs the one-record-
//! per-combination invariant. History writes are a single
//! `INSERT ... ON CONFLICT DO UPDATE` so concurrent writers converge.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use wearsuggest_core::models::{ClothingItem, ItemType, OutfitRecord, OutfitUsage};
use wearsuggest_core::store::Store;

use crate::config::Config;
use crate::{db, migrate};

/// SQLite implementation of the [`Store`] trait.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connects to the configured database and applies migrations.
    pub async fn open(config: &Config) -> Result<Self> {
        let pool = db::connect(config).await?;
        migrate::migrate_pool(&pool).await?;
        Ok(Self::new(pool))
    }
}

fn to_micros(ts: DateTime<Utc>) -> i64 {
    ts.timestamp_micros()
}

fn from_micros(us: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_micros(us).ok_or_else(|| anyhow!("timestamp out of range: {}", us))
}

const ITEM_COLUMNS: &str = "id, owner_id, item_type, category, color, color_group, \
     seasons_json, occasions_json, is_active, image_url, created_at";

const OUTFIT_COLUMNS: &str = "id, owner_id, top_id, bottom_id, footwear_id, outerwear_id, \
     accessory_ids_json, last_worn_at";

fn row_to_item(row: &SqliteRow) -> Result<ClothingItem> {
    let item_type: String = row.get("item_type");
    let seasons_json: String = row.get("seasons_json");
    let occasions_json: String = row.get("occasions_json");
    let id: String = row.get("id");
    Ok(ClothingItem {
        item_type: item_type
            .parse::<ItemType>()
            .with_context(|| format!("corrupt item_type on item {}", id))?,
        seasons: serde_json::from_str(&seasons_json)
            .with_context(|| format!("corrupt seasons_json on item {}", id))?,
        occasions: serde_json::from_str(&occasions_json)
            .with_context(|| format!("corrupt occasions_json on item {}", id))?,
        owner_id: row.get("owner_id"),
        category: row.get("category"),
        color: row.get("color"),
        color_group: row.get("color_group"),
        is_active: row.get("is_active"),
        image_url: row.get("image_url"),
        created_at: from_micros(row.get("created_at"))?,
        id,
    })
}

fn row_to_outfit(row: &SqliteRow) -> Result<OutfitRecord> {
    let accessory_ids_json: String = row.get("accessory_ids_json");
    Ok(OutfitRecord {
        id: row.get("id"),
        owner_id: row.get("owner_id"),
        top_id: row.get("top_id"),
        bottom_id: row.get("bottom_id"),
        footwear_id: row.get("footwear_id"),
        outerwear_id: row.get("outerwear_id"),
        accessory_ids: serde_json::from_str(&accessory_ids_json)
            .context("corrupt accessory_ids_json")?,
        last_worn_at: from_micros(row.get("last_worn_at"))?,
    })
}

#[async_trait]
impl Store for SqliteStore {
    async fn list_active_items(&self, owner: &str) -> Result<Vec<ClothingItem>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM clothing_items WHERE owner_id = ? AND is_active = 1 \
             ORDER BY created_at ASC, id ASC",
            ITEM_COLUMNS
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_item).collect()
    }

    async fn insert_item(&self, item: &ClothingItem) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO clothing_items (id, owner_id, item_type, category, color, color_group,
                                        seasons_json, occasions_json, is_active, image_url,
                                        created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&item.id)
        .bind(&item.owner_id)
        .bind(<&str>::from(item.item_type))
        .bind(&item.category)
        .bind(&item.color)
        .bind(&item.color_group)
        .bind(serde_json::to_string(&item.seasons)?)
        .bind(serde_json::to_string(&item.occasions)?)
        .bind(item.is_active)
        .bind(&item.image_url)
        .bind(to_micros(item.created_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_item(&self, owner: &str, id: &str) -> Result<Option<ClothingItem>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM clothing_items WHERE owner_id = ? AND id = ?",
            ITEM_COLUMNS
        ))
        .bind(owner)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_item).transpose()
    }

    async fn list_items(
        &self,
        owner: &str,
        active: bool,
        item_type: Option<ItemType>,
    ) -> Result<Vec<ClothingItem>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM clothing_items \
             WHERE owner_id = ? AND is_active = ? AND (? IS NULL OR item_type = ?) \
             ORDER BY created_at DESC, id ASC",
            ITEM_COLUMNS
        ))
        .bind(owner)
        .bind(active)
        .bind(item_type.map(<&str>::from))
        .bind(item_type.map(<&str>::from))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_item).collect()
    }

    async fn set_item_active(&self, owner: &str, id: &str, active: bool) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE clothing_items SET is_active = ? WHERE owner_id = ? AND id = ? AND is_active = ?",
        )
        .bind(active)
        .bind(owner)
        .bind(id)
        .bind(!active)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn find_usage(
        &self,
        owner: &str,
        top: &str,
        bottom: &str,
    ) -> Result<Option<OutfitRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM outfits WHERE owner_id = ? AND top_id = ? AND bottom_id = ?",
            OUTFIT_COLUMNS
        ))
        .bind(owner)
        .bind(top)
        .bind(bottom)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_outfit).transpose()
    }

    async fn upsert_usage(
        &self,
        owner: &str,
        top: &str,
        bottom: &str,
        usage: &OutfitUsage,
    ) -> Result<OutfitRecord> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO outfits (id, owner_id, top_id, bottom_id, footwear_id, outerwear_id,
                                 accessory_ids_json, last_worn_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(owner_id, top_id, bottom_id) DO UPDATE SET
                footwear_id = excluded.footwear_id,
                outerwear_id = excluded.outerwear_id,
                accessory_ids_json = excluded.accessory_ids_json,
                last_worn_at = MAX(outfits.last_worn_at, excluded.last_worn_at)
            RETURNING {}
            "#,
            OUTFIT_COLUMNS
        ))
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(owner)
        .bind(top)
        .bind(bottom)
        .bind(&usage.footwear_id)
        .bind(&usage.outerwear_id)
        .bind(serde_json::to_string(&usage.accessory_ids)?)
        .bind(to_micros(usage.last_worn_at))
        .fetch_one(&self.pool)
        .await?;

        row_to_outfit(&row)
    }

    async fn recent_usage(&self, owner: &str, limit: usize) -> Result<Vec<OutfitRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM outfits WHERE owner_id = ? ORDER BY last_worn_at DESC, id ASC LIMIT ?",
            OUTFIT_COLUMNS
        ))
        .bind(owner)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_outfit).collect()
    }
}
