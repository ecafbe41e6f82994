//! Media box and media box entry repository

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use multimedias_core::models::{MediaBox, MediaBoxEntry, MediaKind};

#[derive(Clone)]
pub struct MediaBoxRepository {
    pool: PgPool,
}

impl MediaBoxRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<MediaBox>> {
        let mediabox = sqlx::query_as::<Postgres, MediaBox>(
            r#"
            SELECT id, site_id, name, slug, channel_id, article_id, published, date_available
            FROM mediaboxes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get media box")?;
        Ok(mediabox)
    }

    pub async fn create(&self, mediabox: &MediaBox) -> Result<MediaBox> {
        let created = sqlx::query_as::<Postgres, MediaBox>(
            r#"
            INSERT INTO mediaboxes (
                id, site_id, name, slug, channel_id, article_id, published, date_available
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, site_id, name, slug, channel_id, article_id, published, date_available
            "#,
        )
        .bind(mediabox.id)
        .bind(mediabox.site_id)
        .bind(&mediabox.name)
        .bind(&mediabox.slug)
        .bind(mediabox.channel_id)
        .bind(mediabox.article_id)
        .bind(mediabox.published)
        .bind(mediabox.date_available)
        .fetch_one(&self.pool)
        .await
        .context("Failed to create media box")?;
        Ok(created)
    }

    pub async fn add_entry(&self, entry: &MediaBoxEntry) -> Result<MediaBoxEntry> {
        let created = sqlx::query_as::<Postgres, MediaBoxEntry>(
            r#"
            INSERT INTO mediabox_entries (
                id, mediabox_id, media_id, kind, sort_order, date_available, date_end
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, mediabox_id, media_id, kind, sort_order, date_available, date_end
            "#,
        )
        .bind(entry.id)
        .bind(entry.mediabox_id)
        .bind(entry.media_id)
        .bind(entry.kind)
        .bind(entry.order)
        .bind(entry.date_available)
        .bind(entry.date_end)
        .fetch_one(&self.pool)
        .await
        .context("Failed to add media box entry")?;
        Ok(created)
    }

    pub async fn list_entries(&self, mediabox_id: Uuid) -> Result<Vec<MediaBoxEntry>> {
        let entries = sqlx::query_as::<Postgres, MediaBoxEntry>(
            r#"
            SELECT id, mediabox_id, media_id, kind, sort_order, date_available, date_end
            FROM mediabox_entries
            WHERE mediabox_id = $1
            ORDER BY kind, sort_order ASC
            "#,
        )
        .bind(mediabox_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list media box entries")?;
        Ok(entries)
    }

    /// Delete the box's `kind` entries whose end date is before `now`.
    /// Returns the number of deleted entries.
    pub async fn delete_ended_entries(
        &self,
        mediabox_id: Uuid,
        kind: MediaKind,
        now: DateTime<Utc>,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM mediabox_entries
            WHERE mediabox_id = $1 AND kind = $2 AND date_end < $3
            "#,
        )
        .bind(mediabox_id)
        .bind(kind)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to delete ended media box entries")?;
        Ok(result.rows_affected())
    }
}
