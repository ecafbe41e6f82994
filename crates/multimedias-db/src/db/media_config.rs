//! Media config repository

use anyhow::{Context, Result};
use sqlx::{PgPool, Postgres};

use multimedias_core::models::{MediaConfig, MediaConfigFilter};

const CONFIG_COLUMNS: &str = "id, key, key_group, value, channel_id, audio_id, video_id, \
    article_id, published, date_insert, date_available";

const MAX_PAGE_SIZE: i64 = 500;

#[derive(Clone)]
pub struct MediaConfigRepository {
    pool: PgPool,
}

/// Escape `%`, `_` and `\` so user input is matched literally by ILIKE.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

impl MediaConfigRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, config: &MediaConfig) -> Result<MediaConfig> {
        let created = sqlx::query_as::<Postgres, MediaConfig>(&format!(
            r#"
            INSERT INTO media_configs (
                id, key, key_group, value, channel_id, audio_id, video_id,
                article_id, published, date_insert, date_available
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            CONFIG_COLUMNS
        ))
        .bind(config.id)
        .bind(&config.key)
        .bind(&config.key_group)
        .bind(&config.value)
        .bind(config.channel_id)
        .bind(config.audio_id)
        .bind(config.video_id)
        .bind(config.article_id)
        .bind(config.published)
        .bind(config.date_insert)
        .bind(config.date_available)
        .fetch_one(&self.pool)
        .await
        .context("Failed to create media config")?;
        Ok(created)
    }

    /// List configs matching the exact-value filters and the free-text search,
    /// newest first.
    pub async fn list(
        &self,
        filter: &MediaConfigFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MediaConfig>> {
        let mut sql = format!("SELECT {} FROM media_configs WHERE 1 = 1", CONFIG_COLUMNS);
        let mut param_count = 1;

        if filter.key.is_some() {
            sql.push_str(&format!(" AND key = ${}", param_count));
            param_count += 1;
        }
        if filter.key_group.is_some() {
            sql.push_str(&format!(" AND key_group = ${}", param_count));
            param_count += 1;
        }
        if filter.channel_id.is_some() {
            sql.push_str(&format!(" AND channel_id = ${}", param_count));
            param_count += 1;
        }
        if filter.published.is_some() {
            sql.push_str(&format!(" AND published = ${}", param_count));
            param_count += 1;
        }
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        if search.is_some() {
            sql.push_str(&format!(
                " AND (key ILIKE ${0} OR key_group ILIKE ${0} OR value ILIKE ${0})",
                param_count
            ));
            param_count += 1;
        }

        sql.push_str(&format!(
            " ORDER BY date_insert DESC LIMIT ${} OFFSET ${}",
            param_count,
            param_count + 1
        ));

        let mut query = sqlx::query_as::<Postgres, MediaConfig>(&sql);
        if let Some(ref key) = filter.key {
            query = query.bind(key);
        }
        if let Some(ref group) = filter.key_group {
            query = query.bind(group);
        }
        if let Some(channel_id) = filter.channel_id {
            query = query.bind(channel_id);
        }
        if let Some(published) = filter.published {
            query = query.bind(published);
        }
        if let Some(term) = search {
            query = query.bind(like_pattern(term));
        }

        let rows = query
            .bind(limit.clamp(1, MAX_PAGE_SIZE))
            .bind(offset.max(0))
            .fetch_all(&self.pool)
            .await
            .context("Failed to list media configs")?;
        Ok(rows)
    }
}
