use multimedias_core::models::MediaItem;
use multimedias_core::AppError;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

const MEDIA_COLUMNS: &str = "id, kind, site_id, title, slug, short_title, hat, headline, \
    media_file, tags, channel_id, main_image_id, show_on_root_channel, published, \
    date_available, date_insert, date_update";

/// Video and audio content records.
#[derive(Clone)]
pub struct MediaRepository {
    pool: PgPool,
}

impl MediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "media", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<MediaItem>, AppError> {
        let item = sqlx::query_as::<Postgres, MediaItem>(&format!(
            "SELECT {} FROM media WHERE id = $1",
            MEDIA_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    #[tracing::instrument(skip(self, item), fields(db.table = "media", db.operation = "insert", db.record_id = %item.id))]
    pub async fn create(&self, item: &MediaItem) -> Result<MediaItem, AppError> {
        let created = sqlx::query_as::<Postgres, MediaItem>(&format!(
            r#"
            INSERT INTO media (
                id, kind, site_id, title, slug, short_title, hat, headline,
                media_file, tags, channel_id, main_image_id, show_on_root_channel, published,
                date_available, date_insert, date_update
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING {}
            "#,
            MEDIA_COLUMNS
        ))
        .bind(item.id)
        .bind(item.kind)
        .bind(item.site_id)
        .bind(&item.title)
        .bind(&item.slug)
        .bind(&item.short_title)
        .bind(&item.hat)
        .bind(&item.headline)
        .bind(&item.media_file)
        .bind(&item.tags)
        .bind(item.channel_id)
        .bind(item.main_image_id)
        .bind(item.show_on_root_channel)
        .bind(item.published)
        .bind(item.date_available)
        .bind(item.date_insert)
        .bind(item.date_update)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// Update the publication flag inside an open transaction.
    #[tracing::instrument(skip(self, tx), fields(db.table = "media", db.operation = "update", db.record_id = %id))]
    pub async fn set_published_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        published: bool,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE media SET published = $2, date_update = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(published)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
