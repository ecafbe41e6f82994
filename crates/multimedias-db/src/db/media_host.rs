use multimedias_core::models::{HostProvider, MediaHostRecord};
use multimedias_core::AppError;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

const HOST_COLUMNS: &str =
    "id, media_id, provider, host_id, url, embed, status, status_message, retries, updated_at";

/// Per-provider upload state of media items.
#[derive(Clone)]
pub struct MediaHostRepository {
    pool: PgPool,
}

impl MediaHostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "media_hosts", db.operation = "select", media_id = %media_id, provider = %provider))]
    pub async fn get(
        &self,
        media_id: Uuid,
        provider: HostProvider,
    ) -> Result<Option<MediaHostRecord>, AppError> {
        let record = sqlx::query_as::<Postgres, MediaHostRecord>(&format!(
            "SELECT {} FROM media_hosts WHERE media_id = $1 AND provider = $2",
            HOST_COLUMNS
        ))
        .bind(media_id)
        .bind(provider)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(db.table = "media_hosts", db.operation = "select", media_id = %media_id))]
    pub async fn list_for_media(&self, media_id: Uuid) -> Result<Vec<MediaHostRecord>, AppError> {
        let records = sqlx::query_as::<Postgres, MediaHostRecord>(&format!(
            "SELECT {} FROM media_hosts WHERE media_id = $1 ORDER BY provider",
            HOST_COLUMNS
        ))
        .bind(media_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    #[tracing::instrument(skip(self, record), fields(db.table = "media_hosts", db.operation = "insert", media_id = %record.media_id))]
    pub async fn create(&self, record: &MediaHostRecord) -> Result<MediaHostRecord, AppError> {
        let created = sqlx::query_as::<Postgres, MediaHostRecord>(&format!(
            r#"
            INSERT INTO media_hosts (
                id, media_id, provider, host_id, url, embed,
                status, status_message, retries, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            HOST_COLUMNS
        ))
        .bind(record.id)
        .bind(record.media_id)
        .bind(record.provider)
        .bind(&record.host_id)
        .bind(&record.url)
        .bind(&record.embed)
        .bind(record.status)
        .bind(&record.status_message)
        .bind(record.retries)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// Write every mutable field of `record` inside an open transaction.
    #[tracing::instrument(skip(self, tx, record), fields(db.table = "media_hosts", db.operation = "update", db.record_id = %record.id))]
    pub async fn save_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &MediaHostRecord,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE media_hosts
            SET host_id = $2,
                url = $3,
                embed = $4,
                status = $5,
                status_message = $6,
                retries = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(record.id)
        .bind(&record.host_id)
        .bind(&record.url)
        .bind(&record.embed)
        .bind(record.status)
        .bind(&record.status_message)
        .bind(record.retries)
        .bind(record.updated_at)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
