//! Store trait abstractions for the bulk actions
//!
//! These traits define the minimal interface the resubmission and media box
//! workflows need, so they can run against Postgres or an in-memory store.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use multimedias_core::models::{HostProvider, MediaBox, MediaHostRecord, MediaItem, MediaKind};
use multimedias_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::media::MediaRepository;
use crate::db::media_host::MediaHostRepository;
use crate::db::mediabox::MediaBoxRepository;
use crate::db::transaction::TransactionGuard;

/// Media items and their host records
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Get a media item by ID
    async fn get_media(&self, id: Uuid) -> Result<Option<MediaItem>, AppError>;

    /// Get the item's record for one host provider
    async fn get_host_record(
        &self,
        media_id: Uuid,
        provider: HostProvider,
    ) -> Result<Option<MediaHostRecord>, AppError>;

    /// Persist a reset host record and, when `item` is given, the item's
    /// publication flag, as one unit.
    async fn save_resubmission(
        &self,
        record: &MediaHostRecord,
        item: Option<&MediaItem>,
    ) -> Result<(), AppError>;
}

/// Media boxes and their entries
#[async_trait]
pub trait MediaBoxStore: Send + Sync {
    /// Get a media box by ID
    async fn get_box(&self, id: Uuid) -> Result<Option<MediaBox>>;

    /// Delete the box's `kind` entries ended before `now`, returning how many went
    async fn delete_ended_entries(
        &self,
        mediabox_id: Uuid,
        kind: MediaKind,
        now: DateTime<Utc>,
    ) -> Result<u64>;
}

/// Postgres-backed [`MediaStore`].
#[derive(Clone)]
pub struct PgMediaStore {
    pool: PgPool,
    media: MediaRepository,
    hosts: MediaHostRepository,
}

impl PgMediaStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            media: MediaRepository::new(pool.clone()),
            hosts: MediaHostRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl MediaStore for PgMediaStore {
    async fn get_media(&self, id: Uuid) -> Result<Option<MediaItem>, AppError> {
        self.media.get(id).await
    }

    async fn get_host_record(
        &self,
        media_id: Uuid,
        provider: HostProvider,
    ) -> Result<Option<MediaHostRecord>, AppError> {
        self.hosts.get(media_id, provider).await
    }

    async fn save_resubmission(
        &self,
        record: &MediaHostRecord,
        item: Option<&MediaItem>,
    ) -> Result<(), AppError> {
        let mut tx = TransactionGuard::begin(&self.pool, "resubmission").await?;

        if !self.hosts.save_tx(&mut tx, record).await? {
            tx.rollback().await?;
            return Err(AppError::NotFound(format!(
                "host record {} for media {}",
                record.provider, record.media_id
            )));
        }

        if let Some(item) = item {
            if !self.media.set_published_tx(&mut tx, item.id, item.published).await? {
                tx.rollback().await?;
                return Err(AppError::NotFound(format!("media {}", item.id)));
            }
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl MediaBoxStore for MediaBoxRepository {
    async fn get_box(&self, id: Uuid) -> Result<Option<MediaBox>> {
        self.get(id).await
    }

    async fn delete_ended_entries(
        &self,
        mediabox_id: Uuid,
        kind: MediaKind,
        now: DateTime<Utc>,
    ) -> Result<u64> {
        MediaBoxRepository::delete_ended_entries(self, mediabox_id, kind, now).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;
    use std::time::Duration;

    // Nothing listens on port 1, so every acquire fails.
    fn unreachable_store() -> PgMediaStore {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(500))
            .connect_lazy("postgres://u:p@127.0.0.1:1/db")
            .unwrap();
        PgMediaStore::new(pool)
    }

    #[tokio::test]
    async fn failed_transaction_is_a_database_error() {
        let store = unreachable_store();
        let record = MediaHostRecord::not_uploaded(Uuid::new_v4(), HostProvider::Generic);

        let err = store.save_resubmission(&record, None).await.unwrap_err();

        assert!(matches!(err, AppError::Database(_)), "got {err:?}");
        assert_eq!(
            multimedias_core::ErrorMetadata::error_code(&err),
            "DATABASE_ERROR"
        );
    }

    #[tokio::test]
    async fn reads_and_writes_classify_outages_alike() {
        let store = unreachable_store();
        let id = Uuid::new_v4();

        let read = store.get_media(id).await.unwrap_err();
        let write = store
            .save_resubmission(&MediaHostRecord::not_uploaded(id, HostProvider::Generic), None)
            .await
            .unwrap_err();

        assert_eq!(read.error_type(), write.error_type());
    }
}
