//! Host resubmission bulk actions
//!
//! Resetting a host record puts it back to `NotUploaded` with no remote
//! identifiers, so the upload pipeline sends the file again. Every selected
//! item is handled and committed on its own; a missing item is reported and
//! does not stop the rest of the selection.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

use multimedias_core::models::HostProvider;
use multimedias_core::AppError;
use multimedias_db::MediaStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MediaNotFound,
    HostRecordMissing,
    NotAVideo,
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SkipReason::MediaNotFound => write!(f, "media item does not exist"),
            SkipReason::HostRecordMissing => write!(f, "no host record for this provider"),
            SkipReason::NotAVideo => write!(f, "media item is not a video"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedItem {
    pub media_id: Uuid,
    pub reason: SkipReason,
}

/// Per-item outcome of one resubmission action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResubmissionReport {
    pub provider: HostProvider,
    pub processed: Vec<Uuid>,
    pub skipped: Vec<SkippedItem>,
}

impl ResubmissionReport {
    fn new(provider: HostProvider) -> Self {
        Self {
            provider,
            processed: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// `NotFound` naming every skipped id, or the report itself when nothing
    /// was skipped. Processed items stay committed either way.
    pub fn into_result(self) -> Result<Self, AppError> {
        if self.is_complete() {
            return Ok(self);
        }
        let details = self
            .skipped
            .iter()
            .map(|s| format!("{} ({})", s.media_id, s.reason))
            .collect::<Vec<_>>()
            .join(", ");
        Err(AppError::NotFound(format!(
            "{} host resubmission skipped: {}",
            self.provider, details
        )))
    }

    fn skip(&mut self, media_id: Uuid, reason: SkipReason) {
        tracing::warn!(media_id = %media_id, provider = %self.provider, reason = %reason, "Skipping host resubmission");
        self.skipped.push(SkippedItem { media_id, reason });
    }
}

/// Reset the generic host record of each selected item and unpublish it.
pub async fn resend_generic_host<S, I>(store: &S, ids: I) -> Result<ResubmissionReport, AppError>
where
    S: MediaStore + ?Sized,
    I: IntoIterator<Item = Uuid>,
{
    resend_host(store, ids, HostProvider::Generic).await
}

/// Reset the video-sharing host record of each selected video. The
/// publication flag is left alone.
pub async fn resend_video_host<S, I>(store: &S, ids: I) -> Result<ResubmissionReport, AppError>
where
    S: MediaStore + ?Sized,
    I: IntoIterator<Item = Uuid>,
{
    resend_host(store, ids, HostProvider::VideoSharing).await
}

#[tracing::instrument(skip(store, ids))]
async fn resend_host<S, I>(
    store: &S,
    ids: I,
    provider: HostProvider,
) -> Result<ResubmissionReport, AppError>
where
    S: MediaStore + ?Sized,
    I: IntoIterator<Item = Uuid>,
{
    let mut report = ResubmissionReport::new(provider);
    let mut seen = HashSet::new();

    for id in ids.into_iter().filter(|id| seen.insert(*id)) {
        let Some(mut item) = store.get_media(id).await? else {
            report.skip(id, SkipReason::MediaNotFound);
            continue;
        };

        if !provider.applies_to(item.kind) {
            report.skip(id, SkipReason::NotAVideo);
            continue;
        }

        let Some(mut record) = store.get_host_record(id, provider).await? else {
            report.skip(id, SkipReason::HostRecordMissing);
            continue;
        };

        record.reset_for_resubmission();

        let saved = match provider {
            HostProvider::Generic => {
                item.published = false;
                store.save_resubmission(&record, Some(&item)).await
            }
            HostProvider::VideoSharing => store.save_resubmission(&record, None).await,
        };

        match saved {
            Ok(()) => {
                tracing::info!(media_id = %id, provider = %provider, "Host record reset for resubmission");
                report.processed.push(id);
            }
            // The item or its record was deleted between the read and the write.
            Err(AppError::NotFound(_)) => {
                let reason = match store.get_media(id).await? {
                    Some(_) => SkipReason::HostRecordMissing,
                    None => SkipReason::MediaNotFound,
                };
                report.skip(id, reason);
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        provider = %provider,
        processed = report.processed.len(),
        skipped = report.skipped.len(),
        "Host resubmission finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{sample_media, uploaded_record, InMemoryMediaStore};
    use multimedias_core::models::{HostStatus, MediaKind};

    fn seeded(kind: MediaKind, published: bool) -> (InMemoryMediaStore, Uuid) {
        let store = InMemoryMediaStore::new();
        let mut item = sample_media(kind);
        item.published = published;
        let id = item.id;
        store.add_media(item);
        for provider in HostProvider::providers_for(kind) {
            store.add_host_record(uploaded_record(id, *provider));
        }
        (store, id)
    }

    fn assert_reset(store: &InMemoryMediaStore, id: Uuid, provider: HostProvider) {
        let record = store.host_record(id, provider).expect("record");
        assert_eq!(record.host_id, None);
        assert_eq!(record.url, None);
        assert_eq!(record.embed, "");
        assert_eq!(record.status, HostStatus::NotUploaded);
        assert_eq!(record.status_message, "");
        assert_eq!(record.retries, 0);
    }

    #[tokio::test]
    async fn generic_reset_clears_record_and_unpublishes() {
        let (store, id) = seeded(MediaKind::Video, true);

        let report = resend_generic_host(&store, [id]).await.unwrap();

        assert_eq!(report.processed, vec![id]);
        assert!(report.is_complete());
        assert_reset(&store, id, HostProvider::Generic);
        assert!(!store.media(id).unwrap().published);
        // The video-sharing record is untouched.
        let other = store.host_record(id, HostProvider::VideoSharing).unwrap();
        assert_eq!(other.status, HostStatus::Uploaded);
        assert_eq!(other.retries, 3);
    }

    #[tokio::test]
    async fn generic_reset_applies_to_audio() {
        let (store, id) = seeded(MediaKind::Audio, true);
        let report = resend_generic_host(&store, vec![id]).await.unwrap();
        assert_eq!(report.processed, vec![id]);
        assert_reset(&store, id, HostProvider::Generic);
        assert!(!store.media(id).unwrap().published);
    }

    #[tokio::test]
    async fn video_reset_keeps_publication_flag() {
        for published in [true, false] {
            let (store, id) = seeded(MediaKind::Video, published);

            let report = resend_video_host(&store, [id]).await.unwrap();

            assert_eq!(report.processed, vec![id]);
            assert_reset(&store, id, HostProvider::VideoSharing);
            assert_eq!(store.media(id).unwrap().published, published);
            assert_eq!(
                store.host_record(id, HostProvider::Generic).unwrap().status,
                HostStatus::Uploaded
            );
        }
    }

    #[tokio::test]
    async fn generic_reset_is_idempotent() {
        let (store, id) = seeded(MediaKind::Video, true);

        resend_generic_host(&store, [id]).await.unwrap();
        let mut once = store.host_record(id, HostProvider::Generic).unwrap();
        resend_generic_host(&store, [id]).await.unwrap();
        let mut twice = store.host_record(id, HostProvider::Generic).unwrap();

        once.updated_at = twice.updated_at;
        twice.updated_at = once.updated_at;
        assert_eq!(once, twice);
        assert!(!store.media(id).unwrap().published);
    }

    #[tokio::test]
    async fn empty_selection_is_a_no_op() {
        let (store, id) = seeded(MediaKind::Video, true);

        let report = resend_generic_host(&store, Vec::<Uuid>::new()).await.unwrap();

        assert!(report.processed.is_empty());
        assert!(report.skipped.is_empty());
        assert!(report.into_result().is_ok());
        assert_eq!(store.save_count(), 0);
        assert!(store.media(id).unwrap().published);
    }

    #[tokio::test]
    async fn unknown_id_is_reported_without_blocking_others() {
        let (store, id) = seeded(MediaKind::Video, true);
        let missing = Uuid::new_v4();

        let report = resend_generic_host(&store, [missing, id]).await.unwrap();

        assert_eq!(report.processed, vec![id]);
        assert_eq!(
            report.skipped,
            vec![SkippedItem {
                media_id: missing,
                reason: SkipReason::MediaNotFound
            }]
        );
        assert_reset(&store, id, HostProvider::Generic);

        let err = report.into_result().unwrap_err();
        match err {
            AppError::NotFound(msg) => assert!(msg.contains(&missing.to_string())),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn video_reset_reports_unknown_id_and_keeps_going() {
        let (store, id) = seeded(MediaKind::Video, true);
        let missing = Uuid::new_v4();

        let report = resend_video_host(&store, [id, missing]).await.unwrap();

        assert_eq!(report.processed, vec![id]);
        assert_eq!(
            report.skipped,
            vec![SkippedItem {
                media_id: missing,
                reason: SkipReason::MediaNotFound
            }]
        );
        assert_reset(&store, id, HostProvider::VideoSharing);
        assert!(store.media(id).unwrap().published);
        assert!(matches!(report.into_result(), Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn item_deleted_before_write_is_reported_as_missing_media() {
        let (store, id) = seeded(MediaKind::Video, true);
        store.delete_media_before_save(id);

        let report = resend_generic_host(&store, [id]).await.unwrap();

        assert!(report.processed.is_empty());
        assert_eq!(report.skipped[0].reason, SkipReason::MediaNotFound);
        assert_eq!(
            store.host_record(id, HostProvider::Generic).unwrap().status,
            HostStatus::Uploaded
        );
    }

    #[tokio::test]
    async fn video_reset_skips_audio_items() {
        let (store, id) = seeded(MediaKind::Audio, true);

        let report = resend_video_host(&store, [id]).await.unwrap();

        assert!(report.processed.is_empty());
        assert_eq!(report.skipped[0].reason, SkipReason::NotAVideo);
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn missing_host_record_is_skipped() {
        let store = InMemoryMediaStore::new();
        let item = sample_media(MediaKind::Video);
        let id = item.id;
        store.add_media(item);

        let report = resend_video_host(&store, [id]).await.unwrap();

        assert_eq!(report.skipped[0].reason, SkipReason::HostRecordMissing);
        assert!(store.media(id).unwrap().published);
    }

    #[tokio::test]
    async fn duplicate_ids_are_processed_once() {
        let (store, id) = seeded(MediaKind::Video, true);

        let report = resend_generic_host(&store, [id, id, id]).await.unwrap();

        assert_eq!(report.processed, vec![id]);
        assert_eq!(store.save_count(), 1);
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let (store, id) = seeded(MediaKind::Video, true);
        store.fail_saves(true);

        let err = resend_generic_host(&store, [id]).await.unwrap_err();

        assert!(matches!(err, AppError::Internal(_)));
        assert!(store.media(id).unwrap().published);
    }
}
