//! Media box cleanup bulk action

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use uuid::Uuid;

use multimedias_core::models::MediaKind;
use multimedias_core::AppError;
use multimedias_db::MediaBoxStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoxCleanup {
    pub mediabox_id: Uuid,
    pub videos_removed: u64,
    pub audios_removed: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub cleaned: Vec<BoxCleanup>,
    /// Box ids that did not exist
    pub skipped: Vec<Uuid>,
}

impl CleanupReport {
    pub fn total_removed(&self) -> u64 {
        self.cleaned
            .iter()
            .map(|b| b.videos_removed + b.audios_removed)
            .sum()
    }

    pub fn into_result(self) -> Result<Self, AppError> {
        if self.skipped.is_empty() {
            return Ok(self);
        }
        let ids = self
            .skipped
            .iter()
            .map(Uuid::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Err(AppError::NotFound(format!("media boxes not found: {}", ids)))
    }
}

/// Delete every video and audio entry of the selected boxes whose end date
/// is before `now`. Entries without an end date are kept.
#[tracing::instrument(skip(store, box_ids), fields(now = %now))]
pub async fn clean_ended_entries<S, I>(
    store: &S,
    box_ids: I,
    now: DateTime<Utc>,
) -> Result<CleanupReport, AppError>
where
    S: MediaBoxStore + ?Sized,
    I: IntoIterator<Item = Uuid>,
{
    let mut report = CleanupReport::default();
    let mut seen = HashSet::new();

    for id in box_ids.into_iter().filter(|id| seen.insert(*id)) {
        if store.get_box(id).await?.is_none() {
            tracing::warn!(mediabox_id = %id, "Skipping unknown media box");
            report.skipped.push(id);
            continue;
        }

        let videos_removed = store.delete_ended_entries(id, MediaKind::Video, now).await?;
        let audios_removed = store.delete_ended_entries(id, MediaKind::Audio, now).await?;

        tracing::info!(
            mediabox_id = %id,
            videos_removed,
            audios_removed,
            "Ended media box entries removed"
        );
        report.cleaned.push(BoxCleanup {
            mediabox_id: id,
            videos_removed,
            audios_removed,
        });
    }

    Ok(report)
}
