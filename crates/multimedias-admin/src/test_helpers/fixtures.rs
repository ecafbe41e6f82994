use chrono::{DateTime, Duration, Utc};
use multimedias_core::models::{
    FileRef, HostProvider, HostStatus, MediaBox, MediaBoxEntry, MediaHostRecord, MediaItem,
    MediaKind,
};
use uuid::Uuid;

/// Published media item of `kind` with a file matching its allow-list.
pub fn sample_media(kind: MediaKind) -> MediaItem {
    let now = Utc::now();
    let file = match kind {
        MediaKind::Video => "highlights.mp4",
        MediaKind::Audio => "interview.mp3",
    };
    MediaItem {
        id: Uuid::new_v4(),
        kind,
        site_id: Uuid::new_v4(),
        title: "Highlights".to_string(),
        slug: "highlights".to_string(),
        short_title: None,
        hat: None,
        headline: "Best moments".to_string(),
        media_file: FileRef::new(file),
        tags: Some("sports, final".to_string()),
        channel_id: None,
        main_image_id: None,
        show_on_root_channel: true,
        published: true,
        date_available: now - Duration::days(1),
        date_insert: now - Duration::days(2),
        date_update: now - Duration::days(1),
    }
}

/// Host record that went through a full upload, with three retries on it.
pub fn uploaded_record(media_id: Uuid, provider: HostProvider) -> MediaHostRecord {
    MediaHostRecord {
        host_id: Some("abc123".to_string()),
        url: Some("http://x".to_string()),
        embed: "<iframe/>".to_string(),
        status: HostStatus::Uploaded,
        status_message: "ok".to_string(),
        retries: 3,
        ..MediaHostRecord::not_uploaded(media_id, provider)
    }
}

pub fn sample_box() -> MediaBox {
    MediaBox {
        id: Uuid::new_v4(),
        site_id: Uuid::new_v4(),
        name: "Weekend".to_string(),
        slug: "weekend".to_string(),
        channel_id: None,
        article_id: None,
        published: true,
        date_available: Utc::now() - Duration::days(7),
    }
}

pub fn sample_entry(
    mediabox_id: Uuid,
    kind: MediaKind,
    date_end: Option<DateTime<Utc>>,
) -> MediaBoxEntry {
    MediaBoxEntry {
        id: Uuid::new_v4(),
        mediabox_id,
        media_id: Uuid::new_v4(),
        kind,
        order: 0,
        date_available: Utc::now() - Duration::days(7),
        date_end,
    }
}
