use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

use super::media::MediaKind;

/// Remote hosting provider a media file is pushed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "host_provider", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum HostProvider {
    /// Generic external media host; every media item has one record here.
    Generic,
    /// Video-sharing site; videos only.
    VideoSharing,
}

impl HostProvider {
    /// Providers a media item of `kind` owns a host record for.
    pub fn providers_for(kind: MediaKind) -> &'static [HostProvider] {
        match kind {
            MediaKind::Video => &[HostProvider::Generic, HostProvider::VideoSharing],
            MediaKind::Audio => &[HostProvider::Generic],
        }
    }

    pub fn applies_to(self, kind: MediaKind) -> bool {
        Self::providers_for(kind).contains(&self)
    }
}

impl Display for HostProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            HostProvider::Generic => write!(f, "generic"),
            HostProvider::VideoSharing => write!(f, "video_sharing"),
        }
    }
}

/// Upload status of a media file on its remote host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "host_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum HostStatus {
    NotUploaded,
    Pending,
    Processing,
    Uploaded,
    Failed,
    Deleted,
}

impl Display for HostStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            HostStatus::NotUploaded => write!(f, "not_uploaded"),
            HostStatus::Pending => write!(f, "pending"),
            HostStatus::Processing => write!(f, "processing"),
            HostStatus::Uploaded => write!(f, "uploaded"),
            HostStatus::Failed => write!(f, "failed"),
            HostStatus::Deleted => write!(f, "deleted"),
        }
    }
}

/// Upload/transcode state of one media item on one host provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct MediaHostRecord {
    pub id: Uuid,
    pub media_id: Uuid,
    pub provider: HostProvider,
    pub host_id: Option<String>,
    pub url: Option<String>,
    pub embed: String,
    pub status: HostStatus,
    pub status_message: String,
    pub retries: i32,
    pub updated_at: DateTime<Utc>,
}

impl MediaHostRecord {
    /// Fresh record for an item that has not been pushed to `provider` yet.
    pub fn not_uploaded(media_id: Uuid, provider: HostProvider) -> Self {
        Self {
            id: Uuid::new_v4(),
            media_id,
            provider,
            host_id: None,
            url: None,
            embed: String::new(),
            status: HostStatus::NotUploaded,
            status_message: String::new(),
            retries: 0,
            updated_at: Utc::now(),
        }
    }

    /// Clear every trace of a previous upload so the pipeline picks the
    /// record up again.
    pub fn reset_for_resubmission(&mut self) {
        self.host_id = None;
        self.url = None;
        self.embed.clear();
        self.status = HostStatus::NotUploaded;
        self.status_message.clear();
        self.retries = 0;
        self.updated_at = Utc::now();
    }

    pub fn is_retry_ready(&self) -> bool {
        self.status == HostStatus::NotUploaded
            && self.host_id.is_none()
            && self.url.is_none()
            && self.embed.is_empty()
            && self.status_message.is_empty()
            && self.retries == 0
    }
}
