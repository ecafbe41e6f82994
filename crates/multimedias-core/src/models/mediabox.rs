use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

use super::media::MediaKind;

/// Curated, ordered collection of videos and audios shown together.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct MediaBox {
    pub id: Uuid,
    pub site_id: Uuid,
    pub name: String,
    pub slug: String,
    pub channel_id: Option<Uuid>,
    pub article_id: Option<Uuid>,
    pub published: bool,
    pub date_available: DateTime<Utc>,
}

/// One media item placed in a box, optionally only until `date_end`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct MediaBoxEntry {
    pub id: Uuid,
    pub mediabox_id: Uuid,
    pub media_id: Uuid,
    pub kind: MediaKind,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "sort_order"))]
    pub order: i32,
    pub date_available: DateTime<Utc>,
    pub date_end: Option<DateTime<Utc>>,
}

impl MediaBoxEntry {
    /// An entry has ended once its end date lies strictly in the past.
    pub fn is_ended(&self, now: DateTime<Utc>) -> bool {
        matches!(self.date_end, Some(end) if end < now)
    }
}
