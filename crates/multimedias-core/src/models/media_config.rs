use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// Key/value setting attached to a channel, article, video or audio.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct MediaConfig {
    pub id: Uuid,
    pub key: String,
    pub key_group: Option<String>,
    pub value: String,
    pub channel_id: Option<Uuid>,
    pub audio_id: Option<Uuid>,
    pub video_id: Option<Uuid>,
    pub article_id: Option<Uuid>,
    pub published: bool,
    pub date_insert: DateTime<Utc>,
    pub date_available: DateTime<Utc>,
}

/// List filters and free-text search for the config listing.
///
/// `search` matches case-insensitively against `key`, `key_group` and `value`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaConfigFilter {
    pub key: Option<String>,
    pub key_group: Option<String>,
    pub channel_id: Option<Uuid>,
    pub published: Option<bool>,
    pub search: Option<String>,
}

impl MediaConfigFilter {
    pub fn matches(&self, config: &MediaConfig) -> bool {
        if let Some(ref key) = self.key {
            if &config.key != key {
                return false;
            }
        }
        if let Some(ref group) = self.key_group {
            if config.key_group.as_deref() != Some(group.as_str()) {
                return false;
            }
        }
        if let Some(channel_id) = self.channel_id {
            if config.channel_id != Some(channel_id) {
                return false;
            }
        }
        if let Some(published) = self.published {
            if config.published != published {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                config.key.to_lowercase().contains(&term)
                    || config
                        .key_group
                        .as_deref()
                        .is_some_and(|g| g.to_lowercase().contains(&term))
                    || config.value.to_lowercase().contains(&term)
            }
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(key: &str, group: Option<&str>, value: &str) -> MediaConfig {
        let now = Utc::now();
        MediaConfig {
            id: Uuid::new_v4(),
            key: key.to_string(),
            key_group: group.map(str::to_string),
            value: value.to_string(),
            channel_id: None,
            audio_id: None,
            video_id: None,
            article_id: None,
            published: true,
            date_insert: now,
            date_available: now,
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(MediaConfigFilter::default().matches(&config("player", None, "html5")));
    }

    #[test]
    fn test_search_covers_key_group_and_value() {
        let filter = MediaConfigFilter {
            search: Some("AUTOPLAY".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&config("autoplay", None, "false")));
        assert!(filter.matches(&config("x", Some("autoplay-rules"), "1")));
        assert!(filter.matches(&config("x", None, "autoplay=on")));
        assert!(!filter.matches(&config("skin", Some("player"), "dark")));
    }

    #[test]
    fn test_exact_filters_combine() {
        let mut cfg = config("skin", Some("player"), "dark");
        cfg.published = false;
        let filter = MediaConfigFilter {
            key: Some("skin".to_string()),
            published: Some(true),
            ..Default::default()
        };
        assert!(!filter.matches(&cfg));
        cfg.published = true;
        assert!(filter.matches(&cfg));
    }
}
