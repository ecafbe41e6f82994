//! In-memory store implementations for testing
//!
//! These mocks allow testing the bulk actions without database dependencies.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use multimedias_core::models::{
    HostProvider, MediaBox, MediaBoxEntry, MediaHostRecord, MediaItem, MediaKind,
};
use multimedias_core::AppError;
use multimedias_db::{MediaBoxStore, MediaStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// In-memory media store for testing without database
#[derive(Clone, Default)]
pub struct InMemoryMediaStore {
    media: Arc<Mutex<HashMap<Uuid, MediaItem>>>,
    hosts: Arc<Mutex<HashMap<(Uuid, HostProvider), MediaHostRecord>>>,
    saves: Arc<AtomicUsize>,
    fail_saves: Arc<AtomicBool>,
    vanishing_media: Arc<Mutex<Option<Uuid>>>,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_media(&self, item: MediaItem) {
        self.media.lock().unwrap().insert(item.id, item);
    }

    pub fn add_host_record(&self, record: MediaHostRecord) {
        self.hosts
            .lock()
            .unwrap()
            .insert((record.media_id, record.provider), record);
    }

    pub fn media(&self, id: Uuid) -> Option<MediaItem> {
        self.media.lock().unwrap().get(&id).cloned()
    }

    pub fn host_record(&self, media_id: Uuid, provider: HostProvider) -> Option<MediaHostRecord> {
        self.hosts
            .lock()
            .unwrap()
            .get(&(media_id, provider))
            .cloned()
    }

    /// Number of successful `save_resubmission` calls
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Delete media item `id` right before the next save touching it, as a
    /// concurrent operator would.
    pub fn delete_media_before_save(&self, id: Uuid) {
        *self.vanishing_media.lock().unwrap() = Some(id);
    }

    /// Make every following save fail like a lost database connection.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn get_media(&self, id: Uuid) -> Result<Option<MediaItem>, AppError> {
        Ok(self.media(id))
    }

    async fn get_host_record(
        &self,
        media_id: Uuid,
        provider: HostProvider,
    ) -> Result<Option<MediaHostRecord>, AppError> {
        Ok(self.host_record(media_id, provider))
    }

    async fn save_resubmission(
        &self,
        record: &MediaHostRecord,
        item: Option<&MediaItem>,
    ) -> Result<(), AppError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(AppError::Internal("connection lost".to_string()));
        }

        if let Some(item) = item {
            let mut vanishing = self.vanishing_media.lock().unwrap();
            if *vanishing == Some(item.id) {
                self.media.lock().unwrap().remove(&item.id);
                *vanishing = None;
            }
        }

        let mut hosts = self.hosts.lock().unwrap();
        let key = (record.media_id, record.provider);
        if !hosts.contains_key(&key) {
            return Err(AppError::NotFound(format!(
                "host record {} for media {}",
                record.provider, record.media_id
            )));
        }

        let mut media = self.media.lock().unwrap();
        if let Some(item) = item {
            match media.get_mut(&item.id) {
                Some(stored) => stored.published = item.published,
                None => return Err(AppError::NotFound(format!("media {}", item.id))),
            }
        }
        hosts.insert(key, record.clone());

        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// In-memory media box store for testing without database
#[derive(Clone, Default)]
pub struct InMemoryMediaBoxStore {
    boxes: Arc<Mutex<HashMap<Uuid, MediaBox>>>,
    entries: Arc<Mutex<Vec<MediaBoxEntry>>>,
}

impl InMemoryMediaBoxStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_box(&self, mediabox: MediaBox) {
        self.boxes.lock().unwrap().insert(mediabox.id, mediabox);
    }

    pub fn add_entry(&self, entry: MediaBoxEntry) {
        self.entries.lock().unwrap().push(entry);
    }

    pub fn entries(&self, mediabox_id: Uuid) -> Vec<MediaBoxEntry> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.mediabox_id == mediabox_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl MediaBoxStore for InMemoryMediaBoxStore {
    async fn get_box(&self, id: Uuid) -> Result<Option<MediaBox>> {
        Ok(self.boxes.lock().unwrap().get(&id).cloned())
    }

    async fn delete_ended_entries(
        &self,
        mediabox_id: Uuid,
        kind: MediaKind,
        now: DateTime<Utc>,
    ) -> Result<u64> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| !(e.mediabox_id == mediabox_id && e.kind == kind && e.is_ended(now)));
        Ok((before - entries.len()) as u64)
    }
}
