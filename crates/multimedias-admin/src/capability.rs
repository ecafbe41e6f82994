//! Per-kind media admin behaviour
//!
//! `VideoAdmin` and `AudioAdmin` share the form layout, the read-only rules
//! and the generic host resubmission. They differ in their upload allow-list
//! and in the video-sharing resubmission only videos offer.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use multimedias_core::models::{FileRef, MediaKind};
use multimedias_core::validation::MediaForm;
use multimedias_core::{validate_upload_extension, AppError, ValidationError};
use multimedias_db::MediaStore;

use crate::actions::AdminAction;
use crate::layout::{media_readonly_fields, FormMode, Fieldset, MEDIA_FIELDSETS};
use crate::resubmission::{resend_generic_host, resend_video_host, ResubmissionReport};

#[async_trait]
pub trait MediaAdminCapable: Send + Sync {
    fn kind(&self) -> MediaKind;

    fn store(&self) -> &dyn MediaStore;

    /// Bulk actions offered on the list view, in dropdown order.
    fn actions(&self) -> &'static [AdminAction];

    fn fieldsets(&self) -> &'static [Fieldset] {
        MEDIA_FIELDSETS
    }

    fn readonly_fields(&self, mode: FormMode) -> Vec<&'static str> {
        media_readonly_fields(mode)
    }

    fn validate_upload(&self, filename: &str) -> Result<FileRef, ValidationError> {
        validate_upload_extension(filename, self.kind())
    }

    fn validate_form(&self, form: &MediaForm) -> Result<FileRef, AppError> {
        form.clean(self.kind())
    }

    /// Run the action submitted as `name` over the selected ids.
    async fn run_action(&self, name: &str, ids: &[Uuid]) -> Result<ResubmissionReport, AppError> {
        let action = AdminAction::from_name(name)
            .filter(|action| self.actions().contains(action))
            .ok_or_else(|| {
                AppError::InvalidInput(format!(
                    "Unknown action '{}' for {} admin",
                    name,
                    self.kind()
                ))
            })?;

        match action {
            AdminAction::ResendGenericHost => {
                resend_generic_host(self.store(), ids.iter().copied()).await
            }
            AdminAction::ResendVideoHost => {
                resend_video_host(self.store(), ids.iter().copied()).await
            }
            AdminAction::CleanEndedEntries => Err(AppError::InvalidInput(format!(
                "Action '{}' applies to media boxes",
                action
            ))),
        }
    }
}

const VIDEO_ACTIONS: &[AdminAction] = &[
    AdminAction::ResendGenericHost,
    AdminAction::ResendVideoHost,
];

const AUDIO_ACTIONS: &[AdminAction] = &[AdminAction::ResendGenericHost];

#[derive(Clone)]
pub struct VideoAdmin {
    store: Arc<dyn MediaStore>,
}

impl VideoAdmin {
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MediaAdminCapable for VideoAdmin {
    fn kind(&self) -> MediaKind {
        MediaKind::Video
    }

    fn store(&self) -> &dyn MediaStore {
        self.store.as_ref()
    }

    fn actions(&self) -> &'static [AdminAction] {
        VIDEO_ACTIONS
    }
}

#[derive(Clone)]
pub struct AudioAdmin {
    store: Arc<dyn MediaStore>,
}

impl AudioAdmin {
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MediaAdminCapable for AudioAdmin {
    fn kind(&self) -> MediaKind {
        MediaKind::Audio
    }

    fn store(&self) -> &dyn MediaStore {
        self.store.as_ref()
    }

    fn actions(&self) -> &'static [AdminAction] {
        AUDIO_ACTIONS
    }
}

pub fn admin_for(kind: MediaKind, store: Arc<dyn MediaStore>) -> Box<dyn MediaAdminCapable> {
    match kind {
        MediaKind::Video => Box::new(VideoAdmin::new(store)),
        MediaKind::Audio => Box::new(AudioAdmin::new(store)),
    }
}
