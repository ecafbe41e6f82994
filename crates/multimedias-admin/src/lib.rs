//! Multimedias admin
//!
//! Bulk actions (host resubmission, media box cleanup), per-kind admin
//! capabilities, static form/list layouts and the embed-insertion cell.

pub mod actions;
pub mod capability;
pub mod embed;
pub mod layout;
pub mod mediabox;
pub mod resubmission;

#[cfg(test)]
pub mod test_helpers;

pub use actions::AdminAction;
pub use capability::{admin_for, AudioAdmin, MediaAdminCapable, VideoAdmin};
pub use embed::{pick_embed, render_embed_cell, EmbedCell};
pub use layout::{media_readonly_fields, FormMode};
pub use mediabox::{clean_ended_entries, BoxCleanup, CleanupReport};
pub use resubmission::{
    resend_generic_host, resend_video_host, ResubmissionReport, SkipReason, SkippedItem,
};
