//! Multimedias Core Library
//!
//! Domain models, error types, configuration and validation shared by the
//! multimedias admin components (repositories, bulk actions, CLI).

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel, ValidationError};
pub use models::{
    FileRef, HostProvider, HostStatus, MediaBox, MediaBoxEntry, MediaConfig, MediaConfigFilter,
    MediaHostRecord, MediaItem, MediaKind,
};
pub use validation::{validate_upload_extension, AUDIO_EXTENSIONS, VIDEO_EXTENSIONS};
