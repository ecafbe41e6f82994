//! Validation modules

pub mod extension;
pub mod form;

pub use extension::{
    allowed_extensions, file_extension, validate_upload_extension, AUDIO_EXTENSIONS,
    INVALID_EXTENSION, VIDEO_EXTENSIONS,
};
pub use form::{MediaForm, REQUIRED_FIELD};
