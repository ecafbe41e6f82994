//! Upload extension allow-lists
//!
//! The extension is the text after the final `.` of the file name, compared
//! upper-cased. A name without any `.` is taken whole as its own extension.

use crate::error::ValidationError;
use crate::models::{FileRef, MediaKind};

pub const VIDEO_EXTENSIONS: &[&str] = &[
    "AVI", "DIVX", "DV", "MOV", "QT", "MPEG", "MPG", "MP4", "ASF", "WMV", "FLV",
];

pub const AUDIO_EXTENSIONS: &[&str] = &["MP3", "WMA", "WAV", "AAC"];

pub const INVALID_EXTENSION: &str = "Invalid extension";

pub fn allowed_extensions(kind: MediaKind) -> &'static [&'static str] {
    match kind {
        MediaKind::Video => VIDEO_EXTENSIONS,
        MediaKind::Audio => AUDIO_EXTENSIONS,
    }
}

/// Upper-cased text after the last `.`, or the whole name if there is none.
pub fn file_extension(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .unwrap_or(filename)
        .to_uppercase()
}

/// Accept `filename` for `kind` or reject it with "Invalid extension".
pub fn validate_upload_extension(
    filename: &str,
    kind: MediaKind,
) -> Result<FileRef, ValidationError> {
    let extension = file_extension(filename);
    if allowed_extensions(kind).contains(&extension.as_str()) {
        Ok(FileRef::new(filename))
    } else {
        Err(ValidationError::new("media_file", INVALID_EXTENSION))
    }
}
