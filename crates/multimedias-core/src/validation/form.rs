//! Media edit form
//!
//! Field rules for the video/audio admin form: required headline and title,
//! slug shape, and the kind-specific extension check on `media_file`.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use super::extension::validate_upload_extension;
use crate::error::{AppError, ValidationError};
use crate::models::{FileRef, MediaKind};

static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));

pub const REQUIRED_FIELD: &str = "This field is required";

/// Form order, used to report the topmost failing field.
const FIELD_ORDER: &[&str] = &["site_id", "title", "slug", "short_title", "hat", "headline"];

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut err = validator::ValidationError::new("required");
        err.message = Some(REQUIRED_FIELD.into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MediaForm {
    pub site_id: Uuid,
    #[validate(
        custom(function = "not_blank"),
        length(max = 140, message = "Title must be at most 140 characters")
    )]
    pub title: String,
    #[validate(regex(
        path = *SLUG_PATTERN,
        message = "Slug may contain only lowercase letters, digits and hyphens"
    ))]
    pub slug: String,
    #[validate(length(max = 140, message = "Short title must be at most 140 characters"))]
    pub short_title: Option<String>,
    #[validate(length(max = 140, message = "Hat must be at most 140 characters"))]
    pub hat: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub headline: String,
    pub media_file: Option<FileRef>,
    pub tags: Option<String>,
    pub channel_id: Option<Uuid>,
}

impl MediaForm {
    /// Run field rules, then the upload extension check for `kind`.
    ///
    /// Returns the accepted file reference.
    pub fn clean(&self, kind: MediaKind) -> Result<FileRef, AppError> {
        self.validate().map_err(first_field_error)?;

        match self.media_file {
            Some(ref file) if !file.is_empty() => {
                Ok(validate_upload_extension(file.name(), kind)?)
            }
            _ => Err(ValidationError::new("media_file", REQUIRED_FIELD).into()),
        }
    }
}

fn first_field_error(errors: ValidationErrors) -> ValidationError {
    let field_errors = errors.field_errors();
    let first = field_errors
        .iter()
        .map(|(field, errs)| (field.to_string(), errs))
        .min_by_key(|(field, _)| {
            FIELD_ORDER
                .iter()
                .position(|f| *f == field.as_str())
                .unwrap_or(FIELD_ORDER.len())
        });

    match first {
        Some((field, errs)) => {
            let message = errs
                .first()
                .map(|e| match e.message {
                    Some(ref m) => m.to_string(),
                    None => e.code.to_string(),
                })
                .unwrap_or_else(|| REQUIRED_FIELD.to_string());
            ValidationError::new(field, message)
        }
        None => ValidationError::new("__all__", errors.to_string()),
    }
}
