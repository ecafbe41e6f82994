//! Data models for the multimedias admin
//!
//! Media items, their per-provider host records, media boxes and media
//! config entries.

mod media;
mod media_config;
mod media_host;
mod mediabox;

pub use media::*;
pub use media_config::*;
pub use media_host::*;
pub use mediabox::*;
