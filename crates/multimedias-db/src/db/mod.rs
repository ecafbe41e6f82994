//! Database repositories for the data access layer
//!
//! One repository per table group: media items, their host records, media
//! boxes (with entries) and media configs.

pub mod media;
pub mod media_config;
pub mod media_host;
pub mod mediabox;
pub mod transaction;

pub use media::MediaRepository;
pub use media_config::MediaConfigRepository;
pub use media_host::MediaHostRepository;
pub use mediabox::MediaBoxRepository;
