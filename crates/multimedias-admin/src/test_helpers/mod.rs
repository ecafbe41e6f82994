//! Test helpers for the bulk actions
//!
//! In-memory store implementations and fixtures, so the workflows can be
//! exercised without a database.

pub mod fixtures;
pub mod mock_stores;

pub use fixtures::*;
pub use mock_stores::{InMemoryMediaBoxStore, InMemoryMediaStore};
