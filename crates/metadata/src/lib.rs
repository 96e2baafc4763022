//! Metadata record store for Annex.
//!
//! This crate owns the durable mapping from file path to metadata record:
//! - Row models and the on-disk schema
//! - The `RecordStore` trait and its SQLite implementation
//! - The store error taxonomy

pub mod error;
pub mod models;
pub mod store;

pub use error::{MetadataError, MetadataResult};
pub use store::{RecordStore, SqliteStore};

use annex_core::MetadataConfig;
use std::sync::Arc;

/// Create a record store from configuration.
pub async fn from_config(config: &MetadataConfig) -> MetadataResult<Arc<dyn RecordStore>> {
    config
        .validate()
        .map_err(MetadataError::Config)?;
    let store = SqliteStore::new(&config.path, Some(config.busy_timeout_secs)).await?;
    Ok(Arc::new(store) as Arc<dyn RecordStore>)
}
