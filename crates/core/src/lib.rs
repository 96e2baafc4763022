//! Core domain types and shared logic for Annex.
//!
//! This crate defines the canonical data model used across all other crates:
//! - The metadata field set attached to a file path
//! - Application and store configuration

pub mod config;
pub mod record;

pub use config::{AppConfig, MetadataConfig};
pub use record::RecordFields;
