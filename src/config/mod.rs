//! # Configuration Management
//!
//! Environment-driven configuration for the sync process.

pub mod settings;

pub use settings::{AppConfig, SyncSettings, DEFAULT_REQUEST_TIMEOUT_SECONDS};
