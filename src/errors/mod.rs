//! Error handling for secretferry.

pub mod types;

pub use types::{FerryError, Result};
