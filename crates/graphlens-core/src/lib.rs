//! GraphLens Core: error taxonomy and configuration shared by every crate.

pub mod config;
pub mod error;

pub use config::{DateFormat, GraphLensConfig};
pub use error::{Error, Result};
