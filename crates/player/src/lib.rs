//! Character creation client.
//!
//! REST adapter for the character creation API, the draft reconciler and the
//! wizard controller. Rendering is left to the shell embedding this crate;
//! the bundled binary prints a text summary.

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod report;

pub use config::{ClientConfig, ConfigError};
