//! vf-core: shared error type and configuration for the vidfetch crates.
//!
//! Every other vf-* crate funnels its failures into [`Error`] and reads its
//! settings from [`config::Config`].

pub mod config;
pub mod error;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
