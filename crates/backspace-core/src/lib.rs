//! Backspace Core - Foundational types for the backspace particle effect
//!
//! This crate provides the types that all other backspace crates depend on:
//! - `EffectConfig` - Immutable effect tuning, merged once from the host options
//! - `Vec2`, `SurfaceSize` - Pixel-space geometry
//! - Error types and Result alias

mod config;
mod error;
mod types;

pub use config::{EffectConfig, CONFIG_NAMESPACE};
pub use error::{BackspaceError, Result};
pub use types::{SurfaceSize, Vec2};
