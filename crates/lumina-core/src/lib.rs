//! Lumina Core - Foundation types for the timeline editor
//!
//! This crate provides the fundamental types used throughout Lumina:
//! - Time representation (RationalTime, FrameRate, TimeRange)
//! - Error types shared across the workspace

pub mod error;
pub mod time;

pub use error::{LuminaError, Result};
pub use time::{FrameRate, RationalTime, TimeRange};
