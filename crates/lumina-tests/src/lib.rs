//! Integration test crate for Lumina.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on multiple lumina crates to verify they work together.

#[cfg(test)]
mod advisory;

#[cfg(test)]
mod editing;

#[cfg(test)]
mod playback;

#[cfg(test)]
mod persistence;
