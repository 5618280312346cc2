//! Lumina Store - the single authoritative project value
//!
//! Every mutation flows through here: edits run through the engine as pure
//! transforms and the produced project value replaces the old one wholesale;
//! clock ticks and seeks are committed the same way. Observers receive
//! `StoreEvent`s over channels. `SharedStore` wraps the store behind a mutex
//! for embedders, making every transition atomic.

pub mod shared;
pub mod store;

pub use shared::SharedStore;
pub use store::{ProjectStore, StoreEvent};
