//! Lumina Playback - transport clock and frame resolution
//!
//! Two concerns live here:
//! - `clock`: the play/pause state machine and the monotonic time cursor
//! - `resolve`: which clips are active at an instant, and how timeline time
//!   maps onto source-media time

pub mod clock;
pub mod resolve;

pub use clock::{PlayState, PlaybackClock, TickOutcome};
pub use resolve::{resolve, ActiveSet};
