//! The playback transport: play/pause state and the time cursor.
//!
//! The clock never touches the project itself; it computes the next cursor
//! position and the store commits it, keeping the read-transform-replace
//! discipline intact.

use lumina_core::RationalTime;
use serde::{Deserialize, Serialize};

/// Transport state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayState {
    #[default]
    Paused,
    Playing,
}

/// Result of one scheduling tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// The cursor position after the tick.
    pub time: RationalTime,
    /// True when this tick crossed the end of the timeline (the clock has
    /// auto-paused and reset the cursor to zero).
    pub reached_end: bool,
}

/// Drives the playhead under play/pause/seek.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackClock {
    state: PlayState,
    /// Time advanced per scheduling tick while playing.
    pub tick_quantum: RationalTime,
    /// Divergence between reported and computed source position beyond which
    /// the external media element must be re-seeked. Below it, drift is
    /// treated as natural playback and left alone.
    pub reseek_tolerance: RationalTime,
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self {
            state: PlayState::Paused,
            tick_quantum: RationalTime::new(1, 10),
            reseek_tolerance: RationalTime::new(3, 10),
        }
    }
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> PlayState {
        self.state
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    /// Flip between playing and paused. Returns the new state.
    pub fn toggle_play(&mut self) -> PlayState {
        self.state = match self.state {
            PlayState::Paused => PlayState::Playing,
            PlayState::Playing => PlayState::Paused,
        };
        tracing::debug!(state = ?self.state, "transport toggled");
        self.state
    }

    pub fn pause(&mut self) {
        self.state = PlayState::Paused;
    }

    /// Advance the cursor by one tick quantum.
    ///
    /// A no-op while paused. The tick that reaches or crosses `duration`
    /// pauses the transport and resets the cursor to zero in the same
    /// transition.
    pub fn tick(&mut self, current: RationalTime, duration: RationalTime) -> TickOutcome {
        if !self.is_playing() {
            return TickOutcome {
                time: current,
                reached_end: false,
            };
        }

        let next = current + self.tick_quantum;
        if next >= duration {
            self.state = PlayState::Paused;
            tracing::debug!("end of timeline reached, auto-paused");
            return TickOutcome {
                time: RationalTime::ZERO,
                reached_end: true,
            };
        }

        TickOutcome {
            time: next,
            reached_end: false,
        }
    }

    /// Clamp a requested seek into `[0, duration]`. Valid in either transport
    /// state and changes neither.
    pub fn seek(&self, requested: RationalTime, duration: RationalTime) -> RationalTime {
        requested.clamp(RationalTime::ZERO, duration)
    }

    /// Whether the external media source has drifted far enough from the
    /// computed source position that it must be re-seeked.
    pub fn needs_reseek(&self, reported: RationalTime, computed: RationalTime) -> bool {
        (reported - computed).abs() > self.reseek_tolerance
    }
}
