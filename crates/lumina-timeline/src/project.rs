//! Project: the aggregate root of the timeline model.

use lumina_core::{FrameRate, RationalTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clip::Clip;
use crate::track::{Track, TrackKind};

/// The aggregate root: tracks, dimensions, frame rate, and the playhead.
///
/// Owned exclusively by the project store; edits produce a new `Project`
/// value rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project ID
    pub id: Uuid,
    /// Project name
    pub name: String,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Frame rate
    pub fps: FrameRate,
    /// Total timeline duration; the playhead is confined to `[0, duration]`
    pub duration: RationalTime,
    /// Tracks in declaration order (later video tracks composite on top)
    pub tracks: Vec<Track>,
    /// Current playhead position
    pub current_time: RationalTime,
    /// Unix milliseconds of the last committed edit
    pub last_modified: u64,
}

impl Project {
    /// Create a new empty project.
    pub fn new(name: impl Into<String>, width: u32, height: u32, fps: FrameRate, duration: RationalTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            width,
            height,
            fps,
            duration,
            tracks: Vec::new(),
            current_time: RationalTime::ZERO,
            last_modified: 0,
        }
    }

    /// Find a track by ID.
    pub fn find_track(&self, id: Uuid) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Find a track mutably by ID.
    pub fn find_track_mut(&mut self, id: Uuid) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.id == id)
    }

    /// Find a clip by ID, scanning tracks then clips in storage order.
    /// Returns (track index, clip index).
    pub fn locate_clip(&self, id: Uuid) -> Option<(usize, usize)> {
        self.tracks.iter().enumerate().find_map(|(ti, track)| {
            track.find_clip(id).map(|(ci, _)| (ti, ci))
        })
    }

    /// Find a clip by ID.
    pub fn find_clip(&self, id: Uuid) -> Option<&Clip> {
        self.tracks.iter().find_map(|t| t.find_clip(id).map(|(_, c)| c))
    }

    /// First clip (scanning tracks in storage order) strictly containing
    /// `time` in its open interval. Used as the default split target when
    /// nothing is selected.
    pub fn clip_under_playhead(&self, time: RationalTime) -> Option<&Clip> {
        self.tracks
            .iter()
            .flat_map(|t| t.clips.iter())
            .find(|c| time > c.start_time && time < c.end_time())
    }

    /// First unlocked track of the given kind, in declaration order.
    pub fn first_unlocked_track(&self, kind: TrackKind) -> Option<usize> {
        self.tracks
            .iter()
            .position(|t| t.kind == kind && !t.locked)
    }

    /// Timeline end of the last-ending clip across all tracks.
    pub fn content_end(&self) -> RationalTime {
        self.tracks
            .iter()
            .map(|t| t.end_time())
            .max()
            .unwrap_or(RationalTime::ZERO)
    }

    /// Total number of clips across all tracks.
    pub fn clip_count(&self) -> usize {
        self.tracks.iter().map(|t| t.clips.len()).sum()
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new(
            "Untitled Project",
            1920,
            1080,
            FrameRate::FPS_30,
            RationalTime::from_secs(60),
        )
    }
}
