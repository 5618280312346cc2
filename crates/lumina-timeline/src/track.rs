//! Track types for the timeline.

use lumina_core::RationalTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clip::Clip;

/// Kind of track (and of the clips it holds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
    Text,
}

impl TrackKind {
    /// Default display color for clips of this kind.
    pub fn default_color(self) -> &'static str {
        match self {
            TrackKind::Video => "#3b82f6",
            TrackKind::Audio => "#10b981",
            TrackKind::Text => "#a855f7",
        }
    }

    /// Default name for an auto-created track of this kind.
    pub fn default_track_name(self) -> &'static str {
        match self {
            TrackKind::Video => "Video Track",
            TrackKind::Audio => "Audio Track",
            TrackKind::Text => "Text Track",
        }
    }
}

/// An ordered lane of clips sharing one media kind.
///
/// Clips are absolutely positioned (each carries its own `start_time`); the
/// vector order is declaration order, not necessarily temporal order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track ID
    pub id: Uuid,
    /// Track name
    pub name: String,
    /// Track kind
    pub kind: TrackKind,
    /// Clips on this track
    pub clips: Vec<Clip>,
    /// Excluded from rendering
    #[serde(default)]
    pub hidden: bool,
    /// Excluded from audio resolution
    #[serde(default)]
    pub muted: bool,
    /// Locked against edits (and against receiving new clips)
    #[serde(default)]
    pub locked: bool,
}

impl Track {
    /// Create a new empty track.
    pub fn new(kind: TrackKind, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            clips: Vec::new(),
            hidden: false,
            muted: false,
            locked: false,
        }
    }

    /// Validation predicate: a clip belongs on this track iff kinds agree.
    #[inline]
    pub fn accepts(&self, clip: &Clip) -> bool {
        self.kind == clip.kind
    }

    /// Find a clip by ID. Returns (index, &Clip).
    pub fn find_clip(&self, id: Uuid) -> Option<(usize, &Clip)> {
        self.clips.iter().enumerate().find(|(_, c)| c.id == id)
    }

    /// Find a clip mutably by ID. Returns (index, &mut Clip).
    pub fn find_clip_mut(&mut self, id: Uuid) -> Option<(usize, &mut Clip)> {
        self.clips.iter_mut().enumerate().find(|(_, c)| c.id == id)
    }

    /// Remove a clip by ID, returning it.
    pub fn remove_clip(&mut self, id: Uuid) -> Option<Clip> {
        let index = self.clips.iter().position(|c| c.id == id)?;
        Some(self.clips.remove(index))
    }

    /// First clip (in declaration order) whose interval contains `time`.
    pub fn clip_at_time(&self, time: RationalTime) -> Option<&Clip> {
        self.clips.iter().find(|c| c.contains(time))
    }

    /// Timeline end of the last-ending clip on this track.
    pub fn end_time(&self) -> RationalTime {
        self.clips
            .iter()
            .map(|c| c.end_time())
            .max()
            .unwrap_or(RationalTime::ZERO)
    }
}
