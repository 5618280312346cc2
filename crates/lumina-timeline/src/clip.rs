//! Clip types for the timeline.
//!
//! A clip lives in two coordinate systems at once: `start_time`/`duration`
//! place it on the timeline, while `trim_start`/`trim_end` select the visible
//! window of its source media. The two are independent; only the split
//! operation relates them.

use lumina_core::{RationalTime, TimeRange};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::track::TrackKind;

/// Reference to a piece of source media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    /// URL or path of the media
    pub url: String,
    /// Source length, when known. Text clips and freshly imported blobs
    /// carry `None`; trim bounds are only enforced against known lengths.
    pub duration: Option<RationalTime>,
}

impl SourceRef {
    /// Reference media of unknown length.
    pub fn unbounded(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            duration: None,
        }
    }

    /// Reference media with a known length.
    pub fn bounded(url: impl Into<String>, duration: RationalTime) -> Self {
        Self {
            url: url.into(),
            duration: Some(duration),
        }
    }
}

/// Visual effect applied to a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    Blur,
    Brightness,
    Grayscale,
    Sepia,
}

/// An effect instance with its intensity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    /// Intensity; interpretation is per-kind (renderer's concern).
    pub amount: f64,
}

/// Entry/exit transition kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionKind {
    Fade,
    Wipe,
    Zoom,
    SlideLeft,
    SlideRight,
    Dissolve,
    Iris,
}

/// A transition descriptor attached to a clip edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub kind: TransitionKind,
    pub duration: RationalTime,
}

/// Per-clip property bag. Every field is optional; updates merge field-wise,
/// never replacing the whole bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipProperties {
    pub volume: Option<f64>,
    pub opacity: Option<f64>,
    pub rotation: Option<f64>,
    pub scale: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub text: Option<String>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
}

impl ClipProperties {
    /// Defaults for video and audio clips.
    pub fn visual_defaults() -> Self {
        Self {
            volume: Some(1.0),
            opacity: Some(1.0),
            rotation: Some(0.0),
            scale: Some(1.0),
            ..Self::default()
        }
    }

    /// Defaults for text clips.
    pub fn text_defaults() -> Self {
        Self {
            text: Some("New Text".to_string()),
            font_size: Some(60.0),
            rotation: Some(0.0),
            ..Self::default()
        }
    }

    /// Deep merge: fields set in `overlay` overwrite, unset fields survive.
    pub fn merge_from(&mut self, overlay: &ClipProperties) {
        macro_rules! take {
            ($field:ident) => {
                if let Some(v) = &overlay.$field {
                    self.$field = Some(v.clone());
                }
            };
        }
        take!(volume);
        take!(opacity);
        take!(rotation);
        take!(scale);
        take!(x);
        take!(y);
        take!(text);
        take!(font_size);
        take!(font_family);
    }
}

/// A placed instance of media or text on a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Unique clip ID
    pub id: Uuid,
    /// Owning track (back-reference by id, not ownership)
    pub track_id: Uuid,
    /// Clip name (displayed in UI)
    pub name: String,
    /// Media kind; always matches the owning track's kind
    pub kind: TrackKind,
    /// Timeline position in seconds
    pub start_time: RationalTime,
    /// Timeline duration in seconds
    pub duration: RationalTime,
    /// Source media reference; absent for text clips
    pub source: Option<SourceRef>,
    /// Display color (hex string)
    pub color: String,
    /// Offset into source media where the visible window begins
    pub trim_start: RationalTime,
    /// Offset into source media where the visible window ends
    pub trim_end: RationalTime,
    /// Per-kind property bag
    pub properties: ClipProperties,
    /// Ordered visual effects
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,
    /// Entry transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_in: Option<Transition>,
    /// Exit transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_out: Option<Transition>,
}

impl Clip {
    /// Create a clip of the given kind at a timeline position.
    pub fn new(
        name: impl Into<String>,
        kind: TrackKind,
        start_time: RationalTime,
        duration: RationalTime,
        source: Option<SourceRef>,
    ) -> Self {
        let properties = match kind {
            TrackKind::Text => ClipProperties::text_defaults(),
            _ => ClipProperties::visual_defaults(),
        };
        Self {
            id: Uuid::new_v4(),
            track_id: Uuid::nil(),
            name: name.into(),
            kind,
            start_time,
            duration,
            source,
            color: kind.default_color().to_string(),
            trim_start: RationalTime::ZERO,
            trim_end: RationalTime::ZERO,
            properties,
            effects: Vec::new(),
            transition_in: None,
            transition_out: None,
        }
    }

    /// The clip's timeline interval `[start_time, start_time + duration)`.
    #[inline]
    pub fn timeline_range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.duration)
    }

    /// Whether a timeline instant falls inside this clip.
    #[inline]
    pub fn contains(&self, time: RationalTime) -> bool {
        self.timeline_range().contains(time)
    }

    /// Timeline end of the clip (exclusive).
    #[inline]
    pub fn end_time(&self) -> RationalTime {
        self.start_time + self.duration
    }

    /// Map a timeline instant to a source-media position.
    #[inline]
    pub fn source_time_at(&self, timeline_time: RationalTime) -> RationalTime {
        (timeline_time - self.start_time) + self.trim_start
    }

    /// Validation predicate: positive duration, non-negative placement and trim.
    pub fn is_valid(&self) -> bool {
        self.duration.is_positive()
            && !self.start_time.is_negative()
            && !self.trim_start.is_negative()
    }
}
