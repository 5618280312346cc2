//! Active-clip resolution: which clips render at a given instant.

use lumina_core::RationalTime;
use lumina_timeline::{Clip, Project, TrackKind};
use smallvec::SmallVec;

/// The set of clips active at one timeline instant.
#[derive(Debug)]
pub struct ActiveSet<'a> {
    /// The single topmost video clip covering the instant. Stacked video
    /// tracks are not composited; the topmost covering clip wins entirely.
    pub primary: Option<&'a Clip>,
    /// All text clips covering the instant, across visible text tracks.
    pub overlays: SmallVec<[&'a Clip; 4]>,
    /// The single audio clip covering the instant, used for gain only.
    pub audio: Option<&'a Clip>,
}

impl<'a> ActiveSet<'a> {
    /// Nothing to render at this instant.
    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.overlays.is_empty() && self.audio.is_none()
    }
}

/// Resolve the active set at `at`.
///
/// Video tracks are scanned in reverse declaration order: later-declared
/// tracks composite on top, so the first covering clip found wins. Hidden
/// tracks never render; locked video tracks are excluded from primary
/// resolution; muted audio tracks produce no audio.
pub fn resolve(project: &Project, at: RationalTime) -> ActiveSet<'_> {
    let primary = project
        .tracks
        .iter()
        .rev()
        .filter(|t| t.kind == TrackKind::Video && !t.hidden && !t.locked)
        .flat_map(|t| t.clips.iter())
        .find(|c| c.contains(at));

    let overlays = project
        .tracks
        .iter()
        .filter(|t| t.kind == TrackKind::Text && !t.hidden)
        .flat_map(|t| t.clips.iter())
        .filter(|c| c.contains(at))
        .collect();

    let audio = project
        .tracks
        .iter()
        .filter(|t| t.kind == TrackKind::Audio && !t.hidden && !t.muted)
        .flat_map(|t| t.clips.iter())
        .find(|c| c.contains(at));

    ActiveSet {
        primary,
        overlays,
        audio,
    }
}
