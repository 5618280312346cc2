//! Edit operations on the project.
//!
//! The engine is a pure transform: `apply` takes the current project and a
//! command and produces a new project value plus an explicit status. Invalid
//! commands never mutate anything; they come back as
//! `EditStatus::Rejected(reason)` with the input project value unchanged, so
//! callers can tell "nothing matched" apart from "the request was invalid".

use lumina_core::RationalTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::clip::{Clip, ClipProperties, Effect, SourceRef, Transition};
use crate::project::Project;
use crate::track::{Track, TrackKind};

// ── Options ─────────────────────────────────────────────────────

/// Tunable constants of the edit engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EditOptions {
    /// Minimum distance from a clip's edges within which a split is rejected.
    pub guard_band: RationalTime,
    /// Duration given to newly added clips.
    pub default_clip_duration: RationalTime,
}

impl EditOptions {
    /// Derive the guard band from the frame rate (one frame) for
    /// frame-accurate cutting.
    pub fn frame_accurate(rate: lumina_core::FrameRate) -> Self {
        Self {
            guard_band: rate.frame_duration(),
            ..Self::default()
        }
    }
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            guard_band: RationalTime::new(1, 10),
            default_clip_duration: RationalTime::from_secs(5),
        }
    }
}

// ── Commands ────────────────────────────────────────────────────

/// An edit request against the project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditCommand {
    /// Place a new clip of default duration at `at` on the first unlocked
    /// track of matching kind, creating one if none exists.
    AddClip {
        kind: TrackKind,
        source: Option<SourceRef>,
        at: RationalTime,
    },
    /// Divide a clip in two at a timeline instant.
    SplitClip { clip_id: Uuid, at: RationalTime },
    /// Shallow-merge top-level clip fields; deep-merge the property bag.
    UpdateClip { clip_id: Uuid, patch: ClipPatch },
    /// Copy a clip, placing the copy immediately after the original.
    DuplicateClip { clip_id: Uuid },
    /// Remove a clip from its track.
    DeleteClip { clip_id: Uuid },
    /// Remove a track and everything on it.
    RemoveTrack { track_id: Uuid },
}

/// Partial clip update. `None` fields are left untouched; the property bag
/// merges field-wise. The nested `Option` on transitions distinguishes
/// "leave alone" (outer `None`) from "clear" (inner `None`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipPatch {
    pub name: Option<String>,
    pub start_time: Option<RationalTime>,
    pub duration: Option<RationalTime>,
    pub trim_start: Option<RationalTime>,
    pub trim_end: Option<RationalTime>,
    pub color: Option<String>,
    pub properties: Option<ClipProperties>,
    pub effects: Option<Vec<Effect>>,
    pub transition_in: Option<Option<Transition>>,
    pub transition_out: Option<Option<Transition>>,
}

// ── Outcome ─────────────────────────────────────────────────────

/// Why a command was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RejectReason {
    #[error("no clip with id {0}")]
    ClipNotFound(Uuid),
    #[error("no track with id {0}")]
    TrackNotFound(Uuid),
    #[error("split point {at} is within the guard band of a clip edge")]
    GuardBand { at: RationalTime },
    #[error("edit would produce a non-positive duration")]
    NonPositiveDuration,
    #[error("edit would place the clip before time zero")]
    NegativeStart,
    #[error("edit would produce a negative trim offset")]
    NegativeTrim,
    #[error("trim window exceeds the source media length")]
    TrimOutOfBounds,
}

/// Whether a command was applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditStatus {
    Applied,
    Rejected(RejectReason),
}

impl EditStatus {
    pub fn is_applied(&self) -> bool {
        matches!(self, EditStatus::Applied)
    }
}

/// Result of applying a command: the next project value plus bookkeeping the
/// store needs (new ids for selection, deleted ids for selection clearing).
#[derive(Debug, Clone)]
pub struct EditOutcome {
    /// The next project value. Equal to the input when rejected.
    pub project: Project,
    pub status: EditStatus,
    /// Clip created by add/split/duplicate.
    pub created_clip: Option<Uuid>,
    /// Track created by add (at most one per command).
    pub created_track: Option<Uuid>,
    /// Clip removed by delete; the store clears selection if it was selected.
    pub deleted_clip: Option<Uuid>,
}

impl EditOutcome {
    fn applied(project: Project) -> Self {
        Self {
            project,
            status: EditStatus::Applied,
            created_clip: None,
            created_track: None,
            deleted_clip: None,
        }
    }

    fn rejected(project: &Project, reason: RejectReason) -> Self {
        Self {
            project: project.clone(),
            status: EditStatus::Rejected(reason),
            created_clip: None,
            created_track: None,
            deleted_clip: None,
        }
    }
}

// ── Engine ──────────────────────────────────────────────────────

/// Apply an edit command, producing a new project value.
pub fn apply(project: &Project, command: &EditCommand, options: &EditOptions) -> EditOutcome {
    match command {
        EditCommand::AddClip { kind, source, at } => add_clip(project, *kind, source, *at, options),
        EditCommand::SplitClip { clip_id, at } => split_clip(project, *clip_id, *at, options),
        EditCommand::UpdateClip { clip_id, patch } => update_clip(project, *clip_id, patch),
        EditCommand::DuplicateClip { clip_id } => duplicate_clip(project, *clip_id),
        EditCommand::DeleteClip { clip_id } => delete_clip(project, *clip_id),
        EditCommand::RemoveTrack { track_id } => remove_track(project, *track_id),
    }
}

fn add_clip(
    project: &Project,
    kind: TrackKind,
    source: &Option<SourceRef>,
    at: RationalTime,
    options: &EditOptions,
) -> EditOutcome {
    if at.is_negative() {
        return EditOutcome::rejected(project, RejectReason::NegativeStart);
    }

    // A bounded source caps the new clip: the visible window must fit the
    // known media length, same rule update enforces.
    let duration = match source.as_ref().and_then(|s| s.duration) {
        Some(len) if !len.is_positive() => {
            return EditOutcome::rejected(project, RejectReason::NonPositiveDuration);
        }
        Some(len) if len < options.default_clip_duration => len,
        _ => options.default_clip_duration,
    };

    let mut next = project.clone();
    let mut created_track = None;

    // First unlocked track of matching kind in declaration order, else a
    // fresh track appended at the end.
    let track_index = match next.first_unlocked_track(kind) {
        Some(index) => index,
        None => {
            let track = Track::new(kind, kind.default_track_name());
            created_track = Some(track.id);
            next.tracks.push(track);
            next.tracks.len() - 1
        }
    };

    let name = match kind {
        TrackKind::Text => "New Text",
        _ => "New Clip",
    };
    let mut clip = Clip::new(name, kind, at, duration, source.clone());
    clip.track_id = next.tracks[track_index].id;
    let clip_id = clip.id;
    next.tracks[track_index].clips.push(clip);

    EditOutcome {
        created_clip: Some(clip_id),
        created_track,
        ..EditOutcome::applied(next)
    }
}

fn split_clip(
    project: &Project,
    clip_id: Uuid,
    at: RationalTime,
    options: &EditOptions,
) -> EditOutcome {
    let Some((ti, ci)) = project.locate_clip(clip_id) else {
        return EditOutcome::rejected(project, RejectReason::ClipNotFound(clip_id));
    };

    let clip = &project.tracks[ti].clips[ci];
    let guard = options.guard_band;
    if at <= clip.start_time + guard || at >= clip.end_time() - guard {
        return EditOutcome::rejected(project, RejectReason::GuardBand { at });
    }

    let rel = at - clip.start_time;

    // Second fragment: new identity, picks up the tail of both coordinate
    // systems (timeline placement from `at`, source window from
    // `trim_start + rel`). The first fragment keeps the original identity and
    // trims its tail to the split point.
    let mut second = clip.clone();
    second.id = Uuid::new_v4();
    second.start_time = at;
    second.duration = clip.duration - rel;
    second.trim_start = clip.trim_start + rel;
    second.name = format!("{} (2)", clip.name);
    let second_id = second.id;

    let mut next = project.clone();
    {
        let first = &mut next.tracks[ti].clips[ci];
        first.duration = rel;
        first.trim_end = first.trim_start + rel;
    }
    next.tracks[ti].clips.insert(ci + 1, second);

    EditOutcome {
        created_clip: Some(second_id),
        ..EditOutcome::applied(next)
    }
}

fn update_clip(project: &Project, clip_id: Uuid, patch: &ClipPatch) -> EditOutcome {
    let Some((ti, ci)) = project.locate_clip(clip_id) else {
        return EditOutcome::rejected(project, RejectReason::ClipNotFound(clip_id));
    };

    // Validate the would-be geometry before touching anything.
    let current = &project.tracks[ti].clips[ci];
    let start = patch.start_time.unwrap_or(current.start_time);
    let duration = patch.duration.unwrap_or(current.duration);
    let trim_start = patch.trim_start.unwrap_or(current.trim_start);

    if !duration.is_positive() {
        return EditOutcome::rejected(project, RejectReason::NonPositiveDuration);
    }
    if start.is_negative() {
        return EditOutcome::rejected(project, RejectReason::NegativeStart);
    }
    if trim_start.is_negative() {
        return EditOutcome::rejected(project, RejectReason::NegativeTrim);
    }
    if let Some(source_len) = current.source.as_ref().and_then(|s| s.duration) {
        if trim_start + duration > source_len {
            return EditOutcome::rejected(project, RejectReason::TrimOutOfBounds);
        }
    }

    let mut next = project.clone();
    let clip = &mut next.tracks[ti].clips[ci];
    if let Some(name) = &patch.name {
        clip.name = name.clone();
    }
    clip.start_time = start;
    clip.duration = duration;
    clip.trim_start = trim_start;
    if let Some(trim_end) = patch.trim_end {
        clip.trim_end = trim_end;
    }
    if let Some(color) = &patch.color {
        clip.color = color.clone();
    }
    if let Some(props) = &patch.properties {
        clip.properties.merge_from(props);
    }
    if let Some(effects) = &patch.effects {
        clip.effects = effects.clone();
    }
    if let Some(transition) = &patch.transition_in {
        clip.transition_in = transition.clone();
    }
    if let Some(transition) = &patch.transition_out {
        clip.transition_out = transition.clone();
    }

    EditOutcome::applied(next)
}

fn duplicate_clip(project: &Project, clip_id: Uuid) -> EditOutcome {
    let Some((ti, ci)) = project.locate_clip(clip_id) else {
        return EditOutcome::rejected(project, RejectReason::ClipNotFound(clip_id));
    };

    let original = &project.tracks[ti].clips[ci];
    let mut copy = original.clone();
    copy.id = Uuid::new_v4();
    copy.start_time = original.end_time();
    copy.name = format!("{} (Copy)", original.name);
    let copy_id = copy.id;

    let mut next = project.clone();
    next.tracks[ti].clips.push(copy);

    EditOutcome {
        created_clip: Some(copy_id),
        ..EditOutcome::applied(next)
    }
}

fn delete_clip(project: &Project, clip_id: Uuid) -> EditOutcome {
    let Some((ti, _)) = project.locate_clip(clip_id) else {
        return EditOutcome::rejected(project, RejectReason::ClipNotFound(clip_id));
    };

    let mut next = project.clone();
    next.tracks[ti].remove_clip(clip_id);

    EditOutcome {
        deleted_clip: Some(clip_id),
        ..EditOutcome::applied(next)
    }
}

fn remove_track(project: &Project, track_id: Uuid) -> EditOutcome {
    let Some(index) = project.tracks.iter().position(|t| t.id == track_id) else {
        return EditOutcome::rejected(project, RejectReason::TrackNotFound(track_id));
    };

    let mut next = project.clone();
    next.tracks.remove(index);
    EditOutcome::applied(next)
}

// ── Tests ───────────────────────────────────────────────────────
