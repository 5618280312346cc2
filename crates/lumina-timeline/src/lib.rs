//! Lumina Timeline - Timeline data model and edit engine
//!
//! Implements the authoritative project structure for the editor:
//! - Projects containing tracks, tracks containing placed clips
//! - A pure edit engine: `apply(project, command)` produces a new project
//!   value with invariants intact, or an explicit rejection reason
//! - Versioned JSON persistence

pub mod clip;
pub mod edit;
pub mod project;
pub mod serialization;
pub mod track;

pub use clip::{Clip, ClipProperties, Effect, EffectKind, SourceRef, Transition, TransitionKind};
pub use edit::{apply, ClipPatch, EditCommand, EditOptions, EditOutcome, EditStatus, RejectReason};
pub use project::Project;
pub use serialization::ProjectFile;
pub use track::{Track, TrackKind};
