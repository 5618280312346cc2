//! The project store: commit discipline, selection, observers.

use std::time::{SystemTime, UNIX_EPOCH};

use crossbeam_channel::{unbounded, Receiver, Sender};
use lumina_advisor::AdvisoryService;
use lumina_core::RationalTime;
use lumina_playback::{resolve, ActiveSet, PlayState, PlaybackClock};
use lumina_timeline::{apply, EditCommand, EditOptions, EditStatus, Project, RejectReason};
use uuid::Uuid;

/// State transitions published to observers.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// An edit was committed; the project value was replaced.
    EditApplied {
        created_clip: Option<Uuid>,
        created_track: Option<Uuid>,
    },
    /// An edit was rejected; nothing changed.
    EditRejected { reason: RejectReason },
    /// The selected clip changed (or was cleared).
    SelectionChanged { clip_id: Option<Uuid> },
    /// The playhead moved.
    TimeChanged { time: RationalTime },
    /// The transport flipped between playing and paused.
    TransportChanged { state: PlayState },
    /// The advisory service failed; the project is untouched.
    AdvisoryFailed { message: String },
}

/// Owns the single authoritative `Project` value.
///
/// All access is read-snapshot / transform / replace: edit operations and
/// clock ticks each commit exactly one state transition, and no observer can
/// see a partially-applied one.
pub struct ProjectStore {
    project: Project,
    selection: Option<Uuid>,
    clock: PlaybackClock,
    options: EditOptions,
    subscribers: Vec<Sender<StoreEvent>>,
}

impl ProjectStore {
    /// Create a store around an initial project.
    pub fn new(project: Project) -> Self {
        Self::with_options(project, EditOptions::default())
    }

    /// Create a store with custom edit options (e.g. a frame-accurate guard
    /// band).
    pub fn with_options(project: Project, options: EditOptions) -> Self {
        Self {
            project,
            selection: None,
            clock: PlaybackClock::new(),
            options,
            subscribers: Vec::new(),
        }
    }

    /// The current project value.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// An owned snapshot, e.g. for the export pipeline.
    pub fn snapshot(&self) -> Project {
        self.project.clone()
    }

    pub fn selection(&self) -> Option<Uuid> {
        self.selection
    }

    pub fn play_state(&self) -> PlayState {
        self.clock.state()
    }

    pub fn edit_options(&self) -> &EditOptions {
        &self.options
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    fn emit(&mut self, event: StoreEvent) {
        // Drop subscribers whose receivers are gone.
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    // ── Edits ───────────────────────────────────────────────────

    /// Run a command through the edit engine and commit the result.
    pub fn dispatch(&mut self, command: &EditCommand) -> EditStatus {
        let outcome = apply(&self.project, command, &self.options);
        match outcome.status {
            EditStatus::Applied => {
                let mut next = outcome.project;
                next.last_modified = unix_millis();
                self.project = next;
                tracing::debug!(?command, "edit committed");
                self.emit(StoreEvent::EditApplied {
                    created_clip: outcome.created_clip,
                    created_track: outcome.created_track,
                });
                // Deleting the selected clip clears the selection.
                if outcome.deleted_clip.is_some() && outcome.deleted_clip == self.selection {
                    self.selection = None;
                    self.emit(StoreEvent::SelectionChanged { clip_id: None });
                }
            }
            EditStatus::Rejected(reason) => {
                tracing::debug!(%reason, "edit rejected");
                self.emit(StoreEvent::EditRejected { reason });
            }
        }
        outcome.status
    }

    /// Select a clip (ignored if the id does not exist), or clear with `None`.
    pub fn select(&mut self, clip_id: Option<Uuid>) {
        if let Some(id) = clip_id {
            if self.project.find_clip(id).is_none() {
                tracing::debug!(%id, "ignoring selection of unknown clip");
                return;
            }
        }
        if self.selection != clip_id {
            self.selection = clip_id;
            self.emit(StoreEvent::SelectionChanged { clip_id });
        }
    }

    /// Split the selected clip at the playhead, or failing a selection, the
    /// first clip found under the playhead. Returns `None` when there is
    /// nothing to split.
    pub fn split_at_playhead(&mut self) -> Option<EditStatus> {
        let at = self.project.current_time;
        let clip_id = self
            .selection
            .filter(|id| self.project.find_clip(*id).is_some())
            .or_else(|| self.project.clip_under_playhead(at).map(|c| c.id))?;
        Some(self.dispatch(&EditCommand::SplitClip { clip_id, at }))
    }

    // ── Transport ───────────────────────────────────────────────

    /// Flip play/pause.
    pub fn toggle_play(&mut self) -> PlayState {
        let state = self.clock.toggle_play();
        self.emit(StoreEvent::TransportChanged { state });
        state
    }

    /// Advance one scheduling tick. No-op while paused.
    pub fn tick(&mut self) {
        let outcome = self.clock.tick(self.project.current_time, self.project.duration);
        if outcome.time != self.project.current_time {
            self.project.current_time = outcome.time;
            self.emit(StoreEvent::TimeChanged { time: outcome.time });
        }
        if outcome.reached_end {
            self.emit(StoreEvent::TransportChanged {
                state: PlayState::Paused,
            });
        }
    }

    /// Move the playhead, clamped into the timeline. Play state is untouched.
    pub fn seek(&mut self, requested: RationalTime) {
        let time = self.clock.seek(requested, self.project.duration);
        if time != self.project.current_time {
            self.project.current_time = time;
            self.emit(StoreEvent::TimeChanged { time });
        }
    }

    /// Resolve the active rendering set at the playhead.
    pub fn active_set(&self) -> ActiveSet<'_> {
        resolve(&self.project, self.project.current_time)
    }

    // ── Advisory integration ────────────────────────────────────

    /// Ask the advisory service for cut suggestions and apply them as
    /// ordinary split commands at segment boundaries. Best effort: boundaries
    /// that land on no clip or inside a guard band are skipped. Returns the
    /// number of cuts committed. A failing advisor leaves the project
    /// untouched and surfaces an `AdvisoryFailed` event.
    pub fn request_cut_suggestions(
        &mut self,
        advisor: &dyn AdvisoryService,
        description: &str,
    ) -> usize {
        let analysis = match advisor.suggest_segments(description, self.project.duration) {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(error = %e, "advisory service failed");
                self.emit(StoreEvent::AdvisoryFailed {
                    message: e.to_string(),
                });
                return 0;
            }
        };

        let mut committed = 0;
        for at in analysis.boundaries() {
            // Re-resolve against the current project: earlier cuts change
            // which clip covers each boundary.
            let Some(clip) = self.project.clip_under_playhead(at) else {
                continue;
            };
            let clip_id = clip.id;
            if self.dispatch(&EditCommand::SplitClip { clip_id, at }).is_applied() {
                committed += 1;
            }
        }
        tracing::info!(committed, "advisory cuts applied");
        committed
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
