//! Lumina - timeline editing engine demo
//!
//! Headless walkthrough of the editing core: builds the sample project,
//! runs a few edits through the store, plays the timeline to the end while
//! logging what the renderer would composite, then prints the export plan.
//! Pass a path to also persist the edited project as JSON.

mod sample;

use anyhow::Result;
use lumina_advisor::NullAdvisor;
use lumina_core::RationalTime;
use lumina_export::{ExportFormat, ExportJob, ExportPlan};
use lumina_playback::PlayState;
use lumina_store::ProjectStore;
use lumina_timeline::{ClipPatch, ClipProperties, EditCommand, ProjectFile};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("lumina starting");

    let mut store = ProjectStore::new(sample::summer_vlog());
    let events = store.subscribe();

    // A small editing session.
    let intro_id = store.project().tracks[0].clips[0].id;
    store.dispatch(&EditCommand::SplitClip {
        clip_id: intro_id,
        at: RationalTime::from_secs(4),
    });
    store.dispatch(&EditCommand::UpdateClip {
        clip_id: intro_id,
        patch: ClipPatch {
            name: Some("Intro (graded)".to_string()),
            properties: Some(ClipProperties {
                opacity: Some(0.9),
                ..ClipProperties::default()
            }),
            ..ClipPatch::default()
        },
    });
    store.dispatch(&EditCommand::DuplicateClip { clip_id: intro_id });

    // Advisory pass (no service configured in the demo).
    let cuts = store.request_cut_suggestions(&NullAdvisor, "a summer vacation vlog");
    info!(cuts, "advisory pass done");

    // Play the whole timeline, logging whenever the composited set changes.
    store.toggle_play();
    let mut last_primary = None;
    while store.play_state() == PlayState::Playing {
        store.tick();
        let active = store.active_set();
        let primary = active.primary.map(|c| c.name.clone());
        if primary != last_primary {
            info!(
                time = %store.project().current_time,
                primary = primary.as_deref().unwrap_or("<black>"),
                overlays = active.overlays.len(),
                audio = active.audio.is_some(),
                "active set changed"
            );
            last_primary = primary;
        }
    }
    info!(events = events.len(), "playback finished");

    // Export planning.
    let snapshot = store.snapshot();
    info!(
        clips = snapshot.clip_count(),
        content_end = %snapshot.content_end(),
        "timeline after the session"
    );
    let plan = ExportPlan::from_project(&snapshot);
    for segment in &plan.segments {
        info!(
            start = %segment.range.start,
            end = %segment.range.end(),
            source = segment.source_url.as_deref().unwrap_or("<black>"),
            "export segment"
        );
    }
    let job = ExportJob::new("summer_vlog.mp4", ExportFormat::h264(&snapshot));
    info!(
        frames = job.total_frames(&snapshot),
        args = ?job.ffmpeg_args(),
        "export job planned"
    );

    if let Some(path) = std::env::args().nth(1) {
        ProjectFile::new(snapshot).save_to_file(std::path::Path::new(&path))?;
        info!(path, "project saved");
    }

    Ok(())
}
