//! Integration tests for playback: the clock, the store's transport, and
//! the per-instant resolution the renderer consumes.

use lumina_core::RationalTime;
use lumina_playback::{resolve, PlayState, PlaybackClock};
use lumina_store::ProjectStore;
use lumina_timeline::{Clip, EditCommand, Project, SourceRef, Track, TrackKind};

// ── Helpers ────────────────────────────────────────────────────

fn place(track: &mut Track, name: &str, start: RationalTime, dur: RationalTime) {
    let mut clip = Clip::new(name, track.kind, start, dur, match track.kind {
        TrackKind::Video => Some(SourceRef::unbounded("media/test.mp4")),
        _ => None,
    });
    clip.track_id = track.id;
    track.clips.push(clip);
}

/// Two video tracks, a text overlay, and an audio bed over 20 seconds.
fn layered_project() -> Project {
    let mut project = Project::default();
    project.duration = RationalTime::from_secs(20);

    let mut base = Track::new(TrackKind::Video, "V1");
    place(&mut base, "Base", RationalTime::ZERO, RationalTime::from_secs(20));
    let mut top = Track::new(TrackKind::Video, "V2");
    place(
        &mut top,
        "Cutaway",
        RationalTime::from_secs(5),
        RationalTime::from_secs(5),
    );
    let mut text = Track::new(TrackKind::Text, "Titles");
    place(
        &mut text,
        "Lower Third",
        RationalTime::from_secs(2),
        RationalTime::from_secs(6),
    );
    let mut audio = Track::new(TrackKind::Audio, "Music");
    place(&mut audio, "Bed", RationalTime::ZERO, RationalTime::from_secs(20));

    project.tracks.push(base);
    project.tracks.push(top);
    project.tracks.push(text);
    project.tracks.push(audio);
    project
}

// ── Resolution during playback ─────────────────────────────────

#[test]
fn later_video_track_wins_while_overlapping() {
    let project = layered_project();

    let set = resolve(&project, RationalTime::from_secs(3));
    assert_eq!(set.primary.unwrap().name, "Base");

    let set = resolve(&project, RationalTime::from_secs(7));
    assert_eq!(set.primary.unwrap().name, "Cutaway");

    let set = resolve(&project, RationalTime::from_secs(12));
    assert_eq!(set.primary.unwrap().name, "Base");
}

#[test]
fn hiding_a_track_mid_session_changes_resolution() {
    let mut project = layered_project();
    project.tracks[1].hidden = true;
    let set = resolve(&project, RationalTime::from_secs(7));
    assert_eq!(set.primary.unwrap().name, "Base");
}

#[test]
fn overlays_and_audio_ride_along() {
    let project = layered_project();
    let set = resolve(&project, RationalTime::from_secs(3));
    assert_eq!(set.overlays.len(), 1);
    assert_eq!(set.overlays[0].name, "Lower Third");
    assert_eq!(set.audio.unwrap().name, "Bed");
}

// ── Transport through the store ────────────────────────────────

#[test]
fn playing_through_the_timeline_sees_every_region() {
    let mut store = ProjectStore::new(layered_project());
    store.toggle_play();

    let mut seen = Vec::new();
    while store.play_state() == PlayState::Playing {
        store.tick();
        if let Some(primary) = store.active_set().primary {
            if seen.last().map(String::as_str) != Some(primary.name.as_str()) {
                seen.push(primary.name.clone());
            }
        }
    }
    assert_eq!(seen, ["Base", "Cutaway", "Base"]);
    // end of timeline: paused and rewound in one transition
    assert_eq!(store.play_state(), PlayState::Paused);
    assert_eq!(store.project().current_time, RationalTime::ZERO);
}

#[test]
fn splits_do_not_disturb_what_the_viewer_sees() {
    let mut store = ProjectStore::new(layered_project());
    let base_id = store.project().tracks[0].clips[0].id;
    store.seek(RationalTime::from_secs(7));
    let before = store.active_set().primary.unwrap().name.clone();

    store.dispatch(&EditCommand::SplitClip {
        clip_id: base_id,
        at: RationalTime::from_secs(10),
    });
    let after = store.active_set().primary.unwrap().name.clone();
    assert_eq!(before, after);
}

// ── Source position and drift ──────────────────────────────────

#[test]
fn source_position_accounts_for_placement_and_trim() {
    let mut project = Project::default();
    let mut track = Track::new(TrackKind::Video, "V1");
    place(
        &mut track,
        "Trimmed",
        RationalTime::from_secs(5),
        RationalTime::from_secs(10),
    );
    track.clips[0].trim_start = RationalTime::from_secs(2);
    project.tracks.push(track);

    let clip = &project.tracks[0].clips[0];
    // playhead at 8s: 3s into the clip, plus 2s of trim
    assert_eq!(
        clip.source_time_at(RationalTime::from_secs(8)),
        RationalTime::from_secs(5)
    );
}

#[test]
fn small_drift_tolerated_large_drift_reseeked() {
    let clock = PlaybackClock::new();
    let computed = RationalTime::from_secs(5);

    // the media element lags a little during normal playback
    assert!(!clock.needs_reseek(RationalTime::new(48, 10), computed));
    // a deliberate jump must be followed
    assert!(clock.needs_reseek(RationalTime::from_secs(9), computed));
}
