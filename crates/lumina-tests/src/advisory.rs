//! Integration tests for the advisory path: a service response parsed by
//! lumina-advisor flowing through the shared store into ordinary splits.

use lumina_advisor::{parse_analysis, AdvisorError, AdvisorResult, AdvisoryService, CutAnalysis};
use lumina_core::RationalTime;
use lumina_store::{SharedStore, StoreEvent};
use lumina_timeline::{Clip, Project, SourceRef, Track, TrackKind};

struct WireAdvisor(&'static str);

impl AdvisoryService for WireAdvisor {
    fn suggest_segments(&self, _: &str, _: RationalTime) -> AdvisorResult<CutAnalysis> {
        parse_analysis(self.0)
    }
}

struct OfflineAdvisor;

impl AdvisoryService for OfflineAdvisor {
    fn suggest_segments(&self, _: &str, _: RationalTime) -> AdvisorResult<CutAnalysis> {
        Err(AdvisorError::Unavailable("connection refused".into()))
    }
}

fn single_clip_project() -> Project {
    let mut project = Project::default();
    project.duration = RationalTime::from_secs(45);
    let mut track = Track::new(TrackKind::Video, "Video 1");
    let mut clip = Clip::new(
        "Raw Footage",
        TrackKind::Video,
        RationalTime::ZERO,
        RationalTime::from_secs(40),
        Some(SourceRef::unbounded("media/raw.mp4")),
    );
    clip.track_id = track.id;
    track.clips.push(clip);
    project.tracks.push(track);
    project
}

#[test]
fn suggestions_become_splits_through_the_shared_store() {
    let shared = SharedStore::new(single_clip_project());
    let advisor = WireAdvisor(
        r#"{"segments":[
            {"start": 5.0, "end": 12.0, "reason": "beach montage", "score": 8.5},
            {"start": 20.0, "end": 30.0, "reason": "road trip", "score": 7.0}
        ]}"#,
    );

    let committed = shared.with(|store| store.request_cut_suggestions(&advisor, "summer vlog"));
    // four distinct boundaries, all inside the 40s clip
    assert_eq!(committed, 4);

    let project = shared.snapshot();
    let clips = &project.tracks[0].clips;
    assert_eq!(clips.len(), 5);
    // fragments still tile the original footage
    let mut starts: Vec<RationalTime> = clips.iter().map(|c| c.start_time).collect();
    starts.sort();
    assert_eq!(
        starts,
        [0, 5, 12, 20, 30].map(RationalTime::from_secs).to_vec()
    );
}

#[test]
fn boundaries_outside_any_clip_are_skipped() {
    let shared = SharedStore::new(single_clip_project());
    // clip covers [0, 40); 42 falls in dead air
    let advisor = WireAdvisor(
        r#"{"segments":[{"start": 10.0, "end": 42.0, "reason": "finale", "score": 6.0}]}"#,
    );

    let committed = shared.with(|store| store.request_cut_suggestions(&advisor, "summer vlog"));
    assert_eq!(committed, 1);
    assert_eq!(shared.snapshot().tracks[0].clips.len(), 2);
}

#[test]
fn offline_advisor_leaves_the_project_untouched() {
    let shared = SharedStore::new(single_clip_project());
    let before = shared.snapshot();
    let events = shared.with(|store| store.subscribe());

    let committed =
        shared.with(|store| store.request_cut_suggestions(&OfflineAdvisor, "summer vlog"));
    assert_eq!(committed, 0);
    assert_eq!(shared.snapshot(), before);
    assert!(matches!(
        events.try_recv().unwrap(),
        StoreEvent::AdvisoryFailed { .. }
    ));
}

#[test]
fn malformed_service_payload_is_an_error_not_a_crash() {
    let shared = SharedStore::new(single_clip_project());
    let advisor = WireAdvisor(r#"{"segments": "soon"}"#);

    let committed = shared.with(|store| store.request_cut_suggestions(&advisor, "summer vlog"));
    assert_eq!(committed, 0);
    assert_eq!(shared.snapshot().tracks[0].clips.len(), 1);
}
