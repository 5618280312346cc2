//! The demo project: a short summer vlog with video, text and audio tracks.

use lumina_core::{FrameRate, RationalTime};
use lumina_timeline::{Clip, ClipProperties, Project, SourceRef, Track, TrackKind};

const SAMPLE_SRC: &str = "https://sample-videos.com/video321/mp4/720/big_buck_bunny_720p_1mb.mp4";

pub fn summer_vlog() -> Project {
    let mut project = Project {
        name: "Summer_Vlog_2024.mp4".to_string(),
        width: 1920,
        height: 1080,
        fps: FrameRate::FPS_30,
        duration: RationalTime::from_secs(45),
        ..Project::default()
    };

    let mut video = Track::new(TrackKind::Video, "Video 1");
    let mut intro = Clip::new(
        "Intro Scene",
        TrackKind::Video,
        RationalTime::ZERO,
        RationalTime::from_secs(10),
        Some(SourceRef::unbounded(SAMPLE_SRC)),
    );
    intro.track_id = video.id;
    let mut montage = Clip::new(
        "Travel Montage",
        TrackKind::Video,
        RationalTime::new(21, 2),
        RationalTime::from_secs(8),
        Some(SourceRef::unbounded(SAMPLE_SRC)),
    );
    montage.track_id = video.id;
    montage.properties.merge_from(&ClipProperties {
        scale: Some(1.2),
        volume: Some(0.8),
        ..ClipProperties::default()
    });
    video.clips.push(intro);
    video.clips.push(montage);

    let mut text = Track::new(TrackKind::Text, "Text Overlay");
    let mut title = Clip::new(
        "Title Card",
        TrackKind::Text,
        RationalTime::from_secs(1),
        RationalTime::from_secs(5),
        None,
    );
    title.track_id = text.id;
    title.properties.merge_from(&ClipProperties {
        text: Some("SUMMER 2024".to_string()),
        font_size: Some(80.0),
        font_family: Some("Inter".to_string()),
        rotation: Some(-5.0),
        ..ClipProperties::default()
    });
    text.clips.push(title);

    let mut audio = Track::new(TrackKind::Audio, "Audio");
    let mut beat = Clip::new(
        "LoFi Beat",
        TrackKind::Audio,
        RationalTime::ZERO,
        RationalTime::from_secs(30),
        None,
    );
    beat.track_id = audio.id;
    beat.properties.volume = Some(0.5);
    audio.clips.push(beat);

    project.tracks.push(video);
    project.tracks.push(text);
    project.tracks.push(audio);
    project
}
