//! Lumina Export - export planning
//!
//! Turns a read-only `Project` snapshot into an encoder-ready plan: format
//! presets, a frame budget, the cut list of source segments, and the FFmpeg
//! argument vector an external encoder process would run with. No encoding
//! happens here; the embedding runtime owns process execution.

use std::path::PathBuf;

use lumina_core::{FrameRate, RationalTime, TimeRange};
use lumina_playback::resolve;
use lumina_timeline::Project;
use serde::{Deserialize, Serialize};

// ── Format presets ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoCodec {
    H264,
    Vp9,
    Av1,
}

impl VideoCodec {
    pub fn ffmpeg_encoder(self) -> &'static str {
        match self {
            Self::H264 => "libx264",
            Self::Vp9 => "libvpx-vp9",
            Self::Av1 => "libaom-av1",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::H264 | Self::Av1 => "mp4",
            Self::Vp9 => "webm",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCodec {
    Aac,
    Opus,
}

impl AudioCodec {
    pub fn ffmpeg_encoder(self) -> &'static str {
        match self {
            Self::Aac => "aac",
            Self::Opus => "libopus",
        }
    }
}

/// Export format configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportFormat {
    pub video_codec: VideoCodec,
    pub audio_codec: AudioCodec,
    pub width: u32,
    pub height: u32,
    pub frame_rate: FrameRate,
    /// CRF value (0-51, lower = better).
    pub crf: Option<u32>,
    /// Audio bitrate in kbps.
    pub audio_bitrate: u32,
}

impl ExportFormat {
    /// H.264 at the project's own dimensions and rate. The default delivery
    /// format.
    pub fn h264(project: &Project) -> Self {
        Self {
            video_codec: VideoCodec::H264,
            audio_codec: AudioCodec::Aac,
            width: project.width,
            height: project.height,
            frame_rate: project.fps,
            crf: Some(18),
            audio_bitrate: 192,
        }
    }

    /// Web-optimized VP9.
    pub fn vp9_web(project: &Project) -> Self {
        Self {
            video_codec: VideoCodec::Vp9,
            audio_codec: AudioCodec::Opus,
            width: project.width,
            height: project.height,
            frame_rate: project.fps,
            crf: Some(30),
            audio_bitrate: 128,
        }
    }
}

// ── Cut list ────────────────────────────────────────────────────

/// One contiguous stretch of output with a single primary video source
/// (or none: rendered as black).
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSegment {
    /// Timeline interval this segment covers.
    pub range: TimeRange,
    /// Source media URL, if any clip is active here.
    pub source_url: Option<String>,
    /// Source-relative position at `range.start`.
    pub source_start: Option<RationalTime>,
}

/// An encoder-ready description of the timeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportPlan {
    pub segments: Vec<PlanSegment>,
}

impl ExportPlan {
    /// Build the cut list from a project snapshot.
    ///
    /// Segment boundaries are the clip edges on every track; within each
    /// interval the primary video source cannot change, so one resolution at
    /// the interval midpoint describes the whole stretch. Adjacent intervals
    /// with the same source are merged.
    pub fn from_project(project: &Project) -> Self {
        let mut cuts: Vec<RationalTime> = vec![RationalTime::ZERO, project.duration];
        for track in &project.tracks {
            for clip in &track.clips {
                cuts.push(clip.start_time);
                cuts.push(clip.end_time());
            }
        }
        cuts.retain(|t| *t >= RationalTime::ZERO && *t <= project.duration);
        cuts.sort();
        cuts.dedup();

        let mut segments: Vec<PlanSegment> = Vec::new();
        for pair in cuts.windows(2) {
            let range = TimeRange::from_start_end(pair[0], pair[1]);
            if !range.duration.is_positive() {
                continue;
            }
            let midpoint = range.start + range.duration / 2;
            let active = resolve(project, midpoint);
            let (source_url, source_start) = match active.primary {
                Some(clip) => (
                    clip.source.as_ref().map(|s| s.url.clone()),
                    Some(clip.source_time_at(range.start)),
                ),
                None => (None, None),
            };

            // merge adjacent gap segments; sourced neighbors stay separate
            // since their source_start offsets differ
            if let Some(last) = segments.last_mut() {
                if last.source_url == source_url && source_url.is_none() {
                    last.range = TimeRange::from_start_end(last.range.start, range.end());
                    continue;
                }
            }
            segments.push(PlanSegment {
                range,
                source_url,
                source_start,
            });
        }

        tracing::debug!(segments = segments.len(), "export plan built");
        Self { segments }
    }
}

// ── Export job ──────────────────────────────────────────────────

/// An export job: where to write, in what format, over what range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportJob {
    pub output_path: PathBuf,
    pub format: ExportFormat,
    /// Time range to export (`None` = the whole timeline).
    pub range: Option<TimeRange>,
}

impl ExportJob {
    pub fn new(output_path: impl Into<PathBuf>, format: ExportFormat) -> Self {
        Self {
            output_path: output_path.into(),
            format,
            range: None,
        }
    }

    pub fn with_range(mut self, range: TimeRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Total frames the encoder will receive.
    pub fn total_frames(&self, project: &Project) -> u64 {
        let duration = match self.range {
            Some(range) => range.duration,
            None => project.duration,
        };
        duration.to_frames(self.format.frame_rate).unsigned_abs()
    }

    /// The argument vector for an FFmpeg process fed raw RGBA frames on
    /// stdin.
    pub fn ffmpeg_args(&self) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "-y".into(),
            "-f".into(),
            "rawvideo".into(),
            "-pixel_format".into(),
            "rgba".into(),
            "-video_size".into(),
            format!("{}x{}", self.format.width, self.format.height),
            "-framerate".into(),
            format!(
                "{}/{}",
                self.format.frame_rate.numerator, self.format.frame_rate.denominator
            ),
            "-i".into(),
            "pipe:0".into(),
            "-c:v".into(),
            self.format.video_codec.ffmpeg_encoder().into(),
        ];

        if let Some(crf) = self.format.crf {
            args.extend_from_slice(&["-crf".into(), crf.to_string()]);
        }

        args.extend_from_slice(&["-pix_fmt".into(), "yuv420p".into()]);
        args.push(self.output_path.to_string_lossy().into_owned());
        args
    }
}
