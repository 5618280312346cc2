//! Suggested-segment types and wire parsing.

use lumina_core::{RationalTime, TimeRange};
use serde::Deserialize;

use crate::error::{AdvisorError, AdvisorResult};

/// One suggested segment of the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSuggestion {
    /// The suggested timeline interval.
    pub range: TimeRange,
    /// Why this segment is engaging.
    pub reason: String,
    /// Engagement score, 1-10.
    pub score: f64,
}

/// A full advisory response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CutAnalysis {
    pub segments: Vec<SegmentSuggestion>,
}

impl CutAnalysis {
    /// Segment boundaries (starts and ends), sorted and deduplicated.
    /// These are the instants at which cuts would be placed.
    pub fn boundaries(&self) -> Vec<RationalTime> {
        let mut times: Vec<RationalTime> = self
            .segments
            .iter()
            .flat_map(|s| [s.range.start, s.range.end()])
            .collect();
        times.sort();
        times.dedup();
        times
    }
}

// Wire shape: seconds as plain JSON numbers, per the service schema.
#[derive(Debug, Deserialize)]
struct WireAnalysis {
    #[serde(default)]
    segments: Vec<WireSegment>,
}

#[derive(Debug, Deserialize)]
struct WireSegment {
    start: f64,
    end: f64,
    reason: String,
    score: f64,
}

/// Parse an advisory JSON payload.
///
/// Undecodable payloads are a `Malformed` error; individually nonsensical
/// segments (negative times, empty interval) are skipped, keeping the rest.
pub fn parse_analysis(payload: &str) -> AdvisorResult<CutAnalysis> {
    let wire: WireAnalysis = serde_json::from_str(payload)
        .map_err(|e| AdvisorError::Malformed(e.to_string()))?;

    let mut segments = Vec::with_capacity(wire.segments.len());
    for seg in wire.segments {
        if seg.start < 0.0 || seg.end <= seg.start {
            tracing::warn!(start = seg.start, end = seg.end, "skipping invalid segment");
            continue;
        }
        segments.push(SegmentSuggestion {
            range: TimeRange::from_start_end(
                RationalTime::from_seconds_f64(seg.start),
                RationalTime::from_seconds_f64(seg.end),
            ),
            reason: seg.reason,
            score: seg.score,
        });
    }

    Ok(CutAnalysis { segments })
}
