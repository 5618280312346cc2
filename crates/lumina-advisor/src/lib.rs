//! Lumina Advisor - the AI suggestion collaborator at its interface boundary
//!
//! The advisory service is optional, best-effort input: it proposes engaging
//! segments for a described timeline, and its suggestions enter the editor as
//! ordinary edit commands. A failing or absent advisor never corrupts or
//! blocks the timeline.

pub mod analysis;
pub mod error;
pub mod service;

pub use analysis::{parse_analysis, CutAnalysis, SegmentSuggestion};
pub use error::{AdvisorError, AdvisorResult};
pub use service::{AdvisoryService, NullAdvisor};
