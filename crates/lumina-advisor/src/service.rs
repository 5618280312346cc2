//! The advisory service trait and the built-in null implementation.

use lumina_core::RationalTime;

use crate::analysis::CutAnalysis;
use crate::error::AdvisorResult;

/// An external service that, given a description of the video and its total
/// duration, suggests engaging segments.
///
/// Implementations wrap whatever transport the deployment uses (an HTTP
/// model API, a local model, a test stub). The editor core only sees this
/// trait.
pub trait AdvisoryService {
    fn suggest_segments(
        &self,
        description: &str,
        total_duration: RationalTime,
    ) -> AdvisorResult<CutAnalysis>;
}

/// Advisor used when no service is configured: always returns no
/// suggestions, never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAdvisor;

impl AdvisoryService for NullAdvisor {
    fn suggest_segments(
        &self,
        _description: &str,
        _total_duration: RationalTime,
    ) -> AdvisorResult<CutAnalysis> {
        tracing::debug!("no advisory service configured, returning no suggestions");
        Ok(CutAnalysis::default())
    }
}
