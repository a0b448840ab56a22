//! Emergency episode state
//!
//! One activation cycle of the orchestrator, from trigger to reset. Exactly
//! one episode is active at a time; every async lookup carries the id of the
//! episode it was issued under so stale completions can be discarded.

use crate::intel::HospitalLookup;
use crate::location::ResolvedLocation;
use crate::types::{EmergencyStatus, GroundingSource};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Informational message when neither location source can resolve
pub const NO_LOCATION_MESSAGE: &str =
    "No location data available. Please provide manual location or enable GPS.";

/// Fixed fallback guidance when either external lookup fails
pub const LOOKUP_FAILURE_MESSAGE: &str =
    "Failed to retrieve emergency data. Please call emergency services manually.";

/// Lifecycle of one episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodePhase {
    /// No active emergency
    Idle,
    /// Critical edge observed, lookups pending or skipped
    Triggered,
    /// Lookups finished
    Resolved(EpisodeOutcome),
}

/// How the lookups ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeOutcome {
    Success,
    /// At least one lookup failed; both result fields carry the fallback
    PartialFailure,
}

/// The active emergency episode
#[derive(Debug, Clone)]
pub struct EmergencyEpisode {
    /// Stamp carried by in-flight lookups; changes on every reset
    pub id: Uuid,
    pub phase: EpisodePhase,
    pub status: EmergencyStatus,
    pub resolved_location: ResolvedLocation,
    pub loading: bool,
    pub hospital_info: String,
    pub sources: Vec<GroundingSource>,
    pub report: String,
    pub triggered_at: Option<DateTime<Utc>>,
}

impl EmergencyEpisode {
    /// The quiescent episode with a fresh id
    pub fn idle() -> Self {
        Self {
            id: Uuid::new_v4(),
            phase: EpisodePhase::Idle,
            status: EmergencyStatus::clear(),
            resolved_location: ResolvedLocation::Unavailable,
            loading: false,
            hospital_info: String::new(),
            sources: Vec::new(),
            report: String::new(),
            triggered_at: None,
        }
    }

    pub fn is_critical(&self) -> bool {
        self.status.is_critical
    }
}

impl Default for EmergencyEpisode {
    fn default() -> Self {
        Self::idle()
    }
}

/// Completed orchestration run, stamped with its episode id
///
/// Applying an update whose stamp no longer matches the current episode is a
/// no-op; that is how responses from before a reset are dropped.
#[derive(Debug, Clone)]
pub struct EpisodeUpdate {
    pub episode_id: Uuid,
    pub outcome: LookupOutcome,
}

/// Joint result of the hospital and report lookups
#[derive(Debug, Clone)]
pub enum LookupOutcome {
    Success {
        hospital: HospitalLookup,
        report: String,
    },
    /// Either call failed or the per-episode timeout elapsed
    Failure { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_episode_is_clear() {
        let episode = EmergencyEpisode::idle();
        assert_eq!(episode.phase, EpisodePhase::Idle);
        assert!(!episode.is_critical());
        assert!(!episode.loading);
        assert!(episode.hospital_info.is_empty());
        assert!(episode.sources.is_empty());
        assert!(episode.report.is_empty());
        assert!(episode.triggered_at.is_none());
    }

    #[test]
    fn test_fresh_episodes_get_distinct_ids() {
        assert_ne!(EmergencyEpisode::idle().id, EmergencyEpisode::idle().id);
    }
}
