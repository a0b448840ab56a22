//! Telemetry for the monitor
//!
//! Collects episode lifecycle events and aggregate counters for display at
//! the end of a run.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::types::CriticalTrigger;

/// Monitor event types
#[derive(Debug, Clone)]
pub enum MonitorEvent {
    CriticalDetected {
        trigger: CriticalTrigger,
        timestamp: Instant,
    },
    LocationFix {
        timestamp: Instant,
    },
    LocationStreamError {
        reason: String,
        timestamp: Instant,
    },
    LookupStarted {
        timestamp: Instant,
    },
    LookupCompleted {
        success: bool,
        timestamp: Instant,
    },
    StaleLookupDiscarded {
        timestamp: Instant,
    },
    EpisodeReset {
        timestamp: Instant,
    },
}

/// Aggregate monitor statistics
#[derive(Debug, Clone, Default)]
pub struct MonitorStats {
    pub critical_detections: usize,
    pub location_fixes: usize,
    pub location_errors: usize,
    pub lookups_started: usize,
    pub lookups_succeeded: usize,
    pub lookups_failed: usize,
    pub stale_discards: usize,
    pub episode_resets: usize,
}

/// Telemetry collector shared across handlers
#[derive(Clone)]
pub struct TelemetryCollector {
    events: Arc<Mutex<Vec<MonitorEvent>>>,
    stats: Arc<Mutex<MonitorStats>>,
}

impl TelemetryCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            stats: Arc::new(Mutex::new(MonitorStats::default())),
        }
    }

    /// Record an event
    pub fn record(&self, event: MonitorEvent) {
        {
            let mut stats = self.stats.lock().unwrap();
            match &event {
                MonitorEvent::CriticalDetected { .. } => stats.critical_detections += 1,
                MonitorEvent::LocationFix { .. } => stats.location_fixes += 1,
                MonitorEvent::LocationStreamError { .. } => stats.location_errors += 1,
                MonitorEvent::LookupStarted { .. } => stats.lookups_started += 1,
                MonitorEvent::LookupCompleted { success, .. } => {
                    if *success {
                        stats.lookups_succeeded += 1;
                    } else {
                        stats.lookups_failed += 1;
                    }
                }
                MonitorEvent::StaleLookupDiscarded { .. } => stats.stale_discards += 1,
                MonitorEvent::EpisodeReset { .. } => stats.episode_resets += 1,
            }
        }

        let mut events = self.events.lock().unwrap();
        events.push(event);
    }

    /// Get current statistics
    pub fn get_stats(&self) -> MonitorStats {
        self.stats.lock().unwrap().clone()
    }

    /// Number of recorded events
    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Snapshot of all recorded events
    pub fn events(&self) -> Vec<MonitorEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_updates_stats() {
        let collector = TelemetryCollector::new();

        collector.record(MonitorEvent::CriticalDetected {
            trigger: CriticalTrigger::HeartRate,
            timestamp: Instant::now(),
        });
        collector.record(MonitorEvent::LookupStarted {
            timestamp: Instant::now(),
        });
        collector.record(MonitorEvent::LookupCompleted {
            success: false,
            timestamp: Instant::now(),
        });

        let stats = collector.get_stats();
        assert_eq!(stats.critical_detections, 1);
        assert_eq!(stats.lookups_started, 1);
        assert_eq!(stats.lookups_failed, 1);
        assert_eq!(stats.lookups_succeeded, 0);
        assert_eq!(collector.event_count(), 3);
    }

    #[test]
    fn test_collector_is_shared_across_clones() {
        let collector = TelemetryCollector::new();
        let clone = collector.clone();

        clone.record(MonitorEvent::EpisodeReset {
            timestamp: Instant::now(),
        });

        assert_eq!(collector.get_stats().episode_resets, 1);
    }
}
