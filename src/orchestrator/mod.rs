//! Emergency-response orchestrator
//!
//! Sole owner of the episode state. On a critical false→true edge it
//! resolves a location, issues the hospital search and the handoff-report
//! generation concurrently, and manages loading/failure state. A location
//! change while critical re-runs the full orchestration. Reset returns the
//! episode to idle and restores baseline vitals.
//!
//! All state mutations happen through these serialized handlers; the async
//! lookups observe only the trigger-time snapshot.

pub mod episode;

pub use episode::{
    EmergencyEpisode, EpisodeOutcome, EpisodePhase, EpisodeUpdate, LookupOutcome,
    LOOKUP_FAILURE_MESSAGE, NO_LOCATION_MESSAGE,
};

use crate::contacts::ContactStore;
use crate::detector;
use crate::intel::{HospitalQuery, MedicalIntelligence, ReportRequest};
use crate::location::{LocationResolver, LocationSample, ResolvedLocation};
use crate::telemetry::{MonitorEvent, TelemetryCollector};
use crate::types::{MedicalHistory, VitalSigns};
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Bound on one run's external lookups; a slow run resolves to the
    /// fixed fallback instead of loading forever
    pub lookup_timeout: Duration,

    /// Enable verbose logging
    pub verbose: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            lookup_timeout: Duration::from_secs(30),
            verbose: false,
        }
    }
}

/// Main emergency orchestrator
pub struct EmergencyOrchestrator {
    /// Latest sensor snapshot
    vitals: VitalSigns,

    /// Snapshot frozen at the critical edge; report input
    trigger_vitals: VitalSigns,

    /// Location sources and resolution rule
    resolver: LocationResolver,

    /// Static patient record
    history: MedicalHistory,

    /// Persisted emergency contact
    contacts: ContactStore,

    /// External lookup boundary
    intel: Arc<dyn MedicalIntelligence>,

    /// The single active episode
    episode: EmergencyEpisode,

    telemetry: TelemetryCollector,

    config: OrchestratorConfig,
}

impl EmergencyOrchestrator {
    /// Create a new orchestrator in the idle state
    pub fn new(
        intel: Arc<dyn MedicalIntelligence>,
        contacts: ContactStore,
        history: MedicalHistory,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            vitals: VitalSigns::baseline(),
            trigger_vitals: VitalSigns::baseline(),
            resolver: LocationResolver::new(),
            history,
            contacts,
            intel,
            episode: EmergencyEpisode::idle(),
            telemetry: TelemetryCollector::new(),
            config,
        }
    }

    /// Current episode state
    pub fn episode(&self) -> &EmergencyEpisode {
        &self.episode
    }

    /// Latest vitals snapshot
    pub fn vitals(&self) -> VitalSigns {
        self.vitals
    }

    /// Location resolver, read-only
    ///
    /// Mutations go through `ingest_location_sample` / `set_manual_location`
    /// so a change while critical re-triggers the orchestration.
    pub fn resolver(&self) -> &LocationResolver {
        &self.resolver
    }

    pub fn telemetry(&self) -> &TelemetryCollector {
        &self.telemetry
    }

    /// Feed one vitals snapshot from the sensor
    ///
    /// Applies the detector verdict only on a false→true edge; while already
    /// critical, the stored message and trigger are never overwritten.
    pub async fn ingest_vitals(&mut self, vitals: VitalSigns) {
        self.vitals = vitals;

        let verdict = detector::evaluate(&vitals);
        if !verdict.is_critical || self.episode.is_critical() {
            return;
        }

        if self.config.verbose {
            eprintln!("[DETECT] Critical edge: {}", verdict.status_message);
        }
        self.telemetry.record(MonitorEvent::CriticalDetected {
            trigger: verdict.trigger,
            timestamp: Instant::now(),
        });

        self.episode.status = verdict;
        self.episode.phase = EpisodePhase::Triggered;
        self.episode.triggered_at = Some(chrono::Utc::now());
        self.trigger_vitals = vitals;

        self.respond().await;
    }

    /// Feed one sample from the push-based location stream
    pub async fn ingest_location_sample(&mut self, sample: LocationSample) {
        match sample {
            Ok(fix) => {
                let before = self.resolver.resolve();
                self.resolver.push_fix(fix);
                self.telemetry.record(MonitorEvent::LocationFix {
                    timestamp: Instant::now(),
                });
                self.maybe_rerun(before).await;
            }
            Err(error) => {
                if self.config.verbose {
                    eprintln!("[LOCATION] Stream error: {}", error);
                }
                self.resolver.stream_error();
                self.telemetry.record(MonitorEvent::LocationStreamError {
                    reason: error.to_string(),
                    timestamp: Instant::now(),
                });
            }
        }
    }

    /// Apply a manual location edit
    ///
    /// Mid-emergency edits re-issue both lookups; no debounce.
    pub async fn set_manual_location(&mut self, text: &str) {
        let before = self.resolver.resolve();
        self.resolver.set_manual_text(text);
        self.maybe_rerun(before).await;
    }

    /// Re-run the orchestration when the resolved location changed while
    /// the episode is critical
    async fn maybe_rerun(&mut self, before: ResolvedLocation) {
        if self.episode.is_critical() && self.resolver.resolve() != before {
            self.respond().await;
        }
    }

    /// One full orchestration run for the current episode
    async fn respond(&mut self) {
        let location = self.resolver.resolve();
        self.episode.resolved_location = location.clone();

        let (query, location_text) = match &location {
            ResolvedLocation::Gps(coords) => {
                (HospitalQuery::Near(*coords), coords.report_text())
            }
            ResolvedLocation::Manual(text) => {
                (HospitalQuery::Text(text.clone()), text.clone())
            }
            ResolvedLocation::Unavailable => {
                // Informational only: no network call, never loading
                if self.config.verbose {
                    eprintln!("[EPISODE] No location data, skipping lookups");
                }
                self.episode.hospital_info = NO_LOCATION_MESSAGE.to_string();
                return;
            }
        };

        self.episode.loading = true;
        self.telemetry.record(MonitorEvent::LookupStarted {
            timestamp: Instant::now(),
        });
        if self.config.verbose {
            eprintln!("[EPISODE] Lookups issued for episode {}", self.episode.id);
        }

        let update = self
            .execute_lookups(self.episode.id, query, location_text)
            .await;
        self.apply_update(update);
    }

    /// Issue both external lookups concurrently under one timeout
    ///
    /// The two requests are independent and share a single failure boundary:
    /// if either fails, both results are abandoned. The returned update is
    /// stamped with `episode_id`; it carries no references into `self`, so a
    /// caller may hold it across a reset (and `apply_update` will discard it).
    pub async fn execute_lookups(
        &self,
        episode_id: Uuid,
        query: HospitalQuery,
        location_text: String,
    ) -> EpisodeUpdate {
        let request = ReportRequest {
            vitals: self.trigger_vitals,
            history: self.history.clone(),
            location_text,
            contact: self.contacts.get(),
        };

        let lookups = async {
            tokio::join!(
                self.intel.find_nearest_hospital(&query),
                self.intel.generate_handover_report(&request),
            )
        };

        let outcome = match tokio::time::timeout(self.config.lookup_timeout, lookups).await {
            Err(_) => LookupOutcome::Failure {
                reason: format!(
                    "lookups timed out after {}ms",
                    self.config.lookup_timeout.as_millis()
                ),
            },
            Ok((Ok(hospital), Ok(report))) => LookupOutcome::Success { hospital, report },
            Ok((hospital, report)) => {
                let reason = hospital
                    .err()
                    .or(report.err())
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "unknown lookup failure".to_string());
                LookupOutcome::Failure { reason }
            }
        };

        EpisodeUpdate {
            episode_id,
            outcome,
        }
    }

    /// Apply a completed orchestration run to the episode
    ///
    /// Updates stamped with a stale episode id are discarded, so a response
    /// that lands after a reset cannot repopulate the dashboard fields. Every
    /// applied update ends the loading state.
    pub fn apply_update(&mut self, update: EpisodeUpdate) {
        if update.episode_id != self.episode.id {
            if self.config.verbose {
                eprintln!(
                    "[EPISODE] Discarding stale lookup for episode {}",
                    update.episode_id
                );
            }
            self.telemetry.record(MonitorEvent::StaleLookupDiscarded {
                timestamp: Instant::now(),
            });
            return;
        }

        match update.outcome {
            LookupOutcome::Success { hospital, report } => {
                self.episode.hospital_info = hospital.text;
                self.episode.sources = hospital.sources;
                self.episode.report = report;
                self.episode.phase = EpisodePhase::Resolved(EpisodeOutcome::Success);
                self.telemetry.record(MonitorEvent::LookupCompleted {
                    success: true,
                    timestamp: Instant::now(),
                });
            }
            LookupOutcome::Failure { reason } => {
                if self.config.verbose {
                    eprintln!("[EPISODE] Lookup failed: {}", reason);
                }
                self.episode.hospital_info = LOOKUP_FAILURE_MESSAGE.to_string();
                self.episode.report = LOOKUP_FAILURE_MESSAGE.to_string();
                self.episode.sources.clear();
                self.episode.phase = EpisodePhase::Resolved(EpisodeOutcome::PartialFailure);
                self.telemetry.record(MonitorEvent::LookupCompleted {
                    success: false,
                    timestamp: Instant::now(),
                });
            }
        }

        self.episode.loading = false;
    }

    /// Deactivate the alarm
    ///
    /// Atomically clears the episode, restores baseline vitals, and stamps a
    /// fresh episode id so in-flight lookups from the old episode are
    /// discarded on arrival. Location sources are left untouched.
    pub fn reset(&mut self) {
        self.episode = EmergencyEpisode::idle();
        self.vitals = VitalSigns::baseline();
        self.trigger_vitals = VitalSigns::baseline();
        self.telemetry.record(MonitorEvent::EpisodeReset {
            timestamp: Instant::now(),
        });
        if self.config.verbose {
            eprintln!("[EPISODE] Reset, new episode {}", self.episode.id);
        }
    }
}
