//! Location resolution for the emergency response
//!
//! Tracks a push-based GPS stream and a user-supplied manual fallback, and
//! exposes one "best available" location. GPS always wins over manual text
//! when both exist. Only the most recent stream sample is retained; there is
//! no buffering or replay.

use crate::types::Coordinates;
use std::fmt;
use tokio::sync::mpsc;

/// Bounded channel capacity for the location stream
const STREAM_CAPACITY: usize = 16;

/// Geolocation permission as observed from the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// No sample and no error seen yet
    Unknown,
    /// At least one fix received
    Granted,
    /// Stream errored or the capability is absent
    Denied,
}

/// Error signal from the location source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationStreamError {
    /// The platform never had a location capability
    Unsupported,
    /// The capability exists but the stream failed
    SignalLost(String),
}

impl fmt::Display for LocationStreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationStreamError::Unsupported => write!(f, "geolocation not supported"),
            LocationStreamError::SignalLost(reason) => write!(f, "signal lost: {}", reason),
        }
    }
}

/// One sample from the push-based location source
pub type LocationSample = std::result::Result<Coordinates, LocationStreamError>;

/// Create a bounded push subscription for location samples
///
/// The producer side is handed to the location source (real or simulated);
/// the consumer side is drained by the event loop that owns the orchestrator.
pub fn location_channel() -> (mpsc::Sender<LocationSample>, mpsc::Receiver<LocationSample>) {
    mpsc::channel(STREAM_CAPACITY)
}

/// Best available location for one orchestration run
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedLocation {
    /// Live GPS fix; takes precedence whenever present
    Gps(Coordinates),
    /// User-entered free text
    Manual(String),
    /// Neither source can supply a location
    Unavailable,
}

impl ResolvedLocation {
    pub fn is_available(&self) -> bool {
        !matches!(self, ResolvedLocation::Unavailable)
    }

    /// Location string for the handoff report, `None` when unavailable
    pub fn report_text(&self) -> Option<String> {
        match self {
            ResolvedLocation::Gps(coords) => Some(coords.report_text()),
            ResolvedLocation::Manual(text) => Some(text.clone()),
            ResolvedLocation::Unavailable => None,
        }
    }
}

/// Tracks the location sources and answers `resolve()`
#[derive(Debug, Clone)]
pub struct LocationResolver {
    permission: Permission,
    latest_fix: Option<Coordinates>,
    manual_text: String,
    manual_entry_open: bool,
}

impl LocationResolver {
    pub fn new() -> Self {
        Self {
            permission: Permission::Unknown,
            latest_fix: None,
            manual_text: String::new(),
            manual_entry_open: false,
        }
    }

    /// Record a fresh GPS fix, overwriting the previous one
    pub fn push_fix(&mut self, fix: Coordinates) {
        self.latest_fix = Some(fix);
        self.permission = Permission::Granted;
    }

    /// Record a stream error or missing capability
    ///
    /// Opens the manual-entry affordance only while no manual text exists;
    /// once text has been entered, later errors never reopen it.
    pub fn stream_error(&mut self) {
        self.permission = Permission::Denied;
        if self.manual_text.is_empty() {
            self.manual_entry_open = true;
        }
    }

    /// Overwrite the manual location text; persists until edited again
    pub fn set_manual_text(&mut self, text: impl Into<String>) {
        self.manual_text = text.into();
    }

    /// User-driven toggle of the manual-entry affordance
    pub fn set_manual_entry_open(&mut self, open: bool) {
        self.manual_entry_open = open;
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    pub fn manual_entry_open(&self) -> bool {
        self.manual_entry_open
    }

    pub fn manual_text(&self) -> &str {
        &self.manual_text
    }

    pub fn latest_fix(&self) -> Option<Coordinates> {
        self.latest_fix
    }

    /// Resolve the best available location
    ///
    /// GPS fix if present, else non-empty manual text, else unavailable.
    pub fn resolve(&self) -> ResolvedLocation {
        if let Some(fix) = self.latest_fix {
            return ResolvedLocation::Gps(fix);
        }
        if !self.manual_text.is_empty() {
            return ResolvedLocation::Manual(self.manual_text.clone());
        }
        ResolvedLocation::Unavailable
    }
}

impl Default for LocationResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(lat: f64, lng: f64) -> Coordinates {
        Coordinates {
            latitude: lat,
            longitude: lng,
        }
    }

    #[test]
    fn test_resolves_unavailable_when_empty() {
        let resolver = LocationResolver::new();
        assert_eq!(resolver.resolve(), ResolvedLocation::Unavailable);
        assert_eq!(resolver.permission(), Permission::Unknown);
    }

    #[test]
    fn test_gps_wins_over_manual_text() {
        let mut resolver = LocationResolver::new();
        resolver.set_manual_text("123 Main St, Springfield");
        resolver.push_fix(fix(51.5074, -0.1278));

        match resolver.resolve() {
            ResolvedLocation::Gps(coords) => assert_eq!(coords.latitude, 51.5074),
            other => panic!("expected GPS resolution, got {:?}", other),
        }
    }

    #[test]
    fn test_manual_text_used_without_fix() {
        let mut resolver = LocationResolver::new();
        resolver.set_manual_text("Central Park, NY");
        assert_eq!(
            resolver.resolve(),
            ResolvedLocation::Manual("Central Park, NY".to_string())
        );
    }

    #[test]
    fn test_each_fix_overwrites_previous() {
        let mut resolver = LocationResolver::new();
        resolver.push_fix(fix(1.0, 1.0));
        resolver.push_fix(fix(2.0, 2.0));
        assert_eq!(resolver.latest_fix(), Some(fix(2.0, 2.0)));
        assert_eq!(resolver.permission(), Permission::Granted);
    }

    #[test]
    fn test_stream_error_opens_manual_entry_once() {
        let mut resolver = LocationResolver::new();

        resolver.stream_error();
        assert_eq!(resolver.permission(), Permission::Denied);
        assert!(resolver.manual_entry_open());

        // User enters text and closes the affordance
        resolver.set_manual_text("Springfield General");
        resolver.set_manual_entry_open(false);

        // A later error must not reopen it once text exists
        resolver.stream_error();
        assert!(!resolver.manual_entry_open());
    }

    #[test]
    fn test_report_text_rendering() {
        assert_eq!(
            ResolvedLocation::Gps(fix(51.5, -0.12)).report_text(),
            Some("Lat: 51.5, Lng: -0.12".to_string())
        );
        assert_eq!(
            ResolvedLocation::Manual("Main St".to_string()).report_text(),
            Some("Main St".to_string())
        );
        assert_eq!(ResolvedLocation::Unavailable.report_text(), None);
    }
}
