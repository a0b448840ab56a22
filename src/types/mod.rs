//! Shared data model for the VitalGuard monitor
//!
//! These types flow between the detector, the location resolver, the
//! orchestrator, and the external medical-intelligence boundary.

use crate::errors::{GuardError, Result};
use serde::{Deserialize, Serialize};

/// One snapshot from the simulated wearable sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitalSigns {
    /// Heart rate in beats per minute
    pub heart_rate: i32,
    /// Systolic blood pressure in mmHg
    pub systolic_bp: i32,
    /// Diastolic blood pressure in mmHg
    pub diastolic_bp: i32,
    /// Whether the patient responds to stimulus
    pub is_responsive: bool,
}

impl VitalSigns {
    /// Baseline vitals restored by an episode reset
    pub const fn baseline() -> Self {
        Self {
            heart_rate: 75,
            systolic_bp: 120,
            diastolic_bp: 80,
            is_responsive: true,
        }
    }
}

impl Default for VitalSigns {
    fn default() -> Self {
        Self::baseline()
    }
}

/// Geographic position from the location stream
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Render the fix the way the handoff report expects it
    pub fn report_text(&self) -> String {
        format!("Lat: {}, Lng: {}", self.latitude, self.longitude)
    }
}

/// What tripped the critical verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalTrigger {
    None,
    Unresponsive,
    HeartRate,
    BloodPressure,
}

/// Emergency verdict for one vitals snapshot
///
/// Invariant: `trigger == None` if and only if `is_critical == false`.
/// Only a detector false→true edge or an explicit reset may overwrite this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyStatus {
    pub is_critical: bool,
    pub status_message: String,
    pub trigger: CriticalTrigger,
}

impl EmergencyStatus {
    /// The non-critical baseline status
    pub fn clear() -> Self {
        Self {
            is_critical: false,
            status_message: String::new(),
            trigger: CriticalTrigger::None,
        }
    }
}

impl Default for EmergencyStatus {
    fn default() -> Self {
        Self::clear()
    }
}

/// Static patient reference record, read-only for the orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalHistory {
    pub name: String,
    pub age: u32,
    pub conditions: Vec<String>,
    pub allergies: Vec<String>,
    pub medications: Vec<String>,
}

/// Emergency contact record owned by the contact store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub relationship: String,
    pub phone: String,
}

impl EmergencyContact {
    /// Check the required fields before a save is accepted
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(GuardError::Validation("name is required".to_string()));
        }
        if self.relationship.trim().is_empty() {
            return Err(GuardError::Validation(
                "relationship is required".to_string(),
            ));
        }
        if self.phone.trim().is_empty() {
            return Err(GuardError::Validation("phone is required".to_string()));
        }
        Ok(())
    }

    /// One-line rendering for the handoff report
    pub fn summary(&self) -> String {
        if self.name.is_empty() {
            "None listed".to_string()
        } else {
            format!("{} ({}) - {}", self.name, self.relationship, self.phone)
        }
    }
}

/// Origin of a grounding citation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Web,
    Map,
}

/// Citation accompanying a search-augmented hospital result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub kind: SourceKind,
    pub label: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_vitals() {
        let v = VitalSigns::baseline();
        assert_eq!(v.heart_rate, 75);
        assert_eq!(v.systolic_bp, 120);
        assert_eq!(v.diastolic_bp, 80);
        assert!(v.is_responsive);
    }

    #[test]
    fn test_clear_status_invariant() {
        let status = EmergencyStatus::clear();
        assert!(!status.is_critical);
        assert_eq!(status.trigger, CriticalTrigger::None);
        assert!(status.status_message.is_empty());
    }

    #[test]
    fn test_coordinates_report_text() {
        let c = Coordinates {
            latitude: 51.5074,
            longitude: -0.1278,
        };
        assert_eq!(c.report_text(), "Lat: 51.5074, Lng: -0.1278");
    }

    #[test]
    fn test_contact_validation_rejects_empty_fields() {
        let contact = EmergencyContact {
            name: "Jane Doe".to_string(),
            relationship: String::new(),
            phone: "+1 555-0199".to_string(),
        };
        assert!(contact.validate().is_err());

        let contact = EmergencyContact {
            name: "Jane Doe".to_string(),
            relationship: "Spouse".to_string(),
            phone: "+1 555-0199".to_string(),
        };
        assert!(contact.validate().is_ok());
    }

    #[test]
    fn test_contact_summary() {
        let contact = EmergencyContact {
            name: "Jane Doe".to_string(),
            relationship: "Spouse".to_string(),
            phone: "+1 555-0199".to_string(),
        };
        assert_eq!(contact.summary(), "Jane Doe (Spouse) - +1 555-0199");
        assert_eq!(EmergencyContact::default().summary(), "None listed");
    }
}
