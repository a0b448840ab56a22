//! Critical-state detection engine
//!
//! Pure evaluator mapping a vitals snapshot to an emergency verdict.
//! Priority order, first match wins:
//! 1. Unresponsive patient
//! 2. Heart rate outside [40, 160] bpm
//! 3. Systolic pressure outside [90, 180] mmHg
//! 4. Diastolic pressure outside [60, 110] mmHg
//!
//! The verdict is only applied to episode state on a false→true edge; the
//! orchestrator owns that policy, this module stays side-effect free.

use crate::types::{CriticalTrigger, EmergencyStatus, VitalSigns};

/// Heart rate thresholds (bpm)
pub const CRITICAL_HR_LOW: i32 = 40;
pub const CRITICAL_HR_HIGH: i32 = 160;

/// Systolic blood pressure thresholds (mmHg)
pub const CRITICAL_SYS_HIGH: i32 = 180;
pub const CRITICAL_SYS_LOW: i32 = 90;

/// Diastolic blood pressure thresholds (mmHg)
pub const CRITICAL_DIA_HIGH: i32 = 110;
pub const CRITICAL_DIA_LOW: i32 = 60;

/// Evaluate one vitals snapshot
///
/// Returns a critical verdict with the matching trigger and message, or the
/// clear status when no threshold is crossed. No hysteresis and no debounce:
/// two calls with the same snapshot produce the same verdict.
pub fn evaluate(vitals: &VitalSigns) -> EmergencyStatus {
    if !vitals.is_responsive {
        return EmergencyStatus {
            is_critical: true,
            status_message: "PATIENT UNRESPONSIVE".to_string(),
            trigger: CriticalTrigger::Unresponsive,
        };
    }

    if vitals.heart_rate < CRITICAL_HR_LOW || vitals.heart_rate > CRITICAL_HR_HIGH {
        return EmergencyStatus {
            is_critical: true,
            status_message: format!("CRITICAL HEART RATE: {} BPM", vitals.heart_rate),
            trigger: CriticalTrigger::HeartRate,
        };
    }

    if vitals.systolic_bp > CRITICAL_SYS_HIGH
        || vitals.systolic_bp < CRITICAL_SYS_LOW
        || vitals.diastolic_bp > CRITICAL_DIA_HIGH
        || vitals.diastolic_bp < CRITICAL_DIA_LOW
    {
        return EmergencyStatus {
            is_critical: true,
            status_message: format!(
                "CRITICAL BLOOD PRESSURE: {}/{}",
                vitals.systolic_bp, vitals.diastolic_bp
            ),
            trigger: CriticalTrigger::BloodPressure,
        };
    }

    EmergencyStatus::clear()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn vitals(hr: i32, sys: i32, dia: i32, responsive: bool) -> VitalSigns {
        VitalSigns {
            heart_rate: hr,
            systolic_bp: sys,
            diastolic_bp: dia,
            is_responsive: responsive,
        }
    }

    #[test]
    fn test_normal_vitals_not_critical() {
        let verdict = evaluate(&VitalSigns::baseline());
        assert!(!verdict.is_critical);
        assert_eq!(verdict.trigger, CriticalTrigger::None);
        assert!(verdict.status_message.is_empty());
    }

    #[test]
    fn test_low_heart_rate_includes_value() {
        let verdict = evaluate(&vitals(30, 120, 80, true));
        assert!(verdict.is_critical);
        assert_eq!(verdict.trigger, CriticalTrigger::HeartRate);
        assert!(verdict.status_message.contains("30"));
    }

    #[test]
    fn test_high_heart_rate() {
        let verdict = evaluate(&vitals(161, 120, 80, true));
        assert_eq!(verdict.trigger, CriticalTrigger::HeartRate);
    }

    #[test]
    fn test_heart_rate_boundaries_are_normal() {
        assert!(!evaluate(&vitals(40, 120, 80, true)).is_critical);
        assert!(!evaluate(&vitals(160, 120, 80, true)).is_critical);
    }

    #[test]
    fn test_high_systolic_pressure() {
        let verdict = evaluate(&vitals(75, 185, 80, true));
        assert_eq!(verdict.trigger, CriticalTrigger::BloodPressure);
        assert!(verdict.status_message.contains("185/80"));
    }

    #[test]
    fn test_low_diastolic_pressure() {
        let verdict = evaluate(&vitals(75, 120, 55, true));
        assert_eq!(verdict.trigger, CriticalTrigger::BloodPressure);
        assert!(verdict.status_message.contains("120/55"));
    }

    #[test]
    fn test_unresponsive_outranks_heart_rate() {
        let verdict = evaluate(&vitals(200, 200, 130, false));
        assert_eq!(verdict.trigger, CriticalTrigger::Unresponsive);
        assert_eq!(verdict.status_message, "PATIENT UNRESPONSIVE");
    }

    #[test]
    fn test_heart_rate_outranks_blood_pressure() {
        let verdict = evaluate(&vitals(30, 200, 80, true));
        assert_eq!(verdict.trigger, CriticalTrigger::HeartRate);
    }

    #[quickcheck]
    fn prop_unresponsive_always_wins(hr: i32, sys: i32, dia: i32) -> bool {
        let verdict = evaluate(&vitals(hr, sys, dia, false));
        verdict.is_critical && verdict.trigger == CriticalTrigger::Unresponsive
    }

    #[quickcheck]
    fn prop_evaluate_is_deterministic(hr: i16, sys: i16, dia: i16, responsive: bool) -> bool {
        let v = vitals(hr as i32, sys as i32, dia as i32, responsive);
        evaluate(&v) == evaluate(&v)
    }

    #[quickcheck]
    fn prop_trigger_matches_criticality(hr: i16, sys: i16, dia: i16, responsive: bool) -> bool {
        let verdict = evaluate(&vitals(hr as i32, sys as i32, dia as i32, responsive));
        verdict.is_critical == (verdict.trigger != CriticalTrigger::None)
    }
}
