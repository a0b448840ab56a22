//! Simulated sensor input
//!
//! Scripted vitals scenarios standing in for a real wearable. Each scenario
//! ramps from baseline into one critical condition, with small random jitter
//! so consecutive runs differ. Slider ranges match the simulated device:
//! heart rate 0-220 bpm, systolic 50-250, diastolic 30-150 mmHg.

use crate::types::{MedicalHistory, VitalSigns};
use clap::ValueEnum;
use rand::Rng;
use std::fmt;

/// Selectable emergency scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Vitals stay in the normal range; no emergency triggers
    Stable,
    /// Heart rate climbs past 160 bpm
    Tachycardia,
    /// Heart rate drops below 40 bpm
    Bradycardia,
    /// Systolic pressure climbs past 180 mmHg
    HypertensiveCrisis,
    /// Patient stops responding
    Collapse,
}

impl Scenario {
    /// Produce the scripted frames for this scenario
    ///
    /// Frames are emitted in order; the last frame of every non-stable
    /// scenario crosses a critical threshold.
    pub fn frames<R: Rng>(&self, rng: &mut R) -> Vec<VitalSigns> {
        let base = VitalSigns::baseline();
        let jitter = |rng: &mut R, value: i32| value + rng.gen_range(-2..=2);

        match self {
            Scenario::Stable => (0..6)
                .map(|_| VitalSigns {
                    heart_rate: jitter(rng, base.heart_rate),
                    systolic_bp: jitter(rng, base.systolic_bp),
                    diastolic_bp: jitter(rng, base.diastolic_bp),
                    is_responsive: true,
                })
                .collect(),

            Scenario::Tachycardia => [90, 115, 140, 155, 175]
                .iter()
                .map(|hr| VitalSigns {
                    heart_rate: jitter(rng, *hr),
                    ..base
                })
                .collect(),

            Scenario::Bradycardia => [65, 55, 48, 35]
                .iter()
                .map(|hr| VitalSigns {
                    heart_rate: jitter(rng, *hr),
                    ..base
                })
                .collect(),

            Scenario::HypertensiveCrisis => [(135, 85), (155, 95), (170, 102), (192, 108)]
                .iter()
                .map(|(sys, dia)| VitalSigns {
                    systolic_bp: jitter(rng, *sys),
                    diastolic_bp: jitter(rng, *dia),
                    ..base
                })
                .collect(),

            Scenario::Collapse => vec![
                base,
                VitalSigns {
                    heart_rate: jitter(rng, 90),
                    ..base
                },
                VitalSigns {
                    heart_rate: jitter(rng, 110),
                    is_responsive: false,
                    ..base
                },
            ],
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scenario::Stable => "stable",
            Scenario::Tachycardia => "tachycardia",
            Scenario::Bradycardia => "bradycardia",
            Scenario::HypertensiveCrisis => "hypertensive-crisis",
            Scenario::Collapse => "collapse",
        };
        write!(f, "{}", name)
    }
}

/// Static demo patient record
pub fn demo_history() -> MedicalHistory {
    MedicalHistory {
        name: "John Doe".to_string(),
        age: 58,
        conditions: vec!["Hypertension".to_string(), "Type 2 Diabetes".to_string()],
        allergies: vec!["Penicillin".to_string(), "Latex".to_string()],
        medications: vec!["Metformin".to_string(), "Lisinopril".to_string()],
    }
}
