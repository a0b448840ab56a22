//! VitalGuard - simulated wearable vital-sign monitor
//!
//! Detects a medical emergency from a vitals stream and orchestrates the
//! response: resolve the best available location, find the nearest A&E
//! hospital through an external medical-intelligence service, and generate
//! a paramedic handoff report.
//!
//! # Architecture
//!
//! - `detector`: pure critical-state evaluator
//! - `location`: GPS-vs-manual location resolution
//! - `orchestrator`: episode state machine and failure policy
//! - `intel`: external medical-intelligence boundary

pub mod errors;
pub mod types;
pub mod detector;
pub mod location;
pub mod intel;
pub mod contacts;
pub mod orchestrator;
pub mod telemetry;
pub mod simulator;
pub mod config;
pub mod cli;

// Re-export commonly used types
pub use errors::{GuardError, Result};
pub use orchestrator::{EmergencyOrchestrator, OrchestratorConfig};
pub use types::{Coordinates, CriticalTrigger, EmergencyStatus, VitalSigns};
