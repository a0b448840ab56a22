//! External medical-intelligence boundary
//!
//! Two operations back the emergency response: hospital search and handoff
//! report generation. The trait is the seam the orchestrator depends on;
//! `GeminiIntelClient` is the production implementation.

pub mod client;
pub mod types;

pub use client::GeminiIntelClient;
pub use types::{HospitalLookup, HospitalQuery, ReportRequest};

use crate::errors::Result;
use async_trait::async_trait;

/// Network boundary providing hospital search and report generation
///
/// Both operations are independent of each other and may run concurrently;
/// failures surface as `GuardError::IntelServiceError` or transport errors,
/// never as a panic.
#[async_trait]
pub trait MedicalIntelligence: Send + Sync {
    /// Locate the nearest hospital with an A&E department
    async fn find_nearest_hospital(&self, query: &HospitalQuery) -> Result<HospitalLookup>;

    /// Generate the free-text EMS handoff report
    async fn generate_handover_report(&self, request: &ReportRequest) -> Result<String>;
}
