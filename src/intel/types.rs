//! Request and response types for the medical-intelligence boundary

use crate::types::{Coordinates, EmergencyContact, GroundingSource, MedicalHistory, VitalSigns};
use serde::{Deserialize, Serialize};

/// Location form for a hospital search
///
/// Exactly one request shape is chosen per run: coordinates drive a
/// geographically biased search, free text a semantic one.
#[derive(Debug, Clone, PartialEq)]
pub enum HospitalQuery {
    Near(Coordinates),
    Text(String),
}

/// Result of a hospital search
#[derive(Debug, Clone, PartialEq)]
pub struct HospitalLookup {
    /// Free-form hospital description (name, address, directions)
    pub text: String,
    /// Supporting citations from the search-augmented response
    pub sources: Vec<GroundingSource>,
}

/// Inputs for handoff-report generation
#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// Vitals snapshot captured at trigger time
    pub vitals: VitalSigns,
    pub history: MedicalHistory,
    /// Resolved-location string, coordinates already rendered
    pub location_text: String,
    pub contact: EmergencyContact,
}

// Wire format for the generateContent-style API below.

#[derive(Debug, Serialize)]
pub(crate) struct GenerateContentRequest {
    pub contents: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolSpec>,
    #[serde(rename = "toolConfig", skip_serializing_if = "Option::is_none")]
    pub tool_config: Option<ToolConfig>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ToolSpec {
    #[serde(rename = "googleMaps")]
    pub google_maps: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub(crate) struct ToolConfig {
    #[serde(rename = "retrievalConfig")]
    pub retrieval_config: RetrievalConfig,
}

#[derive(Debug, Serialize)]
pub(crate) struct RetrievalConfig {
    #[serde(rename = "latLng")]
    pub lat_lng: LatLng,
}

#[derive(Debug, Serialize)]
pub(crate) struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(rename = "groundingMetadata", default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContentPart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// Loosely-typed citation record from the wire; at most one of `web`/`maps`
/// is populated per chunk
#[derive(Debug, Deserialize)]
pub(crate) struct GroundingChunk {
    #[serde(default)]
    pub web: Option<ChunkRef>,
    #[serde(default)]
    pub maps: Option<ChunkRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChunkRef {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let parts = &candidate.content.as_ref()?.parts;
        let text: String = parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("");
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
