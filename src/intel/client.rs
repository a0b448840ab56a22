//! Gemini-backed medical-intelligence client
//!
//! HTTP client for a generateContent-style API. Coordinate queries attach a
//! lat/lng retrieval config so the maps tool biases the search
//! geographically; free-text queries rely on semantic search instead.

use crate::errors::{GuardError, Result};
use crate::intel::types::{
    GenerateContentRequest, GenerateContentResponse, HospitalLookup, HospitalQuery, LatLng,
    ReportRequest, RetrievalConfig, ToolConfig, ToolSpec,
};
use crate::intel::MedicalIntelligence;
use crate::types::{GroundingSource, SourceKind};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the medical-intelligence service
#[derive(Debug, Clone)]
pub struct GeminiIntelClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiIntelClient {
    /// Create a client with default endpoint and model
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_config(DEFAULT_BASE_URL, api_key, DEFAULT_MODEL, REQUEST_TIMEOUT)
    }

    /// Create a client with custom configuration
    pub fn with_config(
        base_url: &str,
        api_key: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GuardError::HttpError)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    /// Build the hospital-search prompt and the optional retrieval bias
    fn hospital_request(query: &HospitalQuery) -> GenerateContentRequest {
        let (location_part, tool_config) = match query {
            HospitalQuery::Text(text) => (
                format!("I am currently located at or near: \"{}\".", text),
                None,
            ),
            HospitalQuery::Near(coords) => (
                format!(
                    "I am currently at latitude {}, longitude {}.",
                    coords.latitude, coords.longitude
                ),
                Some(ToolConfig {
                    retrieval_config: RetrievalConfig {
                        lat_lng: LatLng {
                            latitude: coords.latitude,
                            longitude: coords.longitude,
                        },
                    },
                }),
            ),
        };

        let contents = format!(
            "{}\nThis is a MEDICAL EMERGENCY simulation.\n\
             Find the nearest Hospital that specifically has an Accident & Emergency (A&E) department.\n\
             Provide its name, address, and very brief immediate directions from my location.\n\
             Do not provide general advice, just the location data.",
            location_part
        );

        GenerateContentRequest {
            contents,
            tools: vec![ToolSpec {
                google_maps: serde_json::json!({}),
            }],
            tool_config,
        }
    }

    /// Build the handoff-report prompt from the trigger-time inputs
    fn report_prompt(request: &ReportRequest) -> String {
        let responsiveness = if request.vitals.is_responsive {
            "Responsive"
        } else {
            "UNRESPONSIVE"
        };

        format!(
            "Generate a concise EMS Handoff Report for a patient found at/near: {}.\n\n\
             Patient Status:\n\
             - Responsiveness: {}\n\
             - Heart Rate: {} bpm\n\
             - Blood Pressure: {}/{} mmHg\n\n\
             Medical History:\n\
             - Name: {} (Age: {})\n\
             - Conditions: {}\n\
             - Medications: {}\n\
             - Allergies: {}\n\n\
             Emergency Contact:\n\
             - {}\n\n\
             Format as a structured text block suitable for paramedics.",
            request.location_text,
            responsiveness,
            request.vitals.heart_rate,
            request.vitals.systolic_bp,
            request.vitals.diastolic_bp,
            request.history.name,
            request.history.age,
            request.history.conditions.join(", "),
            request.history.medications.join(", "),
            request.history.allergies.join(", "),
            request.contact.summary(),
        )
    }

    async fn generate(&self, request: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        let response = self
            .client
            .post(self.endpoint())
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GuardError::IntelServiceError(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        Ok(parsed)
    }
}

#[async_trait]
impl MedicalIntelligence for GeminiIntelClient {
    async fn find_nearest_hospital(&self, query: &HospitalQuery) -> Result<HospitalLookup> {
        let request = Self::hospital_request(query);
        let response = self.generate(&request).await?;

        let sources = response
            .candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|m| {
                m.grounding_chunks
                    .iter()
                    .filter_map(|chunk| {
                        let (kind, reference) = if let Some(web) = &chunk.web {
                            (SourceKind::Web, web)
                        } else if let Some(maps) = &chunk.maps {
                            (SourceKind::Map, maps)
                        } else {
                            return None;
                        };
                        let url = reference.uri.clone()?;
                        Some(GroundingSource {
                            kind,
                            label: reference
                                .title
                                .clone()
                                .unwrap_or_else(|| "Map Link".to_string()),
                            url,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(HospitalLookup {
            text: response
                .text()
                .unwrap_or_else(|| "Could not locate hospital data.".to_string()),
            sources,
        })
    }

    async fn generate_handover_report(&self, request: &ReportRequest) -> Result<String> {
        let wire_request = GenerateContentRequest {
            contents: Self::report_prompt(request),
            tools: Vec::new(),
            tool_config: None,
        };

        let response = self.generate(&wire_request).await?;
        Ok(response
            .text()
            .unwrap_or_else(|| "Report generation failed.".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coordinates, EmergencyContact, MedicalHistory, VitalSigns};

    fn sample_history() -> MedicalHistory {
        MedicalHistory {
            name: "John Doe".to_string(),
            age: 58,
            conditions: vec!["Hypertension".to_string(), "Type 2 Diabetes".to_string()],
            allergies: vec!["Penicillin".to_string()],
            medications: vec!["Metformin".to_string()],
        }
    }

    #[test]
    fn test_client_creation() {
        let client = GeminiIntelClient::new("test-key").unwrap();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert_eq!(client.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_coordinate_query_attaches_retrieval_bias() {
        let query = HospitalQuery::Near(Coordinates {
            latitude: 51.5074,
            longitude: -0.1278,
        });
        let request = GeminiIntelClient::hospital_request(&query);

        assert!(request.contents.contains("latitude 51.5074"));
        let config = request.tool_config.expect("coordinate query must bias the search");
        assert_eq!(config.retrieval_config.lat_lng.latitude, 51.5074);
    }

    #[test]
    fn test_text_query_has_no_retrieval_bias() {
        let query = HospitalQuery::Text("Central Park, NY".to_string());
        let request = GeminiIntelClient::hospital_request(&query);

        assert!(request.contents.contains("Central Park, NY"));
        assert!(request.tool_config.is_none());
        assert_eq!(request.tools.len(), 1);
    }

    #[test]
    fn test_hospital_prompt_asks_for_a_and_e() {
        let request =
            GeminiIntelClient::hospital_request(&HospitalQuery::Text("Springfield".to_string()));
        assert!(request.contents.contains("Accident & Emergency"));
    }

    #[test]
    fn test_report_prompt_carries_trigger_snapshot() {
        let request = ReportRequest {
            vitals: VitalSigns {
                heart_rate: 30,
                systolic_bp: 120,
                diastolic_bp: 80,
                is_responsive: false,
            },
            history: sample_history(),
            location_text: "Lat: 51.5, Lng: -0.12".to_string(),
            contact: EmergencyContact {
                name: "Jane Doe".to_string(),
                relationship: "Spouse".to_string(),
                phone: "+1 555-0199".to_string(),
            },
        };

        let prompt = GeminiIntelClient::report_prompt(&request);
        assert!(prompt.contains("UNRESPONSIVE"));
        assert!(prompt.contains("30 bpm"));
        assert!(prompt.contains("120/80 mmHg"));
        assert!(prompt.contains("John Doe (Age: 58)"));
        assert!(prompt.contains("Jane Doe (Spouse) - +1 555-0199"));
        assert!(prompt.contains("Lat: 51.5, Lng: -0.12"));
    }

    #[test]
    fn test_report_prompt_without_contact() {
        let request = ReportRequest {
            vitals: VitalSigns::baseline(),
            history: sample_history(),
            location_text: "Main St".to_string(),
            contact: EmergencyContact::default(),
        };
        assert!(GeminiIntelClient::report_prompt(&request).contains("None listed"));
    }

    #[test]
    fn test_response_text_extraction() {
        let raw = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "City General " }, { "text": "Hospital" }] },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "maps": { "uri": "https://maps.example/1" } },
                        { "web": { "uri": "https://example.org", "title": "City General" } },
                        { "web": {} }
                    ]
                }
            }]
        });
        let response: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.text(), Some("City General Hospital".to_string()));

        let metadata = response.candidates[0].grounding_metadata.as_ref().unwrap();
        assert_eq!(metadata.grounding_chunks.len(), 3);
        // Chunk without a uri is dropped; missing title falls back to "Map Link"
        assert!(metadata.grounding_chunks[0].maps.as_ref().unwrap().title.is_none());
    }
}
