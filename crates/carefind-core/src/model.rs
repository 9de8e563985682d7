use serde::{Deserialize, Serialize};

/// A single doctor/clinic search submission.
///
/// Built fresh for each submit and never mutated afterwards. Use
/// [`crate::validate_search_request`] before handing it to a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub symptom_or_specialty: String,
    #[serde(default)]
    pub location_text: String,
    #[serde(default)]
    pub use_device_location: bool,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl SearchRequest {
    /// Request for a typed location, without device coordinates.
    #[must_use]
    pub fn new(symptom_or_specialty: impl Into<String>, location_text: impl Into<String>) -> Self {
        Self {
            symptom_or_specialty: symptom_or_specialty.into(),
            location_text: location_text.into(),
            use_device_location: false,
            latitude: None,
            longitude: None,
        }
    }

    /// Marks the request as "near me". Coordinates are optional because the
    /// device lookup may have been denied or may still be pending.
    #[must_use]
    pub fn near_me(mut self, coordinates: Option<(f64, f64)>) -> Self {
        self.use_device_location = true;
        if let Some((lat, lon)) = coordinates {
            self.latitude = Some(lat);
            self.longitude = Some(lon);
        }
        self
    }

    /// Device coordinates, only when device location was requested and both
    /// components resolved.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        if !self.use_device_location {
            return None;
        }
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// One place in a search result, independent of which backend produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub display_name: String,
    pub map_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_snippet: Option<String>,
}

/// Markdown narrative plus places in backend relevance order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub narrative_text: String,
    pub results: Vec<PlaceResult>,
}

impl SearchResponse {
    /// Successful search that found nothing.
    #[must_use]
    pub fn no_results(query: &str) -> Self {
        Self {
            narrative_text: format!(
                "No providers matched **{query}**. Try broader search terms, \
                 a nearby city, or a general specialty such as \"clinic\" or \"hospital\"."
            ),
            results: Vec::new(),
        }
    }

    /// Graceful-degradation response used when the backend could not be
    /// reached. Never carries results.
    #[must_use]
    pub fn connectivity_problem() -> Self {
        Self {
            narrative_text: "We could not reach the search service because of a connectivity \
                             problem. Please check your connection and try again."
                .to_string(),
            results: Vec::new(),
        }
    }
}

/// Uploaded prescription photo. Held in memory for one analysis call only.
#[derive(Clone, PartialEq, Eq)]
pub struct PrescriptionImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl PrescriptionImage {
    #[must_use]
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }
}

impl std::fmt::Debug for PrescriptionImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrescriptionImage")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineEntry {
    pub name: String,
    pub purpose: String,
    pub active_ingredients: String,
    /// `None` means the prescription did not state it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage_instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<String>,
}

/// Structured medication report for one prescription image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Order of appearance on the source document.
    pub medicines: Vec<MedicineEntry>,
    pub clinical_summary: String,
}
