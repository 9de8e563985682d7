//! Turning a [`SearchRequest`] into what backends consume.

use carefind_core::SearchRequest;
use reqwest::Url;

const MAPS_SEARCH_BASE: &str = "https://www.google.com/maps/search/";

/// Place phrase used when the device position stands in for a typed location.
pub const DEVICE_LOCATION_LABEL: &str = "your current location";

/// Backend-facing form of a validated search.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedQuery {
    /// Trimmed symptom or specialty, e.g. `"skin clinic"`.
    pub problem: String,
    /// Typed location, [`DEVICE_LOCATION_LABEL`] for a resolved "near me", or
    /// the fallback place name for an unresolved one.
    pub location: String,
    /// `"<problem> in <location>"`, or `"<problem> near your current location"`.
    pub text: String,
    /// Device position the search should be centred on. Only set when no
    /// location was typed.
    pub coordinates: Option<(f64, f64)>,
}

impl ShapedQuery {
    /// Shape a request that has already passed validation.
    ///
    /// A typed location always wins and drops any device position. "Near me"
    /// with resolved coordinates searches around them; without coordinates it
    /// falls back to `fallback_location`.
    #[must_use]
    pub fn from_request(request: &SearchRequest, fallback_location: &str) -> Self {
        let problem = request.symptom_or_specialty.trim().to_string();
        let typed = request.location_text.trim();

        if !typed.is_empty() {
            return Self {
                text: format!("{problem} in {typed}"),
                location: typed.to_string(),
                problem,
                coordinates: None,
            };
        }

        match request.coordinates() {
            Some(coordinates) => Self {
                text: format!("{problem} near {DEVICE_LOCATION_LABEL}"),
                location: DEVICE_LOCATION_LABEL.to_string(),
                problem,
                coordinates: Some(coordinates),
            },
            None => {
                let location = fallback_location.trim().to_string();
                Self {
                    text: format!("{problem} in {location}"),
                    location,
                    problem,
                    coordinates: None,
                }
            }
        }
    }
}

/// Map link for a coordinate pair.
#[must_use]
pub fn map_uri_for_coordinates(latitude: f64, longitude: f64) -> String {
    format!("{MAPS_SEARCH_BASE}?api=1&query={latitude},{longitude}")
}

/// Map link that searches for a place by name; used when a backend returns
/// no usable coordinates.
#[must_use]
pub fn map_uri_for_name(name: &str) -> String {
    match Url::parse_with_params(MAPS_SEARCH_BASE, &[("api", "1"), ("query", name)]) {
        Ok(url) => url.to_string(),
        Err(_) => MAPS_SEARCH_BASE.to_string(),
    }
}
