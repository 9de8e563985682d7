//! Doctor/clinic search behind a swappable backend.
//!
//! [`LocationQueryService`] validates the request, shapes it into a single
//! free-text query, hands it to whichever [`PlaceSearchBackend`] the
//! configuration selected, and never lets a backend failure escape: transport
//! problems come back as an empty [`SearchResponse`] with an explanatory
//! narrative.
//!
//! [`SearchResponse`]: carefind_core::SearchResponse

pub mod backend;
pub mod error;
pub mod gemini;
pub mod mock;
pub mod nominatim;
pub mod query;
pub mod service;

pub use backend::{PlaceSearchBackend, SearchBackend};
pub use error::LocatorError;
pub use gemini::GeminiPlaceSearch;
pub use mock::MockPlaceSearch;
pub use nominatim::NominatimClient;
pub use query::{map_uri_for_coordinates, map_uri_for_name, ShapedQuery, DEVICE_LOCATION_LABEL};
pub use service::LocationQueryService;
