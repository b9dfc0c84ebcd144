//! Wire types for the geocoding service's JSON response.

use jobmap_core::LatLng;
use serde::Deserialize;

/// Top-level response envelope.
///
/// `status` is `"OK"` or `"ZERO_RESULTS"` on success; anything else is an
/// API-level failure described by `error_message`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

fn default_status() -> String {
    "OK".to_string()
}

impl GeocodeResponse {
    /// Coordinates of the first result, if any.
    #[must_use]
    pub fn first_location(&self) -> Option<LatLng> {
        self.results.first().map(|r| r.geometry.location)
    }
}
