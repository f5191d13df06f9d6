use rooftop_shared::GeoPoint;

use crate::readiness::RetryPolicy;

pub const LEUVEN_CENTER: GeoPoint = GeoPoint::new(50.8792, 4.7001);
pub const INITIAL_ZOOM: f64 = 12.0;
pub const SELECTED_ZOOM: f64 = 16.0;

pub const TILE_URL: &str =
    "https://{s}.basemaps.cartocdn.com/rastertiles/voyager/{z}/{x}/{y}{r}.png";
pub const TILE_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>";
pub const TILE_SUBDOMAINS: &str = "abcd";
pub const TILE_MAX_ZOOM: u32 = 20;

/// Leaflet is loaded from a CDN script tag and may land after the wasm module.
pub const LEAFLET_WAIT: RetryPolicy = RetryPolicy {
    attempts: 50,
    interval_ms: 100,
};

pub const AREA_STEP: f64 = 100.0;

/// Upper end of the area slider: the largest site, rounded up to a whole step.
pub fn slider_max(max_area: f64) -> f64 {
    let steps = (max_area / AREA_STEP).ceil().max(1.0);
    steps * AREA_STEP
}
