use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hex colour string as Leaflet expects it, e.g. `#ff8000`.
pub type ColorCode = &'static str;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// One earthquake, as read from a single feed feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarthquakeFeature {
    pub id: Option<String>,
    pub title: String,
    pub magnitude: f64,
    /// Kilometres below sea level; negative for events above it.
    pub depth_km: f64,
    pub position: LatLng,
    pub time: Option<DateTime<Utc>>,
}

/// Lower edge of a half-open depth interval and the colour drawn for it.
/// The interval ends where the next bucket in the table begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthBucket {
    pub lower_bound_km: f64,
    pub color: ColorCode,
}

/// Circle marker options, serialized with Leaflet's path option names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    pub radius: f64,
    pub fill_color: ColorCode,
    /// Stroke colour.
    pub color: ColorCode,
    /// Stroke weight in pixels.
    pub weight: u32,
    pub opacity: f64,
    pub fill_opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: ColorCode,
}

/// Where a control is docked on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ControlPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlPosition::TopLeft => "topleft",
            ControlPosition::TopRight => "topright",
            ControlPosition::BottomLeft => "bottomleft",
            ControlPosition::BottomRight => "bottomright",
        }
    }
}

/// Opaque reference to a marker previously added to a map widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub usize);

/// Initial view and base layer of the rendered map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    /// Page heading; when unset the feed's own title is used.
    pub title: Option<String>,
    pub center: LatLng,
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
}

pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

impl Default for MapView {
    fn default() -> Self {
        Self {
            title: None,
            center: LatLng::new(0.0, 0.0),
            zoom: 2,
            tile_url: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
        }
    }
}

/// A GeoJSON `FeatureCollection` as served by the feed. Features stay as raw
/// JSON so that one bad feature does not reject the whole document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedDocument {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub metadata: Option<FeedMetadata>,
    #[serde(default)]
    pub features: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedMetadata {
    /// Milliseconds since the Unix epoch.
    pub generated: Option<i64>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub count: Option<usize>,
}

impl FeedMetadata {
    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        self.generated.and_then(DateTime::<Utc>::from_timestamp_millis)
    }
}

/// Output of the transform stage.
#[derive(Debug)]
pub struct TransformResult {
    pub features: Vec<EarthquakeFeature>,
    pub skipped: Vec<crate::utils::error::QuakeError>,
    /// Well-formed features dropped by the minimum magnitude filter.
    pub filtered: usize,
    pub metadata: Option<FeedMetadata>,
}

/// What a run produced, reported back to the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub output_path: String,
    pub geojson_path: Option<String>,
    pub rendered: usize,
    pub skipped: usize,
    pub filtered: usize,
    /// Set when the feed could not be fetched and a fallback page was written.
    pub fetch_error: Option<String>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.fetch_error.is_none()
    }
}
