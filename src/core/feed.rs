use crate::domain::model::{EarthquakeFeature, FeedDocument, LatLng};
use crate::utils::error::{QuakeError, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

pub const FEATURE_COLLECTION: &str = "FeatureCollection";

#[derive(Debug, Deserialize)]
struct RawFeature {
    id: Option<serde_json::Value>,
    properties: Option<RawProperties>,
    geometry: Option<RawGeometry>,
}

#[derive(Debug, Deserialize)]
struct RawProperties {
    mag: Option<f64>,
    title: Option<String>,
    time: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(default)]
    coordinates: Vec<f64>,
}

/// Well-formed features in feed order, plus one error per feature that had
/// to be dropped.
#[derive(Debug, Default)]
pub struct ParsedFeed {
    pub features: Vec<EarthquakeFeature>,
    pub skipped: Vec<QuakeError>,
}

pub fn ensure_feature_collection(doc: &FeedDocument) -> Result<()> {
    if doc.kind != FEATURE_COLLECTION {
        return Err(QuakeError::FeedFormatError {
            message: format!("expected type '{}', got '{}'", FEATURE_COLLECTION, doc.kind),
        });
    }
    Ok(())
}

/// Converts one GeoJSON feature. `index` is its position in the feed and
/// only used for error reporting.
pub fn parse_feature(index: usize, value: &serde_json::Value) -> Result<EarthquakeFeature> {
    let malformed = |reason: String| QuakeError::MalformedFeatureError { index, reason };

    let raw: RawFeature = serde_json::from_value(value.clone())
        .map_err(|e| malformed(format!("unexpected shape: {}", e)))?;

    let properties = raw
        .properties
        .ok_or_else(|| malformed("missing properties".to_string()))?;
    let magnitude = properties
        .mag
        .ok_or_else(|| malformed("missing properties.mag".to_string()))?;
    let title = properties
        .title
        .ok_or_else(|| malformed("missing properties.title".to_string()))?;

    let geometry = raw
        .geometry
        .ok_or_else(|| malformed("missing geometry".to_string()))?;
    let [lng, lat, depth_km] = geometry.coordinates[..] else {
        return Err(malformed(format!(
            "geometry.coordinates has {} elements, expected 3",
            geometry.coordinates.len()
        )));
    };

    let id = raw.id.map(|id| match id {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    });

    Ok(EarthquakeFeature {
        id,
        title,
        magnitude,
        depth_km,
        position: LatLng::new(lat, lng),
        time: properties.time.and_then(DateTime::<Utc>::from_timestamp_millis),
    })
}

/// Parses every feature, isolating failures so that a single bad record
/// never aborts the render pass.
pub fn parse_features(doc: &FeedDocument) -> ParsedFeed {
    let mut parsed = ParsedFeed::default();

    for (index, value) in doc.features.iter().enumerate() {
        match parse_feature(index, value) {
            Ok(feature) => parsed.features.push(feature),
            Err(e) => {
                tracing::warn!("Skipping feature: {}", e);
                parsed.skipped.push(e);
            }
        }
    }

    parsed
}
