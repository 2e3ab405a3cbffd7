use crate::core::style::build_style;
use crate::domain::model::EarthquakeFeature;
use serde_json::{json, Value};

/// Rebuilds a GeoJSON `FeatureCollection` from parsed features, with the
/// marker style each one is drawn with under `properties.style`.
pub fn styled_feature_collection(features: &[EarthquakeFeature]) -> Value {
    let features: Vec<Value> = features
        .iter()
        .map(|feature| {
            json!({
                "type": "Feature",
                "id": feature.id,
                "properties": {
                    "title": feature.title,
                    "mag": feature.magnitude,
                    "time": feature.time.map(|t| t.timestamp_millis()),
                    "style": build_style(feature),
                },
                "geometry": {
                    "type": "Point",
                    "coordinates": [feature.position.lng, feature.position.lat, feature.depth_km],
                },
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}
