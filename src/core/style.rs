use crate::core::depth::classify_depth;
use crate::core::magnitude::scale_magnitude;
use crate::domain::model::{ColorCode, EarthquakeFeature, MarkerStyle};

pub const STROKE_COLOR: ColorCode = "#000";
pub const STROKE_WEIGHT: u32 = 1;
pub const STROKE_OPACITY: f64 = 1.0;
pub const FILL_OPACITY: f64 = 0.8;

pub fn build_style(feature: &EarthquakeFeature) -> MarkerStyle {
    MarkerStyle {
        radius: scale_magnitude(feature.magnitude),
        fill_color: classify_depth(feature.depth_km),
        color: STROKE_COLOR,
        weight: STROKE_WEIGHT,
        opacity: STROKE_OPACITY,
        fill_opacity: FILL_OPACITY,
    }
}
