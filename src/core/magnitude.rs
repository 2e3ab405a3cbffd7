/// Marker radius in pixels per unit of magnitude.
pub const RADIUS_PER_MAGNITUDE: f64 = 5.0;

/// Marker radius for a given magnitude. Not clamped: a magnitude of zero or
/// below yields a zero or negative radius, which may render as a dot or not
/// at all.
pub fn scale_magnitude(magnitude: f64) -> f64 {
    magnitude * RADIUS_PER_MAGNITUDE
}
