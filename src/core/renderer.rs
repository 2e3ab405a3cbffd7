use crate::core::legend::build_legend;
use crate::core::style::build_style;
use crate::domain::model::{ControlPosition, EarthquakeFeature, LegendEntry};
use crate::domain::ports::MapWidget;

pub const LEGEND_POSITION: ControlPosition = ControlPosition::BottomRight;
pub const LEGEND_HEADING: &str = "Depth Legend";

/// Escapes text for interpolation into HTML element content or a quoted
/// attribute value.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn popup_html(feature: &EarthquakeFeature) -> String {
    format!(
        "<b>{}</b><br>Magnitude: {}<br>Depth: {} km",
        escape_html(&feature.title),
        feature.magnitude,
        feature.depth_km
    )
}

/// Inner HTML of the legend control.
pub fn legend_html(entries: &[LegendEntry]) -> String {
    let mut html = format!("<b>{}</b><br>", LEGEND_HEADING);
    let rows: Vec<String> = entries
        .iter()
        .map(|entry| {
            format!(
                "<i style=\"background:{}\"></i> {}",
                entry.color,
                escape_html(&entry.label)
            )
        })
        .collect();
    html.push_str(&rows.join("<br>"));
    html
}

/// Draws earthquakes and the depth legend onto a [`MapWidget`].
pub struct FeatureRenderer;

impl FeatureRenderer {
    /// Adds one styled circle marker with a popup per feature and returns how
    /// many markers were added.
    pub fn render<M: MapWidget>(map: &mut M, features: &[EarthquakeFeature]) -> usize {
        for feature in features {
            let style = build_style(feature);
            if style.radius <= 0.0 {
                tracing::debug!(
                    "Feature '{}' has magnitude {}: zero or negative radius, may render as a dot or not at all",
                    feature.title,
                    feature.magnitude
                );
            }
            let marker = map.add_marker(feature.position, style);
            map.bind_popup(marker, &popup_html(feature));
        }

        tracing::debug!("Rendered {} markers", features.len());
        features.len()
    }

    pub fn add_legend<M: MapWidget>(map: &mut M) {
        let entries = build_legend();
        map.add_legend_control(LEGEND_POSITION, &|| legend_html(&entries));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{LatLng, MarkerHandle, MarkerStyle};

    #[derive(Default)]
    struct RecordingMap {
        markers: Vec<(LatLng, MarkerStyle)>,
        popups: Vec<(MarkerHandle, String)>,
        legends: Vec<(ControlPosition, String)>,
    }

    impl MapWidget for RecordingMap {
        fn create_map(_center: LatLng, _zoom: u8) -> Self {
            Self::default()
        }

        fn add_tile_layer(&mut self, _url_template: &str, _attribution: &str) {}

        fn add_marker(&mut self, position: LatLng, style: MarkerStyle) -> MarkerHandle {
            self.markers.push((position, style));
            MarkerHandle(self.markers.len() - 1)
        }

        fn bind_popup(&mut self, marker: MarkerHandle, html: &str) {
            self.popups.push((marker, html.to_string()));
        }

        fn add_legend_control(&mut self, position: ControlPosition, render: &dyn Fn() -> String) {
            self.legends.push((position, render()));
        }
    }

    fn feature(title: &str, magnitude: f64, depth_km: f64) -> EarthquakeFeature {
        EarthquakeFeature {
            id: None,
            title: title.to_string(),
            magnitude,
            depth_km,
            position: LatLng::new(35.0, 139.0),
            time: None,
        }
    }

    #[test]
    fn test_render_adds_marker_and_popup_per_feature() {
        let mut map = RecordingMap::create_map(LatLng::new(0.0, 0.0), 2);
        let features = vec![feature("M 4 - Tokyo", 4.0, 20.0), feature("M 6 - Deep", 6.0, 300.0)];

        let count = FeatureRenderer::render(&mut map, &features);

        assert_eq!(count, 2);
        assert_eq!(map.markers.len(), 2);
        assert_eq!(map.markers[0].1.radius, 20.0);
        assert_eq!(map.markers[0].1.fill_color, "#80ff00");
        assert_eq!(map.markers[1].1.fill_color, "#ff0000");
        assert_eq!(map.popups[1].0, MarkerHandle(1));
        assert_eq!(
            map.popups[0].1,
            "<b>M 4 - Tokyo</b><br>Magnitude: 4<br>Depth: 20 km"
        );
    }

    #[test]
    fn test_render_keeps_non_positive_radius() {
        let mut map = RecordingMap::default();
        let rendered = FeatureRenderer::render(
            &mut map,
            &[feature("M -0.5", -0.5, 1.0), feature("M 0.0", 0.0, 1.0)],
        );
        assert_eq!(rendered, 2);
        assert_eq!(map.markers[0].1.radius, -2.5);
        assert_eq!(map.markers[1].1.radius, 0.0);
        assert_eq!(map.popups.len(), 2);
    }

    #[test]
    fn test_popup_escapes_title() {
        let html = popup_html(&feature("<script>alert('x')</script> & co", 2.5, 7.25));
        assert_eq!(
            html,
            "<b>&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co</b><br>Magnitude: 2.5<br>Depth: 7.25 km"
        );
    }

    #[test]
    fn test_add_legend() {
        let mut map = RecordingMap::default();
        FeatureRenderer::add_legend(&mut map);

        assert_eq!(map.legends.len(), 1);
        let (position, html) = &map.legends[0];
        assert_eq!(*position, ControlPosition::BottomRight);
        assert!(html.starts_with("<b>Depth Legend</b><br>"));
        assert!(html.contains("<i style=\"background:#00ff00\"></i> -10–9 km<br>"));
        assert!(html.ends_with("<i style=\"background:#ff0000\"></i> 90+ km"));
    }
}
