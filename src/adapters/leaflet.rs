use crate::core::renderer::escape_html;
use crate::domain::model::{ControlPosition, LatLng, MarkerHandle, MarkerStyle};
use crate::domain::ports::MapWidget;
use crate::utils::error::{QuakeError, Result};
use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
struct TileLayer {
    url: String,
    attribution: String,
}

#[derive(Debug, Clone, Serialize)]
struct CircleMarker {
    lat: f64,
    lng: f64,
    style: MarkerStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    popup: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct LegendControl {
    position: &'static str,
    html: String,
}

/// [`MapWidget`] that accumulates layers and renders them as a standalone
/// Leaflet page.
#[derive(Debug, Clone)]
pub struct LeafletMap {
    center: LatLng,
    zoom: u8,
    title: String,
    subtitle: Option<String>,
    notice: Option<String>,
    tile_layers: Vec<TileLayer>,
    markers: Vec<CircleMarker>,
    legends: Vec<LegendControl>,
}

impl LeafletMap {
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) {
        self.subtitle = Some(subtitle.into());
    }

    /// Banner shown above the map, used when the feed could not be loaded.
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn to_html(&self) -> Result<String> {
        let header = match &self.subtitle {
            Some(subtitle) => format!(
                "<h1>{}</h1><p>{}</p>",
                escape_html(&self.title),
                escape_html(subtitle)
            ),
            None => format!("<h1>{}</h1>", escape_html(&self.title)),
        };
        let notice = self
            .notice
            .as_ref()
            .map(|text| format!("<div id=\"notice\" role=\"alert\">{}</div>", escape_html(text)))
            .unwrap_or_default();

        let view = format!("[{}, {}], {}", self.center.lat, self.center.lng, self.zoom);
        let tile_layers = script_json(&self.tile_layers)?;
        let markers = script_json(&self.markers)?;
        let legends = script_json(&self.legends)?;

        // One pass: text substituted for one placeholder is never scanned for another.
        let re = Regex::new(r"<!-- (\w+)_PLACEHOLDER -->|/\* (\w+)_PLACEHOLDER \*/").map_err(
            |e| QuakeError::ConfigError {
                message: format!("Invalid template pattern: {}", e),
            },
        )?;
        let html = re
            .replace_all(MAP_HTML, |caps: &regex::Captures| {
                let name = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
                match name {
                    "TITLE" => escape_html(&self.title),
                    "HEADER" => header.clone(),
                    "NOTICE" => notice.clone(),
                    "VIEW" => view.clone(),
                    "TILE_LAYERS" => tile_layers.clone(),
                    "MARKERS" => markers.clone(),
                    "LEGENDS" => legends.clone(),
                    _ => caps[0].to_string(),
                }
            })
            .into_owned();

        Ok(html)
    }
}

/// JSON that is safe to place inside a `<script>` element. `/*` and `</`
/// only occur inside JSON strings, where `\/` is a valid escape.
fn script_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?
        .replace("/*", "\\/*")
        .replace("</", "<\\/"))
}

impl MapWidget for LeafletMap {
    fn create_map(center: LatLng, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            title: "Earthquakes".to_string(),
            subtitle: None,
            notice: None,
            tile_layers: Vec::new(),
            markers: Vec::new(),
            legends: Vec::new(),
        }
    }

    fn add_tile_layer(&mut self, url_template: &str, attribution: &str) {
        self.tile_layers.push(TileLayer {
            url: url_template.to_string(),
            attribution: attribution.to_string(),
        });
    }

    fn add_marker(&mut self, position: LatLng, style: MarkerStyle) -> MarkerHandle {
        self.markers.push(CircleMarker {
            lat: position.lat,
            lng: position.lng,
            style,
            popup: None,
        });
        MarkerHandle(self.markers.len() - 1)
    }

    fn bind_popup(&mut self, marker: MarkerHandle, html: &str) {
        match self.markers.get_mut(marker.0) {
            Some(m) => m.popup = Some(html.to_string()),
            None => tracing::warn!("Popup bound to unknown marker {:?}", marker),
        }
    }

    fn add_legend_control(&mut self, position: ControlPosition, render: &dyn Fn() -> String) {
        self.legends.push(LegendControl {
            position: position.as_str(),
            html: render(),
        });
    }
}

// HTML template for the map page
const MAP_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title><!-- TITLE_PLACEHOLDER --></title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
    <style>
        html, body { height: 100%; margin: 0; padding: 0; font-family: Arial, sans-serif; }
        body { display: flex; flex-direction: column; }
        header { padding: 6px 12px; background: #f8f9fa; border-bottom: 1px solid #ddd; }
        header h1 { margin: 0; font-size: 1.2em; }
        header p { margin: 2px 0 0; color: #666; font-size: 0.85em; }
        #notice {
            padding: 8px;
            background-color: #ff6b6b;
            color: white;
            font-weight: bold;
            text-align: center;
        }
        #map { flex: 1; width: 100%; }
        .info {
            padding: 6px 8px;
            font: 14px/16px Arial, Helvetica, sans-serif;
            background: white;
            background: rgba(255,255,255,0.9);
            box-shadow: 0 0 15px rgba(0,0,0,0.2);
            border-radius: 5px;
        }
        .legend { line-height: 18px; color: #555; }
        .legend i {
            width: 18px;
            height: 18px;
            float: left;
            margin-right: 8px;
            opacity: 0.8;
        }
    </style>
</head>
<body>
    <header><!-- HEADER_PLACEHOLDER --></header>
    <!-- NOTICE_PLACEHOLDER -->
    <div id="map"></div>

    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
    <script>
        const map = L.map('map').setView(/* VIEW_PLACEHOLDER */);

        const tileLayers = /* TILE_LAYERS_PLACEHOLDER */;
        tileLayers.forEach(function (layer) {
            L.tileLayer(layer.url, { attribution: layer.attribution }).addTo(map);
        });

        const markers = /* MARKERS_PLACEHOLDER */;
        markers.forEach(function (m) {
            const marker = L.circleMarker([m.lat, m.lng], m.style).addTo(map);
            if (m.popup) {
                marker.bindPopup(m.popup);
            }
        });

        const legends = /* LEGENDS_PLACEHOLDER */;
        legends.forEach(function (entry) {
            const legend = L.control({ position: entry.position });
            legend.onAdd = function () {
                const div = L.DomUtil.create('div', 'info legend');
                div.innerHTML = entry.html;
                return div;
            };
            legend.addTo(map);
        });
    </script>
</body>
</html>
"#;
