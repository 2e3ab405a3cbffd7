use crate::adapters::leaflet::LeafletMap;
use crate::core::export::styled_feature_collection;
use crate::core::feed::{ensure_feature_collection, parse_features};
use crate::core::renderer::FeatureRenderer;
use crate::core::{ConfigProvider, FeedSource, Pipeline, Storage};
use crate::domain::model::{FeedDocument, FeedMetadata, RunSummary, TransformResult};
use crate::domain::ports::MapWidget;
use crate::utils::error::{QuakeError, Result};
use std::path::Path;

pub const DEFAULT_PAGE_TITLE: &str = "Earthquakes";

/// Feed to map: fetch the feed, parse and filter its features, then write the
/// rendered Leaflet page (and optionally a styled GeoJSON copy) to storage.
pub struct QuakePipeline<F: FeedSource, S: Storage, C: ConfigProvider> {
    source: F,
    storage: S,
    config: C,
}

impl<F: FeedSource, S: Storage, C: ConfigProvider> QuakePipeline<F, S, C> {
    pub fn new(source: F, storage: S, config: C) -> Self {
        Self {
            source,
            storage,
            config,
        }
    }

    /// Map with the configured view and base tiles, plus the depth legend.
    fn base_map(&self, metadata: Option<&FeedMetadata>) -> LeafletMap {
        let view = self.config.map_view();
        let mut map = LeafletMap::create_map(view.center, view.zoom);
        map.add_tile_layer(&view.tile_url, &view.attribution);

        let title = view
            .title
            .or_else(|| metadata.and_then(|m| m.title.clone()))
            .unwrap_or_else(|| DEFAULT_PAGE_TITLE.to_string());
        map.set_title(title);

        FeatureRenderer::add_legend(&mut map);
        map
    }

    fn output_location(&self, file: &str) -> String {
        format!("{}/{}", self.config.output_path(), file)
    }

    async fn write_page(&self, map: &LeafletMap) -> Result<String> {
        let html = map.to_html()?;
        let file = self.config.output_file();

        tracing::debug!("Writing map page ({} bytes) to storage", html.len());
        self.storage.write_file(file, html.as_bytes()).await?;
        Ok(self.output_location(file))
    }
}

/// `earthquakes.html` -> `earthquakes.styled.geojson`. Never equal to the
/// page file name.
pub fn geojson_file_name(output_file: &str) -> String {
    let stem = Path::new(output_file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(output_file);
    format!("{}.styled.geojson", stem)
}

fn subtitle(result: &TransformResult) -> String {
    let count = result.features.len();
    let mut parts = vec![format!(
        "{} earthquake{}",
        count,
        if count == 1 { "" } else { "s" }
    )];
    if let Some(generated) = result.metadata.as_ref().and_then(|m| m.generated_at()) {
        parts.push(format!(
            "feed generated {}",
            generated.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    if result.filtered > 0 {
        parts.push(format!("{} below minimum magnitude", result.filtered));
    }
    if !result.skipped.is_empty() {
        parts.push(format!("{} incomplete records skipped", result.skipped.len()));
    }
    parts.join(", ")
}

#[async_trait::async_trait]
impl<F: FeedSource, S: Storage, C: ConfigProvider> Pipeline for QuakePipeline<F, S, C> {
    async fn extract(&self) -> Result<FeedDocument> {
        let document = self.source.fetch().await?;
        ensure_feature_collection(&document)?;
        Ok(document)
    }

    async fn transform(&self, feed: FeedDocument) -> Result<TransformResult> {
        let parsed = parse_features(&feed);
        let mut features = parsed.features;

        let mut filtered = 0;
        if let Some(min_magnitude) = self.config.min_magnitude() {
            let before = features.len();
            features.retain(|f| f.magnitude >= min_magnitude);
            filtered = before - features.len();
            tracing::debug!(
                "Dropped {} features below magnitude {}",
                filtered,
                min_magnitude
            );
        }

        if !parsed.skipped.is_empty() {
            tracing::warn!(
                "{} of {} features were malformed and skipped",
                parsed.skipped.len(),
                feed.features.len()
            );
        }

        Ok(TransformResult {
            features,
            skipped: parsed.skipped,
            filtered,
            metadata: feed.metadata,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<RunSummary> {
        let mut map = self.base_map(result.metadata.as_ref());
        map.set_subtitle(subtitle(&result));
        let rendered = FeatureRenderer::render(&mut map, &result.features);

        let output_path = self.write_page(&map).await?;

        let geojson_path = if self.config.export_geojson() {
            let file = geojson_file_name(self.config.output_file());
            let collection = styled_feature_collection(&result.features);
            let data = serde_json::to_vec_pretty(&collection)?;
            self.storage.write_file(&file, &data).await?;
            tracing::debug!("Styled GeoJSON saved as {}", file);
            Some(self.output_location(&file))
        } else {
            None
        };

        Ok(RunSummary {
            output_path,
            geojson_path,
            rendered,
            skipped: result.skipped.len(),
            filtered: result.filtered,
            fetch_error: None,
        })
    }

    async fn load_fallback(&self, error: &QuakeError) -> Result<RunSummary> {
        let mut map = self.base_map(None);
        map.set_notice(format!(
            "Earthquake data is unavailable: {}. {}.",
            error.user_friendly_message(),
            error.recovery_suggestion()
        ));

        let output_path = self.write_page(&map).await?;

        Ok(RunSummary {
            output_path,
            fetch_error: Some(error.to_string()),
            ..RunSummary::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }

        async fn get_text(&self, path: &str) -> String {
            String::from_utf8(self.get_file(path).await.unwrap()).unwrap()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct StaticFeed {
        document: serde_json::Value,
    }

    impl FeedSource for StaticFeed {
        async fn fetch(&self) -> Result<FeedDocument> {
            Ok(serde_json::from_value(self.document.clone())?)
        }
    }

    struct MockConfig {
        min_magnitude: Option<f64>,
        export_geojson: bool,
        title: Option<String>,
        output_file: String,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                min_magnitude: None,
                export_geojson: false,
                title: None,
                output_file: "earthquakes.html".to_string(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn feed_url(&self) -> String {
            "http://test.com/feed.geojson".to_string()
        }

        fn timeout_seconds(&self) -> u64 {
            5
        }

        fn min_magnitude(&self) -> Option<f64> {
            self.min_magnitude
        }

        fn output_path(&self) -> &str {
            "test_output"
        }

        fn output_file(&self) -> &str {
            &self.output_file
        }

        fn export_geojson(&self) -> bool {
            self.export_geojson
        }

        fn map_view(&self) -> crate::domain::model::MapView {
            crate::domain::model::MapView {
                title: self.title.clone(),
                ..Default::default()
            }
        }
    }

    fn quake(title: &str, mag: f64, depth: f64) -> serde_json::Value {
        json!({
            "type": "Feature",
            "properties": {"mag": mag, "title": title},
            "geometry": {"type": "Point", "coordinates": [-117.0, 34.0, depth]}
        })
    }

    fn feed(features: Vec<serde_json::Value>) -> serde_json::Value {
        json!({
            "type": "FeatureCollection",
            "metadata": {"generated": 1_700_000_000_000i64, "title": "USGS All Earthquakes, Past Week"},
            "features": features
        })
    }

    fn pipeline(
        document: serde_json::Value,
        config: MockConfig,
    ) -> (QuakePipeline<StaticFeed, MockStorage, MockConfig>, MockStorage) {
        let storage = MockStorage::new();
        let pipeline = QuakePipeline::new(StaticFeed { document }, storage.clone(), config);
        (pipeline, storage)
    }

    #[tokio::test]
    async fn test_extract_rejects_non_collection() {
        let (pipeline, _) = pipeline(json!({"type": "Feature", "features": []}), MockConfig::new());

        let err = pipeline.extract().await.unwrap_err();
        assert!(err.is_fetch_failure());
    }

    #[tokio::test]
    async fn test_transform_skips_malformed_features() {
        let (pipeline, _) = pipeline(json!(null), MockConfig::new());
        let document: FeedDocument = serde_json::from_value(feed(vec![
            quake("M 2.0 - A", 2.0, 5.0),
            json!({"type": "Feature", "properties": {"mag": null, "title": "M ? - B"}, "geometry": {"coordinates": [0.0, 0.0, 1.0]}}),
            quake("M 3.0 - C", 3.0, 50.0),
        ]))
        .unwrap();

        let result = pipeline.transform(document).await.unwrap();

        assert_eq!(result.features.len(), 2);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.filtered, 0);
        assert!(result.metadata.is_some());
    }

    #[tokio::test]
    async fn test_transform_applies_min_magnitude() {
        let mut config = MockConfig::new();
        config.min_magnitude = Some(2.5);
        let (pipeline, _) = pipeline(json!(null), config);
        let document: FeedDocument = serde_json::from_value(feed(vec![
            quake("small", 1.0, 5.0),
            quake("edge", 2.5, 5.0),
            quake("big", 6.1, 5.0),
        ]))
        .unwrap();

        let result = pipeline.transform(document).await.unwrap();

        let titles: Vec<&str> = result.features.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["edge", "big"]);
        assert_eq!(result.filtered, 1);
    }

    #[tokio::test]
    async fn test_load_writes_map_page() {
        let (pipeline, storage) = pipeline(
            feed(vec![quake("M 4.0 - Ridgecrest", 4.0, 20.0)]),
            MockConfig::new(),
        );

        let document = pipeline.extract().await.unwrap();
        let result = pipeline.transform(document).await.unwrap();
        let summary = pipeline.load(result).await.unwrap();

        assert_eq!(summary.output_path, "test_output/earthquakes.html");
        assert_eq!(summary.rendered, 1);
        assert!(summary.is_success());
        assert!(summary.geojson_path.is_none());

        let html = storage.get_text("earthquakes.html").await;
        assert!(html.contains("<title>USGS All Earthquakes, Past Week</title>"));
        assert!(html.contains("1 earthquake, feed generated 2023-11-14 22:13 UTC"));
        assert!(html.contains(r##""fillColor":"#80ff00""##));
        assert!(html.contains("Magnitude: 4<br>Depth: 20 km"));
        assert!(html.contains("Depth Legend"));
        assert!(storage.get_file("earthquakes.styled.geojson").await.is_none());
    }

    #[tokio::test]
    async fn test_load_prefers_configured_title() {
        let mut config = MockConfig::new();
        config.title = Some("My Quakes".to_string());
        let (pipeline, storage) = pipeline(feed(vec![]), config);

        let document = pipeline.extract().await.unwrap();
        let result = pipeline.transform(document).await.unwrap();
        pipeline.load(result).await.unwrap();

        let html = storage.get_text("earthquakes.html").await;
        assert!(html.contains("<title>My Quakes</title>"));
    }

    #[tokio::test]
    async fn test_load_exports_styled_geojson() {
        let mut config = MockConfig::new();
        config.export_geojson = true;
        let (pipeline, storage) = pipeline(feed(vec![quake("deep", 5.5, 120.0)]), config);

        let document = pipeline.extract().await.unwrap();
        let result = pipeline.transform(document).await.unwrap();
        let summary = pipeline.load(result).await.unwrap();

        assert_eq!(
            summary.geojson_path.as_deref(),
            Some("test_output/earthquakes.styled.geojson")
        );
        let data = storage.get_file("earthquakes.styled.geojson").await.unwrap();
        let collection: serde_json::Value = serde_json::from_slice(&data).unwrap();
        assert_eq!(collection["features"][0]["properties"]["style"]["fillColor"], "#ff0000");
        assert_eq!(collection["features"][0]["properties"]["style"]["radius"], 27.5);
    }

    #[tokio::test]
    async fn test_geojson_export_does_not_overwrite_page_with_geojson_name() {
        let mut config = MockConfig::new();
        config.export_geojson = true;
        config.output_file = "map.geojson".to_string();
        let (pipeline, storage) = pipeline(feed(vec![quake("shallow", 3.0, 5.0)]), config);

        let document = pipeline.extract().await.unwrap();
        let result = pipeline.transform(document).await.unwrap();
        let summary = pipeline.load(result).await.unwrap();

        assert_eq!(summary.output_path, "test_output/map.geojson");
        assert_eq!(
            summary.geojson_path.as_deref(),
            Some("test_output/map.styled.geojson")
        );
        let page = storage.get_text("map.geojson").await;
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(storage.get_file("map.styled.geojson").await.is_some());
    }

    #[tokio::test]
    async fn test_load_fallback_writes_notice() {
        let (pipeline, storage) = pipeline(json!(null), MockConfig::new());
        let error = QuakeError::FeedStatusError {
            status: 502,
            url: "http://test.com/feed.geojson".to_string(),
        };

        let summary = pipeline.load_fallback(&error).await.unwrap();

        assert!(!summary.is_success());
        assert_eq!(summary.rendered, 0);
        assert_eq!(summary.output_path, "test_output/earthquakes.html");

        let html = storage.get_text("earthquakes.html").await;
        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("The earthquake feed answered with HTTP 502"));
        assert!(html.contains("const markers = [];"));
        assert!(html.contains("Depth Legend"));
    }

    #[test]
    fn test_geojson_file_name() {
        assert_eq!(geojson_file_name("earthquakes.html"), "earthquakes.styled.geojson");
        assert_eq!(geojson_file_name("map"), "map.styled.geojson");
        assert_eq!(geojson_file_name("map.geojson"), "map.styled.geojson");
    }
}
