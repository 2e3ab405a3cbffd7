use crate::domain::model::{
    ControlPosition, FeedDocument, LatLng, MapView, MarkerHandle, MarkerStyle, RunSummary,
    TransformResult,
};
use crate::utils::error::{QuakeError, Result};
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Where the earthquake feed comes from.
pub trait FeedSource: Send + Sync {
    fn fetch(&self) -> impl std::future::Future<Output = Result<FeedDocument>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn feed_url(&self) -> String;
    fn timeout_seconds(&self) -> u64;
    fn min_magnitude(&self) -> Option<f64>;
    fn output_path(&self) -> &str;
    fn output_file(&self) -> &str;
    fn export_geojson(&self) -> bool;
    fn map_view(&self) -> MapView;
}

/// Drawing surface the renderer talks to. Implementations own whatever
/// state the map needs; callers only hold the handles they get back.
pub trait MapWidget {
    fn create_map(center: LatLng, zoom: u8) -> Self
    where
        Self: Sized;

    fn add_tile_layer(&mut self, url_template: &str, attribution: &str);

    fn add_marker(&mut self, position: LatLng, style: MarkerStyle) -> MarkerHandle;

    fn bind_popup(&mut self, marker: MarkerHandle, html: &str);

    fn add_legend_control(&mut self, position: ControlPosition, render: &dyn Fn() -> String);
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<FeedDocument>;
    async fn transform(&self, feed: FeedDocument) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<RunSummary>;
    /// Writes a map without markers that tells the reader the feed failed.
    async fn load_fallback(&self, error: &QuakeError) -> Result<RunSummary>;
}
