use crate::config::feed::{summary_feed_url, FeedLevel, FeedPeriod};
use crate::config::{
    validate_provider, DEFAULT_OUTPUT_FILE, DEFAULT_OUTPUT_PATH, DEFAULT_TIMEOUT_SECONDS,
    DEFAULT_ZOOM,
};
use crate::domain::model::{LatLng, MapView};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "quake-map")]
#[command(about = "Render a live earthquake GeoJSON feed as a Leaflet map")]
pub struct CliConfig {
    /// Feed URL; takes precedence over --level and --period
    #[arg(long)]
    pub feed_url: Option<String>,

    #[arg(long, value_enum, default_value_t = FeedLevel::All)]
    pub level: FeedLevel,

    #[arg(long, value_enum, default_value_t = FeedPeriod::Week)]
    pub period: FeedPeriod,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    /// Leave out earthquakes below this magnitude
    #[arg(long, allow_hyphen_values = true)]
    pub min_magnitude: Option<f64>,

    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    /// Also write the styled features as GeoJSON next to the map
    #[arg(long)]
    pub export_geojson: bool,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub center_lat: f64,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub center_lng: f64,

    #[arg(long, default_value_t = DEFAULT_ZOOM)]
    pub zoom: u8,

    /// Page heading; defaults to the feed's title
    #[arg(long)]
    pub title: Option<String>,

    /// Read settings from a TOML file instead of the flags above
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            feed_url: None,
            level: FeedLevel::default(),
            period: FeedPeriod::default(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            min_magnitude: None,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            export_geojson: false,
            center_lat: 0.0,
            center_lng: 0.0,
            zoom: DEFAULT_ZOOM,
            title: None,
            config: None,
            verbose: false,
            log_json: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn feed_url(&self) -> String {
        self.feed_url
            .clone()
            .unwrap_or_else(|| summary_feed_url(self.level, self.period))
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn min_magnitude(&self) -> Option<f64> {
        self.min_magnitude
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn export_geojson(&self) -> bool {
        self.export_geojson
    }

    fn map_view(&self) -> MapView {
        MapView {
            title: self.title.clone(),
            center: LatLng::new(self.center_lat, self.center_lng),
            zoom: self.zoom,
            ..MapView::default()
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_usgs_week_feed() {
        let config = CliConfig::parse_from(["quake-map"]);

        assert_eq!(
            config.feed_url(),
            "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson"
        );
        assert_eq!(config.output_path(), "./output");
        assert_eq!(config.output_file(), "earthquakes.html");
        assert_eq!(config.map_view(), MapView::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_level_and_period_flags() {
        let config = CliConfig::parse_from(["quake-map", "--level", "4.5", "--period", "day"]);
        assert!(config.feed_url().ends_with("/4.5_day.geojson"));
    }

    #[test]
    fn test_explicit_feed_url_wins() {
        let config = CliConfig::parse_from([
            "quake-map",
            "--feed-url",
            "http://localhost:8080/feed.geojson",
            "--level",
            "significant",
        ]);
        assert_eq!(config.feed_url(), "http://localhost:8080/feed.geojson");
    }

    #[test]
    fn test_negative_coordinates_and_magnitude() {
        let config = CliConfig::parse_from([
            "quake-map",
            "--center-lat",
            "-33.4",
            "--center-lng",
            "-70.6",
            "--min-magnitude",
            "-0.5",
        ]);
        assert_eq!(config.map_view().center, LatLng::new(-33.4, -70.6));
        assert_eq!(config.min_magnitude(), Some(-0.5));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = CliConfig {
            zoom: 25,
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CliConfig {
            feed_url: Some("ftp://example.com/feed".to_string()),
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CliConfig {
            output_file: "../map.html".to_string(),
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CliConfig {
            timeout_seconds: 0,
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
