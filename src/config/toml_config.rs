use crate::config::feed::{summary_feed_url, FeedLevel, FeedPeriod};
use crate::config::{
    validate_provider, DEFAULT_OUTPUT_FILE, DEFAULT_OUTPUT_PATH, DEFAULT_TIMEOUT_SECONDS,
    DEFAULT_ZOOM,
};
use crate::domain::model::{LatLng, MapView, DEFAULT_ATTRIBUTION, DEFAULT_TILE_URL};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{QuakeError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File based configuration. Every section and key is optional.
///
/// ```toml
/// [feed]
/// level = "4.5"
/// period = "day"
///
/// [map]
/// center_lat = 35.0
/// center_lng = 139.0
/// zoom = 5
///
/// [output]
/// path = "${HOME}/quake-maps"
/// export_geojson = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedConfig {
    pub url: Option<String>,
    #[serde(default)]
    pub level: FeedLevel,
    #[serde(default)]
    pub period: FeedPeriod,
    pub timeout_seconds: Option<u64>,
    pub min_magnitude: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapConfig {
    pub title: Option<String>,
    pub center_lat: Option<f64>,
    pub center_lng: Option<f64>,
    pub zoom: Option<u8>,
    pub tile_url: Option<String>,
    pub attribution: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub file: Option<String>,
    pub export_geojson: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QuakeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| QuakeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the value of the environment variable. Unset
    /// variables are left as written so that validation can point at them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| QuakeError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn feed_url(&self) -> String {
        self.feed
            .url
            .clone()
            .unwrap_or_else(|| summary_feed_url(self.feed.level, self.feed.period))
    }

    fn timeout_seconds(&self) -> u64 {
        self.feed.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn min_magnitude(&self) -> Option<f64> {
        self.feed.min_magnitude
    }

    fn output_path(&self) -> &str {
        self.output.path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn output_file(&self) -> &str {
        self.output.file.as_deref().unwrap_or(DEFAULT_OUTPUT_FILE)
    }

    fn export_geojson(&self) -> bool {
        self.output.export_geojson.unwrap_or(false)
    }

    fn map_view(&self) -> MapView {
        MapView {
            title: self.map.title.clone(),
            center: LatLng::new(
                self.map.center_lat.unwrap_or(0.0),
                self.map.center_lng.unwrap_or(0.0),
            ),
            zoom: self.map.zoom.unwrap_or(DEFAULT_ZOOM),
            tile_url: self
                .map
                .tile_url
                .clone()
                .unwrap_or_else(|| DEFAULT_TILE_URL.to_string()),
            attribution: self
                .map
                .attribution
                .clone()
                .unwrap_or_else(|| DEFAULT_ATTRIBUTION.to_string()),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
