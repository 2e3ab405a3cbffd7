#[cfg(feature = "cli")]
pub mod cli;
pub mod feed;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_name, validate_non_empty_string, validate_path, validate_positive_number,
    validate_range, validate_url,
};

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const DEFAULT_OUTPUT_FILE: &str = "earthquakes.html";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_ZOOM: u8 = 2;
pub const MAX_ZOOM: u8 = 19;

/// Checks that apply to every configuration source.
pub fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validate_url("feed_url", &config.feed_url())?;
    validate_positive_number("timeout_seconds", config.timeout_seconds(), 1)?;
    if let Some(min_magnitude) = config.min_magnitude() {
        validate_range("min_magnitude", min_magnitude, -10.0, 10.0)?;
    }

    validate_path("output_path", config.output_path())?;
    validate_file_name("output_file", config.output_file())?;

    let view = config.map_view();
    validate_range("center_lat", view.center.lat, -90.0, 90.0)?;
    validate_range("center_lng", view.center.lng, -180.0, 180.0)?;
    validate_range("zoom", view.zoom, 0, MAX_ZOOM)?;
    validate_non_empty_string("tile_url", &view.tile_url)?;
    if let Some(title) = &view.title {
        validate_non_empty_string("title", title)?;
    }

    Ok(())
}
