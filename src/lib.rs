pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::{leaflet::LeafletMap, storage::LocalStorage, usgs::UsgsFeedClient};
pub use crate::core::depth::{classify_depth, DEPTH_BUCKETS};
pub use crate::core::legend::build_legend;
pub use crate::core::magnitude::scale_magnitude;
pub use crate::core::style::build_style;
pub use crate::core::{engine::QuakeMapEngine, pipeline::QuakePipeline, renderer::FeatureRenderer};
pub use crate::domain::model::RunSummary;
pub use crate::utils::error::{QuakeError, Result};
