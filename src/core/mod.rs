pub mod depth;
pub mod engine;
pub mod export;
pub mod feed;
pub mod legend;
pub mod magnitude;
pub mod pipeline;
pub mod renderer;
pub mod style;

pub use crate::domain::model::{EarthquakeFeature, LegendEntry, MarkerStyle, TransformResult};
pub use crate::domain::ports::{ConfigProvider, FeedSource, MapWidget, Pipeline, Storage};
pub use crate::utils::error::Result;
