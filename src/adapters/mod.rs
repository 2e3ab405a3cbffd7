// Adapters layer: concrete implementations for external systems (http feed, map page, storage).

pub mod leaflet;
pub mod storage;
pub mod usgs;
