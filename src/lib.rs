pub mod config;
pub mod core;
pub mod domain;
pub mod geocode;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use crate::core::{engine::MapEngine, pipeline::GdpMapPipeline};
pub use geocode::NominatimGeocoder;
pub use render::{MapDocument, Marker};
pub use utils::error::{GdpMapError, Result};
