pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_INDICATOR: &str = "NY.GDP.PCAP.CD";
pub const DEFAULT_API_BASE: &str = "https://api.worldbank.org/v2";
pub const DEFAULT_GEOCODER_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_USER_AGENT: &str = "gdp_per_capita_app";
pub const DEFAULT_ZOOM: u8 = 3;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "gdp-map")]
#[command(about = "Renders an interactive world map of GDP per capita for a given year")]
pub struct CliConfig {
    /// Reporting year to fetch (e.g. 2022)
    #[arg(long)]
    pub year: i32,

    /// World Bank indicator code
    #[arg(long, default_value = DEFAULT_INDICATOR)]
    pub indicator: String,

    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    #[arg(long, default_value = DEFAULT_GEOCODER_ENDPOINT)]
    pub geocoder_endpoint: String,

    /// User-Agent sent to the geocoding provider (its usage policy requires one)
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    #[arg(long, default_value = ".")]
    pub output_path: String,

    #[arg(long, default_value_t = DEFAULT_ZOOM)]
    pub zoom: u8,

    #[arg(long, help = "Also export the geocoded table as CSV")]
    pub csv: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn year(&self) -> i32 {
        self.year
    }

    fn indicator(&self) -> &str {
        &self.indicator
    }

    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn geocoder_endpoint(&self) -> &str {
        &self.geocoder_endpoint
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }

    fn csv_export(&self) -> bool {
        self.csv
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_year("year", self.year)?;
        validation::validate_non_empty_string("indicator", &self.indicator)?;
        validation::validate_url("api_base", &self.api_base)?;
        validation::validate_url("geocoder_endpoint", &self.geocoder_endpoint)?;
        validation::validate_non_empty_string("user_agent", &self.user_agent)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_range("zoom", self.zoom, 1, 18)?;
        Ok(())
    }
}
