use crate::config::{
    DEFAULT_API_BASE, DEFAULT_GEOCODER_ENDPOINT, DEFAULT_INDICATOR, DEFAULT_USER_AGENT,
    DEFAULT_ZOOM,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub map: MapSection,
    pub providers: Option<ProvidersSection>,
    pub output: Option<OutputSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapSection {
    pub year: i32,
    pub zoom: Option<u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersSection {
    pub indicator: Option<String>,
    pub api_base: Option<String>,
    pub geocoder_endpoint: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: Option<String>,
    pub csv: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Self> {
        let interpolated = Self::interpolate_env_vars(content);
        let config: TomlConfig = toml::from_str(&interpolated)?;
        Ok(config)
    }

    /// 替換 ${VAR} 形式的環境變數；未設定的保留原樣
    fn interpolate_env_vars(content: &str) -> String {
        use regex::Regex;

        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
        re.replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .to_string()
    }
}

impl ConfigProvider for TomlConfig {
    fn year(&self) -> i32 {
        self.map.year
    }

    fn indicator(&self) -> &str {
        self.providers
            .as_ref()
            .and_then(|p| p.indicator.as_deref())
            .unwrap_or(DEFAULT_INDICATOR)
    }

    fn api_base(&self) -> &str {
        self.providers
            .as_ref()
            .and_then(|p| p.api_base.as_deref())
            .unwrap_or(DEFAULT_API_BASE)
    }

    fn geocoder_endpoint(&self) -> &str {
        self.providers
            .as_ref()
            .and_then(|p| p.geocoder_endpoint.as_deref())
            .unwrap_or(DEFAULT_GEOCODER_ENDPOINT)
    }

    fn user_agent(&self) -> &str {
        self.providers
            .as_ref()
            .and_then(|p| p.user_agent.as_deref())
            .unwrap_or(DEFAULT_USER_AGENT)
    }

    fn output_path(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|o| o.path.as_deref())
            .unwrap_or(".")
    }

    fn zoom(&self) -> u8 {
        self.map.zoom.unwrap_or(DEFAULT_ZOOM)
    }

    fn csv_export(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.csv)
            .unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_year("map.year", self.map.year)?;
        validation::validate_range("map.zoom", self.zoom(), 1, 18)?;
        validation::validate_non_empty_string("providers.indicator", self.indicator())?;
        validation::validate_url("providers.api_base", self.api_base())?;
        validation::validate_url("providers.geocoder_endpoint", self.geocoder_endpoint())?;
        validation::validate_non_empty_string("providers.user_agent", self.user_agent())?;
        validation::validate_path("output.path", self.output_path())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = TomlConfig::from_str(
            r#"
[map]
year = 2022
"#,
        )
        .unwrap();

        assert_eq!(config.year(), 2022);
        assert_eq!(config.zoom(), 3);
        assert_eq!(config.indicator(), "NY.GDP.PCAP.CD");
        assert_eq!(config.api_base(), "https://api.worldbank.org/v2");
        assert_eq!(
            config.geocoder_endpoint(),
            "https://nominatim.openstreetmap.org/search"
        );
        assert_eq!(config.user_agent(), "gdp_per_capita_app");
        assert_eq!(config.output_path(), ".");
        assert!(!config.csv_export());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_config_overrides_defaults() {
        let config = TomlConfig::from_str(
            r#"
[map]
year = 2010
zoom = 4

[providers]
indicator = "NY.GDP.MKTP.CD"
api_base = "http://localhost:8080/v2"
geocoder_endpoint = "http://localhost:8081/search"
user_agent = "my_map_app"

[output]
path = "./maps"
csv = true
"#,
        )
        .unwrap();

        assert_eq!(config.year(), 2010);
        assert_eq!(config.zoom(), 4);
        assert_eq!(config.indicator(), "NY.GDP.MKTP.CD");
        assert_eq!(config.api_base(), "http://localhost:8080/v2");
        assert_eq!(config.output_path(), "./maps");
        assert!(config.csv_export());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_year_is_a_parse_error() {
        let result = TomlConfig::from_str(
            r#"
[map]
zoom = 3
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_env_var_interpolation() {
        std::env::set_var("GDP_MAP_TEST_UA", "agent_from_env");

        let config = TomlConfig::from_str(
            r#"
[map]
year = 2022

[providers]
user_agent = "${GDP_MAP_TEST_UA}"
"#,
        )
        .unwrap();

        assert_eq!(config.user_agent(), "agent_from_env");
    }

    #[test]
    fn test_unset_env_var_is_left_verbatim() {
        let config = TomlConfig::from_str(
            r#"
[map]
year = 2022

[providers]
user_agent = "${GDP_MAP_TEST_UNSET_VAR}"
"#,
        )
        .unwrap();

        assert_eq!(config.user_agent(), "${GDP_MAP_TEST_UNSET_VAR}");
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let mut config = TomlConfig::from_str(
            r#"
[map]
year = 2022
"#,
        )
        .unwrap();

        config.map.year = 1800;
        assert!(config.validate().is_err());

        config.map.year = 2022;
        config.map.zoom = Some(0);
        assert!(config.validate().is_err());
    }
}
