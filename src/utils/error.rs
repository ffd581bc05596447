use thiserror::Error;

#[derive(Error, Debug)]
pub enum GdpMapError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Indicator fetch failed: HTTP {status} from {url}")]
    FetchError { status: u16, url: String },

    #[error("Geocoding request failed: HTTP {status} while looking up '{place}'")]
    GeocodeError { status: u16, place: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Config,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GdpMapError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::FetchError { .. } | Self::GeocodeError { .. } => {
                ErrorCategory::Network
            }
            Self::SerializationError(_) | Self::CsvError(_) | Self::ProcessingError { .. } => {
                ErrorCategory::Data
            }
            Self::TomlError(_)
            | Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Config,
            Self::IoError(_) => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Config => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::ApiError(_) => {
                "Check network connectivity and that the provider endpoints are reachable"
                    .to_string()
            }
            Self::FetchError { status, .. } => format!(
                "The statistics provider answered HTTP {}; verify the year and indicator code, then retry later",
                status
            ),
            Self::GeocodeError { status, .. } => format!(
                "The geocoding provider answered HTTP {}; check the endpoint and User-Agent settings",
                status
            ),
            Self::IoError(_) => "Check that the output path exists and is writable".to_string(),
            Self::SerializationError(_) | Self::ProcessingError { .. } => {
                "The provider returned an unexpected payload; rerun with --verbose to inspect it"
                    .to_string()
            }
            Self::CsvError(_) => "Check the CSV export target and rerun".to_string(),
            Self::TomlError(_) => "Fix the TOML syntax in the configuration file".to_string(),
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration value and rerun; see --help for accepted values".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(_) | Self::FetchError { .. } => {
                format!("Could not fetch indicator data: {}", self)
            }
            Self::GeocodeError { .. } => format!("Geocoding failed: {}", self),
            Self::IoError(_) => format!("Could not write output: {}", self),
            Self::SerializationError(_) | Self::CsvError(_) | Self::ProcessingError { .. } => {
                format!("Could not process provider data: {}", self)
            }
            Self::TomlError(_)
            | Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => format!("Configuration problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, GdpMapError>;
