use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::error::ConfigError;

/// Setting names as they appear in the configuration file.
pub mod names {
    pub const WEATHER_API_KEY: &str = "WeatherApiKey";
    pub const TIDE_API_KEY: &str = "TideApiKey";
    pub const UV_INDEX_API_KEY: &str = "UVIndexApiKey";
    pub const SOLAR_FLARE_API_KEY: &str = "SolarFlareApiKey";
    pub const ENCRYPTION_KEY: &str = "EncryptionKey";

    pub const WEATHER_BASE_URL: &str = "WeatherBaseUrl";
    pub const TIDES_BASE_URL: &str = "TidesBaseUrl";
    pub const UV_INDEX_BASE_URL: &str = "UVIndexBaseUrl";
    pub const SOLAR_FLARE_BASE_URL: &str = "SolarFlareBaseUrl";

    pub const VAULT_PATH: &str = "VaultPath";
    pub const HUNTING_DATA_PATH: &str = "HuntingDataPath";
    pub const LOG_FILE: &str = "LogFile";
    pub const TIDE_ARCHIVE_DIR: &str = "TideArchiveDir";
    pub const REQUEST_TIMEOUT_SECS: &str = "RequestTimeoutSecs";
}

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "ALMANAC_CONFIG";

/// Environment variable carrying the base64 vault key.
pub const VAULT_KEY_ENV: &str = "ALMANAC_VAULT_KEY";

const LOCAL_CONFIG_FILE: &str = "Config/weatherAppConfigFile.json";

const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const DEFAULT_TIDES_BASE_URL: &str = "https://api.niwa.co.nz/tides/data";
const DEFAULT_UV_INDEX_BASE_URL: &str = "https://api.niwa.co.nz/uv/data";
const DEFAULT_SOLAR_FLARE_BASE_URL: &str = "https://api.nasa.gov/DONKI/FLR";
const DEFAULT_VAULT_PATH: &str = "security.sys";
const DEFAULT_HUNTING_DATA_PATH: &str = "Config/hunting_season_data.txt";
const DEFAULT_LOG_FILE: &str = "Logs/application.log";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const MAX_REASONABLE_TIMEOUT_SECS: u64 = 120;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Flat name/value settings read from the configuration file.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    values: HashMap<String, String>,
    source: Option<PathBuf>,
}

impl Settings {
    /// Load settings from `path`.
    ///
    /// Content starting with `{` is read as a JSON object of scalar values,
    /// anything else as `key=value` lines.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound(path.display().to_string()),
            _ => ConfigError::ParseError(format!("{}: {}", path.display(), e)),
        })?;

        let mut settings = Self::parse(&contents)?;
        settings.source = Some(path.to_path_buf());

        tracing::debug!(
            "Loaded {} settings from {}",
            settings.values.len(),
            path.display()
        );
        Ok(settings)
    }

    /// Parse settings from text in either supported format.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim_start().starts_with('{') {
            Self::parse_json(contents)
        } else {
            Self::parse_lines(contents)
        }
    }

    fn parse_json(contents: &str) -> Result<Self, ConfigError> {
        let object: serde_json::Map<String, Value> = serde_json::from_str(contents)
            .map_err(|e| ConfigError::ParseError(format!("invalid JSON: {e}")))?;

        let mut values = HashMap::with_capacity(object.len());
        for (name, value) in object {
            let text = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => continue,
                Value::Array(_) | Value::Object(_) => {
                    return Err(ConfigError::Invalid(format!(
                        "setting {name} must be a string, number or boolean"
                    )));
                }
            };
            values.insert(name, text);
        }

        Ok(Self {
            values,
            source: None,
        })
    }

    fn parse_lines(contents: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        for (idx, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((name, value)) = line.split_once('=') else {
                return Err(ConfigError::ParseError(format!(
                    "line {}: expected key=value",
                    idx + 1
                )));
            };
            values.insert(name.trim().to_string(), value.trim().to_string());
        }

        Ok(Self {
            values,
            source: None,
        })
    }

    /// Value of a setting, if present.
    pub fn get_value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Value of a setting, ignoring blank values.
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get_value(name).filter(|v| !v.trim().is_empty())
    }

    /// File the settings were loaded from.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Where to look for the configuration file.
    ///
    /// `ALMANAC_CONFIG` wins, then `Config/weatherAppConfigFile.json` in the
    /// working directory, then `almanac/config.json` under the user config
    /// directory.
    pub fn locate() -> PathBuf {
        let from_env = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::locate_from(from_env, Path::new(LOCAL_CONFIG_FILE), dirs::config_dir())
    }

    fn locate_from(
        from_env: Option<PathBuf>,
        local: &Path,
        user_config_dir: Option<PathBuf>,
    ) -> PathBuf {
        if let Some(path) = from_env.filter(|p| !p.as_os_str().is_empty()) {
            return path;
        }
        if local.exists() {
            return local.to_path_buf();
        }
        user_config_dir
            .map(|dir| dir.join("almanac").join("config.json"))
            .filter(|p| p.exists())
            .unwrap_or_else(|| local.to_path_buf())
    }
}

/// Typed view of the settings with defaults applied.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub weather_base_url: String,
    pub tides_base_url: String,
    pub uv_index_base_url: String,
    pub solar_flare_base_url: String,

    /// Encrypted API key store
    pub vault_path: PathBuf,

    pub hunting_data_path: PathBuf,
    pub log_file: PathBuf,

    /// When set, each raw monthly tide download is saved here
    pub tide_archive_dir: Option<PathBuf>,

    pub request_timeout_secs: u64,

    /// Whether `EncryptionKey` is present in the settings
    pub encryption_key_configured: bool,

    /// Whether `ALMANAC_VAULT_KEY` was set when the config was built
    pub encryption_key_in_env: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            tides_base_url: DEFAULT_TIDES_BASE_URL.to_string(),
            uv_index_base_url: DEFAULT_UV_INDEX_BASE_URL.to_string(),
            solar_flare_base_url: DEFAULT_SOLAR_FLARE_BASE_URL.to_string(),
            vault_path: PathBuf::from(DEFAULT_VAULT_PATH),
            hunting_data_path: PathBuf::from(DEFAULT_HUNTING_DATA_PATH),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            tide_archive_dir: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            encryption_key_configured: false,
            encryption_key_in_env: false,
        }
    }
}

impl AppConfig {
    /// Build the typed config, falling back to defaults for absent settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        Self::from_sources(settings, std::env::var_os(VAULT_KEY_ENV).is_some())
    }

    /// Same as [`AppConfig::from_settings`] with the presence of the vault
    /// key environment variable given explicitly.
    pub fn from_sources(settings: &Settings, key_in_env: bool) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let text = |name: &str, target: &mut String| {
            if let Some(value) = settings.get_non_empty(name) {
                *target = value.to_string();
            }
        };
        text(names::WEATHER_BASE_URL, &mut config.weather_base_url);
        text(names::TIDES_BASE_URL, &mut config.tides_base_url);
        text(names::UV_INDEX_BASE_URL, &mut config.uv_index_base_url);
        text(names::SOLAR_FLARE_BASE_URL, &mut config.solar_flare_base_url);

        let path = |name: &str, target: &mut PathBuf| {
            if let Some(value) = settings.get_non_empty(name) {
                *target = PathBuf::from(value);
            }
        };
        path(names::VAULT_PATH, &mut config.vault_path);
        path(names::HUNTING_DATA_PATH, &mut config.hunting_data_path);
        path(names::LOG_FILE, &mut config.log_file);

        config.tide_archive_dir = settings
            .get_non_empty(names::TIDE_ARCHIVE_DIR)
            .map(PathBuf::from);

        if let Some(raw) = settings.get_non_empty(names::REQUEST_TIMEOUT_SECS) {
            config.request_timeout_secs = raw.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!(
                    "{} must be a whole number of seconds, got {raw:?}",
                    names::REQUEST_TIMEOUT_SECS
                ))
            })?;
        }

        config.encryption_key_configured = settings.get_non_empty(names::ENCRYPTION_KEY).is_some();
        config.encryption_key_in_env = key_in_env;

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        validate_url(&self.weather_base_url, names::WEATHER_BASE_URL, &mut result);
        validate_url(&self.tides_base_url, names::TIDES_BASE_URL, &mut result);
        validate_url(&self.uv_index_base_url, names::UV_INDEX_BASE_URL, &mut result);
        validate_url(
            &self.solar_flare_base_url,
            names::SOLAR_FLARE_BASE_URL,
            &mut result,
        );

        if self.request_timeout_secs == 0 {
            result.add_error(
                names::REQUEST_TIMEOUT_SECS,
                "Request timeout must be greater than 0",
            );
        } else if self.request_timeout_secs > MAX_REASONABLE_TIMEOUT_SECS {
            result.add_warning(
                names::REQUEST_TIMEOUT_SECS,
                format!("Request timeout is unusually long (>{MAX_REASONABLE_TIMEOUT_SECS}s)"),
            );
        }

        if !self.encryption_key_configured && !self.encryption_key_in_env {
            result.add_warning(
                names::ENCRYPTION_KEY,
                format!(
                    "No encryption key in settings or {VAULT_KEY_ENV}; the system keyring must provide it"
                ),
            );
        }

        result
    }
}

fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }
            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }
        }
        Err(e) => {
            result.add_error(field_name, format!("Invalid URL: {}", e));
        }
    }
}
