use std::path::Path;

use almanac_vault::SecretVault;
use anyhow::Result;

use crate::config::{names, AppConfig, Settings};
use crate::error::{AppError, ConfigError};
use crate::vault_key;

/// Loaded settings and the typed config derived from them.
pub struct App {
    settings: Settings,
    config: AppConfig,
}

impl App {
    /// Load settings from the located configuration file.
    ///
    /// Nothing is logged here; call [`crate::init`] with the configured log
    /// file and then [`App::initialize`].
    pub fn load() -> Result<Self, AppError> {
        Self::load_from(Settings::locate())
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let settings = Settings::load(path)?;
        Self::from_settings(settings)
    }

    pub fn from_settings(settings: Settings) -> Result<Self, AppError> {
        let config = AppConfig::from_settings(&settings)?;
        Ok(Self { settings, config })
    }

    /// Validate the configuration, logging warnings and failing on errors.
    pub fn initialize(&self) -> Result<()> {
        if let Some(source) = self.settings.source() {
            tracing::info!("Configuration loaded from {}", source.display());
        }

        let validation = self.config.validate();
        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }
        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        tracing::info!("Application initialized successfully");
        Ok(())
    }

    /// Open the API key vault with the first available encryption key.
    pub fn open_vault(&self) -> Result<SecretVault, AppError> {
        let (source, key) = vault_key::resolve(&self.settings)
            .ok_or_else(|| ConfigError::MissingSetting(names::ENCRYPTION_KEY.to_string()))?;
        tracing::info!("Using vault key from {}", source);

        Ok(SecretVault::open(&self.config.vault_path, &key)?)
    }

    pub fn shutdown(&self) {
        tracing::info!("Application finished");
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = App::load_from(dir.path().join("missing.json")).err().unwrap();
        assert!(matches!(err, AppError::Config(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_initialize_rejects_bad_url() {
        let settings = Settings::parse("WeatherBaseUrl=nowhere\n").unwrap();
        let app = App::from_settings(settings).unwrap();
        assert!(app.initialize().is_err());
    }

    #[test]
    fn test_open_vault_from_settings_key() {
        let dir = tempfile::tempdir().unwrap();
        let vault_path = dir.path().join("security.sys");
        // 32 zero bytes
        let key = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";
        let settings = Settings::parse(&format!(
            "EncryptionKey={key}\nVaultPath={}\n",
            vault_path.display()
        ))
        .unwrap();

        let app = App::from_settings(settings).unwrap();
        app.initialize().unwrap();
        let vault = app.open_vault().unwrap();
        assert_eq!(vault.path(), vault_path.as_path());
    }
}
