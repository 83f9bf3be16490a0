//! Finding each provider's API key.
//!
//! The settings file wins so a corrected key takes effect on the next run.
//! The vault covers keys missing from settings, and anything typed at the
//! prompt is written there for later runs.

use std::io::{BufRead, Write};

use almanac_core::{names, AppError, Settings};
use almanac_vault::SecretVault;

/// Where a provider's key lives and where to get one.
#[derive(Debug, Clone, Copy)]
pub struct ApiKeyEntry {
    /// Setting name, also used as the vault entry key
    pub name: &'static str,
    pub service: &'static str,
    pub signup_url: &'static str,
}

pub const WEATHER: ApiKeyEntry = ApiKeyEntry {
    name: names::WEATHER_API_KEY,
    service: "OpenWeatherMap",
    signup_url: "https://home.openweathermap.org/users/sign_up",
};

pub const TIDES: ApiKeyEntry = ApiKeyEntry {
    name: names::TIDE_API_KEY,
    service: "NIWA Tides",
    signup_url: "https://developer.niwa.co.nz",
};

pub const UV_INDEX: ApiKeyEntry = ApiKeyEntry {
    name: names::UV_INDEX_API_KEY,
    service: "NIWA UV",
    signup_url: "https://developer.niwa.co.nz",
};

pub const SOLAR_FLARE: ApiKeyEntry = ApiKeyEntry {
    name: names::SOLAR_FLARE_API_KEY,
    service: "NASA DONKI",
    signup_url: "https://api.nasa.gov",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOrigin {
    Vault,
    Settings,
    Prompt,
}

/// Resolve the key for `entry`: settings, then the vault, then the prompt.
///
/// Returns `None` after telling the user where to register when no source
/// has a key. Vault failures are logged and reported but do not stop the
/// lookup.
pub fn resolve_api_key(
    entry: &ApiKeyEntry,
    vault: &SecretVault,
    settings: &Settings,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Option<(KeyOrigin, String)>, AppError> {
    let stored = match vault.read_latest(entry.name) {
        Ok(stored) => stored.filter(|key| !key.trim().is_empty()),
        Err(e) => {
            tracing::error!("Reading {} from vault failed: {}", entry.name, e);
            writeln!(out, "{}", e.user_message())?;
            None
        }
    };

    if let Some(key) = settings.get_non_empty(entry.name) {
        tracing::info!("{} key taken from settings", entry.service);
        if stored.as_deref() != Some(key) {
            persist(entry, vault, key, out)?;
        }
        return Ok(Some((KeyOrigin::Settings, key.to_string())));
    }

    if let Some(key) = stored {
        tracing::debug!("{} key found in vault", entry.service);
        return Ok(Some((KeyOrigin::Vault, key)));
    }

    let typed = crate::prompt::ask(
        input,
        out,
        &format!("Enter your {} API key (leave blank to skip): ", entry.service),
    )?;
    if !typed.is_empty() {
        persist(entry, vault, &typed, out)?;
        return Ok(Some((KeyOrigin::Prompt, typed)));
    }

    tracing::warn!("No {} API key available", entry.service);
    writeln!(
        out,
        "No {} API key configured. Register for an API key at {}",
        entry.service, entry.signup_url
    )?;
    Ok(None)
}

fn persist(
    entry: &ApiKeyEntry,
    vault: &SecretVault,
    key: &str,
    out: &mut impl Write,
) -> Result<(), AppError> {
    if let Err(e) = vault.write(entry.name, key) {
        tracing::error!("Saving {} to vault failed: {}", entry.name, e);
        writeln!(out, "{}", e.user_message())?;
    }
    Ok(())
}
