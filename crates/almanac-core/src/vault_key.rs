//! Where the vault's encryption key comes from.
//!
//! Lookup order: the `ALMANAC_VAULT_KEY` environment variable, the system
//! keyring, then the `EncryptionKey` setting. The key is never compiled in.

use crate::config::{names, Settings, VAULT_KEY_ENV};

pub const KEYRING_SERVICE: &str = "almanac";
pub const KEYRING_USER: &str = "vault-key";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Environment,
    Keyring,
    Settings,
}

impl std::fmt::Display for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeySource::Environment => write!(f, "{VAULT_KEY_ENV}"),
            KeySource::Keyring => write!(f, "system keyring"),
            KeySource::Settings => write!(f, "{} setting", names::ENCRYPTION_KEY),
        }
    }
}

/// Resolve the base64 vault key from the first source that has one.
pub fn resolve(settings: &Settings) -> Option<(KeySource, String)> {
    resolve_with(std::env::var(VAULT_KEY_ENV).ok(), keyring_lookup, settings)
}

fn resolve_with(
    from_env: Option<String>,
    from_keyring: impl FnOnce() -> Option<String>,
    settings: &Settings,
) -> Option<(KeySource, String)> {
    if let Some(key) = from_env.filter(|k| !k.trim().is_empty()) {
        return Some((KeySource::Environment, key));
    }
    if let Some(key) = from_keyring().filter(|k| !k.trim().is_empty()) {
        return Some((KeySource::Keyring, key));
    }
    settings
        .get_non_empty(names::ENCRYPTION_KEY)
        .map(|key| (KeySource::Settings, key.to_string()))
}

fn keyring_lookup() -> Option<String> {
    match keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER).and_then(|e| e.get_password()) {
        Ok(key) => Some(key),
        Err(keyring::Error::NoEntry) => None,
        Err(e) => {
            tracing::debug!("System keyring unavailable: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with_key() -> Settings {
        Settings::parse("EncryptionKey=from-settings=\n").unwrap()
    }

    #[test]
    fn test_env_wins() {
        let resolved = resolve_with(
            Some("from-env".into()),
            || Some("from-keyring".into()),
            &settings_with_key(),
        );
        assert_eq!(resolved, Some((KeySource::Environment, "from-env".into())));
    }

    #[test]
    fn test_keyring_before_settings() {
        let resolved = resolve_with(None, || Some("from-keyring".into()), &settings_with_key());
        assert_eq!(resolved, Some((KeySource::Keyring, "from-keyring".into())));
    }

    #[test]
    fn test_blank_sources_fall_through() {
        let resolved = resolve_with(Some("  ".into()), || Some(String::new()), &settings_with_key());
        assert_eq!(
            resolved,
            Some((KeySource::Settings, "from-settings=".into()))
        );
    }

    #[test]
    fn test_no_source() {
        assert_eq!(resolve_with(None, || None, &Settings::default()), None);
    }
}
