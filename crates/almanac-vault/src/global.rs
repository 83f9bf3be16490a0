//! Process-wide vault handle.
//!
//! Exactly one vault can be installed per process. Code that can take a
//! `&SecretVault` argument should; this module exists for call sites that
//! cannot have one threaded through.

use std::path::Path;
use std::sync::OnceLock;

use crate::error::{Result, VaultError};
use crate::store::SecretVault;

static VAULT: OnceLock<SecretVault> = OnceLock::new();

/// Open the vault and install it as the process-wide instance.
///
/// # Errors
/// `AlreadyInitialized` on any call after a successful one, otherwise the
/// errors of [`SecretVault::open`].
pub fn initialize(path: impl AsRef<Path>, encryption_key: &str) -> Result<&'static SecretVault> {
    if VAULT.get().is_some() {
        return Err(VaultError::AlreadyInitialized);
    }
    install(SecretVault::open(path, encryption_key)?)
}

/// Install an already opened vault as the process-wide instance.
///
/// # Errors
/// `AlreadyInitialized` if an instance exists, including when another
/// thread won a concurrent race.
pub fn install(vault: SecretVault) -> Result<&'static SecretVault> {
    let path = vault.path().to_path_buf();
    VAULT
        .set(vault)
        .map_err(|_| VaultError::AlreadyInitialized)?;

    tracing::info!("Vault initialized at {:?}", path);
    instance()
}

/// The process-wide vault.
///
/// # Errors
/// `NotInitialized` before a successful [`initialize`] or [`install`].
pub fn instance() -> Result<&'static SecretVault> {
    VAULT.get().ok_or(VaultError::NotInitialized)
}
