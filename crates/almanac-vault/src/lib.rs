//! Encrypted key-value store for locally cached API keys.
//!
//! Each entry is one line in a text file: `base64(nonce || ciphertext)` of
//! the plaintext `key=value`. The file is append-only and every read rescans
//! it from the top.

pub mod cipher;
pub mod error;
pub mod global;
pub mod store;

pub use cipher::{VaultKey, KEY_SIZE, NONCE_SIZE};
pub use error::{Result, VaultError};
pub use global::{initialize, install, instance};
pub use store::{SecretVault, VaultOptions};
