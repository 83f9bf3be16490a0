//! ChaCha20-Poly1305 line sealing.
//!
//! A sealed line is `base64(nonce || ciphertext + tag)`. The nonce is drawn
//! from `OsRng` for every line, so each line decrypts on its own with only
//! the key.

use base64::{engine::general_purpose::STANDARD, Engine};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Result, VaultError};

/// Size of the symmetric key in bytes (256 bits).
pub const KEY_SIZE: usize = 32;

/// Size of the per-line nonce in bytes (96 bits).
pub const NONCE_SIZE: usize = 12;

/// A 256-bit vault key. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct VaultKey {
    bytes: [u8; KEY_SIZE],
}

impl VaultKey {
    /// Decode a base64 key.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` if the input is not base64 or does not decode to
    /// exactly 32 bytes.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let mut decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|e| VaultError::InvalidKey(format!("not valid base64: {e}")))?;

        if decoded.len() != KEY_SIZE {
            let actual = decoded.len();
            decoded.zeroize();
            return Err(VaultError::InvalidKey(format!(
                "expected {KEY_SIZE} bytes, got {actual}"
            )));
        }

        let mut bytes = [0u8; KEY_SIZE];
        bytes.copy_from_slice(&decoded);
        decoded.zeroize();
        Ok(Self { bytes })
    }

    fn cipher(&self) -> Result<ChaCha20Poly1305> {
        ChaCha20Poly1305::new_from_slice(&self.bytes)
            .map_err(|e| VaultError::EncryptFailed(format!("cipher init: {e}")))
    }

    /// Encrypt `plaintext` under a fresh nonce and encode it as one line.
    pub(crate) fn seal(&self, plaintext: &[u8]) -> Result<String> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce_bytes);

        let ciphertext = self
            .cipher()?
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
            .map_err(|e| VaultError::EncryptFailed(format!("encrypt: {e}")))?;

        let mut framed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        framed.extend_from_slice(&nonce_bytes);
        framed.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(framed))
    }

    /// Decode and decrypt one sealed line. `None` if the line is not valid
    /// base64, is too short, or fails authentication.
    pub(crate) fn open(&self, line: &str) -> Option<Vec<u8>> {
        let framed = STANDARD.decode(line.trim()).ok()?;
        if framed.len() <= NONCE_SIZE {
            return None;
        }
        let (nonce, ciphertext) = framed.split_at(NONCE_SIZE);
        self.cipher()
            .ok()?
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .ok()
    }
}

impl std::fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VaultKey([REDACTED])")
    }
}
