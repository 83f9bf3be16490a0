//! Append-only encrypted key-value file, one sealed `key=value` entry per line.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use crate::cipher::VaultKey;
use crate::error::{Result, VaultError};

/// How `read` treats lines that fail to decrypt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VaultOptions {
    /// Fail the whole scan on the first bad line instead of skipping it.
    pub strict: bool,
}

/// File-backed store of encrypted `key=value` entries.
///
/// Writes append one sealed line per call and never rewrite existing lines.
/// Reads decrypt the file top to bottom, so lookups are O(lines).
#[derive(Debug)]
pub struct SecretVault {
    path: PathBuf,
    key: VaultKey,
    options: VaultOptions,
}

impl SecretVault {
    /// Open a vault at `path` with a base64-encoded 256-bit key.
    ///
    /// Does not touch the file system; a missing file reads as empty.
    ///
    /// # Errors
    /// `InvalidPath` for an empty path, `InvalidKey` for bad key material.
    pub fn open(path: impl AsRef<Path>, encryption_key: &str) -> Result<Self> {
        Self::open_with_options(path, encryption_key, VaultOptions::default())
    }

    /// Open a vault with explicit options.
    ///
    /// # Errors
    /// Same as [`SecretVault::open`].
    pub fn open_with_options(
        path: impl AsRef<Path>,
        encryption_key: &str,
        options: VaultOptions,
    ) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(VaultError::InvalidPath);
        }

        let key = VaultKey::from_base64(encryption_key)?;

        tracing::debug!("Opened vault at {:?} (strict: {})", path, options.strict);
        Ok(Self {
            path: path.to_path_buf(),
            key,
            options,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an encrypted `key=value` line.
    ///
    /// A second write for the same key adds another line; see [`read`] and
    /// [`read_latest`] for which one wins.
    ///
    /// [`read`]: SecretVault::read
    /// [`read_latest`]: SecretVault::read_latest
    ///
    /// # Errors
    /// `InvalidEntryKey` for keys that cannot round-trip, `WriteFailed` for
    /// any I/O error.
    pub fn write(&self, key: &str, value: &str) -> Result<()> {
        if key.is_empty() || key.contains('=') || key.contains(['\n', '\r']) {
            return Err(VaultError::InvalidEntryKey(key.to_string()));
        }

        let plaintext = Zeroizing::new(format!("{key}={value}"));
        let mut line = self.key.seal(plaintext.as_bytes())?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(VaultError::WriteFailed)?;
        file.write_all(line.as_bytes())
            .map_err(VaultError::WriteFailed)?;

        tracing::debug!("Stored vault entry {} in {:?}", key, self.path);
        Ok(())
    }

    /// Value of the first line whose key matches, or `None`.
    ///
    /// # Errors
    /// `ReadFailed` for I/O errors; `DecryptFailed` in strict mode when a
    /// bad line is reached before a match.
    pub fn read(&self, key: &str) -> Result<Option<String>> {
        let mut found = None;
        self.scan(|entry_key, value| {
            if entry_key == key {
                found = Some(value);
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })?;
        Ok(found)
    }

    /// Value of the last line whose key matches, or `None`.
    ///
    /// # Errors
    /// Same as [`SecretVault::read`], except the whole file is always scanned.
    pub fn read_latest(&self, key: &str) -> Result<Option<String>> {
        let mut found = None;
        self.scan(|entry_key, value| {
            if entry_key == key {
                found = Some(value);
            }
            ControlFlow::Continue(())
        })?;
        Ok(found)
    }

    /// Distinct keys in first-seen order.
    ///
    /// # Errors
    /// Same as [`SecretVault::read_latest`].
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = Vec::new();
        self.scan(|entry_key, _| {
            if !keys.iter().any(|k| k == &entry_key) {
                keys.push(entry_key);
            }
            ControlFlow::Continue(())
        })?;
        Ok(keys)
    }

    /// Decrypt lines in file order, handing each entry to `visit` until it
    /// breaks.
    fn scan<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(String, String) -> ControlFlow<()>,
    {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(VaultError::ReadFailed(e)),
        };

        for (idx, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let line_no = idx + 1;

            let Some((entry_key, value)) = self.decode_line(line) else {
                if self.options.strict {
                    return Err(VaultError::DecryptFailed { line: line_no });
                }
                tracing::warn!(
                    "Skipping undecryptable line {} in {:?}",
                    line_no,
                    self.path
                );
                continue;
            };

            if visit(entry_key, value).is_break() {
                break;
            }
        }

        Ok(())
    }

    fn decode_line(&self, line: &str) -> Option<(String, String)> {
        let plaintext = Zeroizing::new(self.key.open(line)?);
        let text = std::str::from_utf8(&plaintext).ok()?;
        let (key, value) = text.split_once('=')?;
        Some((key.to_string(), value.to_string()))
    }
}
