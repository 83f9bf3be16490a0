//! Vault error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Vault has already been initialized")]
    AlreadyInitialized,

    #[error("Vault is not initialized. Call initialize() first")]
    NotInitialized,

    #[error("Invalid encryption key: {0}")]
    InvalidKey(String),

    #[error("Vault path must not be empty")]
    InvalidPath,

    #[error("Invalid entry key {0:?}: must be non-empty and contain no '=' or line breaks")]
    InvalidEntryKey(String),

    #[error("Failed to write vault entry: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("Failed to read vault file: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Vault line {line} could not be decrypted")]
    DecryptFailed { line: usize },

    #[error("Encryption failed: {0}")]
    EncryptFailed(String),
}

impl VaultError {
    /// User-friendly error message for console display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::AlreadyInitialized => "The key store is already open.",
            Self::NotInitialized => "The key store has not been opened yet.",
            Self::InvalidKey(_) => {
                "The encryption key is invalid. It must be 32 bytes, base64-encoded."
            }
            Self::InvalidPath => "No key store file was configured.",
            Self::InvalidEntryKey(_) => "That key name cannot be stored.",
            Self::WriteFailed(_) => "Failed to save the key. Check file permissions and disk space.",
            Self::ReadFailed(_) => "Failed to read the key store file.",
            Self::DecryptFailed { .. } => {
                "The key store could not be decrypted. Was it written with another key?"
            }
            Self::EncryptFailed(_) => "Failed to encrypt the key.",
        }
    }
}

pub type Result<T> = std::result::Result<T, VaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decrypt_failed_names_line() {
        let err = VaultError::DecryptFailed { line: 3 };
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_write_failed_keeps_source() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = VaultError::WriteFailed(io);
        assert!(err.source().is_some());
        assert!(err.user_message().contains("permissions"));
    }
}
