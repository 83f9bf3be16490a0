//! Lifecycle of the process-wide vault.
//!
//! Kept in its own test binary with a single test so the global state is
//! not shared with other tests.

use almanac_vault::{initialize, instance, SecretVault, VaultError};
use base64::{engine::general_purpose::STANDARD, Engine};

#[test]
fn test_global_vault_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let key = STANDARD.encode([11u8; 32]);

    // Uninitialized
    assert!(matches!(instance(), Err(VaultError::NotInitialized)));

    // A failed initialize leaves the process uninitialized
    assert!(matches!(
        initialize(dir.path().join("store.bin"), "short"),
        Err(VaultError::InvalidKey(_))
    ));
    assert!(matches!(instance(), Err(VaultError::NotInitialized)));

    // Ready
    let vault = initialize(dir.path().join("store.bin"), &key).unwrap();
    vault.write("WeatherApiKey", "abc123").unwrap();

    let same = instance().unwrap();
    assert!(std::ptr::eq(vault, same));
    assert_eq!(same.read("WeatherApiKey").unwrap().as_deref(), Some("abc123"));

    // Ready is terminal
    assert!(matches!(
        initialize(dir.path().join("other.bin"), &key),
        Err(VaultError::AlreadyInitialized)
    ));
    let second = SecretVault::open(dir.path().join("other.bin"), &key).unwrap();
    assert!(matches!(
        almanac_vault::install(second),
        Err(VaultError::AlreadyInitialized)
    ));

    // Racing initializers: none of them may replace the installed vault
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let path = dir.path().join(format!("race-{i}.bin"));
            let key = key.clone();
            std::thread::spawn(move || initialize(path, &key).is_ok())
        })
        .collect();
    for handle in handles {
        assert!(!handle.join().unwrap());
    }
    assert_eq!(instance().unwrap().path(), dir.path().join("store.bin"));
}
