//! Encryption adapter tests against a real gpg binary.
//!
//! Each test provisions its own throwaway keystore. When no `gpg` is on
//! the PATH the tests are skipped rather than failed.

use gist::config::Config;
use gist::gpg::GpgAdapter;
use gist::GistError;
use serial_test::serial;
use std::process::Command;
use tempfile::TempDir;

fn gpg_available() -> bool {
    Command::new("gpg").arg("--version").output().is_ok()
}

fn empty_keystore() -> TempDir {
    let home = TempDir::new().unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(home.path(), std::fs::Permissions::from_mode(0o700)).unwrap();
    }
    home
}

/// Generate a fresh key with no passphrase and return its fingerprint.
fn keystore_with_key() -> Option<(TempDir, String)> {
    let home = empty_keystore();
    let homedir = home.path().to_str().unwrap();
    let generated = Command::new("gpg")
        .args([
            "--homedir",
            homedir,
            "--batch",
            "--pinentry-mode",
            "loopback",
            "--passphrase",
            "",
            "--quick-generate-key",
            "gist-test@example.com",
            "default",
            "default",
            "never",
        ])
        .output()
        .ok()?;
    if !generated.status.success() {
        return None;
    }

    let listed = Command::new("gpg")
        .args(["--homedir", homedir, "--list-keys", "--with-colons"])
        .output()
        .ok()?;
    let fingerprint = String::from_utf8_lossy(&listed.stdout)
        .lines()
        .find(|l| l.starts_with("fpr:"))?
        .split(':')
        .nth(9)?
        .to_string();
    Some((home, fingerprint))
}

fn config_for(home: &TempDir, fingerprint: Option<&str>) -> Config {
    Config {
        gnupg_homedir: Some(home.path().to_str().unwrap().to_string()),
        gnupg_fingerprint: fingerprint.map(|f| f.to_string()),
        ..Default::default()
    }
}

// Key generation is serialized: parallel generations can starve the
// system entropy pool on CI machines.
#[test]
#[serial]
fn test_encrypt_decrypt_round_trip() {
    let Some((home, fingerprint)) = keystore_with_key() else {
        eprintln!("skipping: gpg not available");
        return;
    };
    let config = config_for(&home, Some(&fingerprint));

    let encryptor = GpgAdapter::for_encrypt(&config).unwrap();
    let envelope = encryptor.encrypt("this is the plaintext\n").unwrap();
    assert!(envelope.contains("BEGIN PGP MESSAGE"));
    assert!(!envelope.contains("plaintext"));

    let decryptor = GpgAdapter::for_decrypt(&config).unwrap();
    assert_eq!(decryptor.decrypt(&envelope).unwrap(), "this is the plaintext\n");
}

#[test]
fn test_malformed_envelope_fails_never_returns_garbage() {
    if !gpg_available() {
        eprintln!("skipping: gpg not available");
        return;
    }
    let home = empty_keystore();
    let config = config_for(&home, None);

    let adapter = GpgAdapter::for_decrypt(&config).unwrap();
    let err = adapter.decrypt("this is not an envelope").unwrap_err();
    assert!(matches!(err, GistError::Decryption(_)));
}

#[test]
fn test_unknown_recipient_fails_encryption() {
    if !gpg_available() {
        eprintln!("skipping: gpg not available");
        return;
    }
    let home = empty_keystore();
    let config = config_for(&home, Some("0000000000000000000000000000000000000000"));

    let adapter = GpgAdapter::for_encrypt(&config).unwrap();
    let err = adapter.encrypt("secret").unwrap_err();
    assert!(matches!(err, GistError::Encryption(_)));
}

#[test]
#[serial]
fn test_unicode_round_trip() {
    let Some((home, fingerprint)) = keystore_with_key() else {
        eprintln!("skipping: gpg not available");
        return;
    };
    let config = config_for(&home, Some(&fingerprint));

    let encryptor = GpgAdapter::for_encrypt(&config).unwrap();
    let decryptor = GpgAdapter::for_decrypt(&config).unwrap();
    let plaintext = "abecedarian pericombobulations — ¡ünïcodé!\n";
    let envelope = encryptor.encrypt(plaintext).unwrap();
    assert_eq!(decryptor.decrypt(&envelope).unwrap(), plaintext);
}
