//! Encryption adapter wrapping the external `gpg` tool.
//!
//! Content is piped through `gpg` with an explicit `--homedir` keystore;
//! envelopes are gpg's armored text format, stored verbatim as gist file
//! content. Encrypted files carry the reserved `.asc` filename suffix.
//!
//! Both operations are stateless per call. Keystore and fingerprint come
//! from configuration and are validated by [`GpgAdapter::for_encrypt`] /
//! [`GpgAdapter::for_decrypt`] before any file is read or any network
//! call is made.

use crate::config::Config;
use crate::error::{GistError, Result};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// Reserved filename suffix marking ciphertext content.
pub const ENCRYPTED_SUFFIX: &str = ".asc";

pub fn encrypted_name(name: &str) -> String {
    format!("{name}{ENCRYPTED_SUFFIX}")
}

pub fn is_encrypted_name(name: &str) -> bool {
    name.ends_with(ENCRYPTED_SUFFIX)
}

pub fn plain_name(name: &str) -> &str {
    name.strip_suffix(ENCRYPTED_SUFFIX).unwrap_or(name)
}

#[derive(Debug)]
pub struct GpgAdapter {
    homedir: PathBuf,
    fingerprint: Option<String>,
}

impl GpgAdapter {
    /// Build an adapter for encryption. Fails fast with a validation
    /// error when `gnupg-homedir` or `gnupg-fingerprint` is not
    /// configured, before any data is touched.
    pub fn for_encrypt(config: &Config) -> Result<Self> {
        let homedir = config.gnupg_homedir.as_deref().ok_or_else(|| {
            GistError::Validation("gnupg-homedir missing from config file".into())
        })?;
        let fingerprint = config.gnupg_fingerprint.as_deref().ok_or_else(|| {
            GistError::Validation("gnupg-fingerprint missing from config file".into())
        })?;
        Ok(Self {
            homedir: PathBuf::from(homedir),
            fingerprint: Some(fingerprint.to_string()),
        })
    }

    /// Build an adapter for decryption. Only the keystore location is
    /// required; the matching secret key is found by gpg itself.
    pub fn for_decrypt(config: &Config) -> Result<Self> {
        let homedir = config.gnupg_homedir.as_deref().ok_or_else(|| {
            GistError::Validation("gnupg-homedir missing from config file".into())
        })?;
        Ok(Self {
            homedir: PathBuf::from(homedir),
            fingerprint: None,
        })
    }

    /// Encrypt one whole-file payload to the configured recipient,
    /// returning the armored envelope.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let fingerprint = self.fingerprint.as_deref().ok_or_else(|| {
            GistError::Validation("gnupg-fingerprint missing from config file".into())
        })?;
        debug!(recipient = fingerprint, "gpg encrypt");
        self.run(
            &[
                "--batch",
                "--yes",
                "--quiet",
                "--armor",
                "--trust-model",
                "always",
                "--recipient",
                fingerprint,
                "--encrypt",
            ],
            plaintext,
            GistError::Encryption,
        )
    }

    /// Decrypt one envelope back to plaintext. A malformed envelope or a
    /// missing secret key fails; gpg never silently returns garbage.
    pub fn decrypt(&self, envelope: &str) -> Result<String> {
        debug!("gpg decrypt");
        self.run(
            &["--batch", "--yes", "--quiet", "--decrypt"],
            envelope,
            GistError::Decryption,
        )
    }

    fn run(
        &self,
        args: &[&str],
        input: &str,
        mk_err: impl Fn(String) -> GistError,
    ) -> Result<String> {
        let mut child = Command::new("gpg")
            .arg("--homedir")
            .arg(&self.homedir)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| mk_err(format!("failed to run gpg: {e}")))?;

        child
            .stdin
            .take()
            .expect("stdin was piped")
            .write_all(input.as_bytes())
            .map_err(|e| mk_err(format!("failed to write to gpg: {e}")))?;

        let output = child
            .wait_with_output()
            .map_err(|e| mk_err(format!("failed to wait for gpg: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(mk_err(stderr.trim().to_string()));
        }

        String::from_utf8(output.stdout)
            .map_err(|_| mk_err("gpg produced non-UTF-8 output".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypted_name_suffix() {
        assert_eq!(encrypted_name("notes.txt"), "notes.txt.asc");
        assert!(is_encrypted_name("notes.txt.asc"));
        assert!(!is_encrypted_name("notes.txt"));
        assert_eq!(plain_name("notes.txt.asc"), "notes.txt");
        assert_eq!(plain_name("notes.txt"), "notes.txt");
    }

    #[test]
    fn test_for_encrypt_requires_homedir_and_fingerprint() {
        let cfg = Config::default();
        assert!(matches!(
            GpgAdapter::for_encrypt(&cfg),
            Err(GistError::Validation(_))
        ));

        let cfg = Config {
            gnupg_homedir: Some("/tmp/keys".into()),
            ..Default::default()
        };
        let err = GpgAdapter::for_encrypt(&cfg).unwrap_err();
        assert!(err.to_string().contains("gnupg-fingerprint"));
    }

    #[test]
    fn test_for_decrypt_requires_homedir_only() {
        let cfg = Config {
            gnupg_homedir: Some("/tmp/keys".into()),
            ..Default::default()
        };
        assert!(GpgAdapter::for_decrypt(&cfg).is_ok());
    }
}
