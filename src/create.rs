//! # Create Flow
//!
//! Gathers file content from exactly one source (explicit paths, an ad
//! hoc editor session, or piped stdin, in that static precedence), then
//! optionally encrypts every file and calls the remote create operation.
//!
//! When encryption is requested, the gnupg configuration is validated
//! before any file is read, so a config typo can never leave behind a
//! half-created gist.

use crate::config::Config;
use crate::error::{GistError, Result};
use crate::gpg::{encrypted_name, GpgAdapter};
use crate::remote::{Gist, GistFile, RemoteClient};
use crate::session::launch_editor;
use std::collections::BTreeMap;
use std::fs;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing::debug;

/// Default name for content gathered from the editor or stdin.
const DEFAULT_FILENAME: &str = "file1.txt";

pub fn create_gist(
    client: &RemoteClient,
    config: &Config,
    description: &str,
    paths: &[PathBuf],
    public: bool,
    encrypt: bool,
) -> Result<Gist> {
    // Fail fast: validate the keystore configuration before any file is
    // read or any network call is made.
    let adapter = if encrypt {
        Some(GpgAdapter::for_encrypt(config)?)
    } else {
        None
    };

    let files = gather_files(paths, config)?;

    let files = match &adapter {
        Some(adapter) => encrypt_files(adapter, files)?,
        None => files,
    };

    client.create(description, &files, public)
}

/// Resolve the input source and read it. Exactly one source is used:
/// explicit paths win over the editor, which wins over piped stdin.
fn gather_files(paths: &[PathBuf], config: &Config) -> Result<BTreeMap<String, GistFile>> {
    let mut files = BTreeMap::new();

    if !paths.is_empty() {
        debug!("reading from files");
        for path in paths {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| {
                    GistError::Validation(format!("invalid file name: {}", path.display()))
                })?
                .to_string();
            let content = fs::read_to_string(path)?;
            files.insert(name, GistFile::new(content));
        }
    } else if std::io::stdin().is_terminal() {
        debug!("reading from editor");
        let editor = config.resolve_editor()?;
        let scratch = tempfile::NamedTempFile::new()?;
        launch_editor(&editor, scratch.path())?;
        let content = fs::read_to_string(scratch.path())?;
        files.insert(DEFAULT_FILENAME.to_string(), GistFile::new(content));
    } else {
        debug!("reading from stdin");
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        files.insert(DEFAULT_FILENAME.to_string(), GistFile::new(content));
    }

    Ok(files)
}

fn encrypt_files(
    adapter: &GpgAdapter,
    files: BTreeMap<String, GistFile>,
) -> Result<BTreeMap<String, GistFile>> {
    debug!(count = files.len(), "encrypting content");
    let mut encrypted = BTreeMap::new();
    for (name, file) in files {
        let plaintext = file.content.unwrap_or_default();
        let envelope = adapter.encrypt(&plaintext)?;
        encrypted.insert(encrypted_name(&name), GistFile::new(envelope));
    }
    Ok(encrypted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_explicit_paths_take_precedence() {
        let mut foo = tempfile::NamedTempFile::new().unwrap();
        writeln!(foo, "foo content").unwrap();

        let config = Config::default();
        let files = gather_files(&[foo.path().to_path_buf()], &config).unwrap();
        assert_eq!(files.len(), 1);
        let name = foo.path().file_name().unwrap().to_str().unwrap();
        assert_eq!(files[name].content.as_deref(), Some("foo content\n"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let config = Config::default();
        let paths = [PathBuf::from("/no/such/file.txt")];
        assert!(matches!(
            gather_files(&paths, &config),
            Err(GistError::Io(_))
        ));
    }

    #[test]
    fn test_encrypt_without_fingerprint_fails_before_reading() {
        // The path does not exist: if validation happened after the
        // read, this would be an I/O error instead.
        let client = RemoteClient::new("http://127.0.0.1:1", "t").unwrap();
        let config = Config {
            gnupg_homedir: Some("/tmp/keys".into()),
            ..Default::default()
        };
        let paths = [PathBuf::from("/no/such/secret.txt")];
        let err = create_gist(&client, &config, "d", &paths, false, true).unwrap_err();
        assert!(matches!(err, GistError::Validation(_)));
        assert!(err.to_string().contains("gnupg-fingerprint"));
    }
}
