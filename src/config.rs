//! Configuration file loading and editor resolution.
//!
//! The config file is TOML, looked up in order:
//! 1. the path in the `GIST_CONFIG` environment variable,
//! 2. `$XDG_CONFIG_HOME/gist/config.toml` (or the platform equivalent),
//! 3. `~/.gist.toml`.
//!
//! Recognized keys: `token`, `editor`, `log-level`, `gnupg-homedir`,
//! `gnupg-fingerprint`, and `api-url` (the latter mainly for testing
//! against a non-default endpoint).

use crate::error::{GistError, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub token: Option<String>,
    pub editor: Option<String>,
    pub log_level: Option<String>,
    pub gnupg_homedir: Option<String>,
    pub gnupg_fingerprint: Option<String>,
    pub api_url: Option<String>,
}

impl Config {
    /// Load the configuration from the first config file found.
    ///
    /// A missing file is not an error; all keys default to unset and are
    /// validated by the commands that need them.
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => Self::from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| GistError::Config(format!("{}: {}", path.display(), e)))
    }

    /// The bearer credential used for every remote call.
    pub fn token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| GistError::Config("token missing from config file".into()))
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Resolve the editor command: config key, then `$EDITOR`, then the
    /// system alternatives editor.
    pub fn resolve_editor(&self) -> Result<String> {
        if let Some(editor) = &self.editor {
            return Ok(editor.clone());
        }
        if let Ok(editor) = env::var("EDITOR") {
            let editor = editor.trim();
            if !editor.is_empty() {
                return Ok(editor.to_string());
            }
        }
        if Path::new("/usr/bin/editor").exists() {
            return Ok("/usr/bin/editor".to_string());
        }
        Err(GistError::Config("unable to find an editor".into()))
    }
}

fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("GIST_CONFIG") {
        return Some(PathBuf::from(path));
    }
    if let Some(dir) = dirs::config_dir() {
        let path = dir.join("gist").join("config.toml");
        if path.is_file() {
            return Some(path);
        }
    }
    if let Some(home) = dirs::home_dir() {
        let path = home.join(".gist.toml");
        if path.is_file() {
            return Some(path);
        }
    }
    None
}
