use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GistError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("gist not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("clone failed: {0}")]
    Clone(String),

    #[error("push rejected: {reason} (working copy preserved at {preserved})")]
    Push { reason: String, preserved: PathBuf },

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("decryption failed: {0}")]
    Decryption(String),

    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GistError>;
