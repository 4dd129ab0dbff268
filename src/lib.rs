//! # gist
//!
//! A command-line client for GitHub gists: create, list, fetch, edit,
//! fork, delete, and archive small named collections of text files,
//! optionally encrypting file contents with GPG.
//!
//! ## Commands
//!
//! - `list` - list your gists (`<id> <+|-> <description>`)
//! - `edit <id>` - clone a gist to a temporary checkout, open your
//!   editor on it, and push the changes back
//! - `description <id> <desc>` - update a gist's description
//! - `info <id>` - dump a gist as raw JSON
//! - `fork <id>` - fork a gist
//! - `files <id>` - list the files in a gist
//! - `delete <ids>...` - delete gists
//! - `archive <id>` - download a gist as `<id>.tar.gz`
//! - `content <id> [<filename>] [--decrypt]` - print file contents
//! - `create <desc> [--public] [--encrypt] [FILES...]` - create a gist
//!   from files, your editor, or piped stdin
//! - `clone <id> [<name>]` - clone a gist into the current directory
//! - `version` - print the version
//!
//! ## Configuration
//!
//! A TOML file at `~/.config/gist/config.toml` (or `~/.gist.toml`, or
//! the path in `$GIST_CONFIG`):
//!
//! ```toml
//! token = "<github personal access token>"
//! editor = "vim"               # optional; falls back to $EDITOR
//! log-level = "debug"          # optional
//! gnupg-homedir = "~/.gnupg"   # required for --encrypt / --decrypt
//! gnupg-fingerprint = "..."    # required for --encrypt
//! ```
//!
//! ## Editing
//!
//! `gist edit` clones the gist into a private temporary directory,
//! suspends until the editor exits, and decides what to do purely from
//! the resulting diff: no changes means no network traffic at all, and
//! changes are committed with a fixed message and pushed. The temporary
//! directory is always removed, with one exception: if the remote
//! rejects the push the directory is kept and its path printed, so the
//! edits are not lost.
//!
//! ## Encryption
//!
//! `--encrypt` pipes each file through the external `gpg` tool before
//! upload and stores the armored envelope under the file's name plus a
//! reserved `.asc` suffix; `content --decrypt` reverses it. The gnupg
//! configuration is checked before anything is read or sent, so a typo
//! cannot leave a half-created gist behind.
//!
//! ## Module Overview
//!
//! - [`remote`] - authenticated HTTP operations against the gist API
//! - [`session`] - the clone → edit → diff → commit → push state machine
//! - [`workcopy`] - temporary git checkouts with guaranteed cleanup
//! - [`create`] - the create flow and its input-source precedence
//! - [`gpg`] - the external-gpg encryption adapter
//! - [`config`] - config-file loading and editor resolution
//! - [`error`] - error types and unified error handling

pub mod commands;
pub mod config;
pub mod create;
pub mod error;
pub mod gpg;
pub mod remote;
pub mod session;
pub mod workcopy;

pub use config::Config;
pub use error::{GistError, Result};
pub use remote::{Gist, GistFile, RemoteClient};
pub use session::{EditSession, SessionOutcome, SessionState};
pub use workcopy::WorkingCopy;
