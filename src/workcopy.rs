//! # Working-Copy Manager
//!
//! Materializes a gist into a private temporary directory backed by a git
//! checkout, and guarantees cleanup.
//!
//! A [`WorkingCopy`] is owned by exactly one edit session and is removed
//! when it goes out of scope, on every exit path. The single exception is
//! [`WorkingCopy::keep`], which detaches the directory so user edits
//! survive a rejected push.

use crate::error::{GistError, Result};
use git2::build::RepoBuilder;
use git2::{Cred, FetchOptions, PushOptions, RemoteCallbacks, Repository, StatusOptions};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

pub struct WorkingCopy {
    dir: TempDir,
    repo: Repository,
}

impl WorkingCopy {
    /// Clone the gist's git URL into a fresh temporary directory.
    ///
    /// On failure the partially created directory is removed before the
    /// error is returned.
    pub fn materialize(url: &str, token: Option<&str>) -> Result<Self> {
        let dir = TempDir::new()?;
        debug!(url, path = %dir.path().display(), "materialize working copy");
        let repo = clone_into(url, dir.path(), token)
            .map_err(|e| GistError::Clone(e.message().to_string()))?;
        Ok(Self { dir, repo })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// True when any tracked file differs from the checkout, or an
    /// untracked file appeared. Covers mixed staged/unstaged sets.
    pub fn has_changes(&self) -> Result<bool> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true).recurse_untracked_dirs(true);
        let statuses = self.repo.statuses(Some(&mut opts))?;
        Ok(!statuses.is_empty())
    }

    /// Stage everything and record a commit. Fails if no committer
    /// identity is configured; the working copy is not auto-fixed.
    pub fn commit_all(&self, message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)?;
        index.write()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let sig = self.repo.signature()?;
        let parent = self.repo.head()?.peel_to_commit()?;
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent])?;
        debug!(message, "recorded commit");
        Ok(())
    }

    /// Push HEAD back to the gist remote. A rejection (for example a
    /// concurrent remote update) maps to [`GistError::Push`] carrying
    /// this working copy's path.
    pub fn push(&self, token: Option<&str>) -> Result<()> {
        let mut remote = self.repo.find_remote("origin")?;
        let head = self.repo.head()?;
        let refname = head
            .name()
            .ok_or_else(|| GistError::Clone("HEAD is not a named branch".into()))?
            .to_string();

        let rejected: RefCell<Option<String>> = RefCell::new(None);
        let mut callbacks = auth_callbacks(token);
        callbacks.push_update_reference(|name, status| {
            if let Some(msg) = status {
                *rejected.borrow_mut() = Some(format!("{name}: {msg}"));
            }
            Ok(())
        });
        let mut opts = PushOptions::new();
        opts.remote_callbacks(callbacks);

        let refspec = format!("{refname}:{refname}");
        debug!(refspec, "push");
        let pushed = remote.push(&[refspec.as_str()], Some(&mut opts));

        // opts still holds the callback's borrow of `rejected`, so take
        // the value out instead of consuming the cell.
        let reason = match pushed {
            Err(e) => Some(e.message().to_string()),
            Ok(()) => rejected.borrow_mut().take(),
        };
        match reason {
            Some(reason) => Err(GistError::Push {
                reason,
                preserved: self.path().to_path_buf(),
            }),
            None => Ok(()),
        }
    }

    /// Detach the directory from automatic cleanup and return its path.
    /// Only the push-rejection path uses this.
    pub fn keep(self) -> PathBuf {
        let Self { dir, repo } = self;
        drop(repo);
        dir.keep()
    }
}

/// Standard clone with optional token credentials. Shared by the
/// working-copy manager and the `clone` command.
pub fn clone_into(
    url: &str,
    dest: &Path,
    token: Option<&str>,
) -> std::result::Result<Repository, git2::Error> {
    let mut fetch = FetchOptions::new();
    fetch.remote_callbacks(auth_callbacks(token));
    RepoBuilder::new().fetch_options(fetch).clone(url, dest)
}

fn auth_callbacks<'a>(token: Option<&str>) -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();
    if let Some(token) = token {
        let token = token.to_string();
        callbacks.credentials(move |_url, _username, _allowed| {
            Cred::userpass_plaintext(&token, "x-oauth-basic")
        });
    }
    callbacks
}
