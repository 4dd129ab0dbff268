//! # Edit Session
//!
//! The state machine coordinating one edit of one gist:
//!
//! ```text
//! CLONED → EDITING → DIFFED → {NO_CHANGE | COMMITTING → PUSHED} → DONE
//! ```
//!
//! with `FAILED` reachable from every state. The working copy is removed
//! on every terminal state except a rejected push, where it is kept on
//! disk and its path reported so the user's edits are not lost.
//!
//! The editor's exit code is never interpreted: a user may exit nonzero
//! and still have written files. Whether anything happened is judged
//! purely by the working copy's status after the editor returns.

use crate::error::{GistError, Result};
use crate::remote::Gist;
use crate::workcopy::WorkingCopy;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Fixed, non-interactive message for the session commit.
pub const COMMIT_MESSAGE: &str = "Edited via gist";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Cloned,
    Editing,
    Diffed,
    NoChange,
    Committing,
    Pushed,
    Done,
    Failed,
}

#[derive(Debug)]
pub enum SessionOutcome {
    /// The editor exited without modifying any file; no network call
    /// was made.
    NoChange,
    /// The commit was pushed to the gist's remote.
    Pushed,
    /// The remote rejected the push. The working copy survives at
    /// `preserved` for manual recovery.
    PushRejected { reason: String, preserved: PathBuf },
}

pub struct EditSession<'a> {
    gist: &'a Gist,
    editor: &'a str,
    token: Option<&'a str>,
    state: SessionState,
}

impl<'a> EditSession<'a> {
    pub fn new(gist: &'a Gist, editor: &'a str, token: Option<&'a str>) -> Self {
        Self {
            gist,
            editor,
            token,
            state: SessionState::Cloned,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Drive the session to a terminal state. Any error leaves the
    /// session in `Failed`; the working copy has already been cleaned
    /// up by then, except after a rejected push.
    pub fn run(&mut self) -> Result<SessionOutcome> {
        let outcome = self.drive();
        if outcome.is_err() {
            self.enter(SessionState::Failed);
        }
        outcome
    }

    fn drive(&mut self) -> Result<SessionOutcome> {
        let wc = WorkingCopy::materialize(&self.gist.git_pull_url, self.token)?;
        self.enter(SessionState::Cloned);

        self.enter(SessionState::Editing);
        launch_editor(self.editor, wc.path())?;

        self.enter(SessionState::Diffed);
        if !wc.has_changes()? {
            self.enter(SessionState::NoChange);
            self.enter(SessionState::Done);
            return Ok(SessionOutcome::NoChange);
        }

        self.enter(SessionState::Committing);
        wc.commit_all(COMMIT_MESSAGE)?;

        match wc.push(self.token) {
            Ok(()) => {
                self.enter(SessionState::Pushed);
                self.enter(SessionState::Done);
                Ok(SessionOutcome::Pushed)
            }
            Err(GistError::Push { reason, .. }) => {
                // The one exception to always-release: the user's edits
                // stay on disk.
                let preserved = wc.keep();
                self.enter(SessionState::Failed);
                Ok(SessionOutcome::PushRejected { reason, preserved })
            }
            Err(e) => Err(e),
        }
    }

    fn enter(&mut self, state: SessionState) {
        debug!(from = ?self.state, to = ?state, gist = %self.gist.id, "session transition");
        self.state = state;
    }
}

/// Launch the external editor against a working directory or scratch
/// file and block until it exits. The exit status is logged, not judged.
pub fn launch_editor(editor: &str, target: &Path) -> Result<()> {
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| GistError::Config("editor command is empty".into()))?;
    let status = Command::new(program)
        .args(parts)
        .arg(target)
        .status()
        .map_err(|e| GistError::Config(format!("failed to launch editor '{editor}': {e}")))?;
    debug!(code = ?status.code(), "editor exited");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_nonzero_exit_is_not_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(launch_editor("false", dir.path()).is_ok());
    }

    #[test]
    fn test_editor_with_arguments() {
        let dir = tempfile::TempDir::new().unwrap();
        let marker = dir.path().join("ran");
        let editor = format!("touch {}", marker.display());
        // The working-copy path is appended as the final argument.
        launch_editor(&editor, dir.path()).unwrap();
        assert!(marker.exists());
    }

    #[test]
    fn test_empty_editor_command_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(launch_editor("   ", dir.path()).is_err());
    }
}
