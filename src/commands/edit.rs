use crate::config::Config;
use crate::error::{GistError, Result};
use crate::remote::RemoteClient;
use crate::session::{EditSession, SessionOutcome};

/// Clone the gist into a temporary working copy, open the editor on it,
/// and push any resulting changes back to the remote.
pub fn edit(client: &RemoteClient, config: &Config, id: &str) -> Result<()> {
    let editor = config.resolve_editor()?;
    let token = config.token()?;
    let gist = client.fetch(id)?;

    let mut session = EditSession::new(&gist, &editor, Some(token));
    match session.run()? {
        SessionOutcome::NoChange => {
            println!("No changes to gist {id}");
            Ok(())
        }
        SessionOutcome::Pushed => {
            println!("Pushed changes to gist {id}");
            Ok(())
        }
        // Reported once, by main: the error display carries both the
        // reason and the preserved working-copy path.
        SessionOutcome::PushRejected { reason, preserved } => {
            Err(GistError::Push { reason, preserved })
        }
    }
}
