use crate::config::Config;
use crate::error::{GistError, Result};
use crate::gpg::{is_encrypted_name, plain_name, GpgAdapter};
use crate::remote::RemoteClient;

/// Dump the raw JSON of a gist, pretty-printed. Mostly for debugging.
pub fn info(client: &RemoteClient, id: &str) -> Result<()> {
    let value = client.fetch_raw(id)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// List the files in a gist, one name per line.
pub fn files(client: &RemoteClient, id: &str) -> Result<()> {
    let gist = client.fetch(id)?;
    for name in gist.files.keys() {
        println!("{name}");
    }
    Ok(())
}

/// Print the content of a gist's files, or of one named file.
///
/// With `--decrypt`, files carrying the encrypted suffix are run through
/// the decryption adapter; the keystore configuration is validated before
/// the gist is fetched.
pub fn content(
    client: &RemoteClient,
    config: &Config,
    id: &str,
    filename: Option<&str>,
    decrypt: bool,
) -> Result<()> {
    let adapter = if decrypt {
        Some(GpgAdapter::for_decrypt(config)?)
    } else {
        None
    };

    let gist = client.fetch(id)?;

    if let Some(name) = filename {
        let file = gist
            .files
            .get(name)
            .ok_or_else(|| GistError::NotFound(format!("{id}/{name}")))?;
        let body = file.content.as_deref().unwrap_or("");
        match &adapter {
            Some(adapter) if is_encrypted_name(name) => {
                println!("{}", adapter.decrypt(body)?);
            }
            _ => println!("{body}"),
        }
        return Ok(());
    }

    for (name, file) in &gist.files {
        let body = file.content.as_deref().unwrap_or("");
        match &adapter {
            Some(adapter) if is_encrypted_name(name) => {
                println!("{} (decrypted):\n{}\n", plain_name(name), adapter.decrypt(body)?);
            }
            _ => println!("{name}:\n{body}\n"),
        }
    }
    Ok(())
}
