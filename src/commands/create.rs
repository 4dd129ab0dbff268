use crate::config::Config;
use crate::create::create_gist;
use crate::error::Result;
use crate::remote::RemoteClient;
use std::path::PathBuf;

/// Create a new gist and print its URL.
pub fn create(
    client: &RemoteClient,
    config: &Config,
    desc: &str,
    files: &[PathBuf],
    public: bool,
    encrypt: bool,
) -> Result<()> {
    let gist = create_gist(client, config, desc, files, public, encrypt)?;
    println!("{}", gist.html_url);
    Ok(())
}
