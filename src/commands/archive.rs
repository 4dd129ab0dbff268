use crate::config::Config;
use crate::error::{GistError, Result};
use crate::remote::RemoteClient;
use crate::workcopy::clone_into;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::path::Path;

/// Download a gist's files and pack them into `<id>.tar.gz` in the
/// current directory.
pub fn archive(client: &RemoteClient, id: &str) -> Result<()> {
    let gist = client.fetch(id)?;

    let staging = tempfile::TempDir::new()?;
    let root = staging.path().join(id);
    fs::create_dir(&root)?;
    for (name, file) in &gist.files {
        fs::write(root.join(name), file.content.as_deref().unwrap_or(""))?;
    }

    let archive_name = format!("{id}.tar.gz");
    let out = fs::File::create(&archive_name)?;
    let encoder = GzEncoder::new(out, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.append_dir_all(id, &root)?;
    builder.into_inner()?.finish()?;

    println!("{archive_name}");
    Ok(())
}

/// Clone a gist into the current directory, under its id or the given
/// name.
pub fn clone(client: &RemoteClient, config: &Config, id: &str, name: Option<&str>) -> Result<()> {
    let gist = client.fetch(id)?;
    let dest = name.unwrap_or(id);
    if Path::new(dest).exists() {
        return Err(GistError::Validation(format!("{dest} already exists")));
    }
    clone_into(&gist.git_pull_url, Path::new(dest), config.token.as_deref())
        .map_err(|e| GistError::Clone(e.message().to_string()))?;
    println!("Cloned {id} into {dest}");
    Ok(())
}
