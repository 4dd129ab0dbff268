use crate::error::Result;
use crate::remote::RemoteClient;

/// Update a gist's description.
pub fn description(client: &RemoteClient, id: &str, desc: &str) -> Result<()> {
    client.update_description(id, desc)?;
    Ok(())
}

/// Fork a gist and print the new gist's id.
pub fn fork(client: &RemoteClient, id: &str) -> Result<()> {
    let fork = client.fork(id)?;
    println!("{}", fork.id);
    Ok(())
}

/// Delete one or more gists. Irreversible.
pub fn delete(client: &RemoteClient, ids: &[String]) -> Result<()> {
    for id in ids {
        client.delete(id)?;
        println!("Deleted {id}");
    }
    Ok(())
}
