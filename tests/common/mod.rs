use assert_cmd::{cargo::cargo_bin_cmd, Command};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command as StdCommand, Output};
use tempfile::TempDir;
use tokio::runtime::Runtime;
use wiremock::MockServer;

/// Convenience helper for spawning the gist binary via assert_cmd.
#[allow(dead_code)]
pub fn gist_cmd() -> Command {
    cargo_bin_cmd!("gist")
}

/// Start a mock gist API. The returned runtime must stay alive for as
/// long as the server is in use.
#[allow(dead_code)]
pub fn mock_api() -> (Runtime, MockServer) {
    let rt = Runtime::new().expect("failed to create tokio runtime");
    let server = rt.block_on(MockServer::start());
    (rt, server)
}

/// Write a config file pointing the CLI at the mock API.
#[allow(dead_code)]
pub fn write_config(dir: &Path, server_uri: &str, extra: &str) -> PathBuf {
    let path = dir.join("config.toml");
    let body = format!("token = \"t0ken\"\napi-url = \"{server_uri}\"\n{extra}");
    fs::write(&path, body).expect("failed to write config");
    path
}

/// A gist JSON document shaped like the service's responses.
#[allow(dead_code)]
pub fn gist_json(
    id: &str,
    public: bool,
    desc: &str,
    files: serde_json::Value,
    git_url: &str,
) -> serde_json::Value {
    json!({
        "id": id,
        "description": desc,
        "public": public,
        "files": files,
        "html_url": format!("https://gist.example/{id}"),
        "git_pull_url": git_url,
        "git_push_url": git_url,
    })
}

/// Run git in `dir`, panicking on spawn failure.
#[allow(dead_code)]
pub fn git(dir: &Path, args: &[&str]) -> Output {
    let output = StdCommand::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

/// Create a bare "remote" seeded with one commit containing `files`.
/// Returns the holding tempdir and the bare repository path.
#[allow(dead_code)]
pub fn seed_bare_remote(files: &[(&str, &str)]) -> (TempDir, String) {
    let temp = TempDir::new().expect("failed to create temp dir");
    let seed = temp.path().join("seed");
    fs::create_dir(&seed).unwrap();

    git(&seed, &["init"]);
    git(&seed, &["config", "user.email", "test@example.com"]);
    git(&seed, &["config", "user.name", "Test User"]);
    for (name, content) in files {
        fs::write(seed.join(name), content).unwrap();
    }
    git(&seed, &["add", "-A"]);
    git(&seed, &["commit", "-m", "seed"]);
    git(temp.path(), &["clone", "--bare", "seed", "remote.git"]);

    let bare = temp.path().join("remote.git").to_str().unwrap().to_string();
    (temp, bare)
}

/// Write an executable shell script to use as the editor.
#[allow(dead_code)]
pub fn write_script(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("editor.sh");
    fs::write(&path, format!("#!/bin/sh\n{body}")).expect("failed to write script");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }
    path
}

/// A home directory carrying a git identity, for commands that commit.
#[allow(dead_code)]
pub fn fake_home() -> TempDir {
    let home = TempDir::new().expect("failed to create temp dir");
    fs::write(
        home.path().join(".gitconfig"),
        "[user]\n\tname = Test User\n\temail = test@example.com\n",
    )
    .unwrap();
    home
}
