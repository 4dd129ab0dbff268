//! # Remote Client
//!
//! Authenticated, blocking HTTP operations against the gist service.
//!
//! Every operation is a single request/response exchange with no local
//! state and no automatic retry: transient failures surface as
//! [`GistError::Transport`] and it is the caller's decision whether to
//! re-invoke. Listing paginates lazily through all pages the service
//! returns; each call to [`RemoteClient::list`] restarts from page 1.
//!
//! Status mapping:
//! - `401` / `403` → [`GistError::Auth`]
//! - `404` → [`GistError::NotFound`]
//! - `422` → [`GistError::Validation`]
//! - anything else non-success, or a connectivity failure →
//!   [`GistError::Transport`]

use crate::error::{GistError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use tracing::debug;

const PER_PAGE: u32 = 100;

/// One file inside a gist. The filename lives in the surrounding map key;
/// list responses omit `content`, full fetches include it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GistFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl GistFile {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }
}

/// A gist as returned by the service. The file map key order is
/// display-only and carries no meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gist {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub files: BTreeMap<String, GistFile>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub git_pull_url: String,
    #[serde(default)]
    pub git_push_url: String,
}

#[derive(Serialize)]
struct CreateRequest<'a> {
    description: &'a str,
    public: bool,
    files: &'a BTreeMap<String, GistFile>,
}

#[derive(Serialize)]
struct DescriptionRequest<'a> {
    description: &'a str,
}

pub struct RemoteClient {
    base_url: String,
    token: String,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("gist/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            token: token.into(),
            client,
        })
    }

    /// Lazily iterate over all of the caller's gists, most recently
    /// updated first. Restartable: each call re-fetches from page 1.
    pub fn list(&self) -> ListIter<'_> {
        ListIter {
            client: self,
            page: 1,
            buf: VecDeque::new(),
            done: false,
        }
    }

    /// Fetch one gist with full file content.
    pub fn fetch(&self, id: &str) -> Result<Gist> {
        debug!(id, "fetch gist");
        let resp = self
            .client
            .get(self.url(&format!("/gists/{id}")))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .send()?;
        let gist: Gist = self.ensure_ok(resp, id)?.json()?;
        Ok(gist)
    }

    /// Fetch one gist as raw JSON, for debugging dumps.
    pub fn fetch_raw(&self, id: &str) -> Result<serde_json::Value> {
        debug!(id, "fetch gist (raw)");
        let resp = self
            .client
            .get(self.url(&format!("/gists/{id}")))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .send()?;
        let value: serde_json::Value = self.ensure_ok(resp, id)?.json()?;
        Ok(value)
    }

    /// Create a gist from a non-empty set of named files.
    pub fn create(
        &self,
        description: &str,
        files: &BTreeMap<String, GistFile>,
        public: bool,
    ) -> Result<Gist> {
        if files.is_empty() {
            return Err(GistError::Validation(
                "a gist requires at least one file".into(),
            ));
        }
        debug!(public, count = files.len(), "create gist");
        let resp = self
            .client
            .post(self.url("/gists"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(&CreateRequest {
                description,
                public,
                files,
            })
            .send()?;
        let gist: Gist = self.ensure_ok(resp, "(new)")?.json()?;
        Ok(gist)
    }

    /// Update a gist's description. Visibility is immutable and never
    /// touched here.
    pub fn update_description(&self, id: &str, description: &str) -> Result<Gist> {
        debug!(id, "update description");
        let resp = self
            .client
            .patch(self.url(&format!("/gists/{id}")))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(&DescriptionRequest { description })
            .send()?;
        let gist: Gist = self.ensure_ok(resp, id)?.json()?;
        Ok(gist)
    }

    pub fn fork(&self, id: &str) -> Result<Gist> {
        debug!(id, "fork gist");
        let resp = self
            .client
            .post(self.url(&format!("/gists/{id}/forks")))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .send()?;
        let gist: Gist = self.ensure_ok(resp, id)?.json()?;
        Ok(gist)
    }

    /// Delete a gist. Irreversible; no tombstone is kept locally.
    pub fn delete(&self, id: &str) -> Result<()> {
        debug!(id, "delete gist");
        let resp = self
            .client
            .delete(self.url(&format!("/gists/{id}")))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .send()?;
        self.ensure_ok(resp, id)?;
        Ok(())
    }

    fn list_page(&self, page: u32) -> Result<Vec<Gist>> {
        debug!(page, "list gists");
        let resp = self
            .client
            .get(self.url("/gists"))
            .query(&[("page", page), ("per_page", PER_PAGE)])
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .send()?;
        let gists: Vec<Gist> = self.ensure_ok(resp, "(list)")?.json()?;
        Ok(gists)
    }

    fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        id: &str,
    ) -> Result<reqwest::blocking::Response> {
        match resp.status() {
            reqwest::StatusCode::UNAUTHORIZED => {
                Err(GistError::Auth("token invalid or revoked".into()))
            }
            reqwest::StatusCode::FORBIDDEN => {
                Err(GistError::Auth("insufficient permission".into()))
            }
            reqwest::StatusCode::NOT_FOUND => Err(GistError::NotFound(id.to_string())),
            reqwest::StatusCode::UNPROCESSABLE_ENTITY => {
                Err(GistError::Validation("remote rejected the request".into()))
            }
            _ => Ok(resp.error_for_status()?),
        }
    }

    fn auth(&self) -> String {
        format!("Bearer {}", self.token)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Lazy pagination over `GET /gists`. Stops at the first empty page.
pub struct ListIter<'a> {
    client: &'a RemoteClient,
    page: u32,
    buf: VecDeque<Gist>,
    done: bool,
}

impl Iterator for ListIter<'_> {
    type Item = Result<Gist>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(gist) = self.buf.pop_front() {
                return Some(Ok(gist));
            }
            if self.done {
                return None;
            }
            match self.client.list_page(self.page) {
                Ok(gists) => {
                    self.page += 1;
                    if gists.is_empty() {
                        self.done = true;
                    } else {
                        self.buf.extend(gists);
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
