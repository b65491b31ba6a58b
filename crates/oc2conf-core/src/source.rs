//! # Tree Source
//!
//! Uniform directory access over the two places a conformance tree can
//! live: a directory on the local filesystem, or a remote GitHub-style
//! contents API. The backend is chosen once from the shape of the root
//! locator and carried as a [`TreeSource`] value; everything downstream
//! works on [`Listing`] values and never re-detects the backend.
//!
//! ## Remote listings
//!
//! A remote directory listing is a JSON array of items with `type`, `name`,
//! `url`, and `download_url` fields. Directory items keep the listing URL
//! as their location, so recursing into them is one more `list_dir` call.
//! File items keep the raw `download_url` when present and fall back to the
//! metadata URL otherwise.

use std::fs;
use std::io::Read;

use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::entry::{DirEntry, Listing};

const USER_AGENT: &str = concat!("oc2conf/", env!("CARGO_PKG_VERSION"));

/// Errors raised while listing directories or reading entries.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Local filesystem access failed.
    #[error("cannot access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The HTTP client could not be constructed.
    #[error("cannot build http client: {0}")]
    Client(#[source] reqwest::Error),
    /// A remote request failed or returned a non-success status.
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// A remote listing payload did not decode as a contents array.
    #[error("unexpected listing payload from {url}: {reason}")]
    Listing { url: String, reason: String },
}

/// Returns whether a root locator names a remote tree.
///
/// A locator is remote when it parses as an absolute URL with a host, like
/// `https://api.github.com/repos/owner/repo/contents/Test`. Relative paths,
/// absolute paths, and host-less URLs are treated as local directories.
pub fn is_remote_location(location: &str) -> bool {
    Url::parse(location).map(|u| u.has_host()).unwrap_or(false)
}

/// One item of a remote contents listing.
#[derive(Debug, Deserialize)]
struct ContentsItem {
    #[serde(rename = "type")]
    kind: String,
    name: String,
    url: String,
    download_url: Option<String>,
}

/// Authenticated client for a remote contents API.
pub struct RemoteClient {
    client: Client,
    auth_header: String,
}

impl RemoteClient {
    /// Build a client that sends `token <value>` authorization on every
    /// request.
    pub fn new(token: &str) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(SourceError::Client)?;
        Ok(Self {
            client,
            auth_header: format!("token {token}"),
        })
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, SourceError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::AUTHORIZATION, self.auth_header.as_str())
            .send()
            .map_err(|source| SourceError::Http {
                url: url.to_string(),
                source,
            })?;
        response.error_for_status().map_err(|source| SourceError::Http {
            url: url.to_string(),
            source,
        })
    }

    fn list(&self, url: &str) -> Result<Listing, SourceError> {
        tracing::debug!(url, "listing remote directory");
        let payload = self.get(url)?.text().map_err(|source| SourceError::Http {
            url: url.to_string(),
            source,
        })?;
        let items: Vec<ContentsItem> =
            serde_json::from_str(&payload).map_err(|e| SourceError::Listing {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let mut listing = Listing::default();
        for item in items {
            if item.kind == "dir" {
                listing
                    .dirs
                    .push(DirEntry::remote(item.name, item.url.clone(), item.url));
            } else {
                // Some listings omit download_url (submodules, oversized
                // files). Keep the metadata URL so the entry stays addressable.
                let location = item.download_url.unwrap_or_else(|| item.url.clone());
                listing
                    .files
                    .push(DirEntry::remote(item.name, location, item.url));
            }
        }
        Ok(listing)
    }
}

impl std::fmt::Debug for RemoteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteClient").finish_non_exhaustive()
    }
}

/// Where a conformance tree lives.
///
/// Selected once per run from the root locator; see [`is_remote_location`].
#[derive(Debug)]
pub enum TreeSource {
    /// Entries come from the local filesystem.
    Local,
    /// Entries come from a remote contents API.
    Remote(RemoteClient),
}

impl TreeSource {
    /// List one directory level, partitioned into files and subdirectories.
    pub fn list_dir(&self, location: &str) -> Result<Listing, SourceError> {
        match self {
            Self::Local => list_local(location),
            Self::Remote(client) => client.list(location),
        }
    }

    /// Open an entry's content for streaming reads.
    pub fn open_text(&self, entry: &DirEntry) -> Result<Box<dyn Read>, SourceError> {
        match self {
            Self::Local => {
                let file = fs::File::open(&entry.location).map_err(|source| SourceError::Io {
                    path: entry.location.clone(),
                    source,
                })?;
                Ok(Box::new(file))
            }
            Self::Remote(client) => Ok(Box::new(client.get(&entry.location)?)),
        }
    }

    /// Read an entry's full content as UTF-8 text.
    pub fn read_text(&self, entry: &DirEntry) -> Result<String, SourceError> {
        let mut reader = self.open_text(entry)?;
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|source| SourceError::Io {
                path: entry.location.clone(),
                source,
            })?;
        Ok(text)
    }
}

fn list_local(path: &str) -> Result<Listing, SourceError> {
    tracing::debug!(path, "listing local directory");
    let entries = fs::read_dir(path).map_err(|source| SourceError::Io {
        path: path.to_string(),
        source,
    })?;

    let mut listing = Listing::default();
    for entry in entries {
        let entry = entry.map_err(|source| SourceError::Io {
            path: path.to_string(),
            source,
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let location = entry.path().to_string_lossy().into_owned();
        if entry.path().is_dir() {
            listing.dirs.push(DirEntry::local(name, location));
        } else {
            listing.files.push(DirEntry::local(name, location));
        }
    }
    Ok(listing)
}
