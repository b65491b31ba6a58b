//! # Directory Entries
//!
//! A uniform view of one directory level, independent of where the tree
//! lives. Local filesystem listings and remote contents-API listings both
//! surface as [`Listing`] values holding [`DirEntry`] items, so discovery
//! and the test executor never branch on the storage backend.

/// One named item inside a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Base name of the item within its directory.
    pub name: String,
    /// Where the item's content lives. For local trees this is a filesystem
    /// path. For remote trees it is the listing URL for directories and the
    /// raw download URL for files.
    pub location: String,
    /// Metadata URL for the item, present only for remote trees.
    pub api_url: Option<String>,
}

impl DirEntry {
    /// Entry backed by the local filesystem.
    pub fn local(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            api_url: None,
        }
    }

    /// Entry backed by a remote contents API.
    pub fn remote(
        name: impl Into<String>,
        location: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            api_url: Some(api_url.into()),
        }
    }
}

/// The files and subdirectories of one directory, partitioned by kind.
///
/// Both lists preserve the order the underlying source returned them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Plain files, in source order.
    pub files: Vec<DirEntry>,
    /// Subdirectories, in source order.
    pub dirs: Vec<DirEntry>,
}
