//! # oc2conf-core — Foundational Types for the Conformance Runner
//!
//! Directory entries, test categories, the local/remote tree source, and
//! suite discovery. Every other crate in the workspace depends on
//! `oc2conf-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **One backend decision.** The tree backend is picked once from the
//!    shape of the root locator and carried as a [`TreeSource`] value.
//!    Nothing downstream re-detects whether the tree is local or remote.
//!
//! 2. **Uniform listings.** Local directories and remote contents-API
//!    directories both surface as [`Listing`] values partitioned into files
//!    and subdirectories, in the order the underlying source produced.
//!
//! 3. **Exhaustive categories.** The four test categories are one enum with
//!    a fixed processing order and fixed directory names. Every `match` on
//!    [`Category`] is exhaustive.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `oc2conf-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Errors are typed (`SourceError`) and name the location they refer to.

pub mod category;
pub mod discover;
pub mod entry;
pub mod source;

// Re-export primary types for ergonomic imports.
pub use category::{Category, Expectation, MessageKind};
pub use discover::find_suites;
pub use entry::{DirEntry, Listing};
pub use source::{is_remote_location, RemoteClient, SourceError, TreeSource};
