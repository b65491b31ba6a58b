//! # Suite Discovery
//!
//! Depth-first search for test suites in a conformance tree. A directory
//! that contains a `Good-command` subdirectory is recorded as one suite and
//! its interior is left to the executor; any other directory is descended
//! into.

use crate::category::Category;
use crate::source::{SourceError, TreeSource};

/// Locate every test suite under `root`, depth-first.
///
/// Suites are returned in discovery order. A recorded suite is not
/// descended into, so directories nested inside a suite never surface as
/// suites of their own.
pub fn find_suites(source: &TreeSource, root: &str) -> Result<Vec<String>, SourceError> {
    let mut suites = Vec::new();
    walk(source, root, &mut suites)?;
    Ok(suites)
}

fn walk(source: &TreeSource, location: &str, suites: &mut Vec<String>) -> Result<(), SourceError> {
    let listing = source.list_dir(location)?;
    let marker = Category::GoodCommand.dir_name();
    if listing.dirs.iter().any(|dir| dir.name == marker) {
        tracing::debug!(location, "found test suite");
        suites.push(location.to_string());
        return Ok(());
    }
    for dir in &listing.dirs {
        walk(source, &dir.location, suites)?;
    }
    Ok(())
}
