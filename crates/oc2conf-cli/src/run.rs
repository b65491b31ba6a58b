//! # Suite Executor
//!
//! Runs one discovered test suite: selects the suite's schema file,
//! compiles it, walks the four category directories in fixed order, and
//! checks every test document. Results are printed as the run progresses
//! and returned as a [`SuiteOutcome`] for the driver.
//!
//! ## Failure Handling
//!
//! Three failure layers are kept apart:
//!
//! - A schema that is not JSON at all skips the whole suite (or aborts the
//!   run under `--strict-schemas`). A schema that parses but does not
//!   compile always aborts the run.
//! - A test document that is not JSON is reported per file and excluded
//!   from every count.
//! - A test document the schema rejects is an expected signal: it counts
//!   as an error only when its category expected acceptance, and vice
//!   versa.

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde_json::Value;

use oc2conf_core::{Category, DirEntry, Expectation, TreeSource};
use oc2conf_schema::{CompiledSchema, SchemaError, SchemaFormat, Verdict};

/// Longest document excerpt echoed for unparseable test files.
const EXCERPT_MAX_CHARS: usize = 120;

/// Everything the executor needs, resolved once by the driver.
#[derive(Debug)]
pub struct RunContext {
    /// Backend the test tree is read through.
    pub source: TreeSource,
    /// Schema file family consumed by this run.
    pub format: SchemaFormat,
    /// Abort the run on schema parse errors instead of skipping the suite.
    pub strict_schemas: bool,
}

/// Counts for one category that had checkable documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: Category,
    /// Documents that parsed and were checked.
    pub total: usize,
    /// Checked documents whose verdict contradicted the category.
    pub errors: usize,
}

/// Per-category counts for one suite, in processing order.
///
/// Categories that were absent or had no checkable documents do not
/// appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteTally {
    counts: Vec<CategoryCount>,
}

impl SuiteTally {
    /// Counted categories in processing order.
    pub fn counts(&self) -> &[CategoryCount] {
        &self.counts
    }

    /// Counts for one category, if it was counted.
    pub fn category(&self, category: Category) -> Option<&CategoryCount> {
        self.counts.iter().find(|c| c.category == category)
    }

    /// Sum of contradiction errors across all counted categories.
    pub fn total_errors(&self) -> usize {
        self.counts.iter().map(|c| c.errors).sum()
    }
}

/// How one suite ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuiteOutcome {
    /// The schema loaded and categories were processed.
    Ran(SuiteTally),
    /// No schema file of the active format was present in the suite.
    NoSchemas,
    /// The schema text failed to parse and the suite was skipped.
    SchemaSkipped,
}

/// Run one test suite rooted at `location`.
///
/// Prints per-file results and the suite summary to stdout. Returns an
/// error only for conditions that abort the whole run: unreadable
/// directories or files, schemas that parsed but did not compile, and
/// parse failures under `strict_schemas`.
pub fn run_suite(ctx: &RunContext, location: &str) -> Result<SuiteOutcome> {
    let listing = ctx
        .source
        .list_dir(location)
        .with_context(|| format!("failed to list test suite {location}"))?;

    let Some(schema_entry) = listing
        .files
        .iter()
        .find(|f| ctx.format.matches_file_name(&f.name))
    else {
        println!("No schemas found in {location}");
        return Ok(SuiteOutcome::NoSchemas);
    };
    tracing::debug!(schema = %schema_entry.name, format = %ctx.format, "loading suite schema");

    let schema_text = ctx
        .source
        .read_text(schema_entry)
        .with_context(|| format!("failed to read schema {}", schema_entry.location))?;

    let schema = match CompiledSchema::compile(ctx.format, &schema_text) {
        Ok(schema) => schema,
        Err(SchemaError::Parse { reason }) if !ctx.strict_schemas => {
            println!(
                "Cannot parse schema {} in {location}: {reason}",
                schema_entry.name
            );
            return Ok(SuiteOutcome::SchemaSkipped);
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("cannot load schema {} in {location}", schema_entry.name))
        }
    };

    let subdirs: HashMap<&str, &DirEntry> =
        listing.dirs.iter().map(|d| (d.name.as_str(), d)).collect();

    let mut tally = SuiteTally::default();
    for &category in Category::all() {
        let Some(dir) = subdirs.get(category.dir_name()) else {
            println!("{category} No tests");
            continue;
        };
        println!("{category}");

        let examples = ctx
            .source
            .list_dir(&dir.location)
            .with_context(|| format!("failed to list {}", dir.location))?;

        let mut total = 0usize;
        let mut errors = 0usize;
        for (index, file) in examples.files.iter().enumerate() {
            let seq = index + 1;
            let text = ctx
                .source
                .read_text(file)
                .with_context(|| format!("failed to read test file {}", file.location))?;
            let doc: Value = match serde_json::from_str(&text) {
                Ok(doc) => doc,
                Err(e) => {
                    // Unreadable documents are reported but never counted.
                    println!(
                        "{seq:>4} {:<50} Bad JSON: {e} \"{}\"",
                        file.name,
                        excerpt(&text)
                    );
                    continue;
                }
            };

            total += 1;
            let verdict = schema.check(category.kind(), &doc);
            let expected_accept = category.expectation() == Expectation::Accept;
            if verdict.is_accepted() != expected_accept {
                errors += 1;
            }
            match verdict {
                Verdict::Accepted => println!("{seq:>4} {:<50}", file.name),
                Verdict::Rejected(message) => {
                    println!("{seq:>4} {:<50} Fail: {message}", file.name)
                }
            }
        }
        if total > 0 {
            tally.counts.push(CategoryCount {
                category,
                total,
                errors,
            });
        }
    }

    print_summary(&tally);
    Ok(SuiteOutcome::Ran(tally))
}

fn print_summary(tally: &SuiteTally) {
    println!("\nValidation Errors:");
    for count in tally.counts() {
        println!("  {}: {}/{}", count.category, count.errors, count.total);
    }
}

/// Truncated copy of raw text, echoed when a document fails to parse.
fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_MAX_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(EXCERPT_MAX_CHARS).collect();
    format!("{cut}...")
}
