//! # oc2conf-cli — Conformance Runner Library
//!
//! Library backing the `oc2conf` binary. The [`run`] module holds the
//! per-suite executor; the binary wires argument parsing, tree source
//! selection, and suite discovery around it.

pub mod run;

pub use run::{run_suite, CategoryCount, RunContext, SuiteOutcome, SuiteTally};
