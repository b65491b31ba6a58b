//! # oc2conf-schema — Schema Compilation & Document Checking
//!
//! Compiles a test suite's schema file once and checks every test document
//! against it.
//!
//! ## Compile and Check (`validate`)
//!
//! The [`validate`] module turns schema text into a [`CompiledSchema`] and
//! answers, per document, whether the schema accepts it. Key pieces:
//!
//! - [`SchemaFormat`] — which schema file family a run consumes and how
//!   its contents are interpreted (typed named definitions or a
//!   whole-message wrapper).
//! - [`CompiledSchema::check`] — infallible per-document checking; a
//!   message kind the schema cannot validate surfaces as a rejection
//!   rather than an error.
//!
//! ## Crate Policy
//!
//! - Depends only on `oc2conf-core` internally.
//! - Schema loading failures are typed: [`SchemaError::Parse`] for
//!   non-JSON text, [`SchemaError::Compile`] for schemas no validator can
//!   be built from. Callers handle the two differently.

pub mod validate;

pub use validate::{CompiledSchema, SchemaError, SchemaFormat, Verdict};
