//! # Schema Compilation and Checking
//!
//! Turns one schema file into a [`CompiledSchema`] and answers, per test
//! document, whether the schema accepts it. Two schema formats exist,
//! selected by file extension:
//!
//! - **Typed** (`*.schema.json`): the schema carries a table of named
//!   definitions and each document is checked against the definition for
//!   its message kind (`OpenC2-Command` or `OpenC2-Response`). A kind whose
//!   definition is missing or cannot be built is kept as a deferred
//!   failure; checking that kind yields a rejection while the other kind
//!   stays usable.
//! - **Wrapper** (`.json`, excluding `*.schema.json`): the schema is
//!   compiled whole and each document is wrapped under a kind-specific key
//!   (`openc2_command` / `openc2_response`) before checking.
//!
//! ## Error Split
//!
//! [`SchemaError::Parse`] means the schema text was not JSON at all.
//! [`SchemaError::Compile`] means it parsed but no validator could be built
//! from it. Callers handle the two differently, so the split is part of the
//! contract.

use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

use oc2conf_core::MessageKind;

/// How a suite's schema file is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// Named-definition schemas in `*.schema.json` files.
    Typed,
    /// Whole-message wrapper schemas in plain `.json` files.
    Wrapper,
}

impl SchemaFormat {
    /// Lowercase identifier for logs and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Typed => "typed",
            Self::Wrapper => "wrapper",
        }
    }

    /// Returns whether `name` is a schema file in this format.
    ///
    /// The families are disjoint: `Typed` claims `*.schema.json`, `Wrapper`
    /// claims every other `.json` file.
    pub fn matches_file_name(&self, name: &str) -> bool {
        match self {
            Self::Typed => name.ends_with(".schema.json"),
            Self::Wrapper => name.ends_with(".json") && !name.ends_with(".schema.json"),
        }
    }
}

impl std::fmt::Display for SchemaFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error while turning schema text into a [`CompiledSchema`].
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema text is not valid JSON.
    #[error("schema is not valid JSON: {reason}")]
    Parse { reason: String },
    /// The schema parsed but no validator could be built from it.
    #[error("schema did not compile: {reason}")]
    Compile { reason: String },
}

/// What the schema said about one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The document conforms to the schema.
    Accepted,
    /// The document does not conform; carries the first violation message.
    Rejected(String),
}

impl Verdict {
    /// Returns whether this verdict is [`Verdict::Accepted`].
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// A validator for one message kind, or the recorded reason none could be
/// built. The failure is deferred so one broken kind does not take down
/// checks of the other.
enum KindValidator {
    Ready(Validator),
    Unavailable(String),
}

enum Inner {
    Typed {
        command: KindValidator,
        response: KindValidator,
    },
    Wrapper {
        validator: Validator,
    },
}

/// One schema file, compiled and ready to check documents.
pub struct CompiledSchema {
    inner: Inner,
}

impl CompiledSchema {
    /// Parse and compile schema text according to `format`.
    pub fn compile(format: SchemaFormat, text: &str) -> Result<Self, SchemaError> {
        let schema: Value = serde_json::from_str(text).map_err(|e| SchemaError::Parse {
            reason: e.to_string(),
        })?;
        match format {
            SchemaFormat::Typed => {
                if !schema.is_object() {
                    return Err(SchemaError::Compile {
                        reason: "schema root is not an object".to_string(),
                    });
                }
                Ok(Self {
                    inner: Inner::Typed {
                        command: build_kind_validator(&schema, MessageKind::Command),
                        response: build_kind_validator(&schema, MessageKind::Response),
                    },
                })
            }
            SchemaFormat::Wrapper => {
                let validator = build_validator(&schema)
                    .map_err(|reason| SchemaError::Compile { reason })?;
                Ok(Self {
                    inner: Inner::Wrapper { validator },
                })
            }
        }
    }

    /// Check one parsed document as the given message kind.
    ///
    /// Never fails: a kind with no usable validator yields a
    /// [`Verdict::Rejected`] carrying the recorded reason.
    pub fn check(&self, kind: MessageKind, doc: &Value) -> Verdict {
        match &self.inner {
            Inner::Typed { command, response } => {
                let validator = match kind {
                    MessageKind::Command => command,
                    MessageKind::Response => response,
                };
                match validator {
                    KindValidator::Ready(v) => first_violation(v, doc),
                    KindValidator::Unavailable(reason) => Verdict::Rejected(reason.clone()),
                }
            }
            Inner::Wrapper { validator } => {
                let mut wrapped = serde_json::Map::new();
                wrapped.insert(wrapper_key(kind).to_string(), doc.clone());
                first_violation(validator, &Value::Object(wrapped))
            }
        }
    }
}

impl std::fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledSchema").finish_non_exhaustive()
    }
}

/// Definition name checked for a message kind in typed schemas.
fn type_name(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Command => "OpenC2-Command",
        MessageKind::Response => "OpenC2-Response",
    }
}

/// Key a document is wrapped under for wrapper schemas.
fn wrapper_key(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Command => "openc2_command",
        MessageKind::Response => "openc2_response",
    }
}

fn first_violation(validator: &Validator, doc: &Value) -> Verdict {
    match validator.iter_errors(doc).next() {
        None => Verdict::Accepted,
        Some(error) => Verdict::Rejected(error.to_string()),
    }
}

/// Build a validator rooted at the named definition for `kind`.
///
/// The re-rooted schema keeps only `$schema`, `$id`, the definitions table,
/// and a `$ref` into it. Carrying no other root keywords means the
/// definition alone decides the outcome while intra-schema references keep
/// resolving.
fn build_kind_validator(schema: &Value, kind: MessageKind) -> KindValidator {
    let name = type_name(kind);
    let defs_key = if schema.get("definitions").is_some() {
        "definitions"
    } else {
        "$defs"
    };
    let Some(defs) = schema.get(defs_key) else {
        return KindValidator::Unavailable(format!(
            "schema has no definitions table, cannot resolve {name}"
        ));
    };
    if defs.get(name).is_none() {
        return KindValidator::Unavailable(format!("schema has no definition named {name}"));
    }

    let mut rooted = serde_json::Map::new();
    for meta in ["$schema", "$id"] {
        if let Some(value) = schema.get(meta) {
            rooted.insert(meta.to_string(), value.clone());
        }
    }
    rooted.insert(defs_key.to_string(), defs.clone());
    rooted.insert(
        "$ref".to_string(),
        Value::String(format!("#/{defs_key}/{name}")),
    );

    match build_validator(&Value::Object(rooted)) {
        Ok(validator) => KindValidator::Ready(validator),
        Err(reason) => KindValidator::Unavailable(reason),
    }
}

fn build_validator(schema: &Value) -> Result<Validator, String> {
    let mut opts = jsonschema::options();
    opts.with_draft(jsonschema::Draft::Draft7);
    opts.should_validate_formats(true);
    opts.build(schema).map_err(|e| e.to_string())
}
