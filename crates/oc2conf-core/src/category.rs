//! # Test Categories
//!
//! The four categories of conformance tests a suite may carry, crossing the
//! message kind under validation with the expected validator outcome. The
//! directory names on disk are fixed (`Good-command`, `Bad-command`,
//! `Good-response`, `Bad-response`) and every `match` over [`Category`] is
//! exhaustive, so adding a category forces each consumer to handle it.

use std::fmt;

/// The OpenC2 message kind a test document claims to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// An OpenC2 command message.
    Command,
    /// An OpenC2 response message.
    Response,
}

impl MessageKind {
    /// Lowercase identifier as it appears in category directory names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Response => "response",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a category expects the validator to do with its documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// Documents are well-formed and must pass validation.
    Accept,
    /// Documents are deliberately broken and must fail validation.
    Reject,
}

/// One category directory within a test suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Well-formed commands under `Good-command`.
    GoodCommand,
    /// Malformed commands under `Bad-command`.
    BadCommand,
    /// Well-formed responses under `Good-response`.
    GoodResponse,
    /// Malformed responses under `Bad-response`.
    BadResponse,
}

impl Category {
    /// All categories in the fixed processing order: commands before
    /// responses, good before bad within each kind.
    pub fn all() -> &'static [Category] {
        &[
            Self::GoodCommand,
            Self::BadCommand,
            Self::GoodResponse,
            Self::BadResponse,
        ]
    }

    /// Name of the directory carrying this category's documents.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::GoodCommand => "Good-command",
            Self::BadCommand => "Bad-command",
            Self::GoodResponse => "Good-response",
            Self::BadResponse => "Bad-response",
        }
    }

    /// Message kind this category's documents are validated as.
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::GoodCommand | Self::BadCommand => MessageKind::Command,
            Self::GoodResponse | Self::BadResponse => MessageKind::Response,
        }
    }

    /// Expected validator outcome for documents in this category.
    pub fn expectation(&self) -> Expectation {
        match self {
            Self::GoodCommand | Self::GoodResponse => Expectation::Accept,
            Self::BadCommand | Self::BadResponse => Expectation::Reject,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_categories_in_processing_order() {
        let names: Vec<&str> = Category::all().iter().map(|c| c.dir_name()).collect();
        assert_eq!(
            names,
            vec!["Good-command", "Bad-command", "Good-response", "Bad-response"]
        );
    }

    #[test]
    fn test_all_categories_unique() {
        let mut seen = std::collections::HashSet::new();
        for c in Category::all() {
            assert!(seen.insert(c), "Duplicate category: {c}");
        }
    }

    #[test]
    fn test_kind_follows_directory_suffix() {
        for c in Category::all() {
            let suffix = c.dir_name().split('-').nth(1).unwrap();
            assert_eq!(c.kind().as_str(), suffix);
        }
    }

    #[test]
    fn test_expectation_follows_directory_prefix() {
        for c in Category::all() {
            let expected = match c.dir_name().split('-').next().unwrap() {
                "Good" => Expectation::Accept,
                "Bad" => Expectation::Reject,
                other => panic!("unexpected prefix: {other}"),
            };
            assert_eq!(c.expectation(), expected);
        }
    }

    #[test]
    fn test_display_matches_dir_name() {
        for c in Category::all() {
            assert_eq!(c.to_string(), c.dir_name());
        }
    }
}
