//! Parse errors recorded while tokenizing and building the tree.
//!
//! [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
//!
//! "This specification defines the parsing rules for HTML documents, whether
//! they are syntactically correct or not." Errors never abort a parse; they
//! are collected so callers can inspect them afterwards.

use core::fmt;

use serde::Serialize;
use strum_macros::Display;

/// Which stage of the parser noticed the problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum ParseIssueKind {
    /// [§ 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    Tokenizer,
    /// [§ 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
    TreeBuilder,
}

/// A single recoverable parse error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseIssue {
    /// Stage that reported the issue.
    pub kind: ParseIssueKind,
    /// Error code (e.g. `eof-in-tag`) or a short description.
    pub message: String,
    /// Character offset for tokenizer issues, token index for tree builder
    /// issues.
    pub position: usize,
}

impl ParseIssue {
    /// Create a new issue.
    #[must_use]
    pub fn new(kind: ParseIssueKind, message: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            position,
        }
    }
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} at {}", self.kind, self.message, self.position)
    }
}
