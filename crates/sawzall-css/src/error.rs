//! Selector syntax errors.

use thiserror::Error;

/// A selector string that could not be parsed.
///
/// The `Display` form names the offending selector (Debug-quoted) and then,
/// on the next line, the reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse selector {selector:?}\n{kind}")]
pub struct SelectorError {
    /// The selector text exactly as the caller passed it.
    pub selector: String,
    /// What was wrong with it.
    pub kind: SelectorErrorKind,
}

impl SelectorError {
    pub(crate) fn new(selector: &str, kind: SelectorErrorKind) -> Self {
        Self {
            selector: selector.to_string(),
            kind,
        }
    }
}

/// The specific grammar violation behind a [`SelectorError`].
///
/// Positions are character offsets into the selector text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorErrorKind {
    /// Nothing but whitespace.
    #[error("selector is empty")]
    Empty,

    /// `a,,b`, `,a` or `a,`
    #[error("empty entry in selector list at position {0}")]
    EmptyListEntry(usize),

    /// `> a`
    #[error("combinator {0:?} at position {1} has no selector before it")]
    LeadingCombinator(char, usize),

    /// `a >`
    #[error("combinator {0:?} at position {1} has no selector after it")]
    TrailingCombinator(char, usize),

    /// A character that cannot start or continue a selector here.
    #[error("unexpected character {0:?} at position {1}")]
    UnexpectedCharacter(char, usize),

    /// Input ended in the middle of a construct.
    #[error("unexpected end of selector, expected {0}")]
    UnexpectedEnd(&'static str),

    /// `#` or `.` not followed by a name.
    #[error("expected a name after {0:?} at position {1}")]
    ExpectedName(char, usize),

    /// `div[]`
    #[error("expected an attribute name at position {0}")]
    ExpectedAttributeName(usize),

    /// `[a=]`
    #[error("expected an attribute value at position {0}")]
    ExpectedAttributeValue(usize),

    /// A quoted string without its closing quote.
    #[error("unterminated string starting at position {0}")]
    UnterminatedString(usize),

    /// `:hover`, `:nth-child(2)` and anything else not supported.
    #[error("unsupported pseudo-class :{0}")]
    UnknownPseudoClass(String),

    /// `::before`
    #[error("pseudo-elements are not supported (::{0})")]
    PseudoElement(String),

    /// `:not()`
    #[error(":not() needs at least one selector")]
    EmptyNegation,
}
