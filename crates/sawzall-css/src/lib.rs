//! CSS selector parsing and matching for Sawzall.
//!
//! # Scope
//!
//! This crate implements:
//! - **Selector parsing** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type, universal, class and ID selectors
//!   - Attribute selectors with every operator and the `i`/`s` flags
//!   - Structural pseudo-classes and `:not()` over compound selectors
//!   - Descendant, child, next-sibling and subsequent-sibling combinators
//!   - CSS escapes in identifiers and strings
//!
//! - **Selector matching** against a [`sawzall_dom::DomTree`], right to left
//!   with backtracking, and subtree queries in document order
//!
//! # Not Implemented
//!
//! - Pseudo-elements and user-action pseudo-classes (`:hover`, ...)
//! - `:nth-*()`, `:is()`, `:where()`, `:has()`
//! - Namespaces and specificity

/// Selector syntax errors.
pub mod error;
/// Selector syntax tree, parser and matcher.
pub mod selector;

pub use error::{SelectorError, SelectorErrorKind};
pub use selector::matching::select;
pub use selector::parser::parse_selector;
pub use selector::{
    AttributeOperator, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    PseudoClass, SelectorList, SimpleSelector,
};
