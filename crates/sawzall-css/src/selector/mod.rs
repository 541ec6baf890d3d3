//! CSS selector syntax tree.
//!
//! This module implements the selector model of
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/). Parsing lives in
//! [`parser`], matching against a [`DomTree`](sawzall_dom::DomTree) in
//! [`matching`].

pub mod matching;
pub mod parser;

use core::str::FromStr;

use crate::error::SelectorError;

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
/// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// A simple selector is a single condition on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// "A type selector is the name of a document language element type,
    /// and represents an instance of that element type in the document tree."
    ///
    /// Stored lowercased.
    Type(String),

    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    /// "The universal selector is a single asterisk (*) and represents the
    /// qualified name of any element type."
    Universal,

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    /// "An ID selector is a hash (#, U+0023) immediately followed by the
    /// ID value, which is an identifier."
    Id(String),

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    /// "The class selector is given as a full stop (. U+002E) immediately
    /// followed by an identifier."
    Class(String),

    /// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    Attribute(AttributeSelector),

    /// [§ 4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    PseudoClass(PseudoClass),

    /// [§ 4.3 The Negation (Matches-None) Pseudo-class](https://www.w3.org/TR/selectors-4/#negation)
    /// "The negation pseudo-class, :not(), is a functional pseudo-class
    /// taking a selector list as an argument. It represents an element that
    /// is not represented by its argument."
    ///
    /// Only compound selectors are accepted inside the parentheses.
    Not(Vec<CompoundSelector>),
}

/// Non-functional pseudo-classes that can be decided from the tree alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PseudoClass {
    /// [§ 14.1 :root](https://www.w3.org/TR/selectors-4/#the-root-pseudo)
    /// "The :root pseudo-class represents an element that is the root of the document."
    Root,

    /// [§ 14.4.1 :first-child](https://www.w3.org/TR/selectors-4/#the-first-child-pseudo)
    /// "The :first-child pseudo-class represents an element that is first among its
    /// inclusive siblings."
    FirstChild,

    /// [§ 14.4.2 :last-child](https://www.w3.org/TR/selectors-4/#the-last-child-pseudo)
    LastChild,

    /// [§ 14.4.3 :only-child](https://www.w3.org/TR/selectors-4/#the-only-child-pseudo)
    /// "The :only-child pseudo-class represents an element that has no siblings."
    OnlyChild,

    /// [§ 14.5.1 :first-of-type](https://www.w3.org/TR/selectors-4/#the-first-of-type-pseudo)
    FirstOfType,

    /// [§ 14.5.2 :last-of-type](https://www.w3.org/TR/selectors-4/#the-last-of-type-pseudo)
    LastOfType,

    /// [§ 14.5.3 :only-of-type](https://www.w3.org/TR/selectors-4/#the-only-of-type-pseudo)
    OnlyOfType,

    /// [§ 14.2 :empty](https://www.w3.org/TR/selectors-4/#the-empty-pseudo)
    /// "The :empty pseudo-class represents an element that has no children
    /// except, optionally, document white space characters."
    Empty,

    /// [§ 8.1 :any-link](https://www.w3.org/TR/selectors-4/#the-any-link-pseudo)
    /// and `:link`. Nothing has been visited, so the two are the same.
    AnyLink,

    /// [§ 13.3.1 :checked](https://www.w3.org/TR/selectors-4/#checked)
    Checked,

    /// [§ 13.1.2 :disabled](https://www.w3.org/TR/selectors-4/#disabled-pseudo)
    Disabled,

    /// [§ 13.1.1 :enabled](https://www.w3.org/TR/selectors-4/#enabled-pseudo)
    Enabled,
}

impl PseudoClass {
    /// Look a pseudo-class up by its lowercased name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "root" => Self::Root,
            "first-child" => Self::FirstChild,
            "last-child" => Self::LastChild,
            "only-child" => Self::OnlyChild,
            "first-of-type" => Self::FirstOfType,
            "last-of-type" => Self::LastOfType,
            "only-of-type" => Self::OnlyOfType,
            "empty" => Self::Empty,
            "link" | "any-link" => Self::AnyLink,
            "checked" => Self::Checked,
            "disabled" => Self::Disabled,
            "enabled" => Self::Enabled,
            _ => return None,
        })
    }
}

/// [§ 6.1 Attribute presence and value selectors](https://www.w3.org/TR/selectors-4/#attribute-representation)
/// [§ 6.2 Substring matching attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-substrings)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelector {
    /// Attribute name, lowercased.
    pub name: String,
    /// How the value is compared.
    pub operator: AttributeOperator,
    /// [§ 6.3 Case-sensitivity](https://www.w3.org/TR/selectors-4/#attribute-case)
    /// Set by the `i` flag: "the attribute value is matched ASCII
    /// case-insensitively".
    pub case_insensitive: bool,
}

/// The comparison an [`AttributeSelector`] performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeOperator {
    /// `[att]` "Represents an element with the att attribute, whatever the
    /// value of the attribute."
    Exists,
    /// `[att=val]` "Represents an element with the att attribute whose value
    /// is exactly "val"."
    Equals(String),
    /// `[att~=val]` "Represents an element with the att attribute whose value
    /// is a whitespace-separated list of words, one of which is exactly "val"."
    Includes(String),
    /// `[att|=val]` "its value either being exactly "val" or beginning with
    /// "val" immediately followed by "-" (U+002D)."
    DashMatch(String),
    /// `[att^=val]` "whose value begins with the prefix "val"."
    PrefixMatch(String),
    /// `[att$=val]` "whose value ends with the suffix "val"."
    SuffixMatch(String),
    /// `[att*=val]` "whose value contains at least one instance of the
    /// substring "val"."
    SubstringMatch(String),
}

/// [§ 3.1 Structure and Terminology](https://www.w3.org/TR/selectors-4/#compound)
///
/// "A compound selector is a sequence of simple selectors that are not
/// separated by a combinator, and represents a set of simultaneous
/// conditions on a single element."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    /// The simple selectors, in source order. Never empty.
    pub simple_selectors: Vec<SimpleSelector>,
}

/// [§ 15 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// "A combinator is punctuation that represents a particular kind of
/// relationship between the selectors on either side."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// "A selector of the form 'A B' represents an element B that is an
    /// arbitrary descendant of some ancestor element A."
    Descendant,
    /// "A selector of the form 'A > B' represents an element B that is a
    /// direct child of element A."
    Child,
    /// "A selector of the form 'A + B' represents an element B that
    /// immediately follows element A, where A and B share the same parent."
    NextSibling,
    /// "A selector of the form 'A ~ B' represents an element B that follows
    /// element A (not necessarily immediately), where A and B share the same
    /// parent."
    SubsequentSibling,
}

/// [§ 3.1 Structure and Terminology](https://www.w3.org/TR/selectors-4/#complex)
///
/// "A complex selector is a sequence of one or more compound selectors
/// separated by combinators."
///
/// `div.container > ul li` is stored as:
/// ```text
/// subject: [li]
/// combinators: [(Descendant, [ul]), (Child, [div.container])]
/// ```
/// The chain runs right to left because matching starts at the subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
    /// "The elements represented by a complex selector are the elements
    /// matched by the last compound selector in the complex selector."
    pub subject: CompoundSelector,
    /// (combinator, compound) pairs walking left from the subject.
    pub combinators: Vec<(Combinator, CompoundSelector)>,
}

/// [§ 3.1 Structure and Terminology](https://www.w3.org/TR/selectors-4/#selector-list)
///
/// "A selector list is a comma-separated list of selectors." An element
/// matches the list when it matches any entry.
///
/// Parse once with [`SelectorList::parse`] and reuse for any number of
/// queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    /// The comma-separated entries, in source order. Never empty.
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    /// Parse a selector list.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError`] naming `text` when it is not a valid
    /// selector list.
    pub fn parse(text: &str) -> Result<Self, SelectorError> {
        parser::parse_selector(text)
    }
}

impl FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
