//! HTML tokenizer, tree builder and serializer for Sawzall.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, RCDATA, RAWTEXT, script data and PLAINTEXT states
//!   - DOCTYPE, comment, CDATA and character reference handling
//!   - Attribute parsing with first-occurrence-wins duplicates
//!
//! - **HTML Parser / Tree Builder** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - All insertion modes, including tables, select and template
//!   - Adoption agency algorithm and foster parenting
//!   - Fragment parsing with a `body` context element
//!
//! - **Serializer** ([WHATWG § 13.3](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments))
//!
//! # Not Implemented
//!
//! - Foreign content namespaces: `svg` and `math` subtrees become ordinary
//!   elements
//! - Scripting: `noscript` is always parsed with scripting disabled

/// Parse errors recorded by the tokenizer and tree builder.
pub mod issue;
/// HTML parser and tree construction.
pub mod parser;
/// `innerHTML` / `outerHTML` serialization.
pub mod serializer;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use issue::{ParseIssue, ParseIssueKind};
pub use parser::{HTMLParser, InsertionMode, parse_document, parse_fragment, print_tree};
pub use serializer::{inner_html, outer_html};
pub use tokenizer::{Attribute, HTMLTokenizer, Token};
