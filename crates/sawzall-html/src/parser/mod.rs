//! HTML tree construction.
//!
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//!
//! The insertion modes are split across files by family; `core` owns the
//! parser state, the node insertion primitives and the public entry points.

mod algorithms;
/// Parser state, insertion primitives and entry points.
pub mod core;
mod in_body;
mod in_table;
mod modes;

pub use self::core::{HTMLParser, InsertionMode, parse_document, parse_fragment, print_tree};
