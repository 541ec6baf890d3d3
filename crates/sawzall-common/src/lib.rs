//! Common utilities for the Sawzall HTML toolkit.
//!
//! This crate provides shared infrastructure used by every Sawzall component:
//! - **Warning System** - deduplicated, colored terminal output for
//!   unsupported constructs, switched off unless a caller opts in

pub mod warning;
