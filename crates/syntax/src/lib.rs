//! Source front ends for class sorting.
//!
//! Scripts are parsed with tree-sitter and lowered into [`weft_splice::Node`]
//! trees: every call, tagged template and variable declarator becomes a root.
//! Parenthesized, `as`, `satisfies` and non-null wrappers are transparent.
//!
//! Markup documents (Svelte, HTML) are scanned for `<script>` blocks, which
//! are lowered the same way at their byte offset, and for start-tag `class`
//! attributes, which become [`weft_splice::Node::ClassAttribute`] roots with
//! their mustache expressions lowered in place. `class:name={...}` directives
//! are not class attributes.

mod error;
mod kind;
mod lower;
mod markup;
mod parser;

pub use error::{Result, SyntaxError};
pub use kind::{Dialect, FileKind};
pub use parser::SourceParser;
