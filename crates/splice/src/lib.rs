//! Class list re-splicing.
//!
//! Given the syntactic roots of a source file as [`Node`] trees, this crate
//! finds every class-bearing span reachable from them, sorts and deduplicates
//! each span's class list against one [`OrderResolver`](weft_order::OrderResolver)
//! and reports a [`Violation`] carrying the exact sub-range replacement when
//! the rebuilt text differs from the original.
//!
//! Roots are checked in two phases: every candidate span of the file is
//! collected first, then all distinct tokens are resolved in a single batch,
//! then each span is rebuilt.

mod edit;
mod error;
mod mix;
mod node;
mod options;
mod reconstruct;
mod style;
mod template;

pub use edit::{Fixed, LineCol, Violation, apply_violations, line_col};
pub use error::{Result, SpliceError};
pub use mix::{MIX_RULE, check_mustache_mix};
pub use node::{AttributePart, Callee, Node, Property, Span, TemplateElement};
pub use options::{Declarations, SortOptions};
pub use reconstruct::{SORT_RULE, Candidate, collect_candidates, sort_class_string, sort_classes};
pub use style::{LangAttribute, STYLE_LANG_RULE, StyleBlock, check_style_lang};
pub use template::split_template_element;
