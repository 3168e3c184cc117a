//! Class list decomposition and lossless reassembly.
//!
//! A raw class string (the body of a `class="..."` attribute, a string literal
//! passed to `clsx`, a template chunk, ...) is split into its class tokens and
//! the whitespace runs between them. Once the tokens have been reordered,
//! [`Classlist::rebuild`] threads the original whitespace back through them,
//! so a list that is already in canonical order reassembles to the exact same
//! bytes.
//!
//! Layout of the whitespace runs relative to the tokens:
//!
//! ```text
//! "a b c"      tokens [a, b, c]  whitespace [" ", " "]            no head, no tail
//! " a b c"     tokens [a, b, c]  whitespace [" ", " ", " "]       head
//! "a b c "     tokens [a, b, c]  whitespace [" ", " ", " "]       tail
//! " a b c "    tokens [a, b, c]  whitespace [" ", " ", " ", " "]  head and tail
//! ```

mod assemble;
mod dedupe;

use std::sync::LazyLock;

use regex::Regex;

pub use assemble::assemble;
pub use dedupe::{Deduped, dedupe};

/// Runs of class separators: tab, line feed, form feed, carriage return, space.
static SEPARATOR: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[\t\n\x0C\r ]+").expect("separator pattern is valid"));

/// Marker of a template-engine placeholder (`{{ ... }}`).
const PLACEHOLDER_OPEN: &str = "{{";

/// Returns true when `raw` holds a template placeholder that must not be reordered.
pub fn has_placeholder(raw: &str) -> bool {
	raw.contains(PLACEHOLDER_OPEN)
}

/// Parsed decomposition of one class string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classlist<'a> {
	/// Class tokens in source order.
	pub tokens: Vec<&'a str>,
	/// Whitespace runs in source order, interleaved with `tokens`.
	pub whitespace: Vec<&'a str>,
	/// The string starts with whitespace (`whitespace[0]` precedes `tokens[0]`).
	pub head_space: bool,
	/// The string ends with whitespace.
	pub tail_space: bool,
}

impl<'a> Classlist<'a> {
	/// Splits `raw` into tokens and whitespace runs.
	pub fn parse(raw: &'a str) -> Self {
		let mut tokens = Vec::new();
		let mut whitespace = Vec::new();
		let mut cursor = 0;

		for sep in SEPARATOR.find_iter(raw) {
			if sep.start() > cursor {
				tokens.push(&raw[cursor..sep.start()]);
			}
			whitespace.push(sep.as_str());
			cursor = sep.end();
		}
		if cursor < raw.len() {
			tokens.push(&raw[cursor..]);
		}

		let head_space = SEPARATOR.find(raw).is_some_and(|m| m.start() == 0);
		let tail_space = !raw.is_empty() && cursor == raw.len() && !whitespace.is_empty();

		Self {
			tokens,
			whitespace,
			head_space,
			tail_space,
		}
	}

	/// Number of class tokens.
	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	/// Returns true if there are no class tokens.
	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Returns true if reordering could change anything (two or more tokens).
	pub fn is_sortable(&self) -> bool {
		self.tokens.len() > 1
	}

	/// Reassembles `sorted` with this list's whitespace layout.
	///
	/// `sorted` must be a permutation of [`Classlist::tokens`]. With
	/// `remove_duplicates`, adjacent equal tokens collapse into one and the
	/// matching whitespace run is dropped alongside.
	pub fn rebuild(&self, sorted: &[&'a str], remove_duplicates: bool) -> String {
		let deduped = dedupe(
			sorted,
			&self.whitespace,
			self.head_space,
			self.tail_space,
			remove_duplicates,
		);
		assemble(
			&deduped.tokens,
			&deduped.whitespace,
			self.head_space,
			self.tail_space,
		)
	}
}
