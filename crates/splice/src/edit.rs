//! Violations and fix application.

use std::ops::Range;

use crate::{Result, SpliceError};

/// A located, fixable finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
	/// Rule that produced the finding.
	pub rule: &'static str,
	/// Byte range replaced by the fix.
	pub range: Range<usize>,
	/// Replacement text for `range`.
	pub replacement: String,
	/// Human-readable message.
	pub message: String,
}

/// Result of applying violations to a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixed {
	/// Source with the applied replacements.
	pub output: String,
	/// Number of replacements applied.
	pub applied: usize,
	/// Replacements skipped because they overlapped an applied one.
	pub skipped: usize,
}

/// Applies the replacements of `violations` to `source`.
///
/// Replacements are applied in range order; one that overlaps an already
/// applied range is skipped and counted, to be picked up by a later pass.
pub fn apply_violations(source: &str, violations: &[Violation]) -> Result<Fixed> {
	let mut ordered: Vec<&Violation> = violations.iter().collect();
	ordered.sort_by_key(|v| (v.range.start, v.range.end));

	let mut output = String::with_capacity(source.len());
	let mut pos = 0;
	let mut applied = 0;
	let mut skipped = 0;

	for violation in ordered {
		let range = violation.range.clone();
		if range.start > range.end
			|| range.end > source.len()
			|| !source.is_char_boundary(range.start)
			|| !source.is_char_boundary(range.end)
		{
			return Err(SpliceError::InvalidRange {
				range,
				len: source.len(),
			});
		}
		if range.start < pos {
			skipped += 1;
			continue;
		}

		output.push_str(&source[pos..range.start]);
		output.push_str(&violation.replacement);
		pos = range.end;
		applied += 1;
	}
	output.push_str(&source[pos..]);

	Ok(Fixed {
		output,
		applied,
		skipped,
	})
}

/// One-based line and column (in characters) of a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
	/// One-based line.
	pub line: usize,
	/// One-based column.
	pub column: usize,
}

/// Locates `offset` in `source`; offsets past the end clamp to it.
pub fn line_col(source: &str, offset: usize) -> LineCol {
	let mut offset = offset.min(source.len());
	while !source.is_char_boundary(offset) {
		offset -= 1;
	}
	let before = &source[..offset];
	let line_start = before.rfind('\n').map_or(0, |i| i + 1);
	LineCol {
		line: before.matches('\n').count() + 1,
		column: before[line_start..].chars().count() + 1,
	}
}
