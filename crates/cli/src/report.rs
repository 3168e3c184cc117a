use std::io::{self, Write};

use weft_splice::{LineCol, Violation, line_col};

/// Writes one `path:line:col: message [rule]` line per violation.
pub fn write_report(out: &mut impl Write, path: &str, source: &str, violations: &[Violation]) -> io::Result<()> {
	for violation in violations {
		let LineCol { line, column } = line_col(source, violation.range.start);
		writeln!(out, "{path}:{line}:{column}: {} [{}]", violation.message, violation.rule)?;
	}
	Ok(())
}
