use tracing::debug;
use tree_sitter::{Parser, Tree};
use weft_splice::{AttributePart, Node, StyleBlock};

use crate::lower::Lowerer;
use crate::markup::{self, Markup, RawPart};
use crate::{Dialect, FileKind, Result, SyntaxError};

/// Turns source files into the syntax roots the class sorter walks.
///
/// One parser is reused across files; the grammar is switched only when the
/// dialect changes.
pub struct SourceParser {
	parser: Parser,
	loaded: Option<Dialect>,
}

impl SourceParser {
	/// Creates a parser with no grammar loaded yet.
	pub fn new() -> Self {
		Self {
			parser: Parser::new(),
			loaded: None,
		}
	}

	/// Returns the roots of `source`.
	///
	/// Script files yield every call, tagged template and variable declarator.
	/// Markup files yield the same for each `<script>` block plus one
	/// [`Node::ClassAttribute`] per start-tag `class` attribute.
	pub fn roots(&mut self, source: &str, kind: FileKind) -> Result<Vec<Node>> {
		let mut roots = Vec::new();
		match kind.script_dialect() {
			Some(dialect) => self.script_roots(source, 0, dialect, &mut roots)?,
			None => self.markup_roots(source, kind, &mut roots)?,
		}
		debug!(?kind, roots = roots.len(), "lowered source");
		Ok(roots)
	}

	/// Returns the `<style>` elements of a markup document; scripts have none.
	pub fn style_blocks(&self, source: &str, kind: FileKind) -> Vec<StyleBlock> {
		if !kind.is_markup() {
			return Vec::new();
		}
		markup::scan(source, kind).styles
	}

	fn script_roots(&mut self, text: &str, offset: usize, dialect: Dialect, out: &mut Vec<Node>) -> Result<()> {
		let tree = self.parse(text, dialect)?;
		if tree.root_node().has_error() {
			debug!(%dialect, offset, "script has syntax errors, lowering what parsed");
		}
		Lowerer::new(text, offset).roots(&tree, out);
		Ok(())
	}

	fn markup_roots(&mut self, source: &str, kind: FileKind, out: &mut Vec<Node>) -> Result<()> {
		let Markup { scripts, attributes, .. } = markup::scan(source, kind);
		let dialect = if scripts.iter().any(|s| s.dialect == Dialect::TypeScript) {
			Dialect::TypeScript
		} else {
			Dialect::JavaScript
		};

		for script in scripts {
			if let Some(text) = source.get(script.content.clone()) {
				self.script_roots(text, script.content.start, script.dialect, out)?;
			}
		}

		for attribute in attributes {
			let mut parts = Vec::with_capacity(attribute.parts.len());
			for part in attribute.parts {
				parts.push(self.attribute_part(source, part, dialect)?);
			}
			out.push(Node::ClassAttribute {
				span: attribute.span,
				quoted: attribute.quoted,
				parts,
			});
		}
		Ok(())
	}

	fn attribute_part(&mut self, source: &str, part: RawPart, dialect: Dialect) -> Result<AttributePart> {
		Ok(match part {
			RawPart::Text(span) => AttributePart::Text { span },
			RawPart::Mustache(span) => {
				let inner = span.start + 1..span.end - 1;
				let expression = self.expression(source.get(inner.clone()).unwrap_or_default(), inner.start, dialect)?;
				AttributePart::Mustache {
					expression: expression.unwrap_or(Node::Other { span: inner }),
					span,
				}
			}
		})
	}

	/// Lowers one expression starting at byte `start` of the file.
	fn expression(&mut self, text: &str, start: usize, dialect: Dialect) -> Result<Option<Node>> {
		let wrapped = format!("({text})");
		let tree = self.parse(&wrapped, dialect)?;
		Ok(Lowerer::new(&wrapped, start.saturating_sub(1)).wrapped_expression(&tree))
	}

	fn parse(&mut self, text: &str, dialect: Dialect) -> Result<Tree> {
		if self.loaded != Some(dialect) {
			self.parser
				.set_language(&dialect.language())
				.map_err(|error| SyntaxError::Grammar { dialect, error })?;
			self.loaded = Some(dialect);
		}
		self.parser.parse(text, None).ok_or(SyntaxError::Parse(dialect))
	}
}

impl Default for SourceParser {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for SourceParser {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SourceParser").field("loaded", &self.loaded).finish()
	}
}
