//! Markup scanning.
//!
//! A single forward pass over an HTML or Svelte document that locates
//! `<script>` bodies, `<style>` elements and start-tag `class` attribute
//! values. Comments and `<style>` bodies are skipped. In Svelte documents `{...}` mustaches are
//! skipped as a unit wherever they appear, so expressions holding `<` or `>`
//! do not derail tag detection.

use weft_splice::{LangAttribute, Span, StyleBlock};

use crate::{Dialect, FileKind};

/// What a scan found, in document order.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Markup {
	pub scripts: Vec<Script>,
	pub styles: Vec<StyleBlock>,
	pub attributes: Vec<ClassAttr>,
}

/// A `<script>` body.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Script {
	pub content: Span,
	pub dialect: Dialect,
}

/// A start-tag `class` attribute value.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ClassAttr {
	pub span: Span,
	pub quoted: bool,
	pub parts: Vec<RawPart>,
}

/// An unparsed chunk of an attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RawPart {
	Text(Span),
	/// Braces included.
	Mustache(Span),
}

pub(crate) fn scan(source: &str, kind: FileKind) -> Markup {
	let mut scanner = Scanner {
		src: source.as_bytes(),
		pos: 0,
		mustaches: kind == FileKind::Svelte,
		out: Markup::default(),
	};
	scanner.run();
	scanner.out
}

struct Scanner<'s> {
	src: &'s [u8],
	pos: usize,
	mustaches: bool,
	out: Markup,
}

struct Attribute {
	name: Span,
	value: Option<Value>,
}

struct Value {
	span: Span,
	quoted: bool,
	parts: Vec<RawPart>,
}

impl Scanner<'_> {
	fn run(&mut self) {
		while let Some(&byte) = self.src.get(self.pos) {
			match byte {
				b'<' if self.src[self.pos..].starts_with(b"<!--") => {
					self.pos = find(self.src, self.pos + 4, b"-->").map_or(self.src.len(), |end| end + 3);
				}
				b'<' if self.peek(1).is_some_and(|b| b.is_ascii_alphabetic()) => self.start_tag(),
				b'{' if self.mustaches => self.pos = self.mustache_end(self.pos),
				_ => self.pos += 1,
			}
		}
	}

	fn start_tag(&mut self) {
		self.pos += 1;
		let name_start = self.pos;
		while self
			.peek(0)
			.is_some_and(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b':' | b'.'))
		{
			self.pos += 1;
		}
		let name = self.text(name_start..self.pos).to_ascii_lowercase();
		let raw_text = matches!(name.as_str(), "script" | "style");
		let mut script = (name == "script").then_some(Some(Dialect::JavaScript));
		let mut lang = None;

		let tag_end = loop {
			self.skip_whitespace();
			match self.peek(0) {
				None => return,
				Some(b'>') => {
					self.pos += 1;
					break self.pos - 1;
				}
				Some(b'/') => self.pos += 1,
				Some(b'{') if self.mustaches => self.pos = self.mustache_end(self.pos),
				Some(_) => {
					let attribute = self.attribute();
					let attr_name = self.text(attribute.name.clone());
					if name == "style" && attr_name == "lang" {
						lang = Some(LangAttribute {
							span: attribute.name.start..attribute.value.as_ref().map_or(attribute.name.end, |v| v.span.end),
							value: attribute.value.as_ref().map(value_text),
						});
					}
					let Some(value) = attribute.value else {
						continue;
					};
					if let Some(dialect) = script.as_mut() {
						script_attribute(dialect, attr_name, self.text(value_text(&value)));
					} else if attr_name == "class" {
						self.out.attributes.push(ClassAttr {
							span: value.span,
							quoted: value.quoted,
							parts: value.parts,
						});
					}
				}
			}
		};

		if raw_text {
			let close = find_ignore_case(self.src, self.pos, format!("</{name}").as_bytes()).unwrap_or(self.src.len());
			if let Some(Some(dialect)) = script {
				self.out.scripts.push(Script {
					content: self.pos..close,
					dialect,
				});
			} else if name == "style" {
				self.out.styles.push(StyleBlock {
					tag_end,
					lang,
					body: self.pos..close,
				});
			}
			self.pos = close;
		}
	}

	fn attribute(&mut self) -> Attribute {
		let start = self.pos;
		while self
			.peek(0)
			.is_some_and(|b| !b.is_ascii_whitespace() && !matches!(b, b'=' | b'>' | b'/'))
		{
			self.pos += 1;
		}
		let name = start..self.pos;
		if name.is_empty() {
			// Stray `=` or similar; step over it.
			self.pos += 1;
			return Attribute { name, value: None };
		}

		self.skip_whitespace();
		if self.peek(0) != Some(b'=') {
			return Attribute { name, value: None };
		}
		self.pos += 1;
		self.skip_whitespace();

		let value = match self.peek(0) {
			Some(quote @ (b'"' | b'\'')) => Some(self.quoted_value(quote)),
			Some(b'{') if self.mustaches => {
				let open = self.pos;
				self.pos = self.mustache_end(open);
				Some(Value {
					span: open..self.pos,
					quoted: false,
					parts: vec![RawPart::Mustache(open..self.pos)],
				})
			}
			Some(_) => {
				let open = self.pos;
				while self.peek(0).is_some_and(|b| !b.is_ascii_whitespace() && b != b'>') {
					self.pos += 1;
				}
				Some(Value {
					span: open..self.pos,
					quoted: false,
					parts: vec![RawPart::Text(open..self.pos)],
				})
			}
			None => None,
		};
		Attribute { name, value }
	}

	fn quoted_value(&mut self, quote: u8) -> Value {
		let open = self.pos;
		self.pos += 1;
		let mut parts = Vec::new();
		let mut text_start = self.pos;

		while let Some(byte) = self.peek(0) {
			if byte == quote {
				break;
			}
			if byte == b'{' && self.mustaches {
				push_text(&mut parts, text_start..self.pos);
				let start = self.pos;
				self.pos = self.mustache_end(start);
				parts.push(RawPart::Mustache(start..self.pos));
				text_start = self.pos;
			} else {
				self.pos += 1;
			}
		}

		let close = self.pos.min(self.src.len());
		push_text(&mut parts, text_start..close);
		self.pos = (close + 1).min(self.src.len());
		Value {
			span: open..self.pos,
			quoted: true,
			parts,
		}
	}

	/// Returns the index just past the brace closing the mustache at `open`.
	///
	/// String literals and comments inside are skipped whole. An unterminated
	/// mustache runs to the end of the document.
	fn mustache_end(&self, open: usize) -> usize {
		let mut depth = 0usize;
		let mut i = open;
		while let Some(&byte) = self.src.get(i) {
			match byte {
				b'{' => depth += 1,
				b'}' => {
					depth = depth.saturating_sub(1);
					if depth == 0 {
						return i + 1;
					}
				}
				b'"' | b'\'' | b'`' => {
					i = string_end(self.src, i);
					continue;
				}
				b'/' if self.src.get(i + 1) == Some(&b'/') => {
					// The newline is left for the next iteration.
					i = find(self.src, i + 2, b"\n").unwrap_or(self.src.len());
					continue;
				}
				b'/' if self.src.get(i + 1) == Some(&b'*') => {
					i = find(self.src, i + 2, b"*/").map_or(self.src.len(), |end| end + 2);
					continue;
				}
				_ => {}
			}
			i += 1;
		}
		self.src.len()
	}

	fn skip_whitespace(&mut self) {
		while self.peek(0).is_some_and(|b| b.is_ascii_whitespace()) {
			self.pos += 1;
		}
	}

	fn peek(&self, ahead: usize) -> Option<u8> {
		self.src.get(self.pos + ahead).copied()
	}

	fn text(&self, span: Span) -> &str {
		self.src
			.get(span)
			.and_then(|bytes| std::str::from_utf8(bytes).ok())
			.unwrap_or_default()
	}
}

fn value_text(value: &Value) -> Span {
	if value.quoted && value.span.len() >= 2 {
		value.span.start + 1..value.span.end - 1
	} else {
		value.span.clone()
	}
}

/// Applies a `<script>` attribute: `lang` picks the grammar, a `type` naming
/// a non-script payload disables lowering.
fn script_attribute(dialect: &mut Option<Dialect>, name: &str, value: &str) {
	match name {
		"lang" if matches!(value, "ts" | "typescript") => {
			if dialect.is_some() {
				*dialect = Some(Dialect::TypeScript);
			}
		}
		"type" => match value {
			"" | "module" | "text/javascript" | "application/javascript" => {}
			"text/typescript" | "application/typescript" => {
				if dialect.is_some() {
					*dialect = Some(Dialect::TypeScript);
				}
			}
			_ => *dialect = None,
		},
		_ => {}
	}
}

fn push_text(parts: &mut Vec<RawPart>, span: Span) {
	if !span.is_empty() {
		parts.push(RawPart::Text(span));
	}
}

/// Index just past the string literal opening at `open`.
fn string_end(src: &[u8], open: usize) -> usize {
	let quote = src[open];
	let mut i = open + 1;
	while let Some(&byte) = src.get(i) {
		match byte {
			b'\\' => i += 2,
			b if b == quote => return i + 1,
			_ => i += 1,
		}
	}
	src.len()
}

fn find(src: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
	src.get(from..)?
		.windows(needle.len())
		.position(|window| window == needle)
		.map(|at| from + at)
}

fn find_ignore_case(src: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
	src.get(from..)?
		.windows(needle.len())
		.position(|window| window.eq_ignore_ascii_case(needle))
		.map(|at| from + at)
}
