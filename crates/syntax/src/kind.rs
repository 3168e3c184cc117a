use std::fmt;
use std::path::Path;

/// Source file categories the front ends understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
	/// `.js`, `.mjs`, `.cjs`, `.jsx`.
	JavaScript,
	/// `.ts`, `.mts`, `.cts`.
	TypeScript,
	/// `.tsx`.
	Tsx,
	/// `.svelte` components.
	Svelte,
	/// `.html` documents.
	Html,
}

impl FileKind {
	/// Classifies `path` by extension; `None` for unsupported files.
	pub fn from_path(path: &Path) -> Option<Self> {
		let ext = path.extension()?.to_str()?;
		Some(match ext {
			"js" | "mjs" | "cjs" | "jsx" => Self::JavaScript,
			"ts" | "mts" | "cts" => Self::TypeScript,
			"tsx" => Self::Tsx,
			"svelte" => Self::Svelte,
			"html" => Self::Html,
			_ => return None,
		})
	}

	/// Whether the file is markup with embedded scripts.
	pub fn is_markup(self) -> bool {
		matches!(self, Self::Svelte | Self::Html)
	}

	/// Grammar of a plain script file.
	pub fn script_dialect(self) -> Option<Dialect> {
		match self {
			Self::JavaScript => Some(Dialect::JavaScript),
			Self::TypeScript => Some(Dialect::TypeScript),
			Self::Tsx => Some(Dialect::Tsx),
			Self::Svelte | Self::Html => None,
		}
	}
}

/// A tree-sitter grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
	/// JavaScript with JSX.
	JavaScript,
	/// TypeScript.
	TypeScript,
	/// TypeScript with JSX.
	Tsx,
}

impl Dialect {
	pub(crate) fn language(self) -> tree_sitter::Language {
		match self {
			Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
			Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
			Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
		}
	}
}

impl fmt::Display for Dialect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::JavaScript => "javascript",
			Self::TypeScript => "typescript",
			Self::Tsx => "tsx",
		})
	}
}
