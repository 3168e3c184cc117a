use thiserror::Error;

use crate::Dialect;

/// Errors raised while turning source text into syntax roots.
#[derive(Debug, Error)]
pub enum SyntaxError {
	/// The grammar is incompatible with the linked tree-sitter runtime.
	#[error("failed to load the {dialect} grammar: {error}")]
	Grammar {
		/// Grammar that failed to load.
		dialect: Dialect,
		/// Version mismatch reported by tree-sitter.
		#[source]
		error: tree_sitter::LanguageError,
	},

	/// The parser gave up without producing a tree.
	#[error("{0} parser produced no tree")]
	Parse(Dialect),
}

/// Result type for syntax front ends.
pub type Result<T, E = SyntaxError> = std::result::Result<T, E>;
