//! Error types for order resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error raised by a ranking oracle implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while resolving a config or a class order.
#[derive(Debug, Error)]
pub enum Error {
	/// The configured framework config file does not exist.
	#[error("config file not found: {}", .0.display())]
	ConfigNotFound(PathBuf),

	/// Error reading config metadata.
	#[error("I/O error reading {}: {error}", path.display())]
	Io {
		/// Path that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Monorepo search left its root without finding a config file.
	#[error(
		"unable to find config file: `monorepo` is enabled, yet no config file was found between {} and {}; \
		 make sure the package or one of its parents has a tailwind config file",
		start.display(),
		root.display()
	)]
	MonorepoConfigNotFound {
		/// Directory the search started from.
		start: PathBuf,
		/// Boundary the search may not leave.
		root: PathBuf,
	},

	/// Monorepo mode was requested for a framework version without config files.
	#[error("the `monorepo` option is not supported for framework version {0}")]
	MonorepoUnsupported(u32),

	/// The ranking oracle failed to build a context or answer a query.
	#[error("ranking oracle failed: {0}")]
	Oracle(#[source] BoxError),

	/// The ranking oracle answered with the wrong number of entries.
	#[error("ranking oracle returned {got} entries for {expected} classes")]
	OrderMismatch {
		/// Number of classes asked for.
		expected: usize,
		/// Number of entries received.
		got: usize,
	},

	/// An order value could not be parsed as an integer.
	#[error("invalid order key: {0:?}")]
	InvalidKey(String),
}

impl Error {
	/// Wraps an oracle-side error.
	pub fn oracle(error: impl Into<BoxError>) -> Self {
		Self::Oracle(error.into())
	}
}

/// Result type for order resolution.
pub type Result<T, E = Error> = std::result::Result<T, E>;
