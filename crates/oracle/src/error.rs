//! Error types for oracle clients.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors raised while talking to a ranking oracle.
#[derive(Debug, Error)]
pub enum OracleError {
	/// The worker process could not be started.
	#[error("failed to spawn oracle worker `{command}`: {reason}")]
	Spawn {
		/// Program that failed to start.
		command: String,
		/// Reason reported by the OS.
		reason: String,
	},

	/// The worker command line is empty.
	#[error("oracle worker command is empty")]
	EmptyCommand,

	/// Input/output errors on the worker pipes.
	#[error("{0}")]
	Io(#[from] std::io::Error),

	/// A message could not be encoded or decoded.
	#[error("invalid oracle message: {0}")]
	Json(#[from] serde_json::Error),

	/// The peer violated the framing or JSON-RPC rules.
	#[error("protocol error: {0}")]
	Protocol(String),

	/// The worker did not answer in time.
	#[error("oracle worker did not answer within {0:?}")]
	Timeout(Duration),

	/// The worker closed its output.
	#[error("oracle worker exited")]
	Exited,

	/// The worker answered with an error.
	#[error("oracle worker error {code}: {message}")]
	Remote {
		/// JSON-RPC error code.
		code: i64,
		/// Error message.
		message: String,
	},

	/// An order table could not be read.
	#[error("failed to read order table {}: {error}", path.display())]
	Table {
		/// Path of the table file.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}

impl OracleError {
	/// Whether the worker process is unusable after this error.
	pub fn is_fatal_to_process(&self) -> bool {
		matches!(
			self,
			Self::Io(_) | Self::Json(_) | Self::Protocol(_) | Self::Timeout(_) | Self::Exited
		)
	}
}

impl From<OracleError> for weft_order::Error {
	fn from(error: OracleError) -> Self {
		weft_order::Error::oracle(error)
	}
}

/// Result type for oracle operations.
pub type Result<T, E = OracleError> = std::result::Result<T, E>;
