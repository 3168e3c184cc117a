use std::ops::Range;

use thiserror::Error;

/// Errors raised while checking or fixing a source file.
#[derive(Debug, Error)]
pub enum SpliceError {
	/// Class order resolution failed.
	#[error(transparent)]
	Order(#[from] weft_order::Error),

	/// A violation range is out of bounds or not on a character boundary.
	#[error("replacement range {range:?} is invalid for a source of {len} bytes")]
	InvalidRange {
		/// The offending range.
		range: Range<usize>,
		/// Source length in bytes.
		len: usize,
	},
}

/// Result type for splice operations.
pub type Result<T, E = SpliceError> = std::result::Result<T, E>;
