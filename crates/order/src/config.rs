//! Framework config resolution and staleness tracking.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, UNIX_EPOCH};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{Error, Result};

/// Minimum interval between two metadata checks of the same config file.
pub const CHECK_REFRESH_RATE: Duration = Duration::from_millis(1_000);

/// Where the framework configuration comes from.
///
/// A JSON or TOML string is read as a path; any other value is an inline
/// configuration object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigSource {
	/// Path to a config file, relative to the working directory unless absolute.
	Path(PathBuf),
	/// Inline configuration object.
	Inline(Value),
}

impl Default for ConfigSource {
	fn default() -> Self {
		Self::Path(PathBuf::from("./src/app.css"))
	}
}

/// Cache identity of a resolved configuration.
///
/// Two resolutions with equal identities share a ranking context.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigIdentity {
	/// A config file at its last seen modification time.
	File {
		/// Absolute path of the file.
		path: PathBuf,
		/// Modification time in milliseconds since the Unix epoch.
		modified: u64,
	},
	/// An inline object, by its serialized JSON text.
	Inline(String),
}

/// A configuration ready to be handed to a context factory.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
	/// Cache identity.
	pub identity: ConfigIdentity,
	/// Source with relative paths made absolute.
	pub source: ConfigSource,
}

impl ResolvedConfig {
	/// Config value as sent to an oracle: the path string or the inline object.
	pub fn payload(&self) -> Value {
		match &self.source {
			ConfigSource::Path(path) => Value::String(path.to_string_lossy().into_owned()),
			ConfigSource::Inline(value) => value.clone(),
		}
	}

	/// Staleness stamp: the file modification time, zero for inline configs.
	pub fn stamp(&self) -> u64 {
		match self.identity {
			ConfigIdentity::File { modified, .. } => modified,
			ConfigIdentity::Inline(_) => 0,
		}
	}

	/// Config file path, if the config comes from a file.
	pub fn path(&self) -> Option<&Path> {
		match &self.identity {
			ConfigIdentity::File { path, .. } => Some(path),
			ConfigIdentity::Inline(_) => None,
		}
	}
}

#[derive(Debug, Clone, Copy)]
struct FileCheck {
	modified: u64,
	checked_at: Instant,
}

/// Resolves config sources, statting files at most once per refresh interval.
#[derive(Debug)]
pub struct ConfigResolver {
	refresh: Duration,
	checks: FxHashMap<PathBuf, FileCheck>,
}

impl Default for ConfigResolver {
	fn default() -> Self {
		Self::new(CHECK_REFRESH_RATE)
	}
}

impl ConfigResolver {
	/// Creates a resolver with the given refresh interval.
	pub fn new(refresh: Duration) -> Self {
		Self {
			refresh,
			checks: FxHashMap::default(),
		}
	}

	/// Resolves `source` relative to `cwd`.
	pub fn resolve(&mut self, source: &ConfigSource, cwd: &Path) -> Result<ResolvedConfig> {
		self.resolve_at(source, cwd, Instant::now())
	}

	/// Resolves `source` relative to `cwd` as of `now`.
	///
	/// A file checked less than one refresh interval before `now` keeps its
	/// previous identity without touching the filesystem. A missing file is an
	/// error.
	pub fn resolve_at(&mut self, source: &ConfigSource, cwd: &Path, now: Instant) -> Result<ResolvedConfig> {
		let path = match source {
			ConfigSource::Inline(value) => {
				return Ok(ResolvedConfig {
					identity: ConfigIdentity::Inline(value.to_string()),
					source: source.clone(),
				});
			}
			ConfigSource::Path(path) if path.is_absolute() => path.clone(),
			ConfigSource::Path(path) => cwd.join(path),
		};

		let modified = match self.checks.get(&path) {
			Some(check) if now.saturating_duration_since(check.checked_at) <= self.refresh => check.modified,
			_ => {
				let modified = modified_millis(&path)?;
				if let Some(previous) = self.checks.get(&path)
					&& previous.modified != modified
				{
					debug!(path = %path.display(), "config file changed");
				}
				self.checks.insert(
					path.clone(),
					FileCheck {
						modified,
						checked_at: now,
					},
				);
				modified
			}
		};

		Ok(ResolvedConfig {
			identity: ConfigIdentity::File {
				path: path.clone(),
				modified,
			},
			source: ConfigSource::Path(path),
		})
	}
}

fn modified_millis(path: &Path) -> Result<u64> {
	let metadata = std::fs::metadata(path).map_err(|error| match error.kind() {
		std::io::ErrorKind::NotFound => Error::ConfigNotFound(path.to_path_buf()),
		_ => Error::Io {
			path: path.to_path_buf(),
			error,
		},
	})?;
	let modified = metadata.modified().map_err(|error| Error::Io {
		path: path.to_path_buf(),
		error,
	})?;
	let millis = modified
		.duration_since(UNIX_EPOCH)
		.unwrap_or_default()
		.as_millis();
	Ok(u64::try_from(millis).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests;
