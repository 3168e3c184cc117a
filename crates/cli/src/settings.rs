//! `weft.toml` settings.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::debug;
use weft_order::ConfigSource;
use weft_splice::SortOptions;

use crate::Cli;

/// Settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = "weft.toml";

/// Effective run settings.
///
/// ```toml
/// callees = ["clsx", "cn"]
/// config = "./tailwind.config.js"
/// removeDuplicates = false
/// worker = ["node", "tools/class-order.mjs"]
///
/// [declarations]
/// suffix = ["Classes"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
	/// Traversal and rewrite options.
	#[serde(flatten)]
	pub sort: SortOptions,
	/// Framework config: a path or an inline table.
	pub config: ConfigSource,
	/// Search for the config upwards from each file.
	pub monorepo: bool,
	/// Worker command line; the bundled Node worker when unset.
	pub worker: Option<Vec<String>>,
	/// Order table replacing the worker.
	pub table: Option<PathBuf>,
}

impl Settings {
	/// Reads `explicit`, or `weft.toml` under `cwd` when present.
	///
	/// An explicit file must exist; a missing default file means defaults.
	pub fn load(explicit: Option<&Path>, cwd: &Path) -> anyhow::Result<Self> {
		let path = match explicit {
			Some(path) => cwd.join(path),
			None => {
				let path = cwd.join(SETTINGS_FILE);
				if !path.is_file() {
					debug!(cwd = %cwd.display(), "no settings file, using defaults");
					return Ok(Self::default());
				}
				path
			}
		};

		let text = std::fs::read_to_string(&path)
			.with_context(|| format!("failed to read settings file {}", path.display()))?;
		let settings =
			toml::from_str(&text).with_context(|| format!("invalid settings in {}", path.display()))?;
		debug!(path = %path.display(), "loaded settings");
		Ok(settings)
	}

	/// Applies command-line values over the file values.
	pub fn with_overrides(mut self, cli: &Cli) -> Self {
		if let Some(config) = &cli.config {
			self.config = ConfigSource::Path(config.clone());
		}
		if let Some(worker) = &cli.worker {
			self.worker = Some(worker.split_whitespace().map(String::from).collect());
		}
		if let Some(table) = &cli.table {
			self.table = Some(table.clone());
		}
		self
	}
}
