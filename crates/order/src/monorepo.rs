//! Upward config file search for monorepo layouts.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Error, Result};

/// Config file names recognized in every directory of the search.
pub const CONFIG_FILE_NAMES: [&str; 6] = [
	"tailwind.config.js",
	"tailwind.config.cjs",
	"tailwind.config.mjs",
	"tailwind.config.ts",
	"tailwind.config.cts",
	"tailwind.config.mts",
];

/// Finds the nearest config file walking from `start` up to `root`.
///
/// Each directory is checked for `configured_name` first, then for the
/// [`CONFIG_FILE_NAMES`]. The search never leaves `root`; exhausting it is an
/// error naming both ends of the walk.
pub fn find_config_upwards(root: &Path, start: &Path, configured_name: Option<&str>) -> Result<PathBuf> {
	let not_found = || Error::MonorepoConfigNotFound {
		start: start.to_path_buf(),
		root: root.to_path_buf(),
	};

	let mut dir = Some(start);
	while let Some(current) = dir {
		if !current.starts_with(root) {
			break;
		}

		let candidates = configured_name.into_iter().chain(CONFIG_FILE_NAMES);
		for name in candidates {
			let candidate = current.join(name);
			if candidate.is_file() {
				debug!(config = %candidate.display(), "found monorepo config");
				return Ok(candidate);
			}
		}

		dir = current.parent();
	}

	Err(not_found())
}

#[cfg(test)]
mod tests {
	use std::fs;

	use super::*;

	#[test]
	fn test_finds_nearest_config() {
		let tmp = tempfile::tempdir().unwrap();
		let root = tmp.path();
		let pkg = root.join("packages/ui/src");
		fs::create_dir_all(&pkg).unwrap();
		fs::write(root.join("tailwind.config.js"), "").unwrap();
		fs::write(root.join("packages/ui/tailwind.config.ts"), "").unwrap();

		let found = find_config_upwards(root, &pkg, None).unwrap();
		assert_eq!(found, root.join("packages/ui/tailwind.config.ts"));
	}

	#[test]
	fn test_configured_name_wins_in_same_directory() {
		let tmp = tempfile::tempdir().unwrap();
		let root = tmp.path();
		fs::write(root.join("tailwind.config.js"), "").unwrap();
		fs::write(root.join("custom.config.js"), "").unwrap();

		let found = find_config_upwards(root, root, Some("custom.config.js")).unwrap();
		assert_eq!(found, root.join("custom.config.js"));
	}

	#[test]
	fn test_does_not_leave_root() {
		let tmp = tempfile::tempdir().unwrap();
		let outer = tmp.path();
		let root = outer.join("repo");
		let start = root.join("a/b");
		fs::create_dir_all(&start).unwrap();
		fs::write(outer.join("tailwind.config.js"), "").unwrap();

		let err = find_config_upwards(&root, &start, None).unwrap_err();
		assert!(matches!(err, Error::MonorepoConfigNotFound { .. }));
		assert!(err.to_string().contains("monorepo"));
	}

	#[test]
	fn test_start_outside_root_fails() {
		let tmp = tempfile::tempdir().unwrap();
		let root = tmp.path().join("repo");
		let elsewhere = tmp.path().join("other");
		fs::create_dir_all(&root).unwrap();
		fs::create_dir_all(&elsewhere).unwrap();
		fs::write(elsewhere.join("tailwind.config.js"), "").unwrap();

		assert!(find_config_upwards(&root, &elsewhere, None).is_err());
	}
}
