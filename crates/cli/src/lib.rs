//! Command-line front end.
//!
//! [`run`] wires the pieces together: settings are loaded from `weft.toml` and
//! overridden by command-line values, files are discovered with gitignore
//! rules applied, and each file goes through the [`Engine`]. Violations are
//! reported one per line as `path:line:col: message [rule]`.

mod cli;
mod engine;
mod report;
mod settings;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use ignore::WalkBuilder;
use tracing::{info, warn};
use weft_oracle::{TableFactory, WorkerClient, WorkerConfig, WorkerFactory};
use weft_order::ContextFactory;
use weft_syntax::FileKind;

pub use cli::Cli;
pub use engine::{Engine, FixOutcome, MAX_FIX_PASSES};
pub use report::write_report;
pub use settings::{SETTINGS_FILE, Settings};

/// Totals of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
	/// Files checked.
	pub files: usize,
	/// Files rewritten by `--fix`.
	pub fixed: usize,
	/// Violations left unfixed.
	pub violations: usize,
}

/// Runs the checker for `cli`, writing reports to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<Summary> {
	let cwd = match &cli.cwd {
		Some(dir) => std::path::absolute(dir).with_context(|| format!("invalid working directory {}", dir.display()))?,
		None => std::env::current_dir().context("failed to read the working directory")?,
	};
	let settings = Settings::load(cli.settings.as_deref(), &cwd)?.with_overrides(cli);
	let factory = oracle_factory(&settings, &cwd)?;
	let files = discover(&cwd, &cli.paths);
	info!(files = files.len(), fix = cli.fix, "checking files");

	let mut engine = Engine::new(settings, cwd.clone(), factory);
	let mut summary = Summary::default();
	for path in &files {
		let source = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
		let shown = display_path(&cwd, path);

		let (text, violations) = if cli.fix {
			let outcome = engine.fix(path, &source)?;
			if outcome.output != source {
				std::fs::write(path, &outcome.output).with_context(|| format!("failed to write {}", path.display()))?;
				summary.fixed += 1;
			}
			(outcome.output, outcome.remaining)
		} else {
			let violations = engine.check(path, &source)?;
			(source, violations)
		};

		write_report(out, &shown, &text, &violations).context("failed to write report")?;
		summary.files += 1;
		summary.violations += violations.len();
	}

	info!(
		files = summary.files,
		fixed = summary.fixed,
		violations = summary.violations,
		"done"
	);
	Ok(summary)
}

/// Lists supported files under `paths`, sorted and deduplicated.
///
/// Directories are walked with gitignore and hidden-file rules; files named
/// directly are always included when their kind is supported.
pub fn discover(cwd: &Path, paths: &[PathBuf]) -> Vec<PathBuf> {
	let mut files = Vec::new();
	for path in paths {
		let walker = WalkBuilder::new(cwd.join(path))
			.standard_filters(true)
			.require_git(false)
			.follow_links(false)
			.build();

		for entry in walker {
			let entry = match entry {
				Ok(entry) => entry,
				Err(err) => {
					warn!(error = %err, "walk entry error");
					continue;
				}
			};
			if entry.file_type().is_some_and(|t| t.is_file()) && FileKind::from_path(entry.path()).is_some() {
				files.push(entry.into_path());
			}
		}
	}
	files.sort();
	files.dedup();
	files
}

fn oracle_factory(settings: &Settings, cwd: &Path) -> anyhow::Result<Arc<dyn ContextFactory>> {
	if let Some(table) = &settings.table {
		info!(table = %table.display(), "answering from order table");
		return Ok(Arc::new(TableFactory::file(cwd.join(table))));
	}

	let mut config = match &settings.worker {
		Some(command) => WorkerConfig::new(command.clone()),
		None => WorkerConfig::bundled(),
	};
	config.cwd = Some(cwd.to_path_buf());
	let client = WorkerClient::new(config).context("failed to set up the ranking worker")?;
	Ok(Arc::new(WorkerFactory::new(Arc::new(client))))
}

fn display_path(cwd: &Path, path: &Path) -> String {
	path.strip_prefix(cwd).unwrap_or(path).display().to_string()
}
