//! The per-file check and fix pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tracing::debug;
use weft_order::{ConfigRequest, ContextFactory, OrderService};
use weft_splice::{Violation, apply_violations, check_mustache_mix, check_style_lang, sort_classes};
use weft_syntax::{FileKind, SourceParser};

use crate::Settings;

/// Upper bound on fix passes over one file.
pub const MAX_FIX_PASSES: usize = 10;

/// Result of fixing one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
	/// Source after all passes.
	pub output: String,
	/// Passes that changed the source.
	pub passes: usize,
	/// Violations still present in `output`.
	pub remaining: Vec<Violation>,
}

/// Parses files, resolves their class order and reports or fixes violations.
pub struct Engine {
	settings: Settings,
	cwd: PathBuf,
	service: OrderService,
	parser: SourceParser,
}

impl Engine {
	/// Creates an engine whose ranking contexts come from `factory`.
	pub fn new(settings: Settings, cwd: PathBuf, factory: Arc<dyn ContextFactory>) -> Self {
		Self {
			settings,
			cwd,
			service: OrderService::new(factory),
			parser: SourceParser::new(),
		}
	}

	/// Returns the violations of `source`, read from `path`, in range order.
	///
	/// Unsupported file kinds have none. Svelte style blocks are checked
	/// without resolving a config.
	pub fn check(&mut self, path: &Path, source: &str) -> anyhow::Result<Vec<Violation>> {
		let Some(kind) = FileKind::from_path(path) else {
			return Ok(Vec::new());
		};

		let mut violations = Vec::new();
		if kind == FileKind::Svelte {
			violations.extend(
				self.parser
					.style_blocks(source, kind)
					.iter()
					.filter_map(|style| check_style_lang(source, style)),
			);
		}

		let roots = self
			.parser
			.roots(source, kind)
			.with_context(|| format!("failed to parse {}", path.display()))?;
		if !roots.is_empty() {
			let mut request = ConfigRequest::new(self.settings.config.clone(), &self.cwd);
			if self.settings.monorepo {
				request = request.monorepo(path);
			}
			let resolver = self.service.resolver(&request)?;

			violations.extend(
				sort_classes(source, &roots, &self.settings.sort, &resolver)
					.with_context(|| format!("failed to sort classes in {}", path.display()))?,
			);
			if kind.is_markup() {
				violations.extend(roots.iter().filter_map(|root| check_mustache_mix(source, root)));
			}
		}

		violations.sort_by_key(|v| (v.range.start, v.range.end));
		Ok(violations)
	}

	/// Applies fixes to `source` until it is stable or the pass bound is hit.
	///
	/// Fixes that overlap one another are applied one per pass.
	pub fn fix(&mut self, path: &Path, source: &str) -> anyhow::Result<FixOutcome> {
		let mut output = source.to_string();
		let mut passes = 0;
		let mut remaining = self.check(path, &output)?;

		while !remaining.is_empty() && passes < MAX_FIX_PASSES {
			let fixed = apply_violations(&output, &remaining)?;
			if fixed.applied == 0 || fixed.output == output {
				break;
			}
			debug!(path = %path.display(), applied = fixed.applied, skipped = fixed.skipped, "fix pass");
			output = fixed.output;
			passes += 1;
			remaining = self.check(path, &output)?;
		}

		Ok(FixOutcome {
			output,
			passes,
			remaining,
		})
	}
}

impl std::fmt::Debug for Engine {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Engine")
			.field("cwd", &self.cwd)
			.field("service", &self.service)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests;
