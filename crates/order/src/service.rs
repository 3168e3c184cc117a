//! Top-level owner of the config and context caches.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::{
	ConfigIdentity, ConfigResolver, ConfigSource, ContextFactory, Error, ExpiringMap, OrderResolver, Result,
	find_config_upwards,
};

/// Lifetime of a cached ranking context.
pub const CONTEXT_TTL: Duration = Duration::from_secs(10);

/// Framework major version whose configs are not files and cannot be searched for.
const CSS_FIRST_VERSION: u32 = 4;

/// What to resolve an order resolver for.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigRequest {
	/// Configured source.
	pub source: ConfigSource,
	/// Search upwards from the processed file instead of using `source` as is.
	pub monorepo: bool,
	/// Working directory; relative paths resolve against it and monorepo
	/// searches stop at it.
	pub cwd: PathBuf,
	/// File being processed, the start of a monorepo search.
	pub file: Option<PathBuf>,
}

impl ConfigRequest {
	/// A request for `source` relative to `cwd`.
	pub fn new(source: ConfigSource, cwd: impl Into<PathBuf>) -> Self {
		Self {
			source,
			monorepo: false,
			cwd: cwd.into(),
			file: None,
		}
	}

	/// Enables monorepo search starting at `file`.
	pub fn monorepo(mut self, file: impl Into<PathBuf>) -> Self {
		self.monorepo = true;
		self.file = Some(file.into());
		self
	}

	fn search_source(&self) -> Result<ConfigSource> {
		let start = self
			.file
			.as_deref()
			.and_then(Path::parent)
			.unwrap_or(self.cwd.as_path());
		let start = if start.is_absolute() {
			start.to_path_buf()
		} else {
			self.cwd.join(start)
		};
		let configured = match &self.source {
			ConfigSource::Path(path) => path.file_name().and_then(|n| n.to_str()),
			ConfigSource::Inline(_) => None,
		};
		find_config_upwards(&self.cwd, &start, configured).map(ConfigSource::Path)
	}
}

/// Resolves configs into cached [`OrderResolver`]s.
///
/// Contexts are keyed by [`ConfigIdentity`] and expire after the context TTL.
/// Context construction happens under the cache lock, so concurrent callers
/// asking for the same identity build it once.
pub struct OrderService {
	factory: Arc<dyn ContextFactory>,
	configs: Mutex<ConfigResolver>,
	contexts: Mutex<ExpiringMap<ConfigIdentity, Arc<OrderResolver>>>,
}

impl OrderService {
	/// Creates a service with the default refresh interval and context TTL.
	pub fn new(factory: Arc<dyn ContextFactory>) -> Self {
		Self::with_timing(factory, crate::CHECK_REFRESH_RATE, CONTEXT_TTL)
	}

	/// Creates a service with explicit config refresh interval and context TTL.
	pub fn with_timing(factory: Arc<dyn ContextFactory>, refresh: Duration, ttl: Duration) -> Self {
		Self {
			factory,
			configs: Mutex::new(ConfigResolver::new(refresh)),
			contexts: Mutex::new(ExpiringMap::new(ttl)),
		}
	}

	/// Returns the resolver for `request`.
	pub fn resolver(&self, request: &ConfigRequest) -> Result<Arc<OrderResolver>> {
		self.resolver_at(request, Instant::now())
	}

	/// Returns the resolver for `request` as of `now`.
	pub fn resolver_at(&self, request: &ConfigRequest, now: Instant) -> Result<Arc<OrderResolver>> {
		let source = if request.monorepo {
			request.search_source()?
		} else {
			request.source.clone()
		};
		let config = self.configs.lock().resolve_at(&source, &request.cwd, now)?;

		let mut contexts = self.contexts.lock();
		if let Some(resolver) = contexts.get_at(&config.identity, now) {
			debug!(identity = ?config.identity, "ranking context cache hit");
			return Ok(Arc::clone(resolver));
		}

		debug!(identity = ?config.identity, "creating ranking context");
		let context = self.factory.create(&config)?;
		if request.monorepo
			&& let Some(version) = context.version()
			&& version >= CSS_FIRST_VERSION
		{
			return Err(Error::MonorepoUnsupported(version));
		}
		if let Some(version) = context.version() {
			info!(version, config = ?config.identity, "ranking context ready");
		}

		let resolver = Arc::new(OrderResolver::new(context));
		contexts.purge_at(now);
		contexts.insert_at(config.identity, Arc::clone(&resolver), now);
		Ok(resolver)
	}
}

impl std::fmt::Debug for OrderService {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("OrderService")
			.field("contexts", &self.contexts.lock().len())
			.finish_non_exhaustive()
	}
}
