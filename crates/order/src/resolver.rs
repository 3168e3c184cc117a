//! Batched, cached order lookups against one ranking context.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::{Error, Layer, OrderKey, RankingContext, Result};

/// Resolved order of a set of tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderMap {
	keys: FxHashMap<String, Option<OrderKey>>,
}

impl OrderMap {
	/// Key of `token`; `None` when unresolved or never asked for.
	pub fn get(&self, token: &str) -> Option<&OrderKey> {
		self.keys.get(token).and_then(Option::as_ref)
	}

	/// Whether `token` was part of the resolution.
	pub fn contains(&self, token: &str) -> bool {
		self.keys.contains_key(token)
	}

	/// Number of distinct tokens.
	pub fn len(&self) -> usize {
		self.keys.len()
	}

	/// Whether no token was resolved.
	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}

	/// Records `key` for `token`.
	pub fn insert(&mut self, token: impl Into<String>, key: Option<OrderKey>) {
		self.keys.insert(token.into(), key);
	}
}

impl<S: Into<String>> FromIterator<(S, Option<OrderKey>)> for OrderMap {
	fn from_iter<I: IntoIterator<Item = (S, Option<OrderKey>)>>(iter: I) -> Self {
		Self {
			keys: iter.into_iter().map(|(token, key)| (token.into(), key)).collect(),
		}
	}
}

/// Resolves token orders through one context, caching every answer.
///
/// Answers are cached for the lifetime of the resolver, which shares the
/// lifetime of its context.
pub struct OrderResolver {
	context: Arc<dyn RankingContext>,
	cache: Mutex<FxHashMap<String, Option<OrderKey>>>,
}

impl OrderResolver {
	/// Creates a resolver with an empty cache.
	pub fn new(context: Arc<dyn RankingContext>) -> Self {
		Self {
			context,
			cache: Mutex::new(FxHashMap::default()),
		}
	}

	/// The context this resolver queries.
	pub fn context(&self) -> &Arc<dyn RankingContext> {
		&self.context
	}

	/// Number of cached tokens.
	pub fn cached(&self) -> usize {
		self.cache.lock().len()
	}

	/// Resolves every distinct token in `tokens`.
	///
	/// Uncached tokens are sent to the context in a single batch, in first-seen
	/// order. An empty batch never reaches the context.
	pub fn resolve<'t, I>(&self, tokens: I) -> Result<OrderMap>
	where
		I: IntoIterator<Item = &'t str>,
	{
		let mut seen = FxHashSet::default();
		let distinct: Vec<&str> = tokens.into_iter().filter(|t| seen.insert(*t)).collect();

		let mut cache = self.cache.lock();
		let missing: Vec<&str> = distinct
			.iter()
			.copied()
			.filter(|t| !cache.contains_key(*t))
			.collect();

		if !missing.is_empty() {
			debug!(
				requested = distinct.len(),
				missing = missing.len(),
				"resolving class order"
			);
			let answers = self.context.class_order(&missing)?;
			if answers.len() != missing.len() {
				return Err(Error::OrderMismatch {
					expected: missing.len(),
					got: answers.len(),
				});
			}
			for (token, (_, key)) in missing.iter().zip(answers) {
				let key = key.or_else(|| self.marker_key(token));
				cache.insert((*token).to_string(), key);
			}
		}

		Ok(distinct
			.into_iter()
			.map(|t| (t, cache.get(t).cloned().flatten()))
			.collect())
	}

	/// Synthetic key for framework marker classes with no order of their own.
	fn marker_key(&self, token: &str) -> Option<OrderKey> {
		let name = token.strip_prefix(self.context.prefix())?;
		if name == "group" || name == "peer" {
			self.context.layer_start(Layer::Components)
		} else {
			None
		}
	}
}

impl std::fmt::Debug for OrderResolver {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("OrderResolver")
			.field("cached", &self.cached())
			.finish_non_exhaustive()
	}
}
