//! Time-bounded cache.

use std::hash::Hash;
use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;

/// Map whose entries stop being returned once older than the TTL.
///
/// Expired entries are dropped lazily on lookup and by [`ExpiringMap::purge_at`].
/// The `*_at` variants take the current time explicitly so callers and tests
/// control the clock.
#[derive(Debug)]
pub struct ExpiringMap<K, V> {
	ttl: Duration,
	entries: FxHashMap<K, (Instant, V)>,
}

impl<K: Eq + Hash, V> ExpiringMap<K, V> {
	/// Creates an empty map with the given TTL.
	pub fn new(ttl: Duration) -> Self {
		Self {
			ttl,
			entries: FxHashMap::default(),
		}
	}

	/// Entry lifetime.
	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	/// Returns the live value for `key`.
	pub fn get(&mut self, key: &K) -> Option<&V> {
		self.get_at(key, Instant::now())
	}

	/// Returns the value for `key` if it was inserted less than one TTL before `now`.
	pub fn get_at(&mut self, key: &K, now: Instant) -> Option<&V> {
		let expired = match self.entries.get(key) {
			Some((inserted, _)) => now.saturating_duration_since(*inserted) >= self.ttl,
			None => return None,
		};
		if expired {
			self.entries.remove(key);
			return None;
		}
		self.entries.get(key).map(|(_, value)| value)
	}

	/// Inserts `value`, stamping it with the current time.
	pub fn insert(&mut self, key: K, value: V) {
		self.insert_at(key, value, Instant::now());
	}

	/// Inserts `value`, stamping it with `now`.
	pub fn insert_at(&mut self, key: K, value: V, now: Instant) {
		self.entries.insert(key, (now, value));
	}

	/// Drops every entry expired at `now`.
	pub fn purge_at(&mut self, now: Instant) {
		let ttl = self.ttl;
		self.entries
			.retain(|_, (inserted, _)| now.saturating_duration_since(*inserted) < ttl);
	}

	/// Number of stored entries, expired ones included until purged.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the map stores no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
