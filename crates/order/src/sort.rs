//! Stable sort of class tokens by resolved order.

use std::cmp::Ordering;

use crate::{OrderKey, OrderMap};

/// Compares two optional keys, unresolved before any resolved key.
pub fn compare_keys(a: Option<&OrderKey>, b: Option<&OrderKey>) -> Ordering {
	match (a, b) {
		(None, None) => Ordering::Equal,
		(None, Some(_)) => Ordering::Less,
		(Some(_), None) => Ordering::Greater,
		(Some(a), Some(b)) => a.cmp(b),
	}
}

/// Sorts `tokens` by their order in `orders`.
///
/// Tokens missing from `orders` count as unresolved. Equal keys keep their
/// input order.
pub fn sort_tokens<'a>(tokens: &[&'a str], orders: &OrderMap) -> Vec<&'a str> {
	let mut sorted = tokens.to_vec();
	sorted.sort_by(|a, b| compare_keys(orders.get(a), orders.get(b)));
	sorted
}
