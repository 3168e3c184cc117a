//! Arbitrary-precision order keys.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::{BigInt, Sign};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

/// Canonical precedence value of a class.
///
/// Frameworks with many layers and variants build order values by shifting bits
/// well past 64, so keys are stored as big integers. Comparison goes through the
/// sign of the difference rather than any fixed-width or floating-point path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderKey(BigInt);

impl OrderKey {
	/// Creates a key from any integer.
	pub fn new(value: impl Into<BigInt>) -> Self {
		Self(value.into())
	}

	/// Returns the underlying integer.
	pub fn as_bigint(&self) -> &BigInt {
		&self.0
	}
}

impl Ord for OrderKey {
	fn cmp(&self, other: &Self) -> Ordering {
		match (&self.0 - &other.0).sign() {
			Sign::Minus => Ordering::Less,
			Sign::NoSign => Ordering::Equal,
			Sign::Plus => Ordering::Greater,
		}
	}
}

impl PartialOrd for OrderKey {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl FromStr for OrderKey {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let trimmed = s.trim().trim_end_matches('n');
		BigInt::from_str(trimmed)
			.map(Self)
			.map_err(|_| Error::InvalidKey(s.to_string()))
	}
}

impl fmt::Display for OrderKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

impl From<i64> for OrderKey {
	fn from(value: i64) -> Self {
		Self::new(value)
	}
}

impl From<u64> for OrderKey {
	fn from(value: u64) -> Self {
		Self::new(value)
	}
}

impl Serialize for OrderKey {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for OrderKey {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserializer.deserialize_any(OrderKeyVisitor)
	}
}

struct OrderKeyVisitor;

impl Visitor<'_> for OrderKeyVisitor {
	type Value = OrderKey;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("an integer or a decimal integer string")
	}

	fn visit_i64<E: de::Error>(self, v: i64) -> Result<OrderKey, E> {
		Ok(OrderKey::from(v))
	}

	fn visit_u64<E: de::Error>(self, v: u64) -> Result<OrderKey, E> {
		Ok(OrderKey::from(v))
	}

	fn visit_str<E: de::Error>(self, v: &str) -> Result<OrderKey, E> {
		v.parse().map_err(E::custom)
	}
}
