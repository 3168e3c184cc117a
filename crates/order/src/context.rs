//! Ranking context seam between the engine and the framework oracle.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{OrderKey, ResolvedConfig, Result};

/// One `(class, order)` answer from a ranking oracle.
pub type ClassOrder = (String, Option<OrderKey>);

/// Layer bands a framework groups its utilities into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
	/// Preflight and base styles.
	Base,
	/// Component classes.
	Components,
	/// Utility classes.
	Utilities,
}

/// Start key of each layer band a context knows about.
pub type LayerBands = BTreeMap<Layer, OrderKey>;

/// A resolved, framework-version-specific handle able to rank classes.
///
/// Implementations must answer one entry per input class, in input order.
/// Classes outside the framework vocabulary answer `None`, never an error.
pub trait RankingContext: Send + Sync {
	/// Returns the order of each class in `classes`, preserving input order.
	fn class_order(&self, classes: &[&str]) -> Result<Vec<ClassOrder>>;

	/// Class prefix configured for the framework.
	fn prefix(&self) -> &str {
		""
	}

	/// First key of the given layer band, when known.
	fn layer_start(&self, _layer: Layer) -> Option<OrderKey> {
		None
	}

	/// Framework major version, when known.
	fn version(&self) -> Option<u32> {
		None
	}
}

/// Builds ranking contexts from resolved configurations.
pub trait ContextFactory: Send + Sync {
	/// Creates a context for `config`.
	fn create(&self, config: &ResolvedConfig) -> Result<Arc<dyn RankingContext>>;
}
