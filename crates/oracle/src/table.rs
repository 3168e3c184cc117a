//! Static order tables.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;
use weft_order::{ClassOrder, ContextFactory, Layer, LayerBands, OrderKey, RankingContext, ResolvedConfig};

use crate::{OracleError, Result};

/// A precomputed class order, typically exported from a framework build.
///
/// ```json
/// { "prefix": "", "version": 3, "layers": { "components": "0" }, "order": { "p-4": "12" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderTable {
	/// Class prefix.
	pub prefix: String,
	/// Framework major version the table was exported from.
	pub version: Option<u32>,
	/// Start keys of the layer bands.
	pub layers: LayerBands,
	/// Order of every known class.
	pub order: FxHashMap<String, OrderKey>,
}

impl OrderTable {
	/// Parses a table from JSON text.
	pub fn from_json(text: &str) -> Result<Self> {
		Ok(serde_json::from_str(text)?)
	}

	/// Reads a table file.
	pub fn read(path: &Path) -> Result<Self> {
		let text = std::fs::read_to_string(path).map_err(|error| OracleError::Table {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_json(&text)
	}
}

/// Ranking context answering from an [`OrderTable`]; absent classes are unresolved.
#[derive(Debug, Clone)]
pub struct TableContext {
	table: OrderTable,
}

impl TableContext {
	/// Context over `table`.
	pub fn new(table: OrderTable) -> Self {
		Self { table }
	}
}

impl RankingContext for TableContext {
	fn class_order(&self, classes: &[&str]) -> weft_order::Result<Vec<ClassOrder>> {
		Ok(classes
			.iter()
			.map(|class| (class.to_string(), self.table.order.get(*class).cloned()))
			.collect())
	}

	fn prefix(&self) -> &str {
		&self.table.prefix
	}

	fn layer_start(&self, layer: Layer) -> Option<OrderKey> {
		self.table.layers.get(&layer).cloned()
	}

	fn version(&self) -> Option<u32> {
		self.table.version
	}
}

#[derive(Debug, Clone)]
enum TableSource {
	Fixed(Arc<TableContext>),
	File(PathBuf),
}

/// Context factory that ignores the framework config and serves a table.
///
/// A file-backed factory rereads the table for every context it creates.
#[derive(Debug, Clone)]
pub struct TableFactory {
	source: TableSource,
}

impl TableFactory {
	/// Factory serving one in-memory table.
	pub fn fixed(table: OrderTable) -> Self {
		Self {
			source: TableSource::Fixed(Arc::new(TableContext::new(table))),
		}
	}

	/// Factory reading the table at `path` on every context creation.
	pub fn file(path: impl Into<PathBuf>) -> Self {
		Self {
			source: TableSource::File(path.into()),
		}
	}
}

impl ContextFactory for TableFactory {
	fn create(&self, _config: &ResolvedConfig) -> weft_order::Result<Arc<dyn RankingContext>> {
		match &self.source {
			TableSource::Fixed(context) => Ok(context.clone()),
			TableSource::File(path) => {
				debug!(table = %path.display(), "loading order table");
				Ok(Arc::new(TableContext::new(OrderTable::read(path)?)))
			}
		}
	}
}
