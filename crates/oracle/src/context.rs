//! Ranking contexts backed by the worker process.

use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::debug;
use weft_order::{ClassOrder, ContextFactory, Layer, LayerBands, OrderKey, RankingContext, ResolvedConfig};

use crate::WorkerClient;
use crate::protocol::{self, ClassOrderParams, ClassOrderResult, LoadParams, LoadResult};

/// A context living inside the worker, addressed by its config and stamp.
///
/// Every query carries the config, so a restarted worker rebuilds the context
/// on demand.
#[derive(Debug)]
pub struct WorkerContext {
	client: Arc<WorkerClient>,
	config: JsonValue,
	stamp: u64,
	info: LoadResult,
}

impl RankingContext for WorkerContext {
	fn class_order(&self, classes: &[&str]) -> weft_order::Result<Vec<ClassOrder>> {
		let params = ClassOrderParams {
			config: self.config.clone(),
			stamp: self.stamp,
			classes: classes.iter().map(|c| c.to_string()).collect(),
		};
		let result: ClassOrderResult = self.client.request(protocol::CLASS_ORDER, params)?;
		Ok(result)
	}

	fn prefix(&self) -> &str {
		&self.info.prefix
	}

	fn layer_start(&self, layer: Layer) -> Option<OrderKey> {
		self.info.layers.get(&layer).cloned()
	}

	fn version(&self) -> Option<u32> {
		self.info.version
	}
}

impl WorkerContext {
	/// Layer bands reported by the worker.
	pub fn layers(&self) -> &LayerBands {
		&self.info.layers
	}
}

/// Creates [`WorkerContext`]s by asking the worker to load each config.
#[derive(Debug, Clone)]
pub struct WorkerFactory {
	client: Arc<WorkerClient>,
}

impl WorkerFactory {
	/// Factory over a shared client.
	pub fn new(client: Arc<WorkerClient>) -> Self {
		Self { client }
	}
}

impl ContextFactory for WorkerFactory {
	fn create(&self, config: &ResolvedConfig) -> weft_order::Result<Arc<dyn RankingContext>> {
		let params = LoadParams {
			config: config.payload(),
			stamp: config.stamp(),
		};
		let info: LoadResult = self.client.request(protocol::LOAD, &params)?;
		debug!(version = ?info.version, prefix = %info.prefix, "worker loaded config");

		Ok(Arc::new(WorkerContext {
			client: Arc::clone(&self.client),
			config: params.config,
			stamp: params.stamp,
			info,
		}))
	}
}
