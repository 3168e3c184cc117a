//! JSON-RPC message shapes and oracle method payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};
use weft_order::{LayerBands, OrderKey};

use crate::{OracleError, Result};

/// Method that builds (or refreshes) a context for a config.
pub const LOAD: &str = "load";
/// Method that ranks a batch of classes.
pub const CLASS_ORDER: &str = "classOrder";
/// Notification carrying a worker log line.
pub const LOG: &str = "log";

/// Sequential request id generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct CounterIdGen(pub u64);

impl CounterIdGen {
	/// Creates a new counter starting at 0.
	#[must_use]
	pub const fn new() -> Self {
		Self(0)
	}

	/// Returns the next id and increments the counter.
	#[allow(clippy::should_implement_trait, reason = "convention")]
	pub fn next(&mut self) -> u64 {
		let id = self.0;
		self.0 += 1;
		id
	}
}

/// Params of [`LOAD`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadParams {
	/// Config path string or inline config object.
	pub config: JsonValue,
	/// Modification stamp; a new stamp forces the worker to reload.
	pub stamp: u64,
}

/// Result of [`LOAD`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadResult {
	/// Framework major version.
	pub version: Option<u32>,
	/// Class prefix.
	pub prefix: String,
	/// Start keys of the layer bands.
	pub layers: LayerBands,
}

/// Params of [`CLASS_ORDER`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassOrderParams {
	/// Config path string or inline config object.
	pub config: JsonValue,
	/// Modification stamp of the config.
	pub stamp: u64,
	/// Classes to rank.
	pub classes: Vec<String>,
}

/// Result of [`CLASS_ORDER`]: one `[class, order]` pair per input class.
pub type ClassOrderResult = Vec<(String, Option<OrderKey>)>;

/// Params of the [`LOG`] notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogParams {
	/// `error`, `warn`, `info` or `debug`.
	#[serde(default)]
	pub level: String,
	/// Log text.
	pub message: String,
}

/// JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseError {
	/// Error code.
	pub code: i64,
	/// Error message.
	pub message: String,
}

/// Classification of a message read from the worker.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
	/// Answer to request `id`.
	Response {
		/// Request id.
		id: u64,
		/// Result or error object.
		result: std::result::Result<JsonValue, ResponseError>,
	},
	/// Notification from the worker.
	Notification {
		/// Method name.
		method: String,
		/// Params, `null` when absent.
		params: JsonValue,
	},
}

/// Builds a request message.
pub fn request(id: u64, method: &str, params: impl Serialize) -> Result<JsonValue> {
	Ok(json!({
		"jsonrpc": "2.0",
		"id": id,
		"method": method,
		"params": serde_json::to_value(params)?,
	}))
}

/// Classifies a message read from the worker.
///
/// Requests from the worker are not part of the protocol and are rejected.
pub fn classify(msg: JsonValue) -> Result<Inbound> {
	let id = msg.get("id");
	let method = msg.get("method").and_then(|m| m.as_str());

	match (id, method) {
		(Some(id), None) => {
			let id = id
				.as_u64()
				.ok_or_else(|| OracleError::Protocol(format!("unexpected response id {id}")))?;
			let result = match msg.get("error") {
				Some(error) => Err(serde_json::from_value(error.clone())?),
				None => Ok(msg.get("result").cloned().unwrap_or(JsonValue::Null)),
			};
			Ok(Inbound::Response { id, result })
		}
		(None, Some(method)) => Ok(Inbound::Notification {
			method: method.to_string(),
			params: msg.get("params").cloned().unwrap_or(JsonValue::Null),
		}),
		(Some(_), Some(method)) => Err(OracleError::Protocol(format!(
			"worker sent unsupported request `{method}`"
		))),
		(None, None) => Err(OracleError::Protocol("message has neither id nor method".into())),
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn test_ids_are_sequential() {
		let mut ids = CounterIdGen::new();
		assert_eq!((ids.next(), ids.next(), ids.next()), (0, 1, 2));
	}

	#[test]
	fn test_classify_response_and_error() {
		let ok = classify(json!({"jsonrpc": "2.0", "id": 3, "result": [["p-4", "12"]]})).unwrap();
		assert_eq!(
			ok,
			Inbound::Response {
				id: 3,
				result: Ok(json!([["p-4", "12"]]))
			}
		);

		let err = classify(json!({"jsonrpc": "2.0", "id": 4, "error": {"code": -32000, "message": "boom"}})).unwrap();
		assert_eq!(
			err,
			Inbound::Response {
				id: 4,
				result: Err(ResponseError {
					code: -32000,
					message: "boom".into()
				})
			}
		);
	}

	#[test]
	fn test_classify_notification() {
		let log = classify(json!({"jsonrpc": "2.0", "method": "log", "params": {"level": "warn", "message": "x"}})).unwrap();
		assert!(matches!(log, Inbound::Notification { ref method, .. } if method == LOG));
	}

	#[test]
	fn test_classify_rejects_worker_requests() {
		assert!(classify(json!({"id": 1, "method": "ping"})).is_err());
		assert!(classify(json!({"jsonrpc": "2.0"})).is_err());
	}

	#[test]
	fn test_class_order_result_decodes_mixed_orders() {
		let result: ClassOrderResult = serde_json::from_value(json!([
			["bg-red-500", "340282366920938463463374607431768211456"],
			["p-4", 12],
			["custom", null]
		]))
		.unwrap();
		assert_eq!(result[1], ("p-4".to_string(), Some(OrderKey::from(12i64))));
		assert_eq!(result[2].1, None);
		assert!(result[0].1 > result[1].1);
	}

	#[test]
	fn test_load_result_defaults() {
		let result: LoadResult = serde_json::from_value(json!({"version": 3})).unwrap();
		assert_eq!(result.version, Some(3));
		assert_eq!(result.prefix, "");
		assert!(result.layers.is_empty());
	}
}
