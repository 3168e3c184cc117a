#![cfg(unix)]

use std::time::Duration;

use serde_json::json;

use super::*;

/// Shell snippet printing `body` as one framed message.
fn frame(body: &str) -> String {
	format!("printf 'Content-Length: {}\\r\\n\\r\\n{}'", body.len(), body)
}

fn sh(script: String) -> WorkerConfig {
	WorkerConfig {
		command: vec!["sh".into(), "-c".into(), script],
		cwd: None,
		timeout: Duration::from_secs(5),
		max_restarts: 0,
	}
}

#[test]
fn test_request_returns_result() {
	let client = WorkerClient::new(sh(format!(
		"{}; sleep 5",
		frame(r#"{"jsonrpc":"2.0","id":0,"result":42}"#)
	)))
	.unwrap();

	let value: u64 = client.request("load", json!({"config": "x", "stamp": 0})).unwrap();
	assert_eq!(value, 42);
	assert!(client.is_running());
}

#[test]
fn test_notifications_before_response_are_consumed() {
	let client = WorkerClient::new(sh(format!(
		"{}; {}; sleep 5",
		frame(r#"{"jsonrpc":"2.0","method":"log","params":{"level":"warn","message":"plugin stubbed"}}"#),
		frame(r#"{"jsonrpc":"2.0","id":0,"result":[["p-4","5"],["foo",null]]}"#)
	)))
	.unwrap();

	let result: protocol::ClassOrderResult = client
		.request("classOrder", json!({"config": "x", "stamp": 0, "classes": ["p-4", "foo"]}))
		.unwrap();
	assert_eq!(result.len(), 2);
	assert_eq!(result[0].1, Some(weft_order::OrderKey::from(5i64)));
	assert_eq!(result[1].1, None);
}

#[test]
fn test_remote_error_keeps_process() {
	let client = WorkerClient::new(sh(format!(
		"{}; sleep 5",
		frame(r#"{"jsonrpc":"2.0","id":0,"error":{"code":-32000,"message":"no config"}}"#)
	)))
	.unwrap();

	let err = client.request::<_, JsonValue>("load", json!({})).unwrap_err();
	assert!(matches!(err, OracleError::Remote { code: -32000, ref message } if message == "no config"));
	assert!(client.is_running());
}

#[test]
fn test_timeout_kills_process() {
	let mut config = sh("sleep 5".into());
	config.timeout = Duration::from_millis(200);
	let client = WorkerClient::new(config).unwrap();

	let err = client.request::<_, JsonValue>("load", json!({})).unwrap_err();
	assert!(matches!(err, OracleError::Timeout(_)));
	assert!(!client.is_running());
}

#[test]
fn test_exit_without_answer_is_an_error() {
	let client = WorkerClient::new(sh("exit 0".into())).unwrap();
	let err = client.request::<_, JsonValue>("load", json!({})).unwrap_err();
	assert!(err.is_fatal_to_process());
	assert!(!client.is_running());
}

#[test]
fn test_restarts_after_crash() {
	let tmp = tempfile::tempdir().unwrap();
	let marker = tmp.path().join("started");
	let mut config = sh(format!(
		"if [ -e '{marker}' ]; then {}; sleep 5; else touch '{marker}'; exit 1; fi",
		frame(r#"{"jsonrpc":"2.0","id":1,"result":7}"#),
		marker = marker.display()
	));
	config.max_restarts = 1;
	let client = WorkerClient::new(config).unwrap();

	let value: u64 = client.request("load", json!({})).unwrap();
	assert_eq!(value, 7);
}

#[test]
fn test_spawn_failure_is_reported() {
	let client = WorkerClient::new(WorkerConfig::new(vec!["/nonexistent/weft-worker".into()])).unwrap();
	let err = client.request::<_, JsonValue>("load", json!({})).unwrap_err();
	assert!(matches!(err, OracleError::Spawn { .. }));
}

#[test]
fn test_empty_command_is_rejected() {
	assert!(matches!(
		WorkerClient::new(WorkerConfig::new(Vec::new())),
		Err(OracleError::EmptyCommand)
	));
}

#[test]
fn test_node_configs() {
	let config = WorkerConfig::node("/opt/weft/class-order.mjs");
	assert_eq!(config.command, vec!["node", "/opt/weft/class-order.mjs"]);

	let bundled = WorkerConfig::bundled();
	assert_eq!(bundled.command[..3], ["node", "--input-type=module", "--eval"]);
	assert!(bundled.command[3].contains("classOrder"));
	assert_eq!(bundled.timeout, DEFAULT_TIMEOUT);
}
