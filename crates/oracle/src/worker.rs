//! Blocking JSON-RPC client for the oracle worker process.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::runtime::Runtime;
use tracing::{debug, error, info, warn};

use crate::codec::{read_message, write_message};
use crate::protocol::{self, CounterIdGen, Inbound, LogParams};
use crate::{OracleError, Result};

/// Default bound on a single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default number of consecutive restarts before an error is surfaced.
pub const DEFAULT_MAX_RESTARTS: u32 = 3;
/// Source of the bundled Node worker.
pub const WORKER_SCRIPT: &str = include_str!("../worker/class-order.mjs");

/// How to run the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
	/// Program followed by its arguments.
	pub command: Vec<String>,
	/// Working directory of the worker.
	pub cwd: Option<PathBuf>,
	/// Bound on a single request, spawn excluded.
	pub timeout: Duration,
	/// Consecutive restarts allowed before a failure is returned.
	pub max_restarts: u32,
}

impl WorkerConfig {
	/// Config for `command` with default limits.
	pub fn new(command: Vec<String>) -> Self {
		Self {
			command,
			cwd: None,
			timeout: DEFAULT_TIMEOUT,
			max_restarts: DEFAULT_MAX_RESTARTS,
		}
	}

	/// Runs the worker script at `script` under `node`.
	pub fn node(script: impl Into<PathBuf>) -> Self {
		let script: PathBuf = script.into();
		Self::new(vec!["node".into(), script.to_string_lossy().into_owned()])
	}

	/// Runs the bundled worker script under `node`, passed inline so no file
	/// has to be installed next to the binary.
	pub fn bundled() -> Self {
		Self::new(vec![
			"node".into(),
			"--input-type=module".into(),
			"--eval".into(),
			WORKER_SCRIPT.into(),
		])
	}
}

struct Process {
	child: Child,
	stdin: ChildStdin,
	stdout: BufReader<ChildStdout>,
	read_buf: String,
}

struct State {
	process: Option<Process>,
	ids: CounterIdGen,
	restarts: u32,
}

/// Client for one long-lived worker process.
///
/// Every request is serialized through one lock, so concurrent callers never
/// interleave on the pipes and the worker builds each context once. Requests
/// block the calling thread; the process I/O runs on a private current-thread
/// runtime, so `request` must not be called from inside another tokio runtime.
pub struct WorkerClient {
	config: WorkerConfig,
	runtime: Runtime,
	state: Mutex<State>,
}

impl WorkerClient {
	/// Creates a client. The process is spawned on the first request.
	pub fn new(config: WorkerConfig) -> Result<Self> {
		if config.command.is_empty() {
			return Err(OracleError::EmptyCommand);
		}
		let runtime = tokio::runtime::Builder::new_current_thread()
			.enable_all()
			.build()?;
		Ok(Self {
			config,
			runtime,
			state: Mutex::new(State {
				process: None,
				ids: CounterIdGen::new(),
				restarts: 0,
			}),
		})
	}

	/// The client's configuration.
	pub fn config(&self) -> &WorkerConfig {
		&self.config
	}

	/// Whether a worker process is currently running.
	pub fn is_running(&self) -> bool {
		self.state.lock().process.is_some()
	}

	/// Sends `method` and blocks until its result arrives.
	///
	/// Transport failures (EOF, broken pipe, malformed output, timeout) kill the
	/// process and retry the request on a fresh one, up to `max_restarts`
	/// consecutive times. Errors answered by the worker are returned as is.
	pub fn request<P, R>(&self, method: &str, params: P) -> Result<R>
	where
		P: Serialize,
		R: DeserializeOwned,
	{
		let params = serde_json::to_value(params)?;
		let mut state = self.state.lock();

		loop {
			if state.process.is_none() {
				state.process = Some(self.spawn()?);
			}
			let id = state.ids.next();
			let message = protocol::request(id, method, &params)?;
			let timeout = self.config.timeout;

			let outcome = {
				let Some(process) = state.process.as_mut() else {
					return Err(OracleError::Exited);
				};
				self.runtime.block_on(async {
					tokio::time::timeout(timeout, exchange(process, id, &message))
						.await
						.unwrap_or(Err(OracleError::Timeout(timeout)))
				})
			};

			match outcome {
				Ok(value) => {
					state.restarts = 0;
					return Ok(serde_json::from_value(value)?);
				}
				Err(err) if !err.is_fatal_to_process() => return Err(err),
				Err(err) => {
					error!(method, error = %err, "oracle worker failed");
					if let Some(mut process) = state.process.take() {
						let _ = process.child.start_kill();
					}
					if state.restarts >= self.config.max_restarts {
						return Err(err);
					}
					state.restarts += 1;
					info!(attempt = state.restarts, "restarting oracle worker");
				}
			}
		}
	}

	fn spawn(&self) -> Result<Process> {
		let (program, args) = self
			.config
			.command
			.split_first()
			.ok_or(OracleError::EmptyCommand)?;

		let mut cmd = Command::new(program);
		cmd.args(args)
			.stdin(Stdio::piped())
			.stdout(Stdio::piped())
			.stderr(Stdio::piped())
			.kill_on_drop(true);
		if let Some(cwd) = &self.config.cwd {
			cmd.current_dir(cwd);
		}

		let _guard = self.runtime.enter();
		let mut child = cmd.spawn().map_err(|e| OracleError::Spawn {
			command: program.clone(),
			reason: e.to_string(),
		})?;

		let stdin = child.stdin.take().ok_or(OracleError::Exited)?;
		let stdout = child.stdout.take().ok_or(OracleError::Exited)?;
		if let Some(stderr) = child.stderr.take() {
			let pid = child.id();
			self.runtime.spawn(async move {
				let mut lines = BufReader::new(stderr).lines();
				while let Ok(Some(line)) = lines.next_line().await {
					warn!(pid, stderr = %line, "oracle worker stderr");
				}
			});
		}

		debug!(command = ?self.config.command, pid = child.id(), "spawned oracle worker");
		Ok(Process {
			child,
			stdin,
			stdout: BufReader::new(stdout),
			read_buf: String::new(),
		})
	}
}

impl Drop for WorkerClient {
	fn drop(&mut self) {
		if let Some(mut process) = self.state.get_mut().process.take() {
			let _ = process.child.start_kill();
		}
	}
}

impl std::fmt::Debug for WorkerClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("WorkerClient")
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}

/// Writes one request and reads until its response, logging notifications.
async fn exchange(process: &mut Process, id: u64, message: &JsonValue) -> Result<JsonValue> {
	write_message(&mut process.stdin, message).await?;

	loop {
		let Some(msg) = read_message(&mut process.stdout, &mut process.read_buf).await? else {
			return Err(OracleError::Exited);
		};

		match protocol::classify(msg)? {
			Inbound::Response { id: got, result } if got == id => {
				return result.map_err(|e| OracleError::Remote {
					code: e.code,
					message: e.message,
				});
			}
			Inbound::Response { id: got, .. } => {
				debug!(expected = id, got, "dropping stale oracle response");
			}
			Inbound::Notification { method, params } if method == protocol::LOG => {
				log_worker_message(params);
			}
			Inbound::Notification { method, .. } => {
				debug!(method = %method, "ignoring oracle notification");
			}
		}
	}
}

fn log_worker_message(params: JsonValue) {
	let Ok(log) = serde_json::from_value::<LogParams>(params) else {
		warn!("malformed oracle log notification");
		return;
	};
	match log.level.as_str() {
		"error" => error!(message = %log.message, "oracle worker"),
		"warn" => warn!(message = %log.message, "oracle worker"),
		"debug" => debug!(message = %log.message, "oracle worker"),
		_ => info!(message = %log.message, "oracle worker"),
	}
}

#[cfg(test)]
mod tests;
