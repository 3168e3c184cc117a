//! Ranking oracle clients.
//!
//! The class order of a utility is computed by the CSS framework itself. For
//! framework versions that need their build-time plugins evaluated, that
//! computation runs in an isolated worker process (by default the bundled
//! `worker/class-order.mjs` under Node) and is reached through [`WorkerClient`],
//! a blocking JSON-RPC client with a bounded timeout and restart-on-crash
//! policy. [`WorkerFactory`] plugs that client into the order service.
//!
//! [`TableContext`] answers from a static JSON order table instead, for offline
//! runs and tests.
//!
//! # Wire format
//!
//! JSON-RPC 2.0 messages framed with `Content-Length` headers:
//!
//! ```text
//! Content-Length: 93\r\n
//! \r\n
//! {"jsonrpc":"2.0","id":1,"method":"classOrder","params":{"config":"...","stamp":0,"classes":["p-4"]}}
//! ```
//!
//! | Method | Params | Result |
//! |---|---|---|
//! | `load` | `{ config, stamp }` | `{ version, prefix, layers }` |
//! | `classOrder` | `{ config, stamp, classes }` | `[[class, order \| null], ...]` |
//!
//! The worker may send `log { level, message }` notifications at any time.

pub mod codec;
mod context;
mod error;
pub mod protocol;
mod table;
mod worker;

pub use context::{WorkerContext, WorkerFactory};
pub use error::{OracleError, Result};
pub use table::{OrderTable, TableContext, TableFactory};
pub use worker::{DEFAULT_MAX_RESTARTS, DEFAULT_TIMEOUT, WORKER_SCRIPT, WorkerClient, WorkerConfig};
