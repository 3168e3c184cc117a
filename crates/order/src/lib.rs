//! Class order resolution.
//!
//! The canonical position of a utility class is owned by the CSS framework, not
//! by this crate. A [`RankingContext`] is the handle onto one resolved framework
//! configuration and answers batched "what is the order of these classes"
//! queries. Around that handle this crate provides:
//!
//! * [`OrderKey`]: arbitrary-precision order values, unresolved sorting first
//! * [`OrderResolver`]: per-context token cache and batched lookups
//! * [`sort_tokens`]: the stable sort over resolved keys
//! * [`ConfigResolver`]: config identity and modification-time staleness
//! * [`OrderService`]: the top-level owner of config and context caches
//!
//! Nothing here hardcodes utility-to-order mappings; they vary by framework
//! version, theme, prefix and important settings.

pub mod config;
pub mod context;
pub mod error;
pub mod expiring;
pub mod key;
pub mod monorepo;
pub mod resolver;
pub mod service;
pub mod sort;

pub use config::{CHECK_REFRESH_RATE, ConfigIdentity, ConfigResolver, ConfigSource, ResolvedConfig};
pub use context::{ClassOrder, ContextFactory, Layer, LayerBands, RankingContext};
pub use error::{BoxError, Error, Result};
pub use expiring::ExpiringMap;
pub use key::OrderKey;
pub use monorepo::{CONFIG_FILE_NAMES, find_config_upwards};
pub use resolver::{OrderMap, OrderResolver};
pub use service::{CONTEXT_TTL, ConfigRequest, OrderService};
pub use sort::{compare_keys, sort_tokens};
