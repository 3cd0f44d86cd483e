//! Query timing for database adapters.
//!
//! This module provides:
//! - [`QueryTimingProxy`], a [`Database`](crate::Database) wrapper that times query execution
//! - [`QueryLog`], the append-only record of `{query, duration}` entries it keeps
//! - Summaries and slow-query filtering over the log
//! - Structured `tracing` events per recorded query (feature `tracing`)
//!
//! # Example
//!
//! ```rust,ignore
//! use querylog::{Database, ErrorLevel, ProxyConfig, QueryTimingProxy};
//! use std::time::Duration;
//!
//! let db = QueryTimingProxy::new(&adapter).with_config(
//!     ProxyConfig::new().with_slow_query_threshold(Duration::from_millis(100)),
//! );
//!
//! db.query("SELECT 1", ErrorLevel::Error).await?;
//!
//! for entry in db.log() {
//!     println!("{:>8.2}ms  {}", entry.duration_ms(), entry.query());
//! }
//! ```

mod config;
mod log;
mod proxy;
mod types;

#[cfg(feature = "tracing")]
mod tracing_hook;


pub use config::ProxyConfig;
pub use log::{QueryLog, QuerySummary};
pub use proxy::QueryTimingProxy;
pub use types::{QueryLogEntry, QueryType};
