//! # querylog
//!
//! A query-timing proxy for database adapters.
//!
//! Wrap any [`Database`] in a [`QueryTimingProxy`] and use the proxy in its
//! place. Every successful `query` / `prepared_query` call is appended to an
//! in-process log as `{query, duration}`; every other operation is forwarded
//! to the wrapped adapter unchanged. A profiler or debug toolbar reads the log
//! back with [`QueryTimingProxy::log`].
//!
//! ```ignore
//! use querylog::{Database, ErrorLevel, QueryTimingProxy};
//!
//! let db = QueryTimingProxy::new(&adapter);
//!
//! db.query("SELECT \"ID\" FROM \"SiteTree\"", ErrorLevel::Error).await?;
//! db.prepared_query("SELECT * FROM \"Member\" WHERE \"ID\" = ?", &[42.into()], ErrorLevel::Error)
//!     .await?;
//!
//! // Forwarded, not logged
//! let version = db.version().await?;
//!
//! assert_eq!(db.log().len(), 2);
//! ```
//!
//! Adapter errors are never wrapped or swallowed: a failing call returns the
//! adapter's [`DbError`] and leaves the log untouched.

pub mod database;
pub mod error;
pub mod monitor;
pub mod value;

mod sql;

pub use database::{
    Comparison, Database, ErrorLevel, FieldSpecs, IndexSpecs, SearchRequest, SearchResults,
    TableAlteration, TableOptions,
};
pub use error::{DbError, DbResult};
pub use monitor::{ProxyConfig, QueryLog, QueryLogEntry, QuerySummary, QueryTimingProxy, QueryType};
pub use value::Value;
