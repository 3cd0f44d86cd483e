//! The database adapter capability set.
//!
//! [`Database`] is everything a content framework expects from its adapter:
//! query execution, escaping, SQL clause generation, transaction control,
//! server metadata and a handful of deprecated schema helpers. Anything that
//! implements it can be wrapped by [`QueryTimingProxy`](crate::QueryTimingProxy)
//! and used in its place.

mod types;

pub use types::{
    Comparison, ErrorLevel, FieldSpecs, IndexSpecs, SearchRequest, SearchResults, TableAlteration,
    TableOptions,
};

use crate::error::{DbError, DbResult};
use crate::value::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A database adapter.
///
/// Methods returning futures talk to the server. Plain methods are pure SQL
/// generation or cached connection state.
///
/// The deprecated schema helpers and [`Database::call`] have default
/// implementations that return [`DbError::Unsupported`], so adapters only need
/// to provide them when they actually support them.
pub trait Database: Send + Sync {
    /// Handle returned by query execution (result set, cursor, affected rows...).
    type Handle: Send;
    /// Schema manager exposed by the adapter.
    type SchemaManager;
    /// Query builder exposed by the adapter.
    type QueryBuilder;

    /// Current schema manager.
    fn schema_manager(&self) -> &Self::SchemaManager;

    /// Current query builder.
    fn query_builder(&self) -> &Self::QueryBuilder;

    /// Execute a SQL statement.
    fn query(
        &self,
        sql: &str,
        level: ErrorLevel,
    ) -> impl std::future::Future<Output = DbResult<Self::Handle>> + Send;

    /// Execute a parameterised SQL statement. `?` marks each parameter.
    fn prepared_query(
        &self,
        sql: &str,
        parameters: &[Value],
        level: ErrorLevel,
    ) -> impl std::future::Future<Output = DbResult<Self::Handle>> + Send;

    /// The ID generated for `table` by the previous INSERT.
    fn generated_id(&self, table: &str) -> impl std::future::Future<Output = DbResult<i64>> + Send;

    /// Whether a server is connected and a valid database selected.
    fn is_active(&self) -> bool;

    /// Escape a value for inclusion inside an already quoted string.
    fn escape_string(&self, value: &str) -> String;

    /// Wrap a value in dialect-specific quotes.
    fn quote_string(&self, value: &str) -> String;

    /// Escape an identifier, splitting it on `separator` first.
    ///
    /// Passing an already escaped identifier escapes it twice.
    fn escape_identifier(&self, value: &str, separator: &str) -> String;

    /// Generate a WHERE clause for text matching.
    fn comparison_clause(&self, comparison: &Comparison) -> String;

    /// SQL expression formatting `date` (`now`, a literal or a field name).
    ///
    /// Supported specifiers: `%Y %m %d %H %i %s`, and `%U` on its own.
    fn formatted_datetime_clause(&self, date: &str, format: &str) -> String;

    /// SQL expression adding `interval` (e.g. `-1 Day`, `+15 minutes`) to `date`.
    fn datetime_interval_clause(&self, date: &str, interval: &str) -> String;

    /// SQL expression for `date1 - date2` in seconds.
    fn datetime_difference_clause(&self, date1: &str, date2: &str) -> String;

    fn supports_collations(&self) -> bool;

    /// Whether the timezone can be overridden per connection.
    fn supports_timezone_override(&self) -> bool;

    /// Version of the connected server.
    fn version(&self) -> impl std::future::Future<Output = DbResult<String>> + Send;

    /// Server type (e.g. `mysql`, `postgresql`), as passed to the connector.
    fn database_server(&self) -> &str;

    /// Full-text search over the given classes.
    fn search_engine(
        &self,
        request: &SearchRequest,
    ) -> impl std::future::Future<Output = DbResult<SearchResults>> + Send;

    fn supports_transactions(&self) -> bool;

    /// Begin a transaction. `None` leaves the mode or session characteristics unset.
    fn transaction_start(
        &self,
        mode: Option<&str>,
        session_characteristics: Option<&str>,
    ) -> impl std::future::Future<Output = DbResult<()>> + Send;

    /// Create a named savepoint.
    fn transaction_savepoint(
        &self,
        savepoint: &str,
    ) -> impl std::future::Future<Output = DbResult<()>> + Send;

    /// Roll back to `savepoint`, or the whole transaction when `None`.
    fn transaction_rollback(
        &self,
        savepoint: Option<&str>,
    ) -> impl std::future::Future<Output = DbResult<bool>> + Send;

    /// Commit the transaction, optionally chaining a new one.
    fn transaction_end(
        &self,
        chain: bool,
    ) -> impl std::future::Future<Output = DbResult<bool>> + Send;

    /// Name of the selected database, if any.
    fn selected_database(&self) -> Option<String>;

    /// SQL expression for the current date/time.
    fn now(&self) -> String;

    /// SQL expression for a random value.
    fn random(&self) -> String;

    #[deprecated(since = "0.1.0", note = "select the database with create-if-missing instead")]
    fn create_database(&self) -> impl std::future::Future<Output = DbResult<bool>> + Send {
        async { Err(DbError::unsupported("create_database")) }
    }

    #[deprecated(since = "0.1.0", note = "never implemented by any adapter")]
    fn get_connect(
        &self,
        parameters: &BTreeMap<String, String>,
    ) -> impl std::future::Future<Output = DbResult<()>> + Send {
        let _ = parameters;
        async { Err(DbError::unsupported("get_connect")) }
    }

    /// Returns the name of the created table.
    #[deprecated(since = "0.1.0", note = "use the schema manager instead")]
    fn create_table(
        &self,
        table: &str,
        fields: Option<&FieldSpecs>,
        indexes: Option<&IndexSpecs>,
        options: Option<&TableOptions>,
        advanced_options: Option<&TableOptions>,
    ) -> impl std::future::Future<Output = DbResult<String>> + Send {
        let _ = (table, fields, indexes, options, advanced_options);
        async { Err(DbError::unsupported("create_table")) }
    }

    #[deprecated(since = "0.1.0", note = "use the schema manager instead")]
    fn alter_table(
        &self,
        table: &str,
        alteration: &TableAlteration,
    ) -> impl std::future::Future<Output = DbResult<()>> + Send {
        let _ = (table, alteration);
        async { Err(DbError::unsupported("alter_table")) }
    }

    #[deprecated(since = "0.1.0", note = "use the schema manager instead")]
    fn rename_table(
        &self,
        old_name: &str,
        new_name: &str,
    ) -> impl std::future::Future<Output = DbResult<()>> + Send {
        let _ = (old_name, new_name);
        async { Err(DbError::unsupported("rename_table")) }
    }

    #[deprecated(since = "0.1.0", note = "use the schema manager instead")]
    fn create_field(
        &self,
        table: &str,
        field: &str,
        spec: &str,
    ) -> impl std::future::Future<Output = DbResult<()>> + Send {
        let _ = (table, field, spec);
        async { Err(DbError::unsupported("create_field")) }
    }

    #[deprecated(since = "0.1.0", note = "use the schema manager instead")]
    fn rename_field(
        &self,
        table: &str,
        old_name: &str,
        new_name: &str,
    ) -> impl std::future::Future<Output = DbResult<()>> + Send {
        let _ = (table, old_name, new_name);
        async { Err(DbError::unsupported("rename_field")) }
    }

    #[deprecated(since = "0.1.0", note = "use the schema manager instead")]
    fn field_list(
        &self,
        table: &str,
    ) -> impl std::future::Future<Output = DbResult<FieldSpecs>> + Send {
        let _ = table;
        async { Err(DbError::unsupported("field_list")) }
    }

    #[deprecated(since = "0.1.0", note = "use the schema manager instead")]
    fn table_list(&self) -> impl std::future::Future<Output = DbResult<Vec<String>>> + Send {
        async { Err(DbError::unsupported("table_list")) }
    }

    #[deprecated(since = "0.1.0", note = "use the schema manager instead")]
    fn has_table(&self, table: &str) -> impl std::future::Future<Output = DbResult<bool>> + Send {
        let _ = table;
        async { Err(DbError::unsupported("has_table")) }
    }

    #[deprecated(since = "0.1.0", note = "use the schema manager instead")]
    fn enum_values_for_field(
        &self,
        table: &str,
        field: &str,
    ) -> impl std::future::Future<Output = DbResult<Vec<String>>> + Send {
        let _ = (table, field);
        async { Err(DbError::unsupported("enum_values_for_field")) }
    }

    /// Defaults to [`Database::escape_string`].
    #[deprecated(since = "0.1.0", note = "use `escape_string` instead")]
    fn addslashes(&self, value: &str) -> String {
        self.escape_string(value)
    }

    /// Invoke an adapter-specific operation by name.
    ///
    /// This covers extensions outside the capability set. The default
    /// implementation knows no operations.
    fn call(
        &self,
        method: &str,
        args: &[serde_json::Value],
    ) -> impl std::future::Future<Output = DbResult<serde_json::Value>> + Send {
        let _ = args;
        let method = method.to_string();
        async move { Err(DbError::unsupported(method)) }
    }
}

// ===== Reference implementations =====
// These let a proxy borrow or share an adapter the caller keeps ownership of.

macro_rules! forward_database {
    ($($impl_header:tt)*) => {
        #[allow(deprecated)]
        $($impl_header)* {
            type Handle = D::Handle;
            type SchemaManager = D::SchemaManager;
            type QueryBuilder = D::QueryBuilder;

            fn schema_manager(&self) -> &Self::SchemaManager {
                (**self).schema_manager()
            }

            fn query_builder(&self) -> &Self::QueryBuilder {
                (**self).query_builder()
            }

            fn query(
                &self,
                sql: &str,
                level: ErrorLevel,
            ) -> impl std::future::Future<Output = DbResult<Self::Handle>> + Send {
                (**self).query(sql, level)
            }

            fn prepared_query(
                &self,
                sql: &str,
                parameters: &[Value],
                level: ErrorLevel,
            ) -> impl std::future::Future<Output = DbResult<Self::Handle>> + Send {
                (**self).prepared_query(sql, parameters, level)
            }

            fn generated_id(
                &self,
                table: &str,
            ) -> impl std::future::Future<Output = DbResult<i64>> + Send {
                (**self).generated_id(table)
            }

            fn is_active(&self) -> bool {
                (**self).is_active()
            }

            fn escape_string(&self, value: &str) -> String {
                (**self).escape_string(value)
            }

            fn quote_string(&self, value: &str) -> String {
                (**self).quote_string(value)
            }

            fn escape_identifier(&self, value: &str, separator: &str) -> String {
                (**self).escape_identifier(value, separator)
            }

            fn comparison_clause(&self, comparison: &Comparison) -> String {
                (**self).comparison_clause(comparison)
            }

            fn formatted_datetime_clause(&self, date: &str, format: &str) -> String {
                (**self).formatted_datetime_clause(date, format)
            }

            fn datetime_interval_clause(&self, date: &str, interval: &str) -> String {
                (**self).datetime_interval_clause(date, interval)
            }

            fn datetime_difference_clause(&self, date1: &str, date2: &str) -> String {
                (**self).datetime_difference_clause(date1, date2)
            }

            fn supports_collations(&self) -> bool {
                (**self).supports_collations()
            }

            fn supports_timezone_override(&self) -> bool {
                (**self).supports_timezone_override()
            }

            fn version(&self) -> impl std::future::Future<Output = DbResult<String>> + Send {
                (**self).version()
            }

            fn database_server(&self) -> &str {
                (**self).database_server()
            }

            fn search_engine(
                &self,
                request: &SearchRequest,
            ) -> impl std::future::Future<Output = DbResult<SearchResults>> + Send {
                (**self).search_engine(request)
            }

            fn supports_transactions(&self) -> bool {
                (**self).supports_transactions()
            }

            fn transaction_start(
                &self,
                mode: Option<&str>,
                session_characteristics: Option<&str>,
            ) -> impl std::future::Future<Output = DbResult<()>> + Send {
                (**self).transaction_start(mode, session_characteristics)
            }

            fn transaction_savepoint(
                &self,
                savepoint: &str,
            ) -> impl std::future::Future<Output = DbResult<()>> + Send {
                (**self).transaction_savepoint(savepoint)
            }

            fn transaction_rollback(
                &self,
                savepoint: Option<&str>,
            ) -> impl std::future::Future<Output = DbResult<bool>> + Send {
                (**self).transaction_rollback(savepoint)
            }

            fn transaction_end(
                &self,
                chain: bool,
            ) -> impl std::future::Future<Output = DbResult<bool>> + Send {
                (**self).transaction_end(chain)
            }

            fn selected_database(&self) -> Option<String> {
                (**self).selected_database()
            }

            fn now(&self) -> String {
                (**self).now()
            }

            fn random(&self) -> String {
                (**self).random()
            }

            fn create_database(&self) -> impl std::future::Future<Output = DbResult<bool>> + Send {
                (**self).create_database()
            }

            fn get_connect(
                &self,
                parameters: &BTreeMap<String, String>,
            ) -> impl std::future::Future<Output = DbResult<()>> + Send {
                (**self).get_connect(parameters)
            }

            fn create_table(
                &self,
                table: &str,
                fields: Option<&FieldSpecs>,
                indexes: Option<&IndexSpecs>,
                options: Option<&TableOptions>,
                advanced_options: Option<&TableOptions>,
            ) -> impl std::future::Future<Output = DbResult<String>> + Send {
                (**self).create_table(table, fields, indexes, options, advanced_options)
            }

            fn alter_table(
                &self,
                table: &str,
                alteration: &TableAlteration,
            ) -> impl std::future::Future<Output = DbResult<()>> + Send {
                (**self).alter_table(table, alteration)
            }

            fn rename_table(
                &self,
                old_name: &str,
                new_name: &str,
            ) -> impl std::future::Future<Output = DbResult<()>> + Send {
                (**self).rename_table(old_name, new_name)
            }

            fn create_field(
                &self,
                table: &str,
                field: &str,
                spec: &str,
            ) -> impl std::future::Future<Output = DbResult<()>> + Send {
                (**self).create_field(table, field, spec)
            }

            fn rename_field(
                &self,
                table: &str,
                old_name: &str,
                new_name: &str,
            ) -> impl std::future::Future<Output = DbResult<()>> + Send {
                (**self).rename_field(table, old_name, new_name)
            }

            fn field_list(
                &self,
                table: &str,
            ) -> impl std::future::Future<Output = DbResult<FieldSpecs>> + Send {
                (**self).field_list(table)
            }

            fn table_list(&self) -> impl std::future::Future<Output = DbResult<Vec<String>>> + Send {
                (**self).table_list()
            }

            fn has_table(
                &self,
                table: &str,
            ) -> impl std::future::Future<Output = DbResult<bool>> + Send {
                (**self).has_table(table)
            }

            fn enum_values_for_field(
                &self,
                table: &str,
                field: &str,
            ) -> impl std::future::Future<Output = DbResult<Vec<String>>> + Send {
                (**self).enum_values_for_field(table, field)
            }

            fn addslashes(&self, value: &str) -> String {
                (**self).addslashes(value)
            }

            fn call(
                &self,
                method: &str,
                args: &[serde_json::Value],
            ) -> impl std::future::Future<Output = DbResult<serde_json::Value>> + Send {
                (**self).call(method, args)
            }
        }
    };
}

forward_database!(impl<D: Database> Database for &D);
forward_database!(impl<D: Database> Database for Arc<D>);
