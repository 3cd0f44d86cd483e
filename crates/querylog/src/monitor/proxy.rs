use super::config::ProxyConfig;
use super::log::{QueryLog, QuerySummary};
use super::types::QueryLogEntry;
use crate::database::{
    Comparison, Database, ErrorLevel, FieldSpecs, IndexSpecs, SearchRequest, SearchResults,
    TableAlteration, TableOptions,
};
use crate::error::DbResult;
use crate::value::Value;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// A database adapter wrapper that times every executed query.
///
/// `query` and `prepared_query` are timed and, when they succeed, appended to
/// the query log as `{query, duration}`. Every other operation is forwarded to
/// the wrapped adapter untouched, so the proxy can stand in wherever a
/// [`Database`] is expected.
///
/// Wrap `&adapter` or an `Arc` to keep ownership of the adapter elsewhere.
pub struct QueryTimingProxy<D> {
    inner: D,
    log: QueryLog,
    config: ProxyConfig,
}

impl<D: Database> QueryTimingProxy<D> {
    /// Wrap an adapter with an empty query log.
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            log: QueryLog::new(),
            config: ProxyConfig::default(),
        }
    }

    /// Set the event configuration.
    pub fn with_config(mut self, config: ProxyConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Get a mutable reference to the configuration.
    pub fn config_mut(&mut self) -> &mut ProxyConfig {
        &mut self.config
    }

    /// All queries recorded so far, in execution order.
    pub fn log(&self) -> Vec<QueryLogEntry> {
        self.log.entries()
    }

    /// The underlying query log.
    pub fn query_log(&self) -> &QueryLog {
        &self.log
    }

    /// Aggregates over the recorded queries.
    pub fn summary(&self) -> QuerySummary {
        self.log.summary()
    }

    /// Get a reference to the wrapped adapter.
    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// Get the wrapped adapter, consuming this proxy.
    pub fn into_inner(self) -> D {
        self.inner
    }

    fn record(&self, sql: &str, elapsed: Duration) {
        let entry = QueryLogEntry::new(sql, elapsed);

        #[cfg(feature = "tracing")]
        super::tracing_hook::emit_recorded(&self.config, &entry, self.config.is_slow(elapsed));

        self.log.push(entry);
    }
}

#[allow(deprecated)]
impl<D: Database> Database for QueryTimingProxy<D> {
    type Handle = D::Handle;
    type SchemaManager = D::SchemaManager;
    type QueryBuilder = D::QueryBuilder;

    fn schema_manager(&self) -> &Self::SchemaManager {
        self.inner.schema_manager()
    }

    fn query_builder(&self) -> &Self::QueryBuilder {
        self.inner.query_builder()
    }

    async fn query(&self, sql: &str, level: ErrorLevel) -> DbResult<Self::Handle> {
        let start = Instant::now();
        let handle = self.inner.query(sql, level).await?;
        self.record(sql, start.elapsed());
        Ok(handle)
    }

    async fn prepared_query(
        &self,
        sql: &str,
        parameters: &[Value],
        level: ErrorLevel,
    ) -> DbResult<Self::Handle> {
        let start = Instant::now();
        let handle = self.inner.prepared_query(sql, parameters, level).await?;
        self.record(sql, start.elapsed());
        Ok(handle)
    }

    fn generated_id(&self, table: &str) -> impl std::future::Future<Output = DbResult<i64>> + Send {
        self.inner.generated_id(table)
    }

    fn is_active(&self) -> bool {
        self.inner.is_active()
    }

    fn escape_string(&self, value: &str) -> String {
        self.inner.escape_string(value)
    }

    fn quote_string(&self, value: &str) -> String {
        self.inner.quote_string(value)
    }

    fn escape_identifier(&self, value: &str, separator: &str) -> String {
        self.inner.escape_identifier(value, separator)
    }

    fn comparison_clause(&self, comparison: &Comparison) -> String {
        self.inner.comparison_clause(comparison)
    }

    fn formatted_datetime_clause(&self, date: &str, format: &str) -> String {
        self.inner.formatted_datetime_clause(date, format)
    }

    fn datetime_interval_clause(&self, date: &str, interval: &str) -> String {
        self.inner.datetime_interval_clause(date, interval)
    }

    fn datetime_difference_clause(&self, date1: &str, date2: &str) -> String {
        self.inner.datetime_difference_clause(date1, date2)
    }

    fn supports_collations(&self) -> bool {
        self.inner.supports_collations()
    }

    fn supports_timezone_override(&self) -> bool {
        self.inner.supports_timezone_override()
    }

    fn version(&self) -> impl std::future::Future<Output = DbResult<String>> + Send {
        self.inner.version()
    }

    fn database_server(&self) -> &str {
        self.inner.database_server()
    }

    fn search_engine(
        &self,
        request: &SearchRequest,
    ) -> impl std::future::Future<Output = DbResult<SearchResults>> + Send {
        self.inner.search_engine(request)
    }

    fn supports_transactions(&self) -> bool {
        self.inner.supports_transactions()
    }

    fn transaction_start(
        &self,
        mode: Option<&str>,
        session_characteristics: Option<&str>,
    ) -> impl std::future::Future<Output = DbResult<()>> + Send {
        self.inner.transaction_start(mode, session_characteristics)
    }

    fn transaction_savepoint(
        &self,
        savepoint: &str,
    ) -> impl std::future::Future<Output = DbResult<()>> + Send {
        self.inner.transaction_savepoint(savepoint)
    }

    fn transaction_rollback(
        &self,
        savepoint: Option<&str>,
    ) -> impl std::future::Future<Output = DbResult<bool>> + Send {
        self.inner.transaction_rollback(savepoint)
    }

    fn transaction_end(
        &self,
        chain: bool,
    ) -> impl std::future::Future<Output = DbResult<bool>> + Send {
        self.inner.transaction_end(chain)
    }

    fn selected_database(&self) -> Option<String> {
        self.inner.selected_database()
    }

    fn now(&self) -> String {
        self.inner.now()
    }

    fn random(&self) -> String {
        self.inner.random()
    }

    fn create_database(&self) -> impl std::future::Future<Output = DbResult<bool>> + Send {
        self.inner.create_database()
    }

    fn get_connect(
        &self,
        parameters: &BTreeMap<String, String>,
    ) -> impl std::future::Future<Output = DbResult<()>> + Send {
        self.inner.get_connect(parameters)
    }

    fn create_table(
        &self,
        table: &str,
        fields: Option<&FieldSpecs>,
        indexes: Option<&IndexSpecs>,
        options: Option<&TableOptions>,
        advanced_options: Option<&TableOptions>,
    ) -> impl std::future::Future<Output = DbResult<String>> + Send {
        self.inner
            .create_table(table, fields, indexes, options, advanced_options)
    }

    fn alter_table(
        &self,
        table: &str,
        alteration: &TableAlteration,
    ) -> impl std::future::Future<Output = DbResult<()>> + Send {
        self.inner.alter_table(table, alteration)
    }

    fn rename_table(
        &self,
        old_name: &str,
        new_name: &str,
    ) -> impl std::future::Future<Output = DbResult<()>> + Send {
        self.inner.rename_table(old_name, new_name)
    }

    fn create_field(
        &self,
        table: &str,
        field: &str,
        spec: &str,
    ) -> impl std::future::Future<Output = DbResult<()>> + Send {
        self.inner.create_field(table, field, spec)
    }

    fn rename_field(
        &self,
        table: &str,
        old_name: &str,
        new_name: &str,
    ) -> impl std::future::Future<Output = DbResult<()>> + Send {
        self.inner.rename_field(table, old_name, new_name)
    }

    fn field_list(
        &self,
        table: &str,
    ) -> impl std::future::Future<Output = DbResult<FieldSpecs>> + Send {
        self.inner.field_list(table)
    }

    fn table_list(&self) -> impl std::future::Future<Output = DbResult<Vec<String>>> + Send {
        self.inner.table_list()
    }

    fn has_table(&self, table: &str) -> impl std::future::Future<Output = DbResult<bool>> + Send {
        self.inner.has_table(table)
    }

    fn enum_values_for_field(
        &self,
        table: &str,
        field: &str,
    ) -> impl std::future::Future<Output = DbResult<Vec<String>>> + Send {
        self.inner.enum_values_for_field(table, field)
    }

    fn addslashes(&self, value: &str) -> String {
        self.inner.addslashes(value)
    }

    fn call(
        &self,
        method: &str,
        args: &[serde_json::Value],
    ) -> impl std::future::Future<Output = DbResult<serde_json::Value>> + Send {
        self.inner.call(method, args)
    }
}
