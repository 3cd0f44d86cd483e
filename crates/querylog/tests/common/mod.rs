//! Scripted adapter shared by the integration tests.

#![allow(dead_code)]

use querylog::{
    Comparison, Database, DbError, DbResult, ErrorLevel, FieldSpecs, SearchRequest, SearchResults,
    Value,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, PartialEq, Eq)]
pub struct MockSchemaManager {
    pub dialect: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct MockQueryBuilder;

/// An adapter that answers from a script and records every call it receives.
pub struct MockDatabase {
    pub delay: Duration,
    pub failures: HashMap<String, DbError>,
    pub version: String,
    pub transaction_error: Option<DbError>,
    schema_manager: MockSchemaManager,
    query_builder: MockQueryBuilder,
    calls: Mutex<Vec<String>>,
}

impl Default for MockDatabase {
    fn default() -> Self {
        Self {
            delay: Duration::ZERO,
            failures: HashMap::new(),
            version: "5.7".to_string(),
            transaction_error: None,
            schema_manager: MockSchemaManager { dialect: "mysql" },
            query_builder: MockQueryBuilder,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn failing(mut self, sql: &str, err: DbError) -> Self {
        self.failures.insert(sql.to_string(), err);
        self
    }

    pub fn with_transaction_error(mut self, err: DbError) -> Self {
        self.transaction_error = Some(err);
        self
    }

    /// Calls received so far, formatted as `name(args)`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    async fn respond(&self, sql: &str) -> DbResult<()> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.failures.get(sql) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn transaction_result(&self) -> DbResult<()> {
        match &self.transaction_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl Database for MockDatabase {
    type Handle = String;
    type SchemaManager = MockSchemaManager;
    type QueryBuilder = MockQueryBuilder;

    fn schema_manager(&self) -> &MockSchemaManager {
        &self.schema_manager
    }

    fn query_builder(&self) -> &MockQueryBuilder {
        &self.query_builder
    }

    async fn query(&self, sql: &str, level: ErrorLevel) -> DbResult<String> {
        self.record(format!("query({sql}, {level:?})"));
        self.respond(sql).await?;
        Ok("OK".to_string())
    }

    async fn prepared_query(
        &self,
        sql: &str,
        parameters: &[Value],
        level: ErrorLevel,
    ) -> DbResult<String> {
        let params: Vec<String> = parameters.iter().map(ToString::to_string).collect();
        self.record(format!("prepared_query({sql}, [{}], {level:?})", params.join(", ")));
        self.respond(sql).await?;
        Ok(format!("OK:{}", parameters.len()))
    }

    async fn generated_id(&self, table: &str) -> DbResult<i64> {
        self.record(format!("generated_id({table})"));
        Ok(42)
    }

    fn is_active(&self) -> bool {
        true
    }

    fn escape_string(&self, value: &str) -> String {
        value.replace('\'', "''")
    }

    fn quote_string(&self, value: &str) -> String {
        format!("'{}'", self.escape_string(value))
    }

    fn escape_identifier(&self, value: &str, separator: &str) -> String {
        value
            .split(separator)
            .map(|part| format!("\"{part}\""))
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn comparison_clause(&self, comparison: &Comparison) -> String {
        let op = match (comparison.exact, comparison.negate) {
            (true, false) => "=",
            (true, true) => "!=",
            (false, false) => "LIKE",
            (false, true) => "NOT LIKE",
        };
        let value = if comparison.parameterised {
            "?".to_string()
        } else {
            self.quote_string(&comparison.value)
        };
        format!("{} {op} {value}", comparison.field)
    }

    fn formatted_datetime_clause(&self, date: &str, format: &str) -> String {
        format!("DATE_FORMAT({date}, '{format}')")
    }

    fn datetime_interval_clause(&self, date: &str, interval: &str) -> String {
        format!("{date} + INTERVAL {interval}")
    }

    fn datetime_difference_clause(&self, date1: &str, date2: &str) -> String {
        format!("UNIX_TIMESTAMP({date1}) - UNIX_TIMESTAMP({date2})")
    }

    fn supports_collations(&self) -> bool {
        true
    }

    fn supports_timezone_override(&self) -> bool {
        false
    }

    async fn version(&self) -> DbResult<String> {
        self.record("version()");
        Ok(self.version.clone())
    }

    fn database_server(&self) -> &str {
        "mysql"
    }

    async fn search_engine(&self, request: &SearchRequest) -> DbResult<SearchResults> {
        self.record(format!("search_engine({})", request.keywords));
        let mut item = BTreeMap::new();
        item.insert("Title".to_string(), Value::from(request.keywords.as_str()));
        Ok(SearchResults {
            items: vec![item],
            total_items: 1,
            start: request.start,
            page_length: request.page_length,
        })
    }

    fn supports_transactions(&self) -> bool {
        true
    }

    async fn transaction_start(
        &self,
        mode: Option<&str>,
        session_characteristics: Option<&str>,
    ) -> DbResult<()> {
        self.record(format!(
            "transaction_start({mode:?}, {session_characteristics:?})"
        ));
        self.transaction_result()
    }

    async fn transaction_savepoint(&self, savepoint: &str) -> DbResult<()> {
        self.record(format!("transaction_savepoint({savepoint})"));
        self.transaction_result()
    }

    async fn transaction_rollback(&self, savepoint: Option<&str>) -> DbResult<bool> {
        self.record(format!("transaction_rollback({savepoint:?})"));
        self.transaction_result().map(|()| true)
    }

    async fn transaction_end(&self, chain: bool) -> DbResult<bool> {
        self.record(format!("transaction_end({chain})"));
        self.transaction_result().map(|()| true)
    }

    fn selected_database(&self) -> Option<String> {
        Some("cms".to_string())
    }

    fn now(&self) -> String {
        "NOW()".to_string()
    }

    fn random(&self) -> String {
        "RAND()".to_string()
    }

    async fn rename_table(&self, old_name: &str, new_name: &str) -> DbResult<()> {
        self.record(format!("rename_table({old_name}, {new_name})"));
        Ok(())
    }

    async fn field_list(&self, table: &str) -> DbResult<FieldSpecs> {
        self.record(format!("field_list({table})"));
        let mut fields = FieldSpecs::new();
        fields.insert("ID".to_string(), "int(11) not null auto_increment".to_string());
        fields.insert("Title".to_string(), "varchar(255)".to_string());
        Ok(fields)
    }

    async fn table_list(&self) -> DbResult<Vec<String>> {
        self.record("table_list()");
        Ok(vec!["Member".to_string(), "SiteTree".to_string()])
    }

    async fn has_table(&self, table: &str) -> DbResult<bool> {
        self.record(format!("has_table({table})"));
        Ok(table == "SiteTree")
    }

    async fn enum_values_for_field(&self, table: &str, field: &str) -> DbResult<Vec<String>> {
        self.record(format!("enum_values_for_field({table}, {field})"));
        Ok(vec!["Draft".to_string(), "Published".to_string()])
    }

    async fn call(
        &self,
        method: &str,
        args: &[serde_json::Value],
    ) -> DbResult<serde_json::Value> {
        self.record(format!("call({method})"));
        match method {
            "ping" => Ok(serde_json::json!({ "pong": args.len() })),
            other => Err(DbError::unsupported(other)),
        }
    }
}
