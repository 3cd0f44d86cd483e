use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name → column specification (e.g. `"Title" => "Varchar(255)"`).
pub type FieldSpecs = BTreeMap<String, String>;

/// Index name → index specification.
pub type IndexSpecs = BTreeMap<String, String>;

/// Engine or table options, keyed by adapter (e.g. `"MySQLDatabase" => "ENGINE=InnoDB"`).
pub type TableOptions = BTreeMap<String, String>;

/// Error-reporting level requested for a query.
///
/// Adapters decide what each level means; the proxy passes it through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorLevel {
    /// Failures are reported as errors (default).
    #[default]
    Error,
    /// Failures are reported as warnings.
    Warning,
    /// Failures are reported as notices.
    Notice,
}

/// Arguments for text-matching clause generation.
///
/// ```rust,ignore
/// let clause = db.comparison_clause(
///     &Comparison::new("\"Title\"", "%draft%").negate().case_sensitive(false),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    /// Quoted field name.
    pub field: String,
    /// Escaped search value; may contain `%` wildcards. Ignored when `parameterised`.
    pub value: String,
    /// Exact match instead of wildcard matching.
    pub exact: bool,
    /// Negate the clause.
    pub negate: bool,
    /// `Some(true)`/`Some(false)` forces case sensitivity; `None` uses the default collation.
    pub case_sensitive: Option<bool>,
    /// Emit a `?` placeholder instead of `value`.
    pub parameterised: bool,
}

impl Comparison {
    /// Wildcard, non-negated comparison using the default collation.
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            exact: false,
            negate: false,
            case_sensitive: None,
            parameterised: false,
        }
    }

    /// Require an exact match.
    pub fn exact(mut self) -> Self {
        self.exact = true;
        self
    }

    /// Negate the clause.
    pub fn negate(mut self) -> Self {
        self.negate = true;
        self
    }

    /// Force case sensitivity on or off.
    pub fn case_sensitive(mut self, sensitive: bool) -> Self {
        self.case_sensitive = Some(sensitive);
        self
    }

    /// Emit a placeholder rather than the value.
    pub fn parameterised(mut self) -> Self {
        self.parameterised = true;
        self
    }
}

/// Changes applied by [`Database::alter_table`](crate::Database::alter_table).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableAlteration {
    pub new_fields: Option<FieldSpecs>,
    pub new_indexes: Option<IndexSpecs>,
    pub altered_fields: Option<FieldSpecs>,
    pub altered_indexes: Option<IndexSpecs>,
    pub altered_options: Option<TableOptions>,
    pub advanced_options: Option<TableOptions>,
}

/// A full-text search across content classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Classes (tables) to search.
    pub classes_to_search: Vec<String>,
    /// Keywords as typed by the user.
    pub keywords: String,
    /// Offset of the first result.
    pub start: u64,
    /// Results per page.
    pub page_length: u64,
    /// Sort expression.
    pub sort_by: String,
    /// Additional filter applied to every class.
    pub extra_filter: String,
    /// Use boolean search mode.
    pub boolean_search: bool,
    /// Filter applied to file records instead of `extra_filter`.
    pub alternative_file_filter: String,
    /// Invert the match.
    pub inverted_match: bool,
}

impl SearchRequest {
    pub fn new<I, S>(classes_to_search: I, keywords: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes_to_search: classes_to_search.into_iter().map(Into::into).collect(),
            keywords: keywords.into(),
            start: 0,
            page_length: 10,
            sort_by: "Relevance DESC".to_string(),
            extra_filter: String::new(),
            boolean_search: false,
            alternative_file_filter: String::new(),
            inverted_match: false,
        }
    }

    /// Set the page window.
    pub fn page(mut self, start: u64, page_length: u64) -> Self {
        self.start = start;
        self.page_length = page_length;
        self
    }

    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = sort_by.into();
        self
    }

    pub fn extra_filter(mut self, filter: impl Into<String>) -> Self {
        self.extra_filter = filter.into();
        self
    }

    pub fn boolean_search(mut self) -> Self {
        self.boolean_search = true;
        self
    }

    pub fn alternative_file_filter(mut self, filter: impl Into<String>) -> Self {
        self.alternative_file_filter = filter.into();
        self
    }

    pub fn inverted_match(mut self) -> Self {
        self.inverted_match = true;
        self
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Matching records, one column map per record.
    pub items: Vec<BTreeMap<String, Value>>,
    /// Total number of matches across all pages.
    pub total_items: u64,
    pub start: u64,
    pub page_length: u64,
}
