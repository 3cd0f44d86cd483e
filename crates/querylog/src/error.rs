//! Error types for database adapters

use thiserror::Error;

/// Result type alias for adapter operations
pub type DbResult<T> = Result<T, DbError>;

/// Errors reported by a database adapter.
///
/// The proxy never produces these itself; it hands back whatever the wrapped
/// adapter returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DbError {
    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error (syntax, runtime)
    #[error("Query error: {0}")]
    Query(String),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check constraint violation
    #[error("Check constraint violation: {0}")]
    CheckViolation(String),

    /// Transaction control failed (begin, savepoint, rollback, commit)
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// The adapter does not implement the requested operation
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl DbError {
    /// Create a connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a query error
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create an unsupported-operation error
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported(operation.into())
    }

    /// Check if this is a connection error
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Check if this is a constraint violation of any kind
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::UniqueViolation(_) | Self::ForeignKeyViolation(_) | Self::CheckViolation(_)
        )
    }

    /// Check if this is an unsupported-operation error
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }

    /// Build the error for a failed statement from its SQLSTATE code.
    ///
    /// Adapters call this when a driver reports a statement failure, so
    /// callers can test [`DbError::is_constraint_violation`] without knowing
    /// the dialect. `23505`, `23503` and `23514` map to the matching
    /// constraint variant; every other code becomes [`DbError::Query`].
    ///
    /// ```
    /// use querylog::DbError;
    ///
    /// let err = DbError::from_sqlstate("23505", "Duplicate entry 'a@example.com'");
    /// assert!(err.is_constraint_violation());
    /// ```
    pub fn from_sqlstate(code: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            "23505" => Self::UniqueViolation(message),
            "23503" => Self::ForeignKeyViolation(message),
            "23514" => Self::CheckViolation(message),
            _ => Self::Query(message),
        }
    }
}
