pub mod bind;
pub mod sql;
pub mod upsert;

pub use bind::*;
pub use sql::*;
pub use upsert::*;

pub use sql_middleware::middleware::{CustomDbRow, DatabaseType, QueryAndParams, RowValues};

use crate::error::IngestError;
use async_trait::async_trait;

#[async_trait]
pub trait Storage: Send + Sync {
    fn database_type(&self) -> DatabaseType;

    /// Runs one statement in its own implicit transaction.
    async fn execute(&self, statement: &QueryAndParams) -> Result<usize, IngestError>;

    /// Runs the statements in a single transaction. Nothing is kept if any
    /// statement fails.
    async fn execute_unit(&self, statements: &[QueryAndParams]) -> Result<usize, IngestError>;

    async fn select(&self, query: &str, params: &[RowValues]) -> Result<Vec<CustomDbRow>, IngestError>;

    async fn execute_batch(&self, sql: &str) -> Result<(), IngestError>;
}

/// Positional parameter `n` (1-based) in the dialect of `db_type`.
#[must_use]
pub fn placeholder(db_type: &DatabaseType, n: usize) -> String {
    if *db_type == DatabaseType::Postgres {
        format!("${n}")
    } else {
        format!("?{n}")
    }
}

/// Typed access to result rows.
pub trait RowExt {
    fn get_int(&self, column: &str) -> Option<i64>;
    fn get_text(&self, column: &str) -> Option<String>;
}

impl RowExt for CustomDbRow {
    fn get_int(&self, column: &str) -> Option<i64> {
        match self.get(column)? {
            RowValues::Int(v) => Some(*v),
            RowValues::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    fn get_text(&self, column: &str) -> Option<String> {
        self.get(column)
            .and_then(|v| v.as_text())
            .map(ToString::to_string)
    }
}
