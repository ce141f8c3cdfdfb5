use super::{DatabaseType, QueryAndParams, RowValues, Storage, placeholder};
use crate::error::IngestError;

/// What happens to a column when the row's key already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnConflict {
    /// Part of the conflict target.
    Key,
    /// Written on insert, never touched afterwards.
    Keep,
    /// Always takes the incoming value.
    Replace,
    /// Takes the incoming value unless it is null.
    Coalesce,
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub on_conflict: OnConflict,
}

pub const fn key(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        on_conflict: OnConflict::Key,
    }
}

pub const fn keep(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        on_conflict: OnConflict::Keep,
    }
}

pub const fn replace(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        on_conflict: OnConflict::Replace,
    }
}

pub const fn coalesce(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        on_conflict: OnConflict::Coalesce,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    InsertOrIgnore,
    InsertOrMerge,
}

/// Table name plus every column in bind order.
#[derive(Debug)]
pub struct TableSpec {
    pub table: &'static str,
    pub columns: &'static [ColumnSpec],
}

impl TableSpec {
    pub fn key_columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns
            .iter()
            .filter(|c| c.on_conflict == OnConflict::Key)
            .map(|c| c.name)
    }

    #[must_use]
    pub fn policy(&self) -> ConflictPolicy {
        let mergeable = self
            .columns
            .iter()
            .any(|c| matches!(c.on_conflict, OnConflict::Replace | OnConflict::Coalesce));
        if mergeable {
            ConflictPolicy::InsertOrMerge
        } else {
            ConflictPolicy::InsertOrIgnore
        }
    }

    #[must_use]
    pub fn upsert_sql(&self, db_type: &DatabaseType) -> String {
        let names: Vec<&str> = self.columns.iter().map(|c| c.name).collect();
        let placeholders: Vec<String> = (1..=names.len()).map(|i| placeholder(db_type, i)).collect();
        let keys: Vec<&str> = self.key_columns().collect();

        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({})",
            self.table,
            names.join(", "),
            placeholders.join(", "),
            keys.join(", ")
        );

        let assignments: Vec<String> = self
            .columns
            .iter()
            .filter_map(|c| match c.on_conflict {
                OnConflict::Replace => Some(format!("{0} = EXCLUDED.{0}", c.name)),
                OnConflict::Coalesce => Some(format!(
                    "{0} = COALESCE(EXCLUDED.{0}, {1}.{0})",
                    c.name, self.table
                )),
                OnConflict::Key | OnConflict::Keep => None,
            })
            .collect();

        if assignments.is_empty() {
            sql.push_str(" DO NOTHING;");
        } else {
            sql.push_str(" DO UPDATE SET ");
            sql.push_str(&assignments.join(", "));
            sql.push(';');
        }
        sql
    }
}

/// A normalized row that knows its table and conflict rules.
pub trait Record {
    const SPEC: &'static TableSpec;

    /// Values in the same order as `SPEC.columns`.
    fn values(&self) -> Vec<RowValues>;

    fn to_upsert(&self, db_type: &DatabaseType) -> QueryAndParams {
        let params = self.values();
        debug_assert_eq!(params.len(), Self::SPEC.columns.len(), "{}", Self::SPEC.table);
        QueryAndParams {
            query: Self::SPEC.upsert_sql(db_type),
            params,
        }
    }
}

/// # Errors
///
/// Will return `Err` if the storage rejects the row
pub async fn upsert<R: Record + Sync>(storage: &dyn Storage, row: &R) -> Result<usize, IngestError> {
    storage.execute(&row.to_upsert(&storage.database_type())).await
}
