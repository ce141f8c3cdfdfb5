use crate::error::IngestError;
use crate::storage::{DatabaseType, Storage};

const SQLITE_SCHEMA: [&str; 5] = [
    include_str!("sql/schema/sqlite/00_reference.sql"),
    include_str!("sql/schema/sqlite/01_people.sql"),
    include_str!("sql/schema/sqlite/02_games.sql"),
    include_str!("sql/schema/sqlite/03_stats.sql"),
    include_str!("sql/schema/sqlite/04_events.sql"),
];

const POSTGRES_SCHEMA: [&str; 5] = [
    include_str!("sql/schema/postgres/00_reference.sql"),
    include_str!("sql/schema/postgres/01_people.sql"),
    include_str!("sql/schema/postgres/02_games.sql"),
    include_str!("sql/schema/postgres/03_stats.sql"),
    include_str!("sql/schema/postgres/04_events.sql"),
];

#[must_use]
pub fn schema_sql(db_type: &DatabaseType) -> String {
    if *db_type == DatabaseType::Postgres {
        POSTGRES_SCHEMA.join("\n")
    } else {
        SQLITE_SCHEMA.join("\n")
    }
}

/// Creates any missing table. Existing tables are left alone.
///
/// # Errors
///
/// Will return `Err` if the DDL is rejected
pub async fn init_schema(storage: &dyn Storage) -> Result<(), IngestError> {
    storage
        .execute_batch(&schema_sql(&storage.database_type()))
        .await
}
