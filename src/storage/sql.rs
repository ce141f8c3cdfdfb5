use super::{CustomDbRow, DatabaseType, QueryAndParams, RowValues, Storage};
use crate::error::IngestError;
use async_trait::async_trait;
use sql_middleware::middleware::{
    ConfigAndPool, ConversionMode, MiddlewarePoolConnection, PgConfig, PostgresOptions,
    SqliteOptions,
};
use sql_middleware::{PostgresParams, SqlMiddlewareDbError, SqliteParamsExecute, convert_sql_params};

#[derive(Debug, Clone, Default)]
pub struct PostgresSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub dbname: String,
    pub user: Option<String>,
    pub password: Option<String>,
}

/// Storage over the middleware pool. Every unit shares the same handle.
#[derive(Clone)]
pub struct SqlStorage {
    config_and_pool: ConfigAndPool,
    db_type: DatabaseType,
}

impl SqlStorage {
    #[must_use]
    pub fn new(config_and_pool: ConfigAndPool, db_type: DatabaseType) -> Self {
        Self {
            config_and_pool,
            db_type,
        }
    }

    /// # Errors
    ///
    /// Will return `Err` if the sqlite file cannot be opened
    pub async fn open_sqlite(path: &str) -> Result<Self, IngestError> {
        let sqlite_options = SqliteOptions::new(path.to_string());
        let config_and_pool = ConfigAndPool::new_sqlite(sqlite_options).await?;
        Ok(Self::new(config_and_pool, DatabaseType::Sqlite))
    }

    /// # Errors
    ///
    /// Will return `Err` if the pool cannot be built or the first connection fails
    pub async fn connect_postgres(settings: &PostgresSettings) -> Result<Self, IngestError> {
        let mut postgres_config = PgConfig::new();
        postgres_config.dbname = Some(settings.dbname.clone());
        postgres_config.host.clone_from(&settings.host);
        postgres_config.port = settings.port;
        postgres_config.user.clone_from(&settings.user);
        postgres_config.password.clone_from(&settings.password);

        let postgres_options = PostgresOptions::new(postgres_config);
        let config_and_pool = ConfigAndPool::new_postgres(postgres_options).await?;
        // fail at startup rather than inside the first unit
        drop(config_and_pool.get_connection().await?);
        Ok(Self::new(config_and_pool, DatabaseType::Postgres))
    }

    #[must_use]
    pub fn config_and_pool(&self) -> &ConfigAndPool {
        &self.config_and_pool
    }

    async fn execute_group(&self, statements: &[QueryAndParams]) -> Result<usize, SqlMiddlewareDbError> {
        let conn = self.config_and_pool.get_connection().await?;
        match conn {
            MiddlewarePoolConnection::Sqlite(sqlite_conn) => {
                let statements: Vec<(String, Vec<RowValues>)> = statements
                    .iter()
                    .map(|s| (s.query.clone(), s.params.clone()))
                    .collect();
                sqlite_conn
                    .with_connection(move |conn| {
                        let tx = conn.transaction()?;
                        let mut changed = 0;
                        for (query, params) in &statements {
                            let converted_params = convert_sql_params::<SqliteParamsExecute>(
                                params,
                                ConversionMode::Execute,
                            )?;
                            changed += tx.execute(query, converted_params.0)?;
                        }
                        tx.commit()?;
                        Ok::<_, SqlMiddlewareDbError>(changed)
                    })
                    .await
            }
            MiddlewarePoolConnection::Postgres(mut pg_conn) => {
                let tx = pg_conn.transaction().await?;
                let mut changed = 0;
                for statement in statements {
                    let postgres_params = PostgresParams::convert(&statement.params)?;
                    changed += tx
                        .execute(statement.query.as_str(), &postgres_params.as_refs())
                        .await?;
                }
                tx.commit().await?;
                Ok(usize::try_from(changed).unwrap_or(usize::MAX))
            }
            #[allow(unreachable_patterns)]
            _ => Err(SqlMiddlewareDbError::Other(
                "Database type not supported for this operation".to_string(),
            )),
        }
    }
}

#[async_trait]
impl Storage for SqlStorage {
    fn database_type(&self) -> DatabaseType {
        self.db_type.clone()
    }

    async fn execute(&self, statement: &QueryAndParams) -> Result<usize, IngestError> {
        let mut conn = self.config_and_pool.get_connection().await?;
        Ok(conn.execute_dml(&statement.query, &statement.params).await?)
    }

    async fn execute_unit(&self, statements: &[QueryAndParams]) -> Result<usize, IngestError> {
        if statements.is_empty() {
            return Ok(0);
        }
        Ok(self.execute_group(statements).await?)
    }

    async fn select(&self, query: &str, params: &[RowValues]) -> Result<Vec<CustomDbRow>, IngestError> {
        let mut conn = self.config_and_pool.get_connection().await?;
        let result_set = conn.execute_select(query, params).await?;
        Ok(result_set.results)
    }

    async fn execute_batch(&self, sql: &str) -> Result<(), IngestError> {
        let mut conn = self.config_and_pool.get_connection().await?;
        Ok(conn.execute_batch(sql).await?)
    }
}
