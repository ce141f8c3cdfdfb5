#![allow(dead_code)]

use async_trait::async_trait;
use bdc_ingest::client::{ApiRequest, StatsApi};
use bdc_ingest::config::IngestConfig;
use bdc_ingest::error::IngestError;
use bdc_ingest::model::Game;
use bdc_ingest::schema::init_schema;
use bdc_ingest::storage::{CustomDbRow, DatabaseType, QueryAndParams, RowValues, SqlStorage, Storage, upsert};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_DB: AtomicUsize = AtomicUsize::new(0);

/// Shared-cache in-memory database, private to the caller. A bare `:memory:`
/// would give each pooled connection its own empty database.
pub fn memory_db() -> String {
    let n = NEXT_DB.fetch_add(1, Ordering::SeqCst);
    format!("file:bdc_test_{}_{n}?mode=memory&cache=shared", std::process::id())
}

/// Fresh in-memory sqlite store with the bundled schema.
pub async fn setup_store() -> Result<SqlStorage, IngestError> {
    let storage = SqlStorage::open_sqlite(&memory_db()).await?;
    init_schema(&storage).await?;
    Ok(storage)
}

pub fn test_config() -> IngestConfig {
    IngestConfig::new("E", vec![2023])
}

pub async fn count(storage: &dyn Storage, table: &str) -> Result<usize, IngestError> {
    let rows = storage.select(&format!("SELECT * FROM {table}"), &[]).await?;
    Ok(rows.len())
}

/// Stores a bare MAD-BAR game of `E2023`.
pub async fn store_game(
    storage: &dyn Storage,
    game_number: i64,
    scores: Option<(i64, i64)>,
) -> Result<(), IngestError> {
    let game = Game {
        gamecode: format!("E2023_{game_number}"),
        season_code: "E2023".to_string(),
        game_number: Some(game_number),
        round_number: Some(1),
        phase_type: Some("RS".to_string()),
        home_team_code: Some("MAD".to_string()),
        away_team_code: Some("BAR".to_string()),
        home_score: scores.map(|(h, _)| h),
        away_score: scores.map(|(_, a)| a),
        ..Game::default()
    };
    upsert(storage, &game).await?;
    Ok(())
}

/// Store whose reads fail when the query contains `query` and one of the
/// binds is the text `key`. Everything else goes to `inner`.
pub struct FailingReads<'a> {
    pub inner: &'a dyn Storage,
    pub query: &'static str,
    pub key: &'static str,
}

#[async_trait]
impl Storage for FailingReads<'_> {
    fn database_type(&self) -> DatabaseType {
        self.inner.database_type()
    }

    async fn execute(&self, statement: &QueryAndParams) -> Result<usize, IngestError> {
        self.inner.execute(statement).await
    }

    async fn execute_unit(&self, statements: &[QueryAndParams]) -> Result<usize, IngestError> {
        self.inner.execute_unit(statements).await
    }

    async fn select(&self, query: &str, params: &[RowValues]) -> Result<Vec<CustomDbRow>, IngestError> {
        if query.contains(self.query) && params.iter().any(|p| p.as_text().is_some_and(|t| t == self.key)) {
            return Err(IngestError::Constraint(format!("read of {} refused", self.key)));
        }
        self.inner.select(query, params).await
    }

    async fn execute_batch(&self, sql: &str) -> Result<(), IngestError> {
        self.inner.execute_batch(sql).await
    }
}

#[derive(Debug, Clone)]
pub enum Scripted {
    Json(Value),
    Text(String),
    Status(u16),
    Transport,
}

/// Canned upstream keyed by the request's display form
/// (`path?key=value&...`). Unscripted requests answer 404.
#[derive(Debug, Default)]
pub struct FakeApi {
    responses: Mutex<HashMap<String, Scripted>>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, key: &str, response: Scripted) -> Self {
        self.responses
            .lock()
            .expect("responses lock")
            .insert(key.to_string(), response);
        self
    }

    pub fn json(self, key: &str, body: Value) -> Self {
        self.with(key, Scripted::Json(body))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn answer(&self, request: &ApiRequest) -> Scripted {
        let key = request.to_string();
        self.calls.lock().expect("calls lock").push(key.clone());
        self.responses
            .lock()
            .expect("responses lock")
            .get(&key)
            .cloned()
            .unwrap_or(Scripted::Status(404))
    }

    fn failure(request: &ApiRequest, scripted: &Scripted) -> IngestError {
        match scripted {
            Scripted::Status(status) => IngestError::Api {
                status: *status,
                url: request.to_string(),
            },
            Scripted::Transport => IngestError::Transport(format!("connection reset: {request}")),
            Scripted::Json(_) | Scripted::Text(_) => {
                IngestError::Mapping(format!("wrong body kind scripted for {request}"))
            }
        }
    }
}

#[async_trait]
impl StatsApi for FakeApi {
    async fn get_json(&self, request: &ApiRequest) -> Result<Value, IngestError> {
        match self.answer(request) {
            Scripted::Json(value) => Ok(value),
            other => Err(Self::failure(request, &other)),
        }
    }

    async fn get_text(&self, request: &ApiRequest) -> Result<String, IngestError> {
        match self.answer(request) {
            Scripted::Text(text) => Ok(text),
            other => Err(Self::failure(request, &other)),
        }
    }
}
