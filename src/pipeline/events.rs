use super::{Context, UnitName, UnitReport, store, upsert_group};
use crate::client::ApiRequest;
use crate::error::IngestError;
use crate::mapper;
use crate::storage::{DatabaseType, QueryAndParams, Record};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Feed {
    PlayByPlay,
    Shots,
}

impl Feed {
    fn path(self) -> &'static str {
        match self {
            Self::PlayByPlay => "PlayByPlay",
            Self::Shots => "Points",
        }
    }

    fn statements(
        self,
        raw: &Value,
        gamecode: &str,
        season_code: &str,
        db_type: &DatabaseType,
    ) -> Result<Vec<QueryAndParams>, IngestError> {
        Ok(match self {
            Self::PlayByPlay => mapper::event::play_by_play(raw, gamecode, season_code)?
                .iter()
                .map(|row| row.to_upsert(db_type))
                .collect(),
            Self::Shots => mapper::event::shots(raw, gamecode, season_code)?
                .iter()
                .map(|row| row.to_upsert(db_type))
                .collect(),
        })
    }
}

/// Live-feed events of every stored game, one transaction per game.
async fn ingest_feed(ctx: &Context<'_>, unit: UnitName, feed: Feed) -> Result<UnitReport, IngestError> {
    let mut report = UnitReport::new(unit);
    let db_type = ctx.storage.database_type();
    for (_, season_code) in ctx.config.season_codes() {
        for game in store::season_games(ctx.storage, &season_code).await? {
            let request = ApiRequest::live(feed.path())
                .query("gamecode", game.game_number)
                .query("seasoncode", &season_code);
            let statements = match ctx.api.get_json(&request).await {
                Ok(raw) => feed.statements(&raw, &game.gamecode, &season_code, &db_type),
                Err(e) => Err(e),
            };
            match statements {
                Ok(statements) => {
                    let rows = statements.len() as u64;
                    upsert_group(ctx, &mut report, &statements, rows, &game.gamecode).await;
                }
                Err(e) => report.fail(&game.gamecode, &e),
            }
        }
    }
    Ok(report)
}

/// # Errors
///
/// Will return `Err` if the season's games cannot be read
pub async fn play_by_play(ctx: &Context<'_>) -> Result<UnitReport, IngestError> {
    ingest_feed(ctx, UnitName::PlayByPlay, Feed::PlayByPlay).await
}

/// # Errors
///
/// Will return `Err` if the season's games cannot be read
pub async fn shot_data(ctx: &Context<'_>) -> Result<UnitReport, IngestError> {
    ingest_feed(ctx, UnitName::ShotData, Feed::Shots).await
}
