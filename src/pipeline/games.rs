use super::people::season_games_request;
use super::{Context, UnitName, UnitReport, store, upsert_counted, upsert_group};
use crate::client::{ApiRequest, Paginator};
use crate::error::IngestError;
use crate::mapper;
use crate::storage::{QueryAndParams, Record};
use serde_json::Value;

/// # Errors
///
/// Never fails at unit level; page errors are counted
pub async fn games(ctx: &Context<'_>) -> Result<UnitReport, IngestError> {
    let mut report = UnitReport::new(UnitName::Games);
    for (_, season_code) in ctx.config.season_codes() {
        let mut pages = Paginator::new(season_games_request(ctx, &season_code), ctx.config.page_size);
        while let Some(page) = pages.next_page(ctx.api).await {
            let page = match page {
                Ok(page) => page,
                Err(e) => {
                    report.fail(&season_code, &e);
                    continue;
                }
            };
            for raw in &page {
                match mapper::game::game(raw) {
                    Ok(row) => {
                        upsert_counted(ctx, &mut report, &row, &row.gamecode).await;
                    }
                    Err(e) => report.fail(&season_code, &e),
                }
            }
        }
    }
    Ok(report)
}

/// Season schedule from the XML feed, one transaction per season. Arenas
/// missing from the venues table are created alongside.
///
/// # Errors
///
/// Never fails at unit level; a game whose stored scores cannot be read is
/// counted and left out of its season
pub async fn scheduled_games(ctx: &Context<'_>) -> Result<UnitReport, IngestError> {
    let mut report = UnitReport::new(UnitName::ScheduledGames);
    for (_, season_code) in ctx.config.season_codes() {
        let request = ApiRequest::feeds("v1/schedules").query("seasonCode", &season_code);
        let schedule = match ctx.api.get_text(&request).await {
            Ok(xml) => mapper::game::schedule(&xml),
            Err(e) => Err(e),
        };
        let schedule = match schedule {
            Ok(schedule) => schedule,
            Err(e) => {
                report.fail(&season_code, &e);
                continue;
            }
        };

        let db_type = ctx.storage.database_type();
        let mut rows = 0;
        let mut statements: Vec<QueryAndParams> = Vec::with_capacity(schedule.len() * 2);
        for mut game in schedule {
            game.played = match store::game_scores_recorded(ctx.storage, &game.gamecode).await {
                Ok(played) => played,
                Err(e) => {
                    report.fail(&game.gamecode, &e);
                    continue;
                }
            };
            if let Some(venue) = game.venue_stub() {
                statements.push(venue.to_upsert(&db_type));
            }
            statements.push(game.to_upsert(&db_type));
            rows += 1;
        }
        upsert_group(ctx, &mut report, &statements, rows, &season_code).await;
    }
    Ok(report)
}

/// Standings after every stored round. A round the feed does not know is
/// skipped; each round is written in one transaction.
///
/// # Errors
///
/// Will return `Err` if the season's rounds cannot be read
pub async fn standings(ctx: &Context<'_>) -> Result<UnitReport, IngestError> {
    let mut report = UnitReport::new(UnitName::Standings);
    for (_, season_code) in ctx.config.season_codes() {
        for round in store::season_rounds(ctx.storage, &season_code).await? {
            let item = format!("{season_code}/round {round}");
            let request = ApiRequest::feeds(format!(
                "v3/competitions/{}/seasons/{season_code}/rounds/{round}/calendarstandings",
                ctx.config.competition
            ));
            let payload = match ctx.api.get_json_optional(&request).await {
                Ok(Some(payload)) => payload,
                Ok(None) => {
                    report.skip(&item, "no standings");
                    continue;
                }
                Err(e) => {
                    report.fail(&item, &e);
                    continue;
                }
            };

            let teams = payload.get("teams").and_then(Value::as_array).map_or(&[][..], Vec::as_slice);
            let db_type = ctx.storage.database_type();
            let mut statements = Vec::with_capacity(teams.len());
            for raw in teams {
                match mapper::game::standing(raw, &season_code, round) {
                    Ok(row) => statements.push(row.to_upsert(&db_type)),
                    Err(e) => report.fail(&item, &e),
                }
            }
            let rows = statements.len() as u64;
            upsert_group(ctx, &mut report, &statements, rows, &item).await;
        }
    }
    Ok(report)
}
