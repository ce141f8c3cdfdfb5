use super::{Context, UnitName, UnitReport, store, upsert_counted};
use crate::client::ApiRequest;
use crate::error::IngestError;
use crate::mapper;
use crate::model::TeamGameStat;

/// Team totals per game, summed from the stored player lines and completed
/// with the quarter partials of the game feed.
///
/// # Errors
///
/// Will return `Err` if the season's games cannot be read
pub async fn team_game_stats(ctx: &Context<'_>) -> Result<UnitReport, IngestError> {
    let mut report = UnitReport::new(UnitName::TeamGameStats);
    for (_, season_code) in ctx.config.season_codes() {
        for game in store::season_games(ctx.storage, &season_code).await? {
            let request = ApiRequest::feeds(format!(
                "v2/competitions/{}/seasons/{season_code}/games/{}",
                ctx.config.competition, game.game_number
            ));
            let raw = match ctx.api.get_json(&request).await {
                Ok(raw) => raw,
                Err(e) => {
                    report.fail(&game.gamecode, &e);
                    continue;
                }
            };
            for side in mapper::stats::partials(&raw) {
                let item = format!("{}/{}", game.gamecode, side.team_code);
                let lines = match store::player_lines(ctx.storage, &game.gamecode, &side.team_code).await {
                    Ok(lines) => lines,
                    Err(e) => {
                        report.fail(&item, &e);
                        continue;
                    }
                };
                let mut row = TeamGameStat::from_player_lines(&game.gamecode, &side.team_code, &lines);
                row.quarters = side.quarters;
                row.extra_periods = Some(side.extra_periods);
                upsert_counted(ctx, &mut report, &row, &item).await;
            }
        }
    }
    Ok(report)
}

/// # Errors
///
/// Will return `Err` if the season's teams cannot be read
pub async fn team_season_stats(ctx: &Context<'_>) -> Result<UnitReport, IngestError> {
    let mut report = UnitReport::new(UnitName::TeamSeasonStats);
    for (_, season_code) in ctx.config.season_codes() {
        for team_code in store::season_teams(ctx.storage, &season_code).await? {
            let item = format!("{season_code}/{team_code}");
            let request = ApiRequest::feeds(format!(
                "v3/competitions/{}/seasons/{season_code}/clubs/{team_code}/stats",
                ctx.config.competition
            ));
            let row = match ctx.api.get_json(&request).await {
                Ok(raw) => mapper::stats::team_season_stat(&raw, &season_code, &team_code),
                Err(e) => Err(e),
            };
            match row {
                Ok(row) => {
                    upsert_counted(ctx, &mut report, &row, &item).await;
                }
                Err(e) => report.fail(&item, &e),
            }
        }
    }
    Ok(report)
}
