use super::{Context, UnitName, UnitReport, store, upsert_counted};
use crate::client::ApiRequest;
use crate::error::IngestError;
use crate::mapper::{self, stats::BoxScoreEntry};
use crate::model::PlayerSeasonStat;
use crate::pipeline::store::StoredGame;

fn box_score_request(ctx: &Context<'_>, season_code: &str, game: &StoredGame) -> ApiRequest {
    ApiRequest::feeds(format!(
        "v3/competitions/{}/seasons/{season_code}/games/{}/stats",
        ctx.config.competition, game.game_number
    ))
}

/// Which rows a box score walk writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoxScoreRows {
    Memberships,
    Lines,
}

async fn write_entries(
    ctx: &Context<'_>,
    report: &mut UnitReport,
    rows: BoxScoreRows,
    entries: Vec<BoxScoreEntry>,
) {
    for entry in entries {
        match rows {
            BoxScoreRows::Memberships => {
                if let Some(row) = entry.membership {
                    let item = format!("{}/{}/{}", row.season_code, row.team_code, row.person_code);
                    upsert_counted(ctx, report, &row, &item).await;
                }
            }
            BoxScoreRows::Lines => {
                let item = format!("{}/{}", entry.stat.gamecode, entry.stat.person_code);
                upsert_counted(ctx, report, &entry.stat, &item).await;
            }
        }
    }
}

/// Walks the box score of every stored game in the configured seasons. A
/// game whose fetch fails counts once and the walk moves on.
async fn walk_box_scores(ctx: &Context<'_>, unit: UnitName, rows: BoxScoreRows) -> Result<UnitReport, IngestError> {
    let mut report = UnitReport::new(unit);
    for (_, season_code) in ctx.config.season_codes() {
        for game in store::season_games(ctx.storage, &season_code).await? {
            let request = box_score_request(ctx, &season_code, &game);
            match ctx.api.get_json(&request).await {
                Ok(raw) => {
                    let entries = mapper::stats::box_score(&raw, &game.gamecode, &season_code);
                    if entries.is_empty() {
                        report.skip(&game.gamecode, "no player lines");
                        continue;
                    }
                    write_entries(ctx, &mut report, rows, entries).await;
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
pub async fn player_teams(ctx: &Context<'_>) -> Result<UnitReport, IngestError> {
    walk_box_scores(ctx, UnitName::PlayerTeams, BoxScoreRows::Memberships).await
}

/// # Errors
///
/// Will return `Err` if the season's games cannot be read
pub async fn player_game_stats(ctx: &Context<'_>) -> Result<UnitReport, IngestError> {
    walk_box_scores(ctx, UnitName::PlayerGameStats, BoxScoreRows::Lines).await
}

/// Per-phase season totals, recomputed from the player's game feed for
/// everyone with a stored box score line in the season.
///
/// # Errors
///
/// Will return `Err` if the season's players cannot be read
pub async fn player_season_stats(ctx: &Context<'_>) -> Result<UnitReport, IngestError> {
    let mut report = UnitReport::new(UnitName::PlayerSeasonStats);
    for (_, season_code) in ctx.config.season_codes() {
        for person_code in store::season_persons(ctx.storage, &season_code).await? {
            let item = format!("{season_code}/{person_code}");
            let request = ApiRequest::feeds(format!(
                "v2/competitions/{}/seasons/{season_code}/people/{person_code}/stats",
                ctx.config.competition
            ));
            let raw = match ctx.api.get_json(&request).await {
                Ok(raw) => raw,
                Err(e) => {
                    report.fail(&item, &e);
                    continue;
                }
            };
            let lines = mapper::stats::player_game_lines(&raw);
            if lines.is_empty() {
                report.skip(&item, "no games");
                continue;
            }
            for row in PlayerSeasonStat::aggregate(&season_code, &person_code, &lines) {
                let item = format!("{item}/{}", row.phase_type);
                upsert_counted(ctx, &mut report, &row, &item).await;
            }
        }
    }
    Ok(report)
}
