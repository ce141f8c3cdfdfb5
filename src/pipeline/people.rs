use super::{Context, UnitName, UnitReport, fetch_records, store, upsert_counted};
use crate::client::{ApiRequest, Paginator};
use crate::error::IngestError;
use crate::mapper;

/// # Errors
///
/// Never fails at unit level; page errors are counted
pub async fn people(ctx: &Context<'_>) -> Result<UnitReport, IngestError> {
    let mut report = UnitReport::new(UnitName::People);
    let mut pages = Paginator::new(ApiRequest::feeds("v2/people"), ctx.config.page_size);
    while let Some(page) = pages.next_page(ctx.api).await {
        let page = match page {
            Ok(page) => page,
            Err(e) => {
                report.fail(&format!("people offset {}", pages.offset()), &e);
                continue;
            }
        };
        for raw in &page {
            match mapper::people::person(raw) {
                Ok(row) => {
                    upsert_counted(ctx, &mut report, &row, &row.person_code).await;
                }
                Err(e) => report.fail("person", &e),
            }
        }
    }
    Ok(report)
}

pub(super) fn season_games_request(ctx: &Context<'_>, season_code: &str) -> ApiRequest {
    ApiRequest::feeds(format!(
        "v2/competitions/{}/seasons/{season_code}/games",
        ctx.config.competition
    ))
}

/// Officials of every game in the configured seasons. Referees unknown to
/// the people table are created from the partial referee block first.
///
/// # Errors
///
/// Never fails at unit level; page errors are counted
pub async fn game_referees(ctx: &Context<'_>) -> Result<UnitReport, IngestError> {
    let mut report = UnitReport::new(UnitName::GameReferees);
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
            for game in &page {
                let crew = match mapper::people::game_referees(game) {
                    Ok(crew) => crew,
                    Err(e) => {
                        report.fail(&season_code, &e);
                        continue;
                    }
                };
                for (person, referee) in crew {
                    let item = format!("{}/{}", referee.gamecode, referee.person_code);
                    if let Err(e) = crate::storage::upsert(ctx.storage, &person).await {
                        report.fail(&item, &e);
                        continue;
                    }
                    upsert_counted(ctx, &mut report, &referee, &item).await;
                }
            }
        }
    }
    Ok(report)
}

/// Staff of every club that played in the configured seasons. Only people
/// already in the people table are linked.
///
/// # Errors
///
/// Will return `Err` if the season's teams cannot be read
pub async fn coach_teams(ctx: &Context<'_>) -> Result<UnitReport, IngestError> {
    let mut report = UnitReport::new(UnitName::CoachTeams);
    for (_, season_code) in ctx.config.season_codes() {
        for team_code in store::season_teams(ctx.storage, &season_code).await? {
            let request = ApiRequest::feeds(format!(
                "v2/competitions/{}/seasons/{season_code}/clubs/{team_code}/people",
                ctx.config.competition
            ));
            let Some(roster) = fetch_records(ctx, &mut report, &request).await else {
                continue;
            };
            for raw in &roster {
                let row = match mapper::people::coach_team(raw, &team_code, &season_code) {
                    Ok(Some(row)) => row,
                    Ok(None) => continue,
                    Err(e) => {
                        report.fail(&team_code, &e);
                        continue;
                    }
                };
                let item = format!("{season_code}/{team_code}/{}", row.person_code);
                match store::person_exists(ctx.storage, &row.person_code).await {
                    Ok(true) => {}
                    Ok(false) => {
                        report.skip(&item, "person not ingested");
                        continue;
                    }
                    Err(e) => {
                        report.fail(&item, &e);
                        continue;
                    }
                }
                upsert_counted(ctx, &mut report, &row, &item).await;
            }
        }
    }
    Ok(report)
}
