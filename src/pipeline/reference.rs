use super::{Context, UnitName, UnitReport, fetch_records, store, upsert_counted};
use crate::client::ApiRequest;
use crate::error::IngestError;
use crate::mapper::{self, records};
use std::collections::{HashMap, HashSet};

/// # Errors
///
/// Never fails at unit level; fetch errors are counted
pub async fn competitions(ctx: &Context<'_>) -> Result<UnitReport, IngestError> {
    let mut report = UnitReport::new(UnitName::Competitions);
    let request = ApiRequest::feeds("v2/competitions");
    for raw in fetch_records(ctx, &mut report, &request).await.unwrap_or_default() {
        match mapper::reference::competition(&raw) {
            Ok(row) => {
                upsert_counted(ctx, &mut report, &row, &row.competition_code).await;
            }
            Err(e) => report.fail("competition", &e),
        }
    }
    Ok(report)
}

/// # Errors
///
/// Never fails at unit level; fetch errors are counted
pub async fn seasons(ctx: &Context<'_>) -> Result<UnitReport, IngestError> {
    let mut report = UnitReport::new(UnitName::Seasons);
    let request = ApiRequest::feeds(format!("v2/competitions/{}/seasons", ctx.config.competition));
    for raw in fetch_records(ctx, &mut report, &request).await.unwrap_or_default() {
        match mapper::reference::season(&raw) {
            Ok(row) => {
                upsert_counted(ctx, &mut report, &row, &row.season_code).await;
            }
            Err(e) => report.fail("season", &e),
        }
    }
    Ok(report)
}

/// # Errors
///
/// Never fails at unit level; fetch errors are counted
pub async fn teams(ctx: &Context<'_>) -> Result<UnitReport, IngestError> {
    let mut report = UnitReport::new(UnitName::Teams);
    let request = ApiRequest::feeds("v3/clubs");
    for raw in fetch_records(ctx, &mut report, &request).await.unwrap_or_default() {
        match mapper::reference::team(&raw) {
            Ok(row) => {
                upsert_counted(ctx, &mut report, &row, &row.team_code).await;
            }
            Err(e) => report.fail("club", &e),
        }
    }
    Ok(report)
}

/// Description of every stored club.
///
/// # Errors
///
/// Will return `Err` if the stored teams cannot be read
pub async fn team_info(ctx: &Context<'_>) -> Result<UnitReport, IngestError> {
    let mut report = UnitReport::new(UnitName::TeamInfo);
    for team_code in store::team_codes(ctx.storage).await? {
        let request = ApiRequest::feeds(format!("v3/clubs/{team_code}/info"));
        let raw = match ctx.api.get_json(&request).await {
            Ok(raw) => raw,
            Err(e) => {
                report.fail(&team_code, &e);
                continue;
            }
        };
        match mapper::reference::team_info(&team_code, &raw) {
            Some(row) => {
                upsert_counted(ctx, &mut report, &row, &team_code).await;
            }
            None => report.skip(&team_code, "no description"),
        }
    }
    Ok(report)
}

fn season_venues_request(ctx: &Context<'_>, season_code: &str) -> ApiRequest {
    ApiRequest::feeds(format!(
        "v2/competitions/{}/seasons/{season_code}/venues",
        ctx.config.competition
    ))
}

/// # Errors
///
/// Never fails at unit level; fetch errors are counted
pub async fn venues(ctx: &Context<'_>) -> Result<UnitReport, IngestError> {
    let mut report = UnitReport::new(UnitName::Venues);
    let mut seen: HashSet<String> = HashSet::new();
    for (_, season_code) in ctx.config.season_codes() {
        let request = season_venues_request(ctx, &season_code);
        let Some(clubs) = fetch_records(ctx, &mut report, &request).await else {
            continue;
        };
        for club in &clubs {
            for (_, venue) in mapper::reference::club_venues(club) {
                if !seen.insert(venue.venue_code.clone()) {
                    continue;
                }
                upsert_counted(ctx, &mut report, &venue, &venue.venue_code).await;
            }
        }
    }
    Ok(report)
}

/// Club-venue links per season. A venue is primary unless the clubs listing
/// names it as the club's backup; without that listing every venue counts
/// as primary.
///
/// # Errors
///
/// Never fails at unit level; fetch errors are counted
pub async fn team_venues(ctx: &Context<'_>) -> Result<UnitReport, IngestError> {
    let mut report = UnitReport::new(UnitName::TeamVenues);

    let backups: HashMap<String, String> = match ctx.api.get_json(&ApiRequest::feeds("v2/clubs")).await {
        Ok(payload) => records(&payload, "v2/clubs")
            .map(mapper::reference::backup_venues)
            .unwrap_or_default(),
        Err(e) => {
            tracing::warn!("backup venues unavailable, treating all venues as primary: {e}");
            HashMap::new()
        }
    };

    for (_, season_code) in ctx.config.season_codes() {
        let request = season_venues_request(ctx, &season_code);
        let Some(clubs) = fetch_records(ctx, &mut report, &request).await else {
            continue;
        };
        for club in &clubs {
            for (club_code, venue) in mapper::reference::club_venues(club) {
                let Some(team_code) = club_code else {
                    report.skip(&venue.venue_code, "venue without club");
                    continue;
                };
                let row = mapper::reference::team_venue(&team_code, &venue.venue_code, &season_code, &backups);
                let item = format!("{team_code}/{}", venue.venue_code);
                upsert_counted(ctx, &mut report, &row, &item).await;
            }
        }
    }
    Ok(report)
}
