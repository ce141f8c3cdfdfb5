//! One module per family of units. Each unit walks its iteration dimension
//! (season, team, game, person, round), fetches, maps and upserts, and
//! reports what it did. Per-item failures are logged and counted, never
//! propagated; only a failed store read aborts a unit.

pub mod events;
pub mod games;
pub mod people;
pub mod player_stats;
pub mod reference;
pub mod store;
pub mod team_stats;

use crate::client::{ApiRequest, StatsApi};
use crate::config::IngestConfig;
use crate::error::IngestError;
use crate::mapper::records;
use crate::storage::{QueryAndParams, Record, Storage, upsert};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

pub struct Context<'a> {
    pub api: &'a dyn StatsApi,
    pub storage: &'a dyn Storage,
    pub config: &'a IngestConfig,
}

impl<'a> Context<'a> {
    #[must_use]
    pub fn new(api: &'a dyn StatsApi, storage: &'a dyn Storage, config: &'a IngestConfig) -> Self {
        Self {
            api,
            storage,
            config,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitName {
    Competitions,
    Seasons,
    Teams,
    TeamInfo,
    Venues,
    TeamVenues,
    People,
    Games,
    ScheduledGames,
    GameReferees,
    CoachTeams,
    PlayerTeams,
    PlayerGameStats,
    TeamGameStats,
    PlayerSeasonStats,
    TeamSeasonStats,
    Standings,
    PlayByPlay,
    ShotData,
}

impl UnitName {
    /// Every unit in dependency order.
    pub const ALL: [UnitName; 19] = [
        Self::Competitions,
        Self::Seasons,
        Self::Teams,
        Self::TeamInfo,
        Self::Venues,
        Self::TeamVenues,
        Self::People,
        Self::Games,
        Self::ScheduledGames,
        Self::GameReferees,
        Self::CoachTeams,
        Self::PlayerTeams,
        Self::PlayerGameStats,
        Self::TeamGameStats,
        Self::PlayerSeasonStats,
        Self::TeamSeasonStats,
        Self::Standings,
        Self::PlayByPlay,
        Self::ShotData,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Competitions => "competitions",
            Self::Seasons => "seasons",
            Self::Teams => "teams",
            Self::TeamInfo => "team-info",
            Self::Venues => "venues",
            Self::TeamVenues => "team-venues",
            Self::People => "people",
            Self::Games => "games",
            Self::ScheduledGames => "scheduled-games",
            Self::GameReferees => "game-referees",
            Self::CoachTeams => "coach-teams",
            Self::PlayerTeams => "player-teams",
            Self::PlayerGameStats => "player-game-stats",
            Self::TeamGameStats => "team-game-stats",
            Self::PlayerSeasonStats => "player-season-stats",
            Self::TeamSeasonStats => "team-season-stats",
            Self::Standings => "standings",
            Self::PlayByPlay => "play-by-play",
            Self::ShotData => "shot-data",
        }
    }
}

impl fmt::Display for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts for one unit run. `upserted` counts rows handed to the store
/// without error, whether or not they changed anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitReport {
    pub unit: UnitName,
    pub upserted: u64,
    pub skipped: u64,
    pub failed: u64,
}

impl UnitReport {
    #[must_use]
    pub fn new(unit: UnitName) -> Self {
        Self {
            unit,
            upserted: 0,
            skipped: 0,
            failed: 0,
        }
    }

    pub fn fail(&mut self, item: &str, err: &IngestError) {
        warn!(unit = %self.unit, item, "{err}");
        self.failed += 1;
    }

    pub fn skip(&mut self, item: &str, reason: &str) {
        debug!(unit = %self.unit, item, "skipped: {reason}");
        self.skipped += 1;
    }
}

impl fmt::Display for UnitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: upserted={} skipped={} failed={}",
            self.unit, self.upserted, self.skipped, self.failed
        )
    }
}

/// Writes one row in its own transaction, counting the outcome.
pub(crate) async fn upsert_counted<R: Record + Sync>(
    ctx: &Context<'_>,
    report: &mut UnitReport,
    row: &R,
    item: &str,
) -> bool {
    match upsert(ctx.storage, row).await {
        Ok(_) => {
            report.upserted += 1;
            true
        }
        Err(e) => {
            report.fail(item, &e);
            false
        }
    }
}

/// Writes a group of statements in one transaction. `rows` is what the
/// group counts for on success; a failure counts once and keeps nothing.
pub(crate) async fn upsert_group(
    ctx: &Context<'_>,
    report: &mut UnitReport,
    statements: &[QueryAndParams],
    rows: u64,
    item: &str,
) {
    if statements.is_empty() {
        report.skip(item, "nothing to write");
        return;
    }
    match ctx.storage.execute_unit(statements).await {
        Ok(_) => report.upserted += rows,
        Err(e) => report.fail(item, &e),
    }
}

/// Fetches one list response. A failed fetch or an unexpected shape counts
/// once against the unit and yields `None`.
pub(crate) async fn fetch_records(
    ctx: &Context<'_>,
    report: &mut UnitReport,
    request: &ApiRequest,
) -> Option<Vec<Value>> {
    let payload = match ctx.api.get_json(request).await {
        Ok(payload) => payload,
        Err(e) => {
            report.fail(&request.to_string(), &e);
            return None;
        }
    };
    match records(&payload, &request.path) {
        Ok(items) => Some(items.to_vec()),
        Err(e) => {
            report.fail(&request.to_string(), &e);
            None
        }
    }
}

/// Runs one unit by name.
///
/// # Errors
///
/// Will return `Err` if the store cannot be read for the unit's iteration
/// dimension
pub async fn run_unit(ctx: &Context<'_>, unit: UnitName) -> Result<UnitReport, IngestError> {
    let report = match unit {
        UnitName::Competitions => reference::competitions(ctx).await?,
        UnitName::Seasons => reference::seasons(ctx).await?,
        UnitName::Teams => reference::teams(ctx).await?,
        UnitName::TeamInfo => reference::team_info(ctx).await?,
        UnitName::Venues => reference::venues(ctx).await?,
        UnitName::TeamVenues => reference::team_venues(ctx).await?,
        UnitName::People => people::people(ctx).await?,
        UnitName::Games => games::games(ctx).await?,
        UnitName::ScheduledGames => games::scheduled_games(ctx).await?,
        UnitName::GameReferees => people::game_referees(ctx).await?,
        UnitName::CoachTeams => people::coach_teams(ctx).await?,
        UnitName::PlayerTeams => player_stats::player_teams(ctx).await?,
        UnitName::PlayerGameStats => player_stats::player_game_stats(ctx).await?,
        UnitName::TeamGameStats => team_stats::team_game_stats(ctx).await?,
        UnitName::PlayerSeasonStats => player_stats::player_season_stats(ctx).await?,
        UnitName::TeamSeasonStats => team_stats::team_season_stats(ctx).await?,
        UnitName::Standings => games::standings(ctx).await?,
        UnitName::PlayByPlay => events::play_by_play(ctx).await?,
        UnitName::ShotData => events::shot_data(ctx).await?,
    };
    tracing::info!(
        unit = %unit,
        upserted = report.upserted,
        skipped = report.skipped,
        failed = report.failed,
        "unit finished"
    );
    Ok(report)
}
