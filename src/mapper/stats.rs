use super::{flag, json_text, path, path_int, path_str, safe_int};
use crate::error::IngestError;
use crate::model::{PlayerGameLine, PlayerGameStat, PlayerTeam, StatLine, TeamSeasonStat};
use serde_json::Value;

const SIDES: [&str; 2] = ["local", "road"];

/// Reads the API's stat block; every counter is optional.
#[must_use]
pub fn stat_line(stats: &Value) -> StatLine<Option<i64>> {
    let get = |key: &str| stats.get(key).and_then(safe_int);
    StatLine {
        points: get("points"),
        time_played: get("timePlayed"),
        valuation: get("valuation"),
        field_goals_2_made: get("fieldGoalsMade2"),
        field_goals_2_attempted: get("fieldGoalsAttempted2"),
        field_goals_3_made: get("fieldGoalsMade3"),
        field_goals_3_attempted: get("fieldGoalsAttempted3"),
        free_throws_made: get("freeThrowsMade"),
        free_throws_attempted: get("freeThrowsAttempted"),
        total_rebounds: get("totalRebounds"),
        offensive_rebounds: get("offensiveRebounds"),
        defensive_rebounds: get("defensiveRebounds"),
        assists: get("assistances"),
        steals: get("steals"),
        turnovers: get("turnovers"),
        blocks_favour: get("blocksFavour"),
        blocks_against: get("blocksAgainst"),
        fouls_committed: get("foulsCommited"),
        fouls_received: get("foulsReceived"),
        plus_minus: get("plusMinus"),
    }
}

/// One player line of a game box score plus the roster membership it proves.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxScoreEntry {
    pub stat: PlayerGameStat,
    pub membership: Option<PlayerTeam>,
}

fn players(side: &Value) -> &[Value] {
    side.get("players")
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

/// Player lines of both sides of a game stats payload. A side's team is
/// taken from its first player; lines without a person code are dropped.
#[must_use]
pub fn box_score(raw: &Value, gamecode: &str, season_code: &str) -> Vec<BoxScoreEntry> {
    let mut entries = Vec::new();
    for side in SIDES {
        let Some(team) = raw.get(side) else { continue };
        let players = players(team);
        let side_team = players
            .first()
            .and_then(|p| path_str(p, &["player", "club", "code"]));

        for entry in players {
            let Some(person_code) = path_str(entry, &["player", "person", "code"]) else {
                continue;
            };
            let stats = entry.get("stats").unwrap_or(&Value::Null);
            let player_dorsal = path_int(entry, &["player", "dorsal"]);
            let position = path_int(entry, &["player", "position"]);
            let position_name = path_str(entry, &["player", "positionName"]);

            let membership = path_str(entry, &["player", "club", "code"]).map(|team_code| PlayerTeam {
                person_code: person_code.clone(),
                team_code,
                season_code: season_code.to_string(),
                jersey_number: player_dorsal,
                position,
                position_name: position_name.clone(),
            });

            entries.push(BoxScoreEntry {
                stat: PlayerGameStat {
                    gamecode: gamecode.to_string(),
                    person_code,
                    team_code: side_team.clone(),
                    dorsal: path_int(stats, &["dorsal"]).or(player_dorsal),
                    position,
                    position_name,
                    starting_five: path(stats, &["startFive"]).map(flag),
                    stats: stat_line(stats),
                },
                membership,
            });
        }
    }
    entries
}

/// Quarter partials of one side of a game.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamPartials {
    pub team_code: String,
    pub quarters: [Option<i64>; 4],
    pub extra_periods: String,
}

#[must_use]
pub fn partials(raw: &Value) -> Vec<TeamPartials> {
    SIDES
        .iter()
        .filter_map(|side| {
            let team = raw.get(*side)?;
            let team_code = path_str(team, &["club", "code"])?;
            let quarters = [1, 2, 3, 4].map(|q| {
                let key = format!("partials{q}");
                path_int(team, &["partials", key.as_str()])
            });
            let extra_periods = json_text(path(team, &["partials", "extraPeriods"]))
                .unwrap_or_else(|| "{}".to_string());
            Some(TeamPartials {
                team_code,
                quarters,
                extra_periods,
            })
        })
        .collect()
}

/// Game lines of a player's season feed. Games without a phase code cannot
/// be bucketed and are skipped.
#[must_use]
pub fn player_game_lines(raw: &Value) -> Vec<PlayerGameLine> {
    let Some(games) = raw.get("games").and_then(Value::as_array) else {
        return Vec::new();
    };
    games
        .iter()
        .filter_map(|game| {
            let stats = game.get("stats").unwrap_or(&Value::Null);
            Some(PlayerGameLine {
                phase_type: path_str(game, &["game", "phaseType", "code"])?,
                team_code: path_str(game, &["playerClubCode"]),
                started: path(stats, &["startFive"]).is_some_and(flag),
                stats: stat_line(stats),
            })
        })
        .collect()
}

/// Accumulated totals from the first element of the club stats feed.
///
/// # Errors
///
/// Will return `Err` if the payload is not a non-empty list
pub fn team_season_stat(
    raw: &Value,
    season_code: &str,
    team_code: &str,
) -> Result<TeamSeasonStat, IngestError> {
    let first = raw
        .as_array()
        .and_then(|items| items.first())
        .ok_or_else(|| IngestError::Mapping(format!("no club stats for {team_code} in {season_code}")))?;
    let accumulated = first.get("accumulated").unwrap_or(&Value::Null);
    Ok(TeamSeasonStat {
        season_code: season_code.to_string(),
        team_code: team_code.to_string(),
        games_played: path_int(accumulated, &["gamesPlayed"]),
        stats: stat_line(accumulated),
        field_goals_total_made: path_int(accumulated, &["fieldGoalsMadeTotal"]),
        field_goals_total_attempted: path_int(accumulated, &["fieldGoalsAttemptedTotal"]),
    })
}
