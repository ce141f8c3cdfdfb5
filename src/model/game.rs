use super::Venue;
use crate::storage::{Bind, Record, RowValues, TableSpec, key, keep, replace};
use chrono::NaiveDateTime;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Game {
    pub gamecode: String,
    pub season_code: String,
    pub competition_code: Option<String>,
    pub game_number: Option<i64>,
    pub round_number: Option<i64>,
    pub phase_type: Option<String>,
    pub group_name: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub utc_date: Option<NaiveDateTime>,
    pub local_timezone: Option<i64>,
    pub home_team_code: Option<String>,
    pub away_team_code: Option<String>,
    pub is_neutral_venue: Option<bool>,
    pub played: Option<bool>,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
    pub venue_code: Option<String>,
    pub attendance: Option<i64>,
    pub confirmed_date: Option<bool>,
    pub confirmed_hour: Option<bool>,
    pub game_status: Option<String>,
    pub winner_team_code: Option<String>,
}

impl Record for Game {
    // live fields are replaced, schedule metadata is written once
    const SPEC: &'static TableSpec = &TableSpec {
        table: "games",
        columns: &[
            key("gamecode"),
            keep("season_code"),
            keep("competition_code"),
            keep("game_number"),
            keep("round_number"),
            keep("phase_type"),
            keep("group_name"),
            keep("date"),
            keep("utc_date"),
            keep("local_timezone"),
            keep("home_team_code"),
            keep("away_team_code"),
            keep("is_neutral_venue"),
            replace("played"),
            replace("home_score"),
            replace("away_score"),
            replace("venue_code"),
            replace("attendance"),
            replace("confirmed_date"),
            replace("confirmed_hour"),
            replace("game_status"),
            replace("winner_team_code"),
        ],
    };

    fn values(&self) -> Vec<RowValues> {
        vec![
            self.gamecode.bind(),
            self.season_code.bind(),
            self.competition_code.bind(),
            self.game_number.bind(),
            self.round_number.bind(),
            self.phase_type.bind(),
            self.group_name.bind(),
            self.date.bind(),
            self.utc_date.bind(),
            self.local_timezone.bind(),
            self.home_team_code.bind(),
            self.away_team_code.bind(),
            self.is_neutral_venue.bind(),
            self.played.bind(),
            self.home_score.bind(),
            self.away_score.bind(),
            self.venue_code.bind(),
            self.attendance.bind(),
            self.confirmed_date.bind(),
            self.confirmed_hour.bind(),
            self.game_status.bind(),
            self.winner_team_code.bind(),
        ]
    }
}

/// Both scores present means the game has been played.
#[must_use]
pub fn scores_recorded(home_score: Option<i64>, away_score: Option<i64>) -> bool {
    home_score.is_some() && away_score.is_some()
}

/// Entry of the XML season schedule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduledGame {
    pub gamecode: String,
    pub game_number: Option<i64>,
    pub season_code: String,
    pub round_number: Option<i64>,
    pub round_code: Option<String>,
    pub round_name: Option<String>,
    pub home_team_code: Option<String>,
    pub away_team_code: Option<String>,
    pub date: Option<String>,
    pub hour: Option<String>,
    pub end_hour: Option<String>,
    pub venue_code: Option<String>,
    pub venue_name: Option<String>,
    pub venue_capacity: Option<i64>,
    pub confirmed_date: bool,
    pub confirmed_hour: bool,
    pub played: bool,
}

impl ScheduledGame {
    /// Minimal venue row so the schedule never points at an unknown arena.
    #[must_use]
    pub fn venue_stub(&self) -> Option<Venue> {
        self.venue_code.as_ref().map(|code| Venue {
            venue_code: code.clone(),
            name: self.venue_name.clone(),
            capacity: self.venue_capacity,
            ..Venue::default()
        })
    }
}

impl Record for ScheduledGame {
    const SPEC: &'static TableSpec = &TableSpec {
        table: "scheduled_games",
        columns: &[
            key("gamecode"),
            replace("game_number"),
            replace("season_code"),
            replace("round_number"),
            replace("round_code"),
            replace("round_name"),
            replace("home_team_code"),
            replace("away_team_code"),
            replace("date"),
            replace("hour"),
            replace("end_hour"),
            replace("venue_code"),
            replace("venue_name"),
            replace("venue_capacity"),
            replace("confirmed_date"),
            replace("confirmed_hour"),
            replace("played"),
        ],
    };

    fn values(&self) -> Vec<RowValues> {
        vec![
            self.gamecode.bind(),
            self.game_number.bind(),
            self.season_code.bind(),
            self.round_number.bind(),
            self.round_code.bind(),
            self.round_name.bind(),
            self.home_team_code.bind(),
            self.away_team_code.bind(),
            self.date.bind(),
            self.hour.bind(),
            self.end_hour.bind(),
            self.venue_code.bind(),
            self.venue_name.bind(),
            self.venue_capacity.bind(),
            self.confirmed_date.bind(),
            self.confirmed_hour.bind(),
            self.played.bind(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub season_code: String,
    pub round_number: i64,
    pub team_code: String,
    pub position: Option<i64>,
    pub position_change: Option<String>,
    pub games_played: Option<i64>,
    pub games_won: Option<i64>,
    pub games_lost: Option<i64>,
    pub qualified: Option<bool>,
    pub group_name: Option<String>,
    /// Raw streak object as JSON text.
    pub streaks: Option<String>,
}

impl Record for Standing {
    const SPEC: &'static TableSpec = &TableSpec {
        table: "standings",
        columns: &[
            key("season_code"),
            key("round_number"),
            key("team_code"),
            replace("position"),
            replace("position_change"),
            replace("games_played"),
            replace("games_won"),
            replace("games_lost"),
            replace("qualified"),
            replace("group_name"),
            replace("streaks"),
        ],
    };

    fn values(&self) -> Vec<RowValues> {
        vec![
            self.season_code.bind(),
            self.round_number.bind(),
            self.team_code.bind(),
            self.position.bind(),
            self.position_change.bind(),
            self.games_played.bind(),
            self.games_won.bind(),
            self.games_lost.bind(),
            self.qualified.bind(),
            self.group_name.bind(),
            self.streaks.bind(),
        ]
    }
}
