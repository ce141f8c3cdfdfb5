use crate::storage::{Bind, Record, RowValues, TableSpec, key, keep};

/// One row of the live play-by-play feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayByPlayEvent {
    pub gamecode: String,
    pub play_number: i64,
    pub season_code: String,
    pub team_code: Option<String>,
    pub person_code: Option<String>,
    pub period: i64,
    pub event_type: String,
    pub time_string: Option<String>,
    pub description: Option<String>,
    pub points_a: Option<i64>,
    pub points_b: Option<i64>,
}

impl Record for PlayByPlayEvent {
    const SPEC: &'static TableSpec = &TableSpec {
        table: "play_by_play",
        columns: &[
            key("gamecode"),
            key("play_number"),
            keep("season_code"),
            keep("team_code"),
            keep("person_code"),
            keep("period"),
            keep("event_type"),
            keep("time_string"),
            keep("description"),
            keep("points_a"),
            keep("points_b"),
        ],
    };

    fn values(&self) -> Vec<RowValues> {
        vec![
            self.gamecode.bind(),
            self.play_number.bind(),
            self.season_code.bind(),
            self.team_code.bind(),
            self.person_code.bind(),
            self.period.bind(),
            self.event_type.bind(),
            self.time_string.bind(),
            self.description.bind(),
            self.points_a.bind(),
            self.points_b.bind(),
        ]
    }
}

/// One shot from the live points feed, with court coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShotEvent {
    pub gamecode: String,
    pub play_number: i64,
    pub season_code: String,
    pub team_code: Option<String>,
    pub person_code: Option<String>,
    pub period: Option<i64>,
    pub time_string: Option<String>,
    pub action_code: Option<String>,
    pub action: Option<String>,
    pub points: Option<i64>,
    pub coord_x: Option<i64>,
    pub coord_y: Option<i64>,
    pub zone: Option<String>,
    pub fastbreak: bool,
    pub second_chance: bool,
    pub points_off_turnover: bool,
    pub points_a: Option<i64>,
    pub points_b: Option<i64>,
    pub utc: Option<String>,
}

impl Record for ShotEvent {
    const SPEC: &'static TableSpec = &TableSpec {
        table: "shot_data",
        columns: &[
            key("gamecode"),
            key("play_number"),
            keep("season_code"),
            keep("team_code"),
            keep("person_code"),
            keep("period"),
            keep("time_string"),
            keep("action_code"),
            keep("action"),
            keep("points"),
            keep("coord_x"),
            keep("coord_y"),
            keep("zone"),
            keep("fastbreak"),
            keep("second_chance"),
            keep("points_off_turnover"),
            keep("points_a"),
            keep("points_b"),
            keep("utc"),
        ],
    };

    fn values(&self) -> Vec<RowValues> {
        vec![
            self.gamecode.bind(),
            self.play_number.bind(),
            self.season_code.bind(),
            self.team_code.bind(),
            self.person_code.bind(),
            self.period.bind(),
            self.time_string.bind(),
            self.action_code.bind(),
            self.action.bind(),
            self.points.bind(),
            self.coord_x.bind(),
            self.coord_y.bind(),
            self.zone.bind(),
            self.fastbreak.bind(),
            self.second_chance.bind(),
            self.points_off_turnover.bind(),
            self.points_a.bind(),
            self.points_b.bind(),
            self.utc.bind(),
        ]
    }
}
