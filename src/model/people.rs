use crate::storage::{Bind, Record, RowValues, TableSpec, key, keep};
use chrono::NaiveDate;

/// Players, coaches and referees share one table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    pub person_code: String,
    pub name: Option<String>,
    pub alias: Option<String>,
    pub passport_name: Option<String>,
    pub passport_surname: Option<String>,
    pub jersey_name: Option<String>,
    pub abbreviated_name: Option<String>,
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    pub height: Option<i64>,
    pub weight: Option<i64>,
    pub birth_date: Option<NaiveDate>,
    pub birth_country_code: Option<String>,
    pub birth_country_name: Option<String>,
    pub twitter_account: Option<String>,
    pub instagram_account: Option<String>,
    pub facebook_account: Option<String>,
    pub is_referee: bool,
    pub image_url: Option<String>,
}

impl Record for Person {
    const SPEC: &'static TableSpec = &TableSpec {
        table: "people",
        columns: &[
            key("person_code"),
            keep("name"),
            keep("alias"),
            keep("passport_name"),
            keep("passport_surname"),
            keep("jersey_name"),
            keep("abbreviated_name"),
            keep("country_code"),
            keep("country_name"),
            keep("height"),
            keep("weight"),
            keep("birth_date"),
            keep("birth_country_code"),
            keep("birth_country_name"),
            keep("twitter_account"),
            keep("instagram_account"),
            keep("facebook_account"),
            keep("is_referee"),
            keep("image_url"),
        ],
    };

    fn values(&self) -> Vec<RowValues> {
        vec![
            self.person_code.bind(),
            self.name.bind(),
            self.alias.bind(),
            self.passport_name.bind(),
            self.passport_surname.bind(),
            self.jersey_name.bind(),
            self.abbreviated_name.bind(),
            self.country_code.bind(),
            self.country_name.bind(),
            self.height.bind(),
            self.weight.bind(),
            self.birth_date.bind(),
            self.birth_country_code.bind(),
            self.birth_country_name.bind(),
            self.twitter_account.bind(),
            self.instagram_account.bind(),
            self.facebook_account.bind(),
            self.is_referee.bind(),
            self.image_url.bind(),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefereeRole {
    Main,
    Assistant,
}

impl RefereeRole {
    /// Slot 1 is the crew chief; slots 2 and up assist.
    #[must_use]
    pub fn for_slot(slot: usize) -> Self {
        if slot == 1 { Self::Main } else { Self::Assistant }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameReferee {
    pub gamecode: String,
    pub person_code: String,
    pub role: RefereeRole,
}

impl Record for GameReferee {
    const SPEC: &'static TableSpec = &TableSpec {
        table: "game_referees",
        columns: &[key("gamecode"), key("person_code"), keep("role")],
    };

    fn values(&self) -> Vec<RowValues> {
        vec![
            self.gamecode.bind(),
            self.person_code.bind(),
            self.role.as_str().bind(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoachTeam {
    pub person_code: String,
    pub team_code: String,
    pub season_code: String,
    pub role: Option<String>,
}

impl Record for CoachTeam {
    const SPEC: &'static TableSpec = &TableSpec {
        table: "coach_teams",
        columns: &[
            key("person_code"),
            key("team_code"),
            key("season_code"),
            keep("role"),
        ],
    };

    fn values(&self) -> Vec<RowValues> {
        vec![
            self.person_code.bind(),
            self.team_code.bind(),
            self.season_code.bind(),
            self.role.bind(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerTeam {
    pub person_code: String,
    pub team_code: String,
    pub season_code: String,
    pub jersey_number: Option<i64>,
    pub position: Option<i64>,
    pub position_name: Option<String>,
}

impl Record for PlayerTeam {
    const SPEC: &'static TableSpec = &TableSpec {
        table: "player_teams",
        columns: &[
            key("person_code"),
            key("team_code"),
            key("season_code"),
            keep("jersey_number"),
            keep("position"),
            keep("position_name"),
        ],
    };

    fn values(&self) -> Vec<RowValues> {
        vec![
            self.person_code.bind(),
            self.team_code.bind(),
            self.season_code.bind(),
            self.jersey_number.bind(),
            self.position.bind(),
            self.position_name.bind(),
        ]
    }
}
