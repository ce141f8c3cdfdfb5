use crate::storage::{Bind, Record, RowValues, TableSpec, key, keep, replace};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct Competition {
    pub competition_code: String,
    pub name: Option<String>,
}

impl Record for Competition {
    const SPEC: &'static TableSpec = &TableSpec {
        table: "competitions",
        columns: &[key("competition_code"), keep("name")],
    };

    fn values(&self) -> Vec<RowValues> {
        vec![self.competition_code.bind(), self.name.bind()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Season {
    pub season_code: String,
    pub competition_code: Option<String>,
    pub start_year: Option<i64>,
    pub name: Option<String>,
    pub alias: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub winner_team_code: Option<String>,
}

impl Record for Season {
    const SPEC: &'static TableSpec = &TableSpec {
        table: "seasons",
        columns: &[
            key("season_code"),
            keep("competition_code"),
            keep("start_year"),
            keep("name"),
            keep("alias"),
            keep("start_date"),
            keep("end_date"),
            keep("winner_team_code"),
        ],
    };

    fn values(&self) -> Vec<RowValues> {
        vec![
            self.season_code.bind(),
            self.competition_code.bind(),
            self.start_year.bind(),
            self.name.bind(),
            self.alias.bind(),
            self.start_date.bind(),
            self.end_date.bind(),
            self.winner_team_code.bind(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Team {
    pub team_code: String,
    pub name: Option<String>,
    pub alias: Option<String>,
    pub is_virtual: Option<bool>,
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub tickets_url: Option<String>,
    pub facebook_account: Option<String>,
    pub twitter_account: Option<String>,
    pub instagram_account: Option<String>,
    pub crest_url: Option<String>,
    pub president: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub national_competition_code: Option<String>,
}

impl Record for Team {
    const SPEC: &'static TableSpec = &TableSpec {
        table: "teams",
        columns: &[
            key("team_code"),
            keep("name"),
            keep("alias"),
            keep("is_virtual"),
            keep("country_code"),
            keep("country_name"),
            keep("city"),
            keep("address"),
            keep("website"),
            keep("tickets_url"),
            keep("facebook_account"),
            keep("twitter_account"),
            keep("instagram_account"),
            keep("crest_url"),
            keep("president"),
            keep("phone"),
            keep("fax"),
            keep("national_competition_code"),
        ],
    };

    fn values(&self) -> Vec<RowValues> {
        vec![
            self.team_code.bind(),
            self.name.bind(),
            self.alias.bind(),
            self.is_virtual.bind(),
            self.country_code.bind(),
            self.country_name.bind(),
            self.city.bind(),
            self.address.bind(),
            self.website.bind(),
            self.tickets_url.bind(),
            self.facebook_account.bind(),
            self.twitter_account.bind(),
            self.instagram_account.bind(),
            self.crest_url.bind(),
            self.president.bind(),
            self.phone.bind(),
            self.fax.bind(),
            self.national_competition_code.bind(),
        ]
    }
}

/// Free-text club description from the club info endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamInfo {
    pub team_code: String,
    pub description: String,
}

impl Record for TeamInfo {
    const SPEC: &'static TableSpec = &TableSpec {
        table: "team_info",
        columns: &[key("team_code"), replace("description")],
    };

    fn values(&self) -> Vec<RowValues> {
        vec![self.team_code.bind(), self.description.bind()]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Venue {
    pub venue_code: String,
    pub name: Option<String>,
    pub capacity: Option<i64>,
    pub address: Option<String>,
    pub active: Option<bool>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
}

impl Record for Venue {
    const SPEC: &'static TableSpec = &TableSpec {
        table: "venues",
        columns: &[
            key("venue_code"),
            keep("name"),
            keep("capacity"),
            keep("address"),
            keep("active"),
            keep("notes"),
            keep("image_url"),
        ],
    };

    fn values(&self) -> Vec<RowValues> {
        vec![
            self.venue_code.bind(),
            self.name.bind(),
            self.capacity.bind(),
            self.address.bind(),
            self.active.bind(),
            self.notes.bind(),
            self.image_url.bind(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamVenue {
    pub team_code: String,
    pub venue_code: String,
    pub season_code: String,
    pub is_primary: bool,
}

impl Record for TeamVenue {
    const SPEC: &'static TableSpec = &TableSpec {
        table: "team_venues",
        columns: &[
            key("team_code"),
            key("venue_code"),
            key("season_code"),
            keep("is_primary"),
        ],
    };

    fn values(&self) -> Vec<RowValues> {
        vec![
            self.team_code.bind(),
            self.venue_code.bind(),
            self.season_code.bind(),
            self.is_primary.bind(),
        ]
    }
}
