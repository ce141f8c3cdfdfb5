use super::{path_bool, path_date, path_int, path_str, required_str};
use crate::error::IngestError;
use crate::model::{Competition, Season, Team, TeamInfo, TeamVenue, Venue};
use serde_json::Value;
use std::collections::HashMap;

/// # Errors
///
/// Will return `Err` if the record has no code
pub fn competition(raw: &Value) -> Result<Competition, IngestError> {
    Ok(Competition {
        competition_code: required_str(raw, &["code"], "competition")?,
        name: path_str(raw, &["name"]),
    })
}

/// # Errors
///
/// Will return `Err` if the record has no code
pub fn season(raw: &Value) -> Result<Season, IngestError> {
    Ok(Season {
        season_code: required_str(raw, &["code"], "season")?,
        competition_code: path_str(raw, &["competitionCode"]),
        start_year: path_int(raw, &["year"]),
        name: path_str(raw, &["name"]),
        alias: path_str(raw, &["alias"]),
        start_date: path_date(raw, &["startDate"]),
        end_date: path_date(raw, &["endDate"]),
        winner_team_code: path_str(raw, &["winner", "code"]),
    })
}

/// # Errors
///
/// Will return `Err` if the club has no code
pub fn team(raw: &Value) -> Result<Team, IngestError> {
    Ok(Team {
        team_code: required_str(raw, &["code"], "club")?,
        name: path_str(raw, &["name"]),
        alias: path_str(raw, &["alias"]),
        is_virtual: path_bool(raw, &["isVirtual"]),
        country_code: path_str(raw, &["country", "code"]),
        country_name: path_str(raw, &["country", "name"]),
        city: path_str(raw, &["city"]),
        address: path_str(raw, &["address"]),
        website: path_str(raw, &["website"]),
        tickets_url: path_str(raw, &["ticketsURL"]),
        facebook_account: path_str(raw, &["facebookAccount"]),
        twitter_account: path_str(raw, &["twitterAccount"]),
        instagram_account: path_str(raw, &["instagramAccount"]),
        crest_url: path_str(raw, &["images", "crest"]),
        president: path_str(raw, &["president"]),
        phone: path_str(raw, &["phone"]),
        fax: path_str(raw, &["fax"]),
        national_competition_code: path_str(raw, &["nationalCompetitionCode"]),
    })
}

/// `None` when the club has no description text.
#[must_use]
pub fn team_info(team_code: &str, raw: &Value) -> Option<TeamInfo> {
    path_str(raw, &["info"]).map(|description| TeamInfo {
        team_code: team_code.to_string(),
        description,
    })
}

/// Venues listed under one club record of the season venues feed, each
/// paired with the club code. Venues without a code are dropped.
#[must_use]
pub fn club_venues(raw: &Value) -> Vec<(Option<String>, Venue)> {
    let club_code = path_str(raw, &["clubCode"]);
    raw.get("venues")
        .and_then(Value::as_array)
        .map(|venues| {
            venues
                .iter()
                .filter_map(|v| {
                    Some((
                        club_code.clone(),
                        Venue {
                            venue_code: path_str(v, &["code"])?,
                            name: path_str(v, &["name"]),
                            capacity: path_int(v, &["capacity"]),
                            address: path_str(v, &["address"]),
                            active: path_bool(v, &["active"]),
                            notes: path_str(v, &["notes"]),
                            image_url: path_str(v, &["images", "medium"]),
                        },
                    ))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Club code -> backup venue code, from the clubs listing.
#[must_use]
pub fn backup_venues(clubs: &[Value]) -> HashMap<String, String> {
    clubs
        .iter()
        .filter_map(|club| {
            Some((
                path_str(club, &["code"])?,
                path_str(club, &["venueBackup", "code"])?,
            ))
        })
        .collect()
}

/// A venue is primary unless it is the club's registered backup venue.
#[must_use]
pub fn team_venue(
    team_code: &str,
    venue_code: &str,
    season_code: &str,
    backups: &HashMap<String, String>,
) -> TeamVenue {
    TeamVenue {
        team_code: team_code.to_string(),
        venue_code: venue_code.to_string(),
        season_code: season_code.to_string(),
        is_primary: backups.get(team_code).is_none_or(|b| b != venue_code),
    }
}
