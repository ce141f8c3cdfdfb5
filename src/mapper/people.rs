use super::{is_staff_role, path_bool, path_date, path_int, path_str, required_str};
use crate::error::IngestError;
use crate::model::{CoachTeam, GameReferee, Person, RefereeRole};
use serde_json::Value;

/// # Errors
///
/// Will return `Err` if the record has no code
pub fn person(raw: &Value) -> Result<Person, IngestError> {
    Ok(Person {
        person_code: required_str(raw, &["code"], "person")?,
        name: path_str(raw, &["name"]),
        alias: path_str(raw, &["alias"]),
        passport_name: path_str(raw, &["passportName"]),
        passport_surname: path_str(raw, &["passportSurname"]),
        jersey_name: path_str(raw, &["jerseyName"]),
        abbreviated_name: path_str(raw, &["abbreviatedName"]),
        country_code: path_str(raw, &["country", "code"]),
        country_name: path_str(raw, &["country", "name"]),
        height: path_int(raw, &["height"]),
        weight: path_int(raw, &["weight"]),
        birth_date: path_date(raw, &["birthDate"]),
        birth_country_code: path_str(raw, &["birthCountry", "code"]),
        birth_country_name: path_str(raw, &["birthCountry", "name"]),
        twitter_account: path_str(raw, &["twitterAccount"]),
        instagram_account: path_str(raw, &["instagramAccount"]),
        facebook_account: path_str(raw, &["facebookAccount"]),
        is_referee: path_bool(raw, &["isReferee"]).unwrap_or(false),
        image_url: path_str(raw, &["images", "medium"]),
    })
}

/// Partial person built from the referee block of a game.
#[must_use]
pub fn referee_person(person_code: &str, raw: &Value) -> Person {
    Person {
        person_code: person_code.to_string(),
        name: path_str(raw, &["name"]),
        alias: path_str(raw, &["alias"]),
        country_code: path_str(raw, &["country", "code"]),
        country_name: path_str(raw, &["country", "name"]),
        is_referee: true,
        image_url: path_str(raw, &["images", "verticalSmall"]),
        ..Person::default()
    }
}

/// Officials of one game, slots `referee1` to `referee4`. Empty slots and
/// referees without a code are skipped.
///
/// # Errors
///
/// Will return `Err` if the game has no identifier
pub fn game_referees(game: &Value) -> Result<Vec<(Person, GameReferee)>, IngestError> {
    let gamecode = required_str(game, &["identifier"], "game")?;
    let mut crew = Vec::new();
    for slot in 1..=4 {
        let Some(raw) = game.get(format!("referee{slot}")).filter(|r| r.is_object()) else {
            continue;
        };
        let Some(person_code) = path_str(raw, &["code"]) else {
            continue;
        };
        crew.push((
            referee_person(&person_code, raw),
            GameReferee {
                gamecode: gamecode.clone(),
                person_code,
                role: RefereeRole::for_slot(slot),
            },
        ));
    }
    Ok(crew)
}

/// Staff entry of a club roster. `Ok(None)` for players and for entries
/// without a role.
///
/// # Errors
///
/// Will return `Err` if a staff entry has no person code
pub fn coach_team(
    raw: &Value,
    team_code: &str,
    season_code: &str,
) -> Result<Option<CoachTeam>, IngestError> {
    let role = path_str(raw, &["typeName"]);
    if !is_staff_role(role.as_deref()) {
        return Ok(None);
    }
    Ok(Some(CoachTeam {
        person_code: required_str(raw, &["person", "code"], "club roster")?,
        team_code: team_code.to_string(),
        season_code: season_code.to_string(),
        role,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn roster_filters_players() {
        let player = json!({"person": {"code": "P1"}, "typeName": "Player"});
        let coach = json!({"person": {"code": "C1"}, "typeName": "Head Coach"});
        assert_eq!(coach_team(&player, "MAD", "E2023"), Ok(None));
        let untyped = json!({"person": {"code": "C9"}});
        assert_eq!(coach_team(&untyped, "MAD", "E2023"), Ok(None));
        let row = coach_team(&coach, "MAD", "E2023").ok().flatten();
        assert_eq!(row.map(|r| r.person_code), Some("C1".to_string()));
    }

    #[test]
    fn person_fields() {
        let raw = json!({
            "code": "003469",
            "name": "DOE, JOHN",
            "country": {"code": "ESP", "name": "Spain"},
            "height": 201,
            "birthDate": "1995-04-01T00:00:00",
            "images": {"medium": "img.png"}
        });
        let p = person(&raw).unwrap();
        assert_eq!(p.country_name.as_deref(), Some("Spain"));
        assert_eq!(p.height, Some(201));
        assert_eq!(p.birth_date.map(|d| d.to_string()).as_deref(), Some("1995-04-01"));
        assert!(!p.is_referee);
        assert!(person(&json!({"name": "x"})).is_err());
    }
}
