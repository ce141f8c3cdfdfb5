use super::{
    game_number_from_gamecode, json_text, path_bool, path_int, path_str, path_timestamp,
    required_str, safe_int, season_from_gamecode,
};
use crate::error::IngestError;
use crate::model::{Game, ScheduledGame, Standing};
use scraper::{Html, Selector};
use serde_json::Value;

const SCHEDULE_TAGS: [&str; 15] = [
    "gamecode",
    "game",
    "gameday",
    "round",
    "group",
    "homecode",
    "awaycode",
    "date",
    "startime",
    "endtime",
    "arenacode",
    "arenaname",
    "arenacapacity",
    "confirmeddate",
    "confirmedtime",
];

/// # Errors
///
/// Will return `Err` if the game has no identifier or season
pub fn game(raw: &Value) -> Result<Game, IngestError> {
    let gamecode = required_str(raw, &["identifier"], "game")?;
    let season_code = match path_str(raw, &["season", "code"]) {
        Some(code) => code,
        None => season_from_gamecode(&gamecode)
            .map(str::to_string)
            .ok_or_else(|| IngestError::missing("season.code", &gamecode))?,
    };
    Ok(Game {
        game_number: path_int(raw, &["gameCode"]).or_else(|| game_number_from_gamecode(&gamecode)),
        season_code,
        competition_code: path_str(raw, &["season", "competitionCode"]),
        round_number: path_int(raw, &["round"]),
        phase_type: path_str(raw, &["phaseType", "code"]),
        group_name: path_str(raw, &["group", "rawName"]),
        date: path_timestamp(raw, &["date"]),
        utc_date: path_timestamp(raw, &["utcDate"]),
        local_timezone: path_int(raw, &["localTimeZone"]),
        home_team_code: path_str(raw, &["local", "club", "code"]),
        away_team_code: path_str(raw, &["road", "club", "code"]),
        is_neutral_venue: path_bool(raw, &["isNeutralVenue"]),
        played: path_bool(raw, &["played"]),
        home_score: path_int(raw, &["local", "score"]),
        away_score: path_int(raw, &["road", "score"]),
        venue_code: path_str(raw, &["venue", "code"]),
        attendance: path_int(raw, &["audience"]),
        confirmed_date: path_bool(raw, &["confirmedDate"]),
        confirmed_hour: path_bool(raw, &["confirmedHour"]),
        game_status: path_str(raw, &["gameStatus"]),
        winner_team_code: path_str(raw, &["winner", "code"]),
        gamecode,
    })
}

fn selector(css: &str) -> Result<Selector, IngestError> {
    Selector::parse(css).map_err(|e| IngestError::Mapping(format!("selector {css}: {e:?}")))
}

/// Parses the XML season schedule, one `item` element per game. `played` is
/// left false; it depends on stored scores and is filled in by the caller.
///
/// # Errors
///
/// Will return `Err` if an item has no gamecode or a malformed one
pub fn schedule(xml: &str) -> Result<Vec<ScheduledGame>, IngestError> {
    let doc = Html::parse_document(xml);
    let items = selector("item")?;
    let fields: Vec<(&str, Selector)> = SCHEDULE_TAGS
        .iter()
        .map(|tag| -> Result<(&str, Selector), IngestError> { Ok((*tag, selector(tag)?)) })
        .collect::<Result<_, IngestError>>()?;

    doc.select(&items)
        .map(|item| -> Result<ScheduledGame, IngestError> {
            let text = |tag: &str| -> Option<String> {
                let (_, sel) = fields.iter().find(|(name, _)| *name == tag)?;
                let value: String = item.select(sel).next()?.text().collect();
                let value = value.trim();
                (!value.is_empty()).then(|| value.to_string())
            };
            let int = |tag: &str| text(tag).and_then(|t| safe_int(&Value::String(t)));

            let gamecode = text("gamecode").ok_or_else(|| IngestError::missing("gamecode", "schedule item"))?;
            let season_code = season_from_gamecode(&gamecode)
                .ok_or_else(|| IngestError::Mapping(format!("malformed gamecode {gamecode}")))?
                .to_string();
            Ok(ScheduledGame {
                game_number: int("game"),
                season_code,
                round_number: int("gameday"),
                round_code: text("round"),
                round_name: text("group"),
                home_team_code: text("homecode"),
                away_team_code: text("awaycode"),
                date: text("date"),
                hour: text("startime"),
                end_hour: text("endtime"),
                venue_code: text("arenacode"),
                venue_name: text("arenaname"),
                venue_capacity: int("arenacapacity"),
                confirmed_date: text("confirmeddate").as_deref() == Some("true"),
                confirmed_hour: text("confirmedtime").as_deref() == Some("true"),
                played: false,
                gamecode,
            })
        })
        .collect()
}

/// # Errors
///
/// Will return `Err` if the entry has no club code
pub fn standing(raw: &Value, season_code: &str, round_number: i64) -> Result<Standing, IngestError> {
    Ok(Standing {
        season_code: season_code.to_string(),
        round_number,
        team_code: required_str(raw, &["club", "code"], "standings entry")?,
        position: path_int(raw, &["position"]),
        position_change: path_str(raw, &["positionChange"]),
        games_played: path_int(raw, &["gamesPlayed"]),
        games_won: path_int(raw, &["gamesWon"]),
        games_lost: path_int(raw, &["gamesLost"]),
        qualified: path_bool(raw, &["qualified"]),
        group_name: path_str(raw, &["groupName"]),
        streaks: json_text(raw.get("streaks")).or_else(|| Some("[]".to_string())),
    })
}
