use super::{flag, path_int, path_str, person_code_from_player_id, required_int};
use crate::error::IngestError;
use crate::model::{PlayByPlayEvent, ShotEvent};
use serde_json::Value;

/// Period buckets of the live play-by-play document, in period order.
pub const QUARTERS: [(&str, i64); 5] = [
    ("FirstQuarter", 1),
    ("SecondQuarter", 2),
    ("ThirdQuarter", 3),
    ("ForthQuarter", 4),
    ("ExtraTime", 5),
];

fn person_code(raw: &Value, key: &str) -> Option<String> {
    raw.get(key)
        .and_then(Value::as_str)
        .and_then(person_code_from_player_id)
}

/// Overtime plays share one bucket. Their period comes from the play's own
/// `PERIOD`, else from a game minute past 40 (five-minute overtimes), else 5.
fn overtime_period(play: &Value) -> i64 {
    if let Some(period) = path_int(play, &["PERIOD"]).filter(|p| *p >= 5) {
        return period;
    }
    match path_int(play, &["MINUTE"]) {
        Some(minute) if minute > 40 => 5 + (minute - 41) / 5,
        _ => 5,
    }
}

fn trimmed(raw: &Value, key: &str) -> Option<String> {
    path_str(raw, &[key]).map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// # Errors
///
/// Will return `Err` if any play lacks its play number
pub fn play_by_play(
    raw: &Value,
    gamecode: &str,
    season_code: &str,
) -> Result<Vec<PlayByPlayEvent>, IngestError> {
    let mut events = Vec::new();
    for (bucket, period) in QUARTERS {
        let Some(plays) = raw.get(bucket).and_then(Value::as_array) else {
            continue;
        };
        for play in plays {
            let period = if bucket == "ExtraTime" { overtime_period(play) } else { period };
            events.push(PlayByPlayEvent {
                gamecode: gamecode.to_string(),
                play_number: required_int(play, &["NUMBEROFPLAY"], gamecode)?,
                season_code: season_code.to_string(),
                team_code: trimmed(play, "CODETEAM"),
                person_code: person_code(play, "PLAYER_ID"),
                period,
                event_type: trimmed(play, "PLAYTYPE").unwrap_or_else(|| "Unknown".to_string()),
                time_string: trimmed(play, "MARKERTIME"),
                description: path_str(play, &["PLAYINFO"]),
                points_a: path_int(play, &["POINTS_A"]),
                points_b: path_int(play, &["POINTS_B"]),
            });
        }
    }
    Ok(events)
}

/// # Errors
///
/// Will return `Err` if any shot lacks its annotation number
pub fn shots(raw: &Value, gamecode: &str, season_code: &str) -> Result<Vec<ShotEvent>, IngestError> {
    let Some(rows) = raw.get("Rows").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };
    rows.iter()
        .map(|row| {
            let is = |key: &str| row.get(key).is_some_and(flag);
            Ok(ShotEvent {
                gamecode: gamecode.to_string(),
                play_number: required_int(row, &["NUM_ANOT"], gamecode)?,
                season_code: season_code.to_string(),
                team_code: trimmed(row, "TEAM"),
                person_code: person_code(row, "ID_PLAYER"),
                period: path_int(row, &["MINUTE"]),
                time_string: trimmed(row, "CONSOLE"),
                action_code: trimmed(row, "ID_ACTION"),
                action: path_str(row, &["ACTION"]),
                points: path_int(row, &["POINTS"]),
                coord_x: path_int(row, &["COORD_X"]),
                coord_y: path_int(row, &["COORD_Y"]),
                zone: trimmed(row, "ZONE"),
                fastbreak: is("FASTBREAK"),
                second_chance: is("SECOND_CHANCE"),
                points_off_turnover: is("POINTS_OFF_TURNOVER"),
                points_a: path_int(row, &["POINTS_A"]),
                points_b: path_int(row, &["POINTS_B"]),
                utc: trimmed(row, "UTC"),
            })
        })
        .collect()
}
