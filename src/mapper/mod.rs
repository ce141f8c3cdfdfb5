//! Raw API payloads to normalized rows. Nothing here touches the network or
//! the store.

pub mod event;
pub mod game;
pub mod people;
pub mod reference;
pub mod stats;

use crate::error::IngestError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Integers, integral-or-not floats (truncated) and numeric strings become
/// an `i64`; anything else is `None`.
#[must_use]
pub fn safe_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < 9.0e18)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// Truthiness the way the feeds encode flags: booleans, 0/1 and "true".
#[must_use]
pub fn flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(_) => safe_int(value).is_some_and(|v| v != 0),
        Value::String(s) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("true") || s.parse::<i64>().is_ok_and(|v| v != 0)
        }
        _ => false,
    }
}

/// Walks nested objects. A missing or null segment ends the walk.
#[must_use]
pub fn path<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for key in keys {
        current = current.get(key)?;
        if current.is_null() {
            return None;
        }
    }
    Some(current)
}

/// String at `keys`; numbers are rendered, empty strings count as absent.
#[must_use]
pub fn path_str(value: &Value, keys: &[&str]) -> Option<String> {
    match path(value, keys)? {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[must_use]
pub fn path_int(value: &Value, keys: &[&str]) -> Option<i64> {
    path(value, keys).and_then(safe_int)
}

#[must_use]
pub fn path_bool(value: &Value, keys: &[&str]) -> Option<bool> {
    match path(value, keys)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        v @ Value::Number(_) => safe_int(v).map(|i| i != 0),
        _ => None,
    }
}

/// Like [`path_str`] but the field is a conflict key, so absence is an error.
///
/// # Errors
///
/// Will return `Err` if the field is missing or empty
pub fn required_str(value: &Value, keys: &[&str], context: &str) -> Result<String, IngestError> {
    path_str(value, keys).ok_or_else(|| IngestError::missing(&keys.join("."), context))
}

/// # Errors
///
/// Will return `Err` if the field is missing or not numeric
pub fn required_int(value: &Value, keys: &[&str], context: &str) -> Result<i64, IngestError> {
    path_int(value, keys).ok_or_else(|| IngestError::missing(&keys.join("."), context))
}

/// `YYYY-MM-DD`, optionally followed by a time part.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.trim().split(['T', ' ']).next()?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// ISO timestamps with or without offset. Offsets are normalized to UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    let raw = raw.trim_end_matches('Z');
    [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    .or_else(|| parse_date(raw).and_then(|d| d.and_hms_opt(0, 0, 0)))
}

#[must_use]
pub fn path_date(value: &Value, keys: &[&str]) -> Option<NaiveDate> {
    path(value, keys).and_then(Value::as_str).and_then(parse_date)
}

#[must_use]
pub fn path_timestamp(value: &Value, keys: &[&str]) -> Option<NaiveDateTime> {
    path(value, keys).and_then(Value::as_str).and_then(parse_timestamp)
}

/// `E` + 2023 -> `E2023`.
#[must_use]
pub fn season_code(competition: &str, year: i32) -> String {
    format!("{competition}{year}")
}

/// `E2023_100` -> 100.
#[must_use]
pub fn game_number_from_gamecode(gamecode: &str) -> Option<i64> {
    gamecode.rsplit('_').next()?.trim().parse().ok()
}

/// `E2023_100` -> `E2023`.
#[must_use]
pub fn season_from_gamecode(gamecode: &str) -> Option<&str> {
    gamecode.split_once('_').map(|(season, _)| season)
}

/// Live feeds prefix person codes with `P` and pad them with spaces.
#[must_use]
pub fn person_code_from_player_id(player_id: &str) -> Option<String> {
    let code = player_id.trim().strip_prefix('P')?.trim();
    (!code.is_empty()).then(|| code.to_string())
}

/// Staff harvest keeps entries with a role other than player. Entries
/// without a role are not staff.
#[must_use]
pub fn is_staff_role(type_name: Option<&str>) -> bool {
    type_name.is_some_and(|t| !t.trim().is_empty() && t != "Player")
}

/// Records of a list response: either a bare array or an object with a
/// `data` array. An object without `data` has no records.
///
/// # Errors
///
/// Will return `Err` if the payload is neither
pub fn records<'a>(payload: &'a Value, context: &str) -> Result<&'a [Value], IngestError> {
    match payload {
        Value::Array(items) => Ok(items),
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => Ok(items),
            None | Some(Value::Null) => Ok(&[]),
            Some(_) => Err(IngestError::Mapping(format!("{context}: data is not a list"))),
        },
        _ => Err(IngestError::Mapping(format!("{context}: unexpected payload"))),
    }
}

/// Compact JSON text for columns that keep a raw sub-document.
#[must_use]
pub fn json_text(value: Option<&Value>) -> Option<String> {
    value.filter(|v| !v.is_null()).map(Value::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn safe_int_coerces() {
        assert_eq!(safe_int(&json!(7)), Some(7));
        assert_eq!(safe_int(&json!(7.9)), Some(7));
        assert_eq!(safe_int(&json!(" 12 ")), Some(12));
        assert_eq!(safe_int(&json!("abc")), None);
        assert_eq!(safe_int(&json!(null)), None);
        assert_eq!(safe_int(&json!({"a": 1})), None);
    }

    #[test]
    fn nested_paths() {
        let v = json!({"club": {"code": "MAD", "score": "81"}, "venue": null});
        assert_eq!(path_str(&v, &["club", "code"]), Some("MAD".to_string()));
        assert_eq!(path_int(&v, &["club", "score"]), Some(81));
        assert_eq!(path_str(&v, &["venue", "code"]), None);
        assert_eq!(path_str(&v, &["missing", "code"]), None);
    }

    #[test]
    fn dates() {
        assert_eq!(parse_date("2023-10-05"), NaiveDate::from_ymd_opt(2023, 10, 5));
        assert_eq!(
            parse_date("1990-02-01T00:00:00"),
            NaiveDate::from_ymd_opt(1990, 2, 1)
        );
        assert_eq!(parse_date("05/10/2023"), None);

        let expected = NaiveDate::from_ymd_opt(2023, 10, 5).and_then(|d| d.and_hms_opt(18, 45, 0));
        assert_eq!(parse_timestamp("2023-10-05T18:45:00Z"), expected);
        assert_eq!(parse_timestamp("2023-10-05T20:45:00+02:00"), expected);
        assert_eq!(parse_timestamp("2023-10-05T18:45:00"), expected);
        assert_eq!(parse_timestamp("never"), None);
    }

    #[test]
    fn identifiers() {
        assert_eq!(season_code("E", 2023), "E2023");
        assert_eq!(game_number_from_gamecode("E2023_100"), Some(100));
        assert_eq!(season_from_gamecode("E2023_100"), Some("E2023"));
        assert_eq!(person_code_from_player_id("P003469  "), Some("003469".to_string()));
        assert_eq!(person_code_from_player_id(""), None);
        assert_eq!(person_code_from_player_id("003469"), None);
    }

    #[test]
    fn staff_roles() {
        assert!(!is_staff_role(Some("Player")));
        assert!(is_staff_role(Some("Head Coach")));
        assert!(!is_staff_role(None));
        assert!(!is_staff_role(Some("")));
    }

    #[test]
    fn list_shapes() {
        let bare = json!([{"code": "E"}]);
        let wrapped = json!({"data": [{"code": "E"}, {"code": "U"}], "total": 2});
        assert_eq!(records(&bare, "t").map(<[Value]>::len), Ok(1));
        assert_eq!(records(&wrapped, "t").map(<[Value]>::len), Ok(2));
        assert_eq!(records(&json!({}), "t").map(<[Value]>::len), Ok(0));
        assert!(records(&json!("x"), "t").is_err());
    }
}
