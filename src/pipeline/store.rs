//! Reads that scope a unit to what is already ingested.

use crate::error::IngestError;
use crate::model::{PLAYER_GAME_STAT_COLUMNS, StatLine, scores_recorded};
use crate::storage::{Bind, RowExt, RowValues, Storage, placeholder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredGame {
    pub gamecode: String,
    pub game_number: i64,
}

async fn texts(
    storage: &dyn Storage,
    query: &str,
    params: &[RowValues],
    column: &str,
) -> Result<Vec<String>, IngestError> {
    Ok(storage
        .select(query, params)
        .await?
        .iter()
        .filter_map(|row| row.get_text(column))
        .collect())
}

/// # Errors
///
/// Will return `Err` if the store cannot be read
pub async fn team_codes(storage: &dyn Storage) -> Result<Vec<String>, IngestError> {
    texts(
        storage,
        "SELECT team_code FROM teams ORDER BY team_code",
        &[],
        "team_code",
    )
    .await
}

/// Teams with at least one stored game in the season, home or away.
///
/// # Errors
///
/// Will return `Err` if the store cannot be read
pub async fn season_teams(storage: &dyn Storage, season_code: &str) -> Result<Vec<String>, IngestError> {
    texts(
        storage,
        &format!(
            "SELECT team_code FROM (
                 SELECT home_team_code AS team_code FROM games WHERE season_code = {p1}
                 UNION
                 SELECT away_team_code AS team_code FROM games WHERE season_code = {p1}
             ) season_teams
             WHERE team_code IS NOT NULL
             ORDER BY team_code",
            p1 = placeholder(&storage.database_type(), 1)
        ),
        &[season_code.bind()],
        "team_code",
    )
    .await
}

/// # Errors
///
/// Will return `Err` if the store cannot be read
pub async fn season_games(storage: &dyn Storage, season_code: &str) -> Result<Vec<StoredGame>, IngestError> {
    let rows = storage
        .select(
            &format!(
                "SELECT gamecode, game_number FROM games
                 WHERE season_code = {p1} AND game_number IS NOT NULL
                 ORDER BY game_number",
                p1 = placeholder(&storage.database_type(), 1)
            ),
            &[season_code.bind()],
        )
        .await?;
    Ok(rows
        .iter()
        .filter_map(|row| {
            Some(StoredGame {
                gamecode: row.get_text("gamecode")?,
                game_number: row.get_int("game_number")?,
            })
        })
        .collect())
}

/// People with a stored box score line in the season.
///
/// # Errors
///
/// Will return `Err` if the store cannot be read
pub async fn season_persons(storage: &dyn Storage, season_code: &str) -> Result<Vec<String>, IngestError> {
    texts(
        storage,
        &format!(
            "SELECT DISTINCT s.person_code FROM player_game_stats s
             JOIN games g ON g.gamecode = s.gamecode
             WHERE g.season_code = {p1}
             ORDER BY s.person_code",
            p1 = placeholder(&storage.database_type(), 1)
        ),
        &[season_code.bind()],
        "person_code",
    )
    .await
}

/// # Errors
///
/// Will return `Err` if the store cannot be read
pub async fn season_rounds(storage: &dyn Storage, season_code: &str) -> Result<Vec<i64>, IngestError> {
    let rows = storage
        .select(
            &format!(
                "SELECT DISTINCT round_number FROM games
                 WHERE season_code = {p1} AND round_number IS NOT NULL
                 ORDER BY round_number",
                p1 = placeholder(&storage.database_type(), 1)
            ),
            &[season_code.bind()],
        )
        .await?;
    Ok(rows.iter().filter_map(|r| r.get_int("round_number")).collect())
}

/// # Errors
///
/// Will return `Err` if the store cannot be read
pub async fn person_exists(storage: &dyn Storage, person_code: &str) -> Result<bool, IngestError> {
    let rows = storage
        .select(
            &format!(
                "SELECT person_code FROM people WHERE person_code = {}",
                placeholder(&storage.database_type(), 1)
            ),
            &[person_code.bind()],
        )
        .await?;
    Ok(!rows.is_empty())
}

/// True iff the stored game has both scores.
///
/// # Errors
///
/// Will return `Err` if the store cannot be read
pub async fn game_scores_recorded(storage: &dyn Storage, gamecode: &str) -> Result<bool, IngestError> {
    let rows = storage
        .select(
            &format!(
                "SELECT home_score, away_score FROM games WHERE gamecode = {}",
                placeholder(&storage.database_type(), 1)
            ),
            &[gamecode.bind()],
        )
        .await?;
    Ok(rows
        .first()
        .is_some_and(|r| scores_recorded(r.get_int("home_score"), r.get_int("away_score"))))
}

/// Stored player lines of one team in one game.
///
/// # Errors
///
/// Will return `Err` if the store cannot be read
pub async fn player_lines(
    storage: &dyn Storage,
    gamecode: &str,
    team_code: &str,
) -> Result<Vec<StatLine<Option<i64>>>, IngestError> {
    let db_type = storage.database_type();
    let query = format!(
        "SELECT {} FROM player_game_stats WHERE gamecode = {} AND team_code = {}",
        PLAYER_GAME_STAT_COLUMNS.join(", "),
        placeholder(&db_type, 1),
        placeholder(&db_type, 2)
    );
    let rows = storage
        .select(&query, &[gamecode.bind(), team_code.bind()])
        .await?;
    Ok(rows
        .iter()
        .map(|row| StatLine::from_row(row, &PLAYER_GAME_STAT_COLUMNS))
        .collect())
}
