mod common;

use bdc_ingest::model::Person;
use bdc_ingest::pipeline::{Context, UnitName, run_unit};
use bdc_ingest::storage::{Bind, RowExt, Storage, upsert};
use common::{FakeApi, count, setup_store, test_config};
use serde_json::{Value, json};

const GAMES: &str = "v2/competitions/E/seasons/E2023/games?limit=500&offset=0";

fn referee(code: &str, name: &str) -> Value {
    json!({"code": code, "name": name, "country": {"code": "ITA", "name": "Italy"}})
}

fn games_page() -> Value {
    json!({
        "data": [
            {
                "identifier": "E2023_1",
                "gameCode": 1,
                "season": {"code": "E2023", "competitionCode": "E"},
                "round": 1,
                "phaseType": {"code": "RS"},
                "date": "2023-10-05T20:45:00",
                "local": {"club": {"code": "MAD"}, "score": 85},
                "road": {"club": {"code": "BAR"}, "score": 80},
                "played": true,
                "referee1": referee("R1", "ROSSI, MARCO"),
                "referee2": referee("R2", "BIANCHI, LUCA"),
                "referee3": referee("R3", "VERDI, PAOLO"),
                "referee4": referee("R4", "NERI, ANDREA")
            },
            {
                "identifier": "E2023_2",
                "round": 1,
                "local": {"club": {"code": "OLY"}},
                "road": {"club": {"code": "PAN"}},
                "referee1": referee("R1", "ROSSI, MARCO"),
                "referee2": null
            }
        ],
        "total": 2
    })
}

#[tokio::test]
async fn games_take_codes_from_identifier() -> Result<(), Box<dyn std::error::Error>> {
    let storage = setup_store().await?;
    let api = FakeApi::new().json(GAMES, games_page());
    let config = test_config();
    let ctx = Context::new(&api, &storage, &config);

    let report = run_unit(&ctx, UnitName::Games).await?;
    assert_eq!((report.upserted, report.failed), (2, 0));

    let rows = storage
        .select(
            "SELECT season_code, game_number, home_score FROM games WHERE gamecode = ?1",
            &["E2023_2".bind()],
        )
        .await?;
    assert_eq!(rows[0].get_text("season_code").as_deref(), Some("E2023"));
    assert_eq!(rows[0].get_int("game_number"), Some(2));
    assert_eq!(rows[0].get_int("home_score"), None);
    Ok(())
}

async fn stored_game(storage: &dyn Storage, gamecode: &str) -> Result<(Option<String>, Option<String>, Option<i64>, Option<i64>), Box<dyn std::error::Error>> {
    let rows = storage
        .select(
            "SELECT phase_type, home_team_code, home_score, away_score FROM games WHERE gamecode = ?1",
            &[gamecode.bind()],
        )
        .await?;
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    Ok((row.get_text("phase_type"), row.get_text("home_team_code"), row.get_int("home_score"), row.get_int("away_score")))
}

#[tokio::test]
async fn second_games_run_does_not_blank_columns() -> Result<(), Box<dyn std::error::Error>> {
    let storage = setup_store().await?;
    let config = test_config();
    let first_api = FakeApi::new().json(GAMES, games_page());
    run_unit(&Context::new(&first_api, &storage, &config), UnitName::Games).await?;
    let game_1 = stored_game(&storage, "E2023_1").await?;
    let game_2 = stored_game(&storage, "E2023_2").await?;
    assert_eq!(game_1, (Some("RS".to_string()), Some("MAD".to_string()), Some(85), Some(80)));

    // descriptive fields gone from the refetch, scores unchanged
    let mut page = games_page();
    page["data"][0]["phaseType"] = Value::Null;
    page["data"][0]["local"]["club"] = Value::Null;
    let second_api = FakeApi::new().json(GAMES, page);
    let report = run_unit(&Context::new(&second_api, &storage, &config), UnitName::Games).await?;

    assert_eq!((report.upserted, report.failed), (2, 0));
    assert_eq!(count(&storage, "games").await?, 2);
    assert_eq!(stored_game(&storage, "E2023_1").await?, game_1);
    assert_eq!(stored_game(&storage, "E2023_2").await?, game_2);
    Ok(())
}

#[tokio::test]
async fn referee_slots_map_to_roles() -> Result<(), Box<dyn std::error::Error>> {
    let storage = setup_store().await?;
    let api = FakeApi::new().json(GAMES, games_page());
    let config = test_config();
    let ctx = Context::new(&api, &storage, &config);

    let report = run_unit(&ctx, UnitName::GameReferees).await?;
    assert_eq!((report.upserted, report.failed), (5, 0));

    let rows = storage
        .select(
            "SELECT person_code, role FROM game_referees WHERE gamecode = ?1 ORDER BY person_code",
            &["E2023_1".bind()],
        )
        .await?;
    let roles: Vec<Option<String>> = rows.iter().map(|r| r.get_text("role")).collect();
    assert_eq!(roles[0].as_deref(), Some("main"));
    assert!(roles[1..].iter().all(|r| r.as_deref() == Some("assistant")));
    assert_eq!(roles.len(), 4);

    // referees unknown to the people table are created as referees
    let people = storage
        .select("SELECT person_code, is_referee FROM people ORDER BY person_code", &[])
        .await?;
    assert_eq!(people.len(), 4);
    assert!(people.iter().all(|p| p.get_int("is_referee") == Some(1)));
    Ok(())
}

#[tokio::test]
async fn coaches_need_an_ingested_person() -> Result<(), Box<dyn std::error::Error>> {
    let storage = setup_store().await?;
    let api = FakeApi::new().json(GAMES, games_page()).json(
        "v2/competitions/E/seasons/E2023/clubs/MAD/people",
        json!([
            {"person": {"code": "C1"}, "typeName": "Head Coach"},
            {"person": {"code": "C2"}, "typeName": "Assistant Coach"},
            {"person": {"code": "P1"}, "typeName": "Player"},
            {"person": {"code": "C1"}}
        ]),
    );
    let config = test_config();
    let ctx = Context::new(&api, &storage, &config);
    run_unit(&ctx, UnitName::Games).await?;
    upsert(
        &storage,
        &Person {
            person_code: "C1".to_string(),
            ..Person::default()
        },
    )
    .await?;

    let report = run_unit(&ctx, UnitName::CoachTeams).await?;
    // BAR, OLY and PAN rosters are not scripted and answer 404
    assert_eq!((report.upserted, report.skipped, report.failed), (1, 1, 3));
    assert_eq!(count(&storage, "coach_teams").await?, 1);
    let rows = storage.select("SELECT role FROM coach_teams", &[]).await?;
    assert_eq!(rows[0].get_text("role").as_deref(), Some("Head Coach"));
    Ok(())
}
