mod common;

use bdc_ingest::model::{PlayerGameStat, StatLine};
use bdc_ingest::pipeline::{Context, UnitName, run_unit};
use bdc_ingest::storage::{Bind, RowExt, Storage, upsert};
use common::{FakeApi, count, setup_store, store_game, test_config};
use serde_json::{Value, json};

fn box_score() -> Value {
    json!({
        "local": {"players": [
            {"player": {"person": {"code": "A1"}, "club": {"code": "MAD"}, "dorsal": "5", "position": 1, "positionName": "Guard"},
             "stats": {"points": 20, "fieldGoalsMade2": 4, "fieldGoalsAttempted2": 8,
                       "fieldGoalsMade3": 3, "fieldGoalsAttempted3": 6, "startFive": true}},
            {"player": {"person": {"code": "A2"}, "club": {"code": "MAD"}},
             "stats": {"points": 11, "dorsal": 9, "assistances": 4}},
            {"player": {"club": {"code": "MAD"}}, "stats": {"points": 99}}
        ]},
        "road": {"players": [
            {"player": {"person": {"code": "B1"}, "club": {"code": "BAR"}}, "stats": {"points": 17}}
        ]}
    })
}

#[tokio::test]
async fn box_score_feeds_memberships_and_lines() -> Result<(), Box<dyn std::error::Error>> {
    let storage = setup_store().await?;
    store_game(&storage, 1, Some((85, 80))).await?;
    let api = FakeApi::new()
        .json("v3/competitions/E/seasons/E2023/games/1/stats", box_score())
        .json(
            "v2/competitions/E/seasons/E2023/games/1",
            json!({
                "local": {"club": {"code": "MAD"}, "partials": {"partials1": 20, "partials2": 11, "partials3": 0, "partials4": 0}},
                "road": {"club": {"code": "BAR"}, "partials": {"partials1": 17, "extraPeriods": {"1": 0}}}
            }),
        );
    let config = test_config();
    let ctx = Context::new(&api, &storage, &config);

    let teams = run_unit(&ctx, UnitName::PlayerTeams).await?;
    assert_eq!(teams.upserted, 3);
    let lines = run_unit(&ctx, UnitName::PlayerGameStats).await?;
    assert_eq!(lines.upserted, 3);
    assert_eq!(count(&storage, "player_game_stats").await?, 3);

    let rows = storage
        .select(
            "SELECT dorsal, position, position_name, starting_five FROM player_game_stats WHERE person_code = ?1",
            &["A1".bind()],
        )
        .await?;
    assert_eq!(rows[0].get_int("dorsal"), Some(5));
    assert_eq!(rows[0].get_int("position"), Some(1));
    assert_eq!(rows[0].get_text("position_name").as_deref(), Some("Guard"));
    assert_eq!(rows[0].get_int("starting_five"), Some(1));

    let team_lines = run_unit(&ctx, UnitName::TeamGameStats).await?;
    assert_eq!(team_lines.upserted, 2);
    let rows = storage
        .select(
            "SELECT points, assists, field_goals_total_made, field_goals_total_attempted, points_q1, extra_periods
             FROM team_game_stats WHERE team_code = ?1",
            &["MAD".bind()],
        )
        .await?;
    let mad = &rows[0];
    assert_eq!(mad.get_int("points"), Some(31));
    assert_eq!(mad.get_int("assists"), Some(4));
    assert_eq!(mad.get_int("field_goals_total_made"), Some(7));
    assert_eq!(mad.get_int("field_goals_total_attempted"), Some(14));
    assert_eq!(mad.get_int("points_q1"), Some(20));
    assert_eq!(mad.get_text("extra_periods").as_deref(), Some("{}"));
    Ok(())
}

async fn team_totals(storage: &dyn Storage) -> Result<Vec<(Option<String>, Option<i64>, Option<i64>, Option<i64>)>, Box<dyn std::error::Error>> {
    let rows = storage
        .select(
            "SELECT team_code, points, assists, points_q1 FROM team_game_stats ORDER BY team_code",
            &[],
        )
        .await?;
    Ok(rows
        .iter()
        .map(|r| (r.get_text("team_code"), r.get_int("points"), r.get_int("assists"), r.get_int("points_q1")))
        .collect())
}

#[tokio::test]
async fn team_lines_are_stable_across_runs() -> Result<(), Box<dyn std::error::Error>> {
    let storage = setup_store().await?;
    store_game(&storage, 1, Some((85, 80))).await?;
    let api = FakeApi::new()
        .json("v3/competitions/E/seasons/E2023/games/1/stats", box_score())
        .json(
            "v2/competitions/E/seasons/E2023/games/1",
            json!({
                "local": {"club": {"code": "MAD"}, "partials": {"partials1": 20}},
                "road": {"club": {"code": "BAR"}, "partials": {"partials1": 17}}
            }),
        );
    let config = test_config();
    let ctx = Context::new(&api, &storage, &config);
    run_unit(&ctx, UnitName::PlayerGameStats).await?;

    let first = run_unit(&ctx, UnitName::TeamGameStats).await?;
    let after_first = team_totals(&storage).await?;
    let second = run_unit(&ctx, UnitName::TeamGameStats).await?;
    let after_second = team_totals(&storage).await?;

    assert_eq!((first.upserted, second.upserted), (2, 2));
    assert_eq!(second.failed, 0);
    assert_eq!(count(&storage, "team_game_stats").await?, 2);
    assert_eq!(after_first, after_second);
    assert_eq!(
        after_second,
        vec![
            (Some("BAR".to_string()), Some(17), Some(0), Some(17)),
            (Some("MAD".to_string()), Some(31), Some(4), Some(20)),
        ]
    );
    Ok(())
}

fn season_game(phase: &str, points: i64, rebounds: i64) -> Value {
    json!({
        "game": {"phaseType": {"code": phase}},
        "playerClubCode": "MAD",
        "stats": {"points": points, "totalRebounds": rebounds, "startFive": phase == "RS"}
    })
}

#[tokio::test]
async fn season_totals_per_phase() -> Result<(), Box<dyn std::error::Error>> {
    let storage = setup_store().await?;
    store_game(&storage, 1, Some((85, 80))).await?;
    upsert(
        &storage,
        &PlayerGameStat {
            gamecode: "E2023_1".to_string(),
            person_code: "A1".to_string(),
            team_code: Some("MAD".to_string()),
            stats: StatLine {
                points: Some(10),
                ..StatLine::default()
            },
            ..PlayerGameStat::default()
        },
    )
    .await?;

    let api = FakeApi::new().json(
        "v2/competitions/E/seasons/E2023/people/A1/stats",
        json!({"games": [
            season_game("RS", 10, 2),
            season_game("RS", 15, 11),
            season_game("RS", 20, 3),
            season_game("PO", 8, 1),
            {"stats": {"points": 40}}
        ]}),
    );
    let config = test_config();
    let ctx = Context::new(&api, &storage, &config);

    let report = run_unit(&ctx, UnitName::PlayerSeasonStats).await?;
    assert_eq!((report.upserted, report.failed), (2, 0));

    let rows = storage
        .select(
            "SELECT games_played, games_started, points, double_doubles, team_code
             FROM player_season_stats WHERE person_code = ?1 AND phase_type = ?2",
            &["A1".bind(), "RS".bind()],
        )
        .await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_int("games_played"), Some(3));
    assert_eq!(rows[0].get_int("games_started"), Some(3));
    assert_eq!(rows[0].get_int("points"), Some(45));
    assert_eq!(rows[0].get_int("double_doubles"), Some(1));
    assert_eq!(rows[0].get_text("team_code").as_deref(), Some("MAD"));

    // recomputing replaces rather than adds
    run_unit(&ctx, UnitName::PlayerSeasonStats).await?;
    let rows = storage
        .select(
            "SELECT points FROM player_season_stats WHERE phase_type = ?1",
            &["RS".bind()],
        )
        .await?;
    assert_eq!(rows[0].get_int("points"), Some(45));
    Ok(())
}

#[tokio::test]
async fn team_season_totals_from_accumulated() -> Result<(), Box<dyn std::error::Error>> {
    let storage = setup_store().await?;
    store_game(&storage, 1, None).await?;
    let api = FakeApi::new().json(
        "v3/competitions/E/seasons/E2023/clubs/MAD/stats",
        json!([{"accumulated": {"gamesPlayed": 34, "points": 2900, "fieldGoalsMadeTotal": 1000}}]),
    );
    let config = test_config();
    let ctx = Context::new(&api, &storage, &config);

    let report = run_unit(&ctx, UnitName::TeamSeasonStats).await?;
    // BAR is not scripted
    assert_eq!((report.upserted, report.failed), (1, 1));
    let rows = storage
        .select("SELECT games_played, points FROM team_season_stats", &[])
        .await?;
    assert_eq!(rows[0].get_int("games_played"), Some(34));
    assert_eq!(rows[0].get_int("points"), Some(2900));
    Ok(())
}
