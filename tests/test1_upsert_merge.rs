mod common;

use bdc_ingest::model::{Person, PlayerGameStat, StatLine, Venue};
use bdc_ingest::storage::{Bind, RowExt, Storage, upsert};
use common::{count, setup_store};

fn line(dorsal: Option<i64>, points: Option<i64>) -> PlayerGameStat {
    PlayerGameStat {
        gamecode: "E2023_1".to_string(),
        person_code: "003469".to_string(),
        team_code: Some("MAD".to_string()),
        dorsal,
        stats: StatLine {
            points,
            ..StatLine::default()
        },
        ..PlayerGameStat::default()
    }
}

async fn stored_line(storage: &dyn Storage) -> Result<(Option<i64>, Option<i64>), Box<dyn std::error::Error>> {
    let rows = storage
        .select(
            "SELECT dorsal, points FROM player_game_stats WHERE gamecode = ?1 AND person_code = ?2",
            &["E2023_1".bind(), "003469".bind()],
        )
        .await?;
    assert_eq!(rows.len(), 1);
    Ok((rows[0].get_int("dorsal"), rows[0].get_int("points")))
}

#[tokio::test]
async fn coalesce_fills_gaps_and_never_blanks() -> Result<(), Box<dyn std::error::Error>> {
    let storage = setup_store().await?;

    upsert(&storage, &line(None, Some(12))).await?;
    assert_eq!(stored_line(&storage).await?, (None, Some(12)));

    upsert(&storage, &line(Some(7), None)).await?;
    assert_eq!(stored_line(&storage).await?, (Some(7), Some(12)));

    upsert(&storage, &line(None, None)).await?;
    assert_eq!(stored_line(&storage).await?, (Some(7), Some(12)));

    upsert(&storage, &line(Some(8), Some(14))).await?;
    assert_eq!(stored_line(&storage).await?, (Some(8), Some(14)));
    assert_eq!(count(&storage, "player_game_stats").await?, 1);
    Ok(())
}

#[tokio::test]
async fn position_survives_a_later_line_without_one() -> Result<(), Box<dyn std::error::Error>> {
    let storage = setup_store().await?;
    let with_position = |position: Option<i64>, name: Option<&str>| PlayerGameStat {
        position,
        position_name: name.map(ToString::to_string),
        ..line(Some(7), Some(12))
    };
    let stored = || async {
        let rows = storage
            .select(
                "SELECT position, position_name FROM player_game_stats WHERE person_code = ?1",
                &["003469".bind()],
            )
            .await?;
        Ok::<_, Box<dyn std::error::Error>>((rows[0].get_int("position"), rows[0].get_text("position_name")))
    };

    upsert(&storage, &with_position(None, None)).await?;
    assert_eq!(stored().await?, (None, None));

    upsert(&storage, &with_position(Some(2), Some("Forward"))).await?;
    assert_eq!(stored().await?, (Some(2), Some("Forward".to_string())));

    upsert(&storage, &with_position(None, None)).await?;
    assert_eq!(stored().await?, (Some(2), Some("Forward".to_string())));
    Ok(())
}

#[tokio::test]
async fn people_are_written_once() -> Result<(), Box<dyn std::error::Error>> {
    let storage = setup_store().await?;
    let first = Person {
        person_code: "003469".to_string(),
        name: Some("DOE, JOHN".to_string()),
        ..Person::default()
    };
    let renamed = Person {
        name: Some("DOE, J.".to_string()),
        height: Some(201),
        ..first.clone()
    };
    upsert(&storage, &first).await?;
    upsert(&storage, &renamed).await?;

    let rows = storage
        .select("SELECT name, height FROM people WHERE person_code = ?1", &["003469".bind()])
        .await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_text("name").as_deref(), Some("DOE, JOHN"));
    assert_eq!(rows[0].get_int("height"), None);
    Ok(())
}

#[tokio::test]
async fn repeated_upserts_leave_one_row() -> Result<(), Box<dyn std::error::Error>> {
    let storage = setup_store().await?;
    let venue = Venue {
        venue_code: "WIZ".to_string(),
        name: Some("WiZink Center".to_string()),
        capacity: Some(15_000),
        ..Venue::default()
    };
    for _ in 0..3 {
        upsert(&storage, &venue).await?;
    }
    assert_eq!(count(&storage, "venues").await?, 1);
    Ok(())
}
