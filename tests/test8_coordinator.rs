mod common;

use bdc_ingest::coordinator::{RunLog, log_file_name, run_all, run_units};
use bdc_ingest::pipeline::{Context, UnitName};
use chrono::NaiveDate;
use common::{FakeApi, Scripted, setup_store, test_config};
use serde_json::json;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn scratch_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time went backwards")
        .as_nanos();
    std::env::temp_dir().join(format!("bdc_ingest_{name}_{nanos}"))
}

fn run_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date")
}

#[test]
fn log_is_named_by_day() {
    assert_eq!(log_file_name(run_day()), "ingest_2024-03-09.log");
}

#[tokio::test]
async fn failed_unit_is_logged_and_the_run_goes_on() -> Result<(), Box<dyn std::error::Error>> {
    let dir = scratch_dir("coordinator");
    let storage = setup_store().await?;
    let api = FakeApi::new()
        .with("v2/competitions", Scripted::Transport)
        .json("v3/clubs", json!({"data": [{"code": "MAD"}]}));
    let config = test_config();
    let ctx = Context::new(&api, &storage, &config);

    let mut log = RunLog::open(&dir, run_day())?;
    let summary = run_units(
        &ctx,
        &[UnitName::Competitions, UnitName::Teams, UnitName::Standings],
        &mut log,
    )
    .await;

    assert_eq!(summary.reports.len(), 3);
    assert!(summary.aborted.is_empty());
    assert_eq!(summary.report(UnitName::Competitions).map(|r| r.failed), Some(1));
    assert_eq!(summary.report(UnitName::Teams).map(|r| r.upserted), Some(1));

    let path = dir.join("ingest_2024-03-09.log");
    assert_eq!(log.path(), path.as_path());
    let text = std::fs::read_to_string(&path)?;
    assert!(text.contains("=== Ingest run started at"));
    assert!(text.contains("----- competitions ("));
    assert!(text.contains("competitions: upserted=0 skipped=0 failed=1"));
    assert!(text.contains("teams: upserted=1 skipped=0 failed=0"));
    assert!(text.contains("=== Ingest run finished at"));
    assert!(text.contains(r#"{"unit":"competitions","upserted":0,"skipped":0,"failed":1}"#));
    let teams_banner = text.find("----- teams (").unwrap_or(usize::MAX);
    let standings_banner = text.find("----- standings (").unwrap_or(0);
    assert!(teams_banner < standings_banner);

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}

#[tokio::test]
async fn full_run_visits_every_unit_in_order() -> Result<(), Box<dyn std::error::Error>> {
    let dir = scratch_dir("full_run");
    let storage = setup_store().await?;
    let api = FakeApi::new();
    let config = test_config();
    let ctx = Context::new(&api, &storage, &config);

    let mut log = RunLog::open(&dir, run_day())?;
    let summary = run_all(&ctx, &mut log).await;

    let order: Vec<UnitName> = summary.reports.iter().map(|r| r.unit).collect();
    assert_eq!(order, UnitName::ALL.to_vec());
    assert!(summary.aborted.is_empty());

    // a second run the same day appends to the same file
    let mut again = RunLog::open(&dir, run_day())?;
    run_units(&ctx, &[UnitName::Competitions], &mut again).await;
    let text = std::fs::read_to_string(again.path())?;
    assert_eq!(text.matches("=== Ingest run started at").count(), 2);

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}
