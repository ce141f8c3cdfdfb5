use bdc_ingest::args::{self, CleanArgs};
use bdc_ingest::client::EuroleagueClient;
use bdc_ingest::coordinator::{RunLog, run_all, run_units};
use bdc_ingest::logging::init_tracing;
use bdc_ingest::pipeline::Context;
use bdc_ingest::schema::init_schema;
use bdc_ingest::storage::{DatabaseType, PostgresSettings, SqlStorage, Storage};
use chrono::Local;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let today = Local::now().date_naive();
    let args = args::args_checks(today)?;

    let mut run_log = RunLog::open(&args.config.log_dir, today)?;
    init_tracing(Some(run_log.path()))?;

    let storage = init_storage(&args).await?;
    run_startup_tasks(&args, &storage).await?;

    let api = EuroleagueClient::new_with_base_url(
        &args.api_base_url,
        &args.live_api_base_url,
        Duration::from_secs(args.http_timeout_secs),
    )?;
    let ctx = Context::new(&api, &storage, &args.config);

    let summary = match args.unit {
        Some(unit) => run_units(&ctx, &[unit], &mut run_log).await,
        None => run_all(&ctx, &mut run_log).await,
    };
    info!(log = %run_log.path().display(), "run log written");

    if summary.aborted.is_empty() {
        Ok(())
    } else {
        Err(format!("{} unit(s) aborted", summary.aborted.len()).into())
    }
}

async fn init_storage(args: &CleanArgs) -> Result<SqlStorage, Box<dyn std::error::Error>> {
    if args.db_type == DatabaseType::Postgres {
        let settings = PostgresSettings {
            host: args.db_host.clone(),
            port: args.db_port,
            dbname: args.db_name.clone(),
            user: args.db_user.clone(),
            password: args.db_password.clone(),
        };
        Ok(SqlStorage::connect_postgres(&settings).await?)
    } else {
        Ok(SqlStorage::open_sqlite(&args.db_name).await?)
    }
}

async fn run_startup_tasks(
    args: &CleanArgs,
    storage: &SqlStorage,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.init_schema {
        init_schema(storage).await?;
        info!("schema ready");
    }
    if !args.combined_sql_script.is_empty() {
        storage.execute_batch(&args.combined_sql_script).await?;
    }
    Ok(())
}
