pub mod database;
pub mod types;
pub mod validation;

pub use types::{Args, CleanArgs};

use crate::config::{IngestConfig, current_season_year};
use crate::error::IngestError;
use chrono::NaiveDate;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

/// Parses the command line (with env fallbacks) and validates it.
///
/// # Errors
///
/// Will return `Err` if the arguments are invalid
pub fn args_checks(today: NaiveDate) -> Result<CleanArgs, IngestError> {
    let mut args = Args::parse();
    args.validate().map_err(IngestError::Config)?;
    CleanArgs::new(args, today)
}

impl CleanArgs {
    /// # Errors
    ///
    /// Will return `Err` if a startup script cannot be read
    pub fn new(args: Args, today: NaiveDate) -> Result<Self, IngestError> {
        let mut combined_sql_script = String::new();
        if let Some(db_startup_script) = &args.db_startup_script {
            for file in db_startup_script.split(';') {
                let file = file.trim();
                if file.is_empty() {
                    continue;
                }
                let script = fs::read_to_string(file).map_err(|e| {
                    IngestError::Config(format!("Failed to read SQL startup script '{file}': {e}"))
                })?;
                combined_sql_script.push_str(&script);
                combined_sql_script.push('\n');
            }
        }

        let seasons = if args.seasons.is_empty() {
            vec![current_season_year(today)]
        } else {
            args.seasons
        };

        Ok(CleanArgs {
            unit: args.unit,
            db_type: args.db_type,
            db_host: args.db_host,
            db_port: args.db_port,
            db_user: args.db_user,
            db_password: args.db_password,
            db_name: args.db_name,
            db_startup_script: args.db_startup_script,
            combined_sql_script,
            init_schema: args.init_schema,
            api_base_url: args.api_base_url,
            live_api_base_url: args.live_api_base_url,
            http_timeout_secs: args.http_timeout_secs,
            config: IngestConfig {
                competition: args.competition,
                seasons,
                page_size: args.page_size,
                log_dir: PathBuf::from(args.log_dir),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["bdc-ingest", "--db-name", "ingest.db"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).expect("arguments parse")
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("bdc_ingest_{name}_{}", std::process::id()));
        fs::create_dir_all(&dir).expect("scratch dir");
        dir
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date")
    }

    #[test]
    fn startup_scripts_are_concatenated() {
        let dir = scratch_dir("scripts");
        let first = dir.join("a.sql");
        let second = dir.join("b.sql");
        fs::write(&first, "CREATE TABLE a (id INTEGER);").expect("script written");
        fs::write(&second, "CREATE TABLE b (id INTEGER);").expect("script written");
        let scripts = format!("{};{}", first.display(), second.display());

        let clean = CleanArgs::new(parse(&["--db-startup-script", &scripts]), today())
            .expect("scripts readable");
        assert!(clean.combined_sql_script.contains("CREATE TABLE a"));
        assert!(clean.combined_sql_script.contains("CREATE TABLE b"));
        assert_eq!(clean.config.seasons, vec![current_season_year(today())]);
    }

    #[test]
    fn unreadable_startup_script_is_an_error() {
        let dir = scratch_dir("vanished");
        let script = dir.join("startup.sql");
        fs::write(&script, "SELECT 1;").expect("script written");
        let args = parse(&["--db-startup-script", &script.display().to_string()]);
        fs::remove_file(&script).expect("script removed");

        let err = CleanArgs::new(args, today()).expect_err("missing script must fail");
        assert!(matches!(err, IngestError::Config(ref msg) if msg.contains("startup.sql")));
    }
}
