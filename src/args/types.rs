use crate::client::{DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT, FEEDS_API_BASE, LIVE_API_BASE};
use crate::config::IngestConfig;
use crate::pipeline::UnitName;
use crate::storage::DatabaseType;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Run only this unit. Without it every unit runs in dependency order.
    #[arg(value_enum)]
    pub unit: Option<UnitName>,

    /// Database type: sqlite or postgres
    #[arg(
        short = 'd',
        long,
        env = "DB_TYPE",
        value_name = "DATABASE_TYPE",
        default_value = "Sqlite",
        value_parser = clap::value_parser!(DatabaseType)
    )]
    pub db_type: DatabaseType,
    // Only necessary for postgres.
    #[arg(long, env = "DB_HOST", value_name = "DATABASE_HOST", default_value = "localhost")]
    pub db_host: Option<String>,
    #[arg(short = 'p', long, env = "DB_PORT", value_name = "DATABASE_PORT", default_value = "5432")]
    pub db_port: Option<u16>,
    #[arg(short = 'u', long, env = "DB_USER", value_name = "DATABASE_USER", default_value = "postgres")]
    pub db_user: Option<String>,
    /// Password, or the path of a secrets file holding it.
    #[arg(short = 'w', long, env = "DB_PASSWORD", value_name = "DATABASE_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// For postgres, the name of the database. For sqlite, the filename.
    #[arg(short = 'n', long, env = "DB_NAME", value_name = "DATABASE_NAME")]
    pub db_name: String,
    /// Semicolon-separated sql files run on startup, before any unit.
    #[arg(long, value_name = "DATABASE_STARTUP_SCRIPT", value_parser = crate::args::validation::check_readable_file)]
    pub db_startup_script: Option<String>,
    /// Create missing tables from the bundled schema.
    #[arg(long)]
    pub init_schema: bool,

    #[arg(short = 'c', long, env = "COMPETITION", default_value = "E")]
    pub competition: String,
    /// Season start year; repeat for several. Defaults to the running season.
    #[arg(short = 's', long = "season", value_name = "YEAR", value_parser = crate::args::validation::check_season_year)]
    pub seasons: Vec<i32>,
    #[arg(long, env = "API_BASE_URL", default_value = FEEDS_API_BASE)]
    pub api_base_url: String,
    #[arg(long, env = "LIVE_API_BASE_URL", default_value = LIVE_API_BASE)]
    pub live_api_base_url: String,
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub http_timeout_secs: u64,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = crate::args::validation::check_page_size)]
    pub page_size: usize,
    /// Directory for the dated run logs.
    #[arg(long, env = "INGEST_LOG_DIR", default_value = "logs")]
    pub log_dir: String,
}

#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub unit: Option<UnitName>,
    pub db_type: DatabaseType,
    pub db_host: Option<String>,
    pub db_port: Option<u16>,
    pub db_user: Option<String>,
    pub db_password: Option<String>,
    pub db_name: String,
    pub db_startup_script: Option<String>,
    pub combined_sql_script: String,
    pub init_schema: bool,
    pub api_base_url: String,
    pub live_api_base_url: String,
    pub http_timeout_secs: u64,
    pub config: IngestConfig,
}
