use crate::client::DEFAULT_PAGE_SIZE;
use crate::mapper::season_code;
use chrono::{Datelike, NaiveDate};
use std::path::PathBuf;

/// Settings every unit reads. Built once at startup and passed by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    pub competition: String,
    /// Start years, e.g. 2023 for the 2023-24 season.
    pub seasons: Vec<i32>,
    pub page_size: usize,
    pub log_dir: PathBuf,
}

impl IngestConfig {
    #[must_use]
    pub fn new(competition: &str, seasons: Vec<i32>) -> Self {
        Self {
            competition: competition.to_string(),
            seasons,
            page_size: DEFAULT_PAGE_SIZE,
            log_dir: PathBuf::from("logs"),
        }
    }

    /// `(year, season code)` for each configured season.
    #[must_use]
    pub fn season_codes(&self) -> Vec<(i32, String)> {
        self.seasons
            .iter()
            .map(|year| (*year, season_code(&self.competition, *year)))
            .collect()
    }
}

/// Seasons start in autumn: before July the running season began the year
/// before.
#[must_use]
pub fn current_season_year(today: NaiveDate) -> i32 {
    if today.month() < 7 {
        today.year() - 1
    } else {
        today.year()
    }
}
