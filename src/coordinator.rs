use crate::error::IngestError;
use crate::pipeline::{Context, UnitName, UnitReport, run_unit};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, warn};

#[must_use]
pub fn log_file_name(date: NaiveDate) -> String {
    format!("ingest_{}.log", date.format("%Y-%m-%d"))
}

/// The dated run log. Appended to, so several runs on one day share a file.
#[derive(Debug)]
pub struct RunLog {
    path: PathBuf,
    file: File,
}

impl RunLog {
    /// # Errors
    ///
    /// Will return `Err` if the directory or file cannot be created
    pub fn open(dir: &Path, date: NaiveDate) -> Result<Self, IngestError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(log_file_name(date));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A failed write is reported but never stops the run.
    pub fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.file, "{text}").and_then(|()| self.file.flush()) {
            warn!("could not write run log {}: {e}", self.path.display());
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub reports: Vec<UnitReport>,
    /// Units that aborted, with the reason.
    pub aborted: Vec<(UnitName, String)>,
}

impl RunSummary {
    #[must_use]
    pub fn report(&self, unit: UnitName) -> Option<&UnitReport> {
        self.reports.iter().find(|r| r.unit == unit)
    }
}

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Runs `units` in the given order. A unit that aborts is logged and the
/// next one still runs.
pub async fn run_units(ctx: &Context<'_>, units: &[UnitName], log: &mut RunLog) -> RunSummary {
    let mut summary = RunSummary::default();
    log.line(&format!("=== Ingest run started at {} ===", timestamp()));
    info!(seasons = ?ctx.config.seasons, competition = %ctx.config.competition, "ingest run started");

    for unit in units {
        log.line(&format!("----- {unit} ({}) -----", timestamp()));
        let started = Instant::now();
        match run_unit(ctx, *unit).await {
            Ok(report) => {
                log.line(&format!("{report} in {:.1}s", started.elapsed().as_secs_f64()));
                summary.reports.push(report);
            }
            Err(e) => {
                error!(unit = %unit, "unit aborted: {e}");
                log.line(&format!("{unit}: aborted: {e}"));
                summary.aborted.push((*unit, e.to_string()));
            }
        }
    }

    log.line("Summary:");
    for report in &summary.reports {
        log.line(&format!("  {report}"));
    }
    for (unit, reason) in &summary.aborted {
        log.line(&format!("  {unit}: aborted ({reason})"));
    }
    match serde_json::to_string(&summary) {
        Ok(json) => log.line(&format!("Summary json: {json}")),
        Err(e) => warn!("could not encode run summary: {e}"),
    }
    log.line(&format!("=== Ingest run finished at {} ===", timestamp()));
    info!(
        units = summary.reports.len(),
        aborted = summary.aborted.len(),
        "ingest run finished"
    );
    summary
}

/// Every unit in dependency order.
pub async fn run_all(ctx: &Context<'_>, log: &mut RunLog) -> RunSummary {
    run_units(ctx, &UnitName::ALL, log).await
}
