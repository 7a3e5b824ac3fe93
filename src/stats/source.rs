use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{WrappedError, WrappedResult};
use crate::stats::record::StatisticsRecord;

/// Produces the statistics record for one repository and year.
///
/// The renderer never talks to git or a hosting platform directly; whatever gathers the numbers
/// sits behind this trait.
pub trait StatsSource {
    fn collect(&self, repo: &Path, year: i32) -> WrappedResult<StatisticsRecord>;
}

/// Reads a record previously written to disk by an external collector.
#[derive(Clone, Debug)]
pub struct JsonStatsFile {
    path: PathBuf,
}

impl JsonStatsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load without checking the year.
    pub fn load(&self) -> WrappedResult<StatisticsRecord> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("read stats file '{}'", self.path.display()))?;
        let record = StatisticsRecord::from_json_str(&text)?;
        record.validate()?;
        Ok(record)
    }
}

impl StatsSource for JsonStatsFile {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    fn collect(&self, repo: &Path, year: i32) -> WrappedResult<StatisticsRecord> {
        let record = self.load()?;
        if record.year != year {
            return Err(WrappedError::validation(format!(
                "stats file '{}' covers {}, expected {year}",
                self.path.display(),
                record.year
            )));
        }
        tracing::debug!(repo = %repo.display(), commits = record.total_commits, "loaded stats");
        Ok(record)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stats/source.rs"]
mod tests;
