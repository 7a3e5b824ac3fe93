use std::collections::BTreeMap;

use crate::foundation::error::{WrappedError, WrappedResult};

/// Full month names in calendar order, as the collector keys `commits_by_month`.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Three-letter month labels used under the bar chart.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContributorCount {
    pub name: String,
    pub commits: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BiggestPr {
    pub number: u64,
    pub title: String,
    /// Additions plus deletions.
    pub lines: u64,
    #[serde(default)]
    pub author: String,
}

/// One year of repository activity, as produced by an external collector.
///
/// Lists keep the collector's order; nothing here re-sorts them.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StatisticsRecord {
    pub repo_name: String,
    pub year: i32,

    pub total_commits: u64,
    pub total_prs: u64,
    pub total_releases: u64,
    pub lines_added: u64,
    pub lines_deleted: u64,

    pub top_contributors: Vec<ContributorCount>,

    pub commits_by_month: BTreeMap<String, u64>,
    pub commits_by_day: BTreeMap<String, u64>,
    pub commits_by_hour: BTreeMap<u8, u64>,
    pub days_with_commits: u64,
    pub weekend_commits: u64,

    pub busiest_day: String,
    pub busiest_month: String,
    pub peak_hour: u8,

    pub biggest_prs: Vec<BiggestPr>,
    pub first_release: String,
    pub last_release: String,
}

impl StatisticsRecord {
    pub fn from_json_str(s: &str) -> WrappedResult<Self> {
        serde_json::from_str(s).map_err(|e| WrappedError::serde(e.to_string()))
    }

    /// Segment after the last `/` (`"rust-lang/rust"` -> `"rust"`).
    pub fn short_name(&self) -> &str {
        self.repo_name
            .rsplit('/')
            .next()
            .unwrap_or(self.repo_name.as_str())
    }

    pub fn net_lines(&self) -> i64 {
        let added = i64::try_from(self.lines_added).unwrap_or(i64::MAX);
        let deleted = i64::try_from(self.lines_deleted).unwrap_or(i64::MAX);
        added.saturating_sub(deleted)
    }

    /// Commits for a full month name; absent keys count as zero.
    pub fn month_commits(&self, month: &str) -> u64 {
        self.commits_by_month.get(month).copied().unwrap_or(0)
    }

    /// Monthly commit counts in calendar order.
    pub fn monthly_series(&self) -> [u64; 12] {
        MONTH_NAMES.map(|m| self.month_commits(m))
    }

    pub fn biggest_pr(&self) -> Option<&BiggestPr> {
        self.biggest_prs.first()
    }

    pub fn top_contributor(&self) -> Option<&ContributorCount> {
        self.top_contributors.first()
    }

    pub fn has_release_range(&self) -> bool {
        !self.first_release.is_empty()
    }

    pub fn validate(&self) -> WrappedResult<()> {
        if self.repo_name.trim().is_empty() {
            return Err(WrappedError::validation("repo_name must be non-empty"));
        }
        if self.peak_hour > 23 {
            return Err(WrappedError::validation(format!(
                "peak_hour must be in 0..=23, got {}",
                self.peak_hour
            )));
        }
        if let Some(h) = self.commits_by_hour.keys().find(|h| **h > 23) {
            return Err(WrappedError::validation(format!(
                "commits_by_hour key {h} is not an hour of the day"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stats/record.rs"]
mod tests;
