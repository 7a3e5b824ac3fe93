//! Spoken script for each slide, in slide order.
//!
//! Synthesizing speech is somebody else's job; this only produces the text that goes to the
//! speech service and is matched back to clips by position.

use crate::foundation::format::thousands;
use crate::stats::record::StatisticsRecord;
use crate::timeline::builder::CLIP_SLOTS;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct NarrationLine {
    /// Clip slot the line is read over.
    pub clip: &'static str,
    pub text: String,
}

/// One sentence group per clip, aligned with [`CLIP_SLOTS`].
pub fn narration_script(stats: &StatisticsRecord) -> Vec<NarrationLine> {
    let texts = [
        format!(
            "Welcome to {} {} Wrapped. Let's see what your team shipped this year.",
            stats.short_name(),
            stats.year
        ),
        format!(
            "Your team made {} commits this year, across {} different days.",
            thousands(stats.total_commits),
            stats.days_with_commits
        ),
        pull_requests_line(stats),
        leaderboard_line(stats),
        format!(
            "Your team coded the most on {}s. {} was the busiest month with {} commits. \
             Only {} commits happened on weekends.",
            stats.busiest_day,
            stats.busiest_month,
            stats.month_commits(&stats.busiest_month),
            stats.weekend_commits
        ),
        format!(
            "Your team added {} lines and deleted {}. That's a net change of {} lines.",
            thousands(stats.lines_added),
            thousands(stats.lines_deleted),
            thousands(stats.net_lines().unsigned_abs())
        ),
        releases_line(stats),
        format!(
            "Here's how your commit activity looked throughout the year. \
             {} was clearly the most productive month.",
            stats.busiest_month
        ),
        format!(
            "That's a wrap on {}! {} commits, {} pull requests, and {} releases. \
             Here's to shipping even more next year.",
            stats.year,
            thousands(stats.total_commits),
            stats.total_prs,
            stats.total_releases
        ),
    ];

    CLIP_SLOTS
        .into_iter()
        .zip(texts)
        .map(|(clip, text)| NarrationLine { clip, text })
        .collect()
}

fn pull_requests_line(stats: &StatisticsRecord) -> String {
    let mut line = format!("{} pull requests were merged this year.", stats.total_prs);
    if let Some(pr) = stats.biggest_pr() {
        line.push_str(&format!(
            " The biggest one touched over {} lines of code.",
            thousands(pr.lines)
        ));
    }
    line
}

fn leaderboard_line(stats: &StatisticsRecord) -> String {
    let (name, commits) = stats
        .top_contributor()
        .map(|c| (c.name.as_str(), c.commits))
        .unwrap_or(("Unknown", 0));
    format!("Your top contributor was {name} with {commits} commits. Here's the full leaderboard.")
}

fn releases_line(stats: &StatisticsRecord) -> String {
    if stats.has_release_range() {
        format!(
            "You shipped {} releases this year, from {} all the way to {}.",
            stats.total_releases, stats.first_release, stats.last_release
        )
    } else {
        format!("You shipped {} releases this year.", stats.total_releases)
    }
}

#[cfg(test)]
#[path = "../tests/unit/narration/narration.rs"]
mod tests;
