use crate::config::RenderConfig;
use crate::foundation::core::Rgb8;
use crate::foundation::error::WrappedResult;
use crate::foundation::format::{ellipsize, thousands};
use crate::stats::record::StatisticsRecord;
use crate::timeline::clip::{
    BarChartClip, ClipDef, ClipKind, CountUpClip, Gradient, IntroClip, LeaderboardClip, LinesClip,
    OutroClip, TimeGridClip, TimeGridItem, Timeline,
};

const FADE_IN: f64 = 0.3;
const FADE_OUT: f64 = 0.5;
const OUTRO_FADE_OUT: f64 = 1.0;
const LEADERBOARD_ROWS: usize = 5;
const PR_TITLE_MAX_CHARS: usize = 35;

/// Bind the statistics to the canonical nine-slide sequence.
///
/// Nothing is rendered here; each [`ClipDef`] is evaluated later, frame by frame.
#[tracing::instrument(skip_all, fields(repo = %stats.repo_name, year = stats.year))]
pub fn build_timeline(stats: &StatisticsRecord, cfg: &RenderConfig) -> WrappedResult<Timeline> {
    let fps = cfg.fps;
    let clip = |id: &'static str, kind: ClipKind, duration: f64, gradient: Gradient| ClipDef {
        id,
        kind,
        duration,
        fps,
        fade_in: FADE_IN,
        fade_out: FADE_OUT,
        gradient,
    };

    let mut clips = vec![
        clip(
            "intro",
            ClipKind::Intro(IntroClip {
                year: stats.year,
                repo: stats.short_name().to_uppercase(),
            }),
            5.0,
            Gradient::new("#1a1a2e", "#16213e")?,
        ),
        clip(
            "commits",
            ClipKind::CountUp(CountUpClip {
                title: "TOTAL COMMITS".to_string(),
                target: stats.total_commits,
                subtitle: Some(format!(
                    "across {} different days",
                    stats.days_with_commits
                )),
            }),
            5.0,
            Gradient::new("#1a1a2e", "#0f0f23")?,
        ),
        clip(
            "pull_requests",
            ClipKind::CountUp(CountUpClip {
                title: "PULL REQUESTS MERGED".to_string(),
                target: stats.total_prs,
                subtitle: stats
                    .biggest_pr()
                    .map(|pr| format!("Biggest: {}", ellipsize(&pr.title, PR_TITLE_MAX_CHARS))),
            }),
            5.0,
            Gradient::new("#0f0f23", "#0f3460")?,
        ),
        clip(
            "leaderboard",
            ClipKind::Leaderboard(LeaderboardClip {
                rows: stats
                    .top_contributors
                    .iter()
                    .take(LEADERBOARD_ROWS)
                    .cloned()
                    .collect(),
            }),
            7.0,
            Gradient::new("#16213e", "#1a1a2e")?,
        ),
        clip(
            "time_of_day",
            ClipKind::TimeGrid(time_grid(stats)),
            6.0,
            Gradient::new("#1a1a2e", "#0f0f23")?,
        ),
        clip(
            "lines_of_code",
            ClipKind::LinesOfCode(LinesClip {
                added: stats.lines_added,
                deleted: stats.lines_deleted,
            }),
            6.0,
            Gradient::new("#0f3460", "#1a1a2e")?,
        ),
        clip(
            "releases",
            ClipKind::CountUp(CountUpClip {
                title: "RELEASES SHIPPED".to_string(),
                target: stats.total_releases,
                subtitle: stats.has_release_range().then(|| {
                    format!("From {} to {}", stats.first_release, stats.last_release)
                }),
            }),
            5.0,
            Gradient::new("#16213e", "#1a1a2e")?,
        ),
        clip(
            "activity_chart",
            ClipKind::BarChart(BarChartClip {
                values: stats.monthly_series(),
            }),
            7.0,
            Gradient {
                top: cfg.palette.background,
                bottom: Rgb8::from_hex("#1a1a2e")?,
            },
        ),
        clip(
            "outro",
            ClipKind::Outro(OutroClip {
                year: stats.year,
                commits: stats.total_commits,
                prs: stats.total_prs,
                releases: stats.total_releases,
            }),
            6.0,
            Gradient::new("#16213e", "#1a1a2e")?,
        ),
    ];
    if let Some(outro) = clips.last_mut() {
        outro.fade_out = OUTRO_FADE_OUT;
    }

    let timeline = Timeline::new(clips, fps)?;
    tracing::debug!(
        clips = timeline.len(),
        frames = timeline.total_frames(),
        secs = timeline.duration_secs(),
        "timeline built"
    );
    Ok(timeline)
}

fn time_grid(stats: &StatisticsRecord) -> TimeGridClip {
    let item = |label: &str, value: String| TimeGridItem {
        label: label.to_string(),
        value,
    };
    TimeGridClip {
        items: vec![
            item("Busiest Day", stats.busiest_day.to_uppercase()),
            item("Busiest Month", stats.busiest_month.to_uppercase()),
            item("Peak Hour", format!("{}:00", stats.peak_hour)),
            item("Weekend Commits", thousands(stats.weekend_commits)),
        ],
    }
}

/// Slot names in canonical order; narration files and scripts are indexed by these positions.
pub const CLIP_SLOTS: [&str; 9] = [
    "intro",
    "commits",
    "pull_requests",
    "leaderboard",
    "time_of_day",
    "lines_of_code",
    "releases",
    "activity_chart",
    "outro",
];

#[cfg(test)]
#[path = "../../tests/unit/timeline/builder.rs"]
mod tests;
