use super::*;
use crate::foundation::core::{Fps, FrameIndex};
use crate::stats::record::{BiggestPr, ContributorCount};

fn stats() -> StatisticsRecord {
    StatisticsRecord {
        repo_name: "acme/rocket".to_string(),
        year: 2024,
        total_commits: 1234,
        total_prs: 56,
        total_releases: 3,
        days_with_commits: 180,
        top_contributors: vec![ContributorCount {
            name: "amy".to_string(),
            commits: 900,
        }],
        biggest_prs: vec![BiggestPr {
            number: 7,
            title: "Rewrite the entire rendering pipeline from scratch".to_string(),
            lines: 9000,
            author: "amy".to_string(),
        }],
        first_release: "v1.0.0".to_string(),
        last_release: "v1.2.0".to_string(),
        busiest_day: "Tuesday".to_string(),
        busiest_month: "March".to_string(),
        peak_hour: 14,
        weekend_commits: 12,
        ..Default::default()
    }
}

#[test]
fn canonical_order_and_durations() {
    let tl = build_timeline(&stats(), &RenderConfig::default()).unwrap();
    let ids: Vec<&str> = tl.clips().iter().map(|c| c.id).collect();
    assert_eq!(ids, CLIP_SLOTS);
    let durations: Vec<f64> = tl.clips().iter().map(|c| c.duration).collect();
    assert_eq!(durations, [5.0, 5.0, 5.0, 7.0, 6.0, 6.0, 5.0, 7.0, 6.0]);
    assert_eq!(tl.duration_secs(), 52.0);
    assert_eq!(tl.total_frames(), 1560);
}

#[test]
fn fades_are_uniform_except_outro() {
    let tl = build_timeline(&stats(), &RenderConfig::default()).unwrap();
    for clip in &tl.clips()[..8] {
        assert_eq!(clip.fade_in, 0.3);
        assert_eq!(clip.fade_out, 0.5);
    }
    assert_eq!(tl.clips()[8].fade_out, 1.0);
}

#[test]
fn payloads_bind_display_text() {
    let tl = build_timeline(&stats(), &RenderConfig::default()).unwrap();
    match &tl.clips()[0].kind {
        ClipKind::Intro(intro) => assert_eq!(intro.repo, "ROCKET"),
        other => panic!("unexpected {other:?}"),
    }
    match &tl.clips()[2].kind {
        ClipKind::CountUp(c) => assert_eq!(
            c.subtitle.as_deref(),
            Some("Biggest: Rewrite the entire rendering pipeli...")
        ),
        other => panic!("unexpected {other:?}"),
    }
    match &tl.clips()[4].kind {
        ClipKind::TimeGrid(g) => {
            let values: Vec<&str> = g.items.iter().map(|i| i.value.as_str()).collect();
            assert_eq!(values, ["TUESDAY", "MARCH", "14:00", "12"]);
        }
        other => panic!("unexpected {other:?}"),
    }
    match &tl.clips()[6].kind {
        ClipKind::CountUp(c) => assert_eq!(c.subtitle.as_deref(), Some("From v1.0.0 to v1.2.0")),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn release_subtitle_is_omitted_without_releases() {
    let mut s = stats();
    s.first_release.clear();
    s.biggest_prs.clear();
    let tl = build_timeline(&s, &RenderConfig::default()).unwrap();
    for idx in [2, 6] {
        match &tl.clips()[idx].kind {
            ClipKind::CountUp(c) => assert_eq!(c.subtitle, None),
            other => panic!("unexpected {other:?}"),
        }
    }
}

#[test]
fn leaderboard_is_truncated_to_five() {
    let mut s = stats();
    s.top_contributors = (0..8)
        .map(|i| ContributorCount {
            name: format!("dev{i}"),
            commits: 100 - i,
        })
        .collect();
    let tl = build_timeline(&s, &RenderConfig::default()).unwrap();
    match &tl.clips()[3].kind {
        ClipKind::Leaderboard(lb) => {
            assert_eq!(lb.rows.len(), 5);
            assert_eq!(lb.rows[0].name, "dev0");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn chart_gradient_starts_from_palette_background() {
    let cfg = RenderConfig::default();
    let tl = build_timeline(&stats(), &cfg).unwrap();
    assert_eq!(tl.clips()[7].gradient.top, cfg.palette.background);
}

#[test]
fn frame_counts_follow_fps() {
    let cfg = RenderConfig {
        fps: Fps::whole(24).unwrap(),
        ..RenderConfig::default()
    };
    let tl = build_timeline(&stats(), &cfg).unwrap();
    assert_eq!(tl.total_frames(), 52 * 24);
    assert_eq!(tl.locate(FrameIndex(120)), Some((1, 0.0)));
}

#[test]
fn weekend_commits_are_grouped() {
    let mut s = stats();
    s.weekend_commits = 12_345;
    let tl = build_timeline(&s, &RenderConfig::default()).unwrap();
    match &tl.clips()[4].kind {
        ClipKind::TimeGrid(g) => assert_eq!(g.items[3].value, "12,345"),
        other => panic!("unexpected {other:?}"),
    }
}
