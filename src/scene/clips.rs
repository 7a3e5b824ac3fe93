use std::f64::consts::PI;

use crate::animation::ease::Ease;
use crate::animation::reveal::Reveal;
use crate::config::{AnimationThresholds, Palette, RenderConfig};
use crate::foundation::core::{Rect, Rgb8};
use crate::foundation::format::{ordinal, signed_delta, thousands};
use crate::foundation::math::{count_up, count_up_signed};
use crate::scene::model::{ElementKey, FrameScene, HAlign, LayoutSpace, TextItem};
use crate::stats::record::MONTH_ABBREVIATIONS;
use crate::timeline::clip::{
    BarChartClip, ClipDef, ClipKind, CountUpClip, IntroClip, LeaderboardClip, LinesClip,
    OutroClip, TimeGridClip,
};

const ADDED_GREEN: Rgb8 = Rgb8::new(29, 185, 84);
const DELETED_RED: Rgb8 = Rgb8::new(231, 76, 60);

const CHART_HEIGHT: f64 = 800.0;
const CHART_SIDE_MARGIN: f64 = 80.0;
/// Headroom above the tallest bar for its value label.
const CHART_LABEL_HEADROOM: f64 = 80.0;

/// Whole-pixel slide offset: `distance * (1 - eased)`, truncated.
fn slide(distance: f64, eased: f64) -> f64 {
    (distance * (1.0 - eased)).trunc()
}

struct Ctx<'a> {
    layout: LayoutSpace,
    palette: &'a Palette,
    thresholds: &'a AnimationThresholds,
}

impl Ctx<'_> {
    fn cy(&self) -> f64 {
        self.layout.center_y()
    }

    fn w(&self) -> f64 {
        self.layout.width
    }
}

impl ClipDef {
    /// Evaluate this clip at local time `t` seconds.
    ///
    /// Pure: the same clip, time and config always produce the same scene.
    pub fn scene_at(&self, t: f64, cfg: &RenderConfig) -> FrameScene {
        let ctx = Ctx {
            layout: LayoutSpace::for_canvas(cfg.canvas),
            palette: &cfg.palette,
            thresholds: &cfg.animation,
        };
        let mut scene = FrameScene::new(ctx.layout, self.gradient, self.fade_factor(t));
        match &self.kind {
            ClipKind::Intro(c) => intro(&mut scene, c, t, &ctx),
            ClipKind::CountUp(c) => count_up_metric(&mut scene, c, t, &ctx),
            ClipKind::Leaderboard(c) => leaderboard(&mut scene, c, t, &ctx),
            ClipKind::TimeGrid(c) => time_grid(&mut scene, c, t, &ctx),
            ClipKind::LinesOfCode(c) => lines_of_code(&mut scene, *c, t, &ctx),
            ClipKind::BarChart(c) => bar_chart(&mut scene, c, t, &ctx),
            ClipKind::Outro(c) => outro(&mut scene, *c, t, &ctx),
        }
        scene
    }
}

fn intro(scene: &mut FrameScene, c: &IntroClip, t: f64, ctx: &Ctx<'_>) {
    let cy = ctx.cy();

    // The year is on screen from the first frame.
    let e = Reveal::cubic(0.0, 1.5).progress(t).unwrap_or(0.0);
    scene.push(TextItem::new(
        ElementKey::YearNumeral,
        c.year.to_string(),
        (120.0 + 80.0 * e).trunc(),
        ctx.palette.primary,
        HAlign::Center,
        cy - 200.0 + slide(50.0, e),
    ));

    if let Some(e) = Reveal::cubic(1.0, 1.0).progress(t) {
        scene.push(
            TextItem::new(
                ElementKey::RepoName,
                c.repo.as_str(),
                64.0,
                ctx.palette.text,
                HAlign::Center,
                cy + 50.0 + slide(30.0, e),
            )
            .with_opacity(e),
        );
    }

    if let Some(e) = Reveal::cubic(1.5, 0.8).progress(t) {
        scene.push(TextItem::new(
            ElementKey::WrappedLabel,
            "WRAPPED",
            50.0,
            ctx.palette.secondary,
            HAlign::Center,
            cy + 140.0 + slide(20.0, e),
        ));
    }
}

fn count_up_metric(scene: &mut FrameScene, c: &CountUpClip, t: f64, ctx: &Ctx<'_>) {
    let cy = ctx.cy();
    scene.push(TextItem::new(
        ElementKey::Title,
        c.title.as_str(),
        38.0,
        ctx.palette.secondary,
        HAlign::Center,
        cy - 200.0,
    ));

    let numeral = Reveal::cubic(0.3, 2.0);
    if let (Some(p), Some(e)) = (numeral.raw(t), numeral.progress(t)) {
        let b = ctx.thresholds.bounce_window_start;
        let mut y = cy - 80.0;
        if p > b {
            y += (((p - b) / (1.0 - b) * PI).sin() * 5.0).trunc();
        }
        scene.push(TextItem::new(
            ElementKey::Numeral,
            thousands(count_up(c.target, e)),
            140.0,
            ctx.palette.primary,
            HAlign::Center,
            y,
        ));
    }

    if let Some(subtitle) = c.subtitle.as_deref().filter(|s| !s.is_empty())
        && let Some(p) = Reveal::linear(2.5, 0.8).progress(t)
    {
        scene.push(TextItem::new(
            ElementKey::Subtitle,
            subtitle,
            36.0,
            ctx.palette.text,
            HAlign::Center,
            cy + 120.0 + slide(20.0, p),
        ));
    }
}

fn leaderboard(scene: &mut FrameScene, c: &LeaderboardClip, t: f64, ctx: &Ctx<'_>) {
    let cy = ctx.cy();
    scene.push(TextItem::new(
        ElementKey::Title,
        "TOP CONTRIBUTORS",
        38.0,
        ctx.palette.secondary,
        HAlign::Center,
        cy - 350.0,
    ));

    const ROW_HEIGHT: f64 = 90.0;
    let total = c.rows.len() as f64 * ROW_HEIGHT;
    let start_y = cy - (total / 2.0).floor() + 50.0;

    for (i, row) in c.rows.iter().enumerate() {
        let Some(e) = Reveal::staggered(0.8, 0.5, i, 0.4, Ease::OutCubic).progress(t) else {
            continue;
        };
        let y = start_y + i as f64 * ROW_HEIGHT;
        let dx = slide(50.0, e);
        scene.push(TextItem::new(
            ElementKey::RowLabel(i),
            format!("{}  {}", ordinal(i + 1), row.name),
            40.0,
            ctx.palette.text,
            HAlign::Left(120.0 + dx),
            y,
        ));
        scene.push(TextItem::new(
            ElementKey::RowValue(i),
            thousands(row.commits),
            32.0,
            ctx.palette.primary,
            HAlign::Right(ctx.w() - 120.0 - dx),
            y + 5.0,
        ));
    }
}

fn time_grid(scene: &mut FrameScene, c: &TimeGridClip, t: f64, ctx: &Ctx<'_>) {
    let cy = ctx.cy();
    scene.push(TextItem::new(
        ElementKey::Title,
        "WHEN YOU CODED",
        36.0,
        ctx.palette.secondary,
        HAlign::Center,
        cy - 400.0,
    ));

    const ITEM_HEIGHT: f64 = 160.0;
    let total = c.items.len() as f64 * ITEM_HEIGHT;
    let start_y = cy - (total / 2.0).floor() + 50.0;

    for (i, item) in c.items.iter().enumerate() {
        let Some(e) = Reveal::staggered(0.5, 0.7, i, 0.5, Ease::OutCubic).progress(t) else {
            continue;
        };
        let y = start_y + i as f64 * ITEM_HEIGHT;
        scene.push(TextItem::new(
            ElementKey::GridLabel(i),
            item.label.as_str(),
            28.0,
            ctx.palette.secondary,
            HAlign::Center,
            y,
        ));
        let color = if i % 2 == 0 {
            ctx.palette.primary
        } else {
            ctx.palette.text
        };
        scene.push(TextItem::new(
            ElementKey::GridValue(i),
            item.value.as_str(),
            52.0,
            color,
            HAlign::Center,
            y + 45.0 + slide(15.0, e),
        ));
    }
}

fn lines_of_code(scene: &mut FrameScene, c: LinesClip, t: f64, ctx: &Ctx<'_>) {
    let cy = ctx.cy();
    let secondary = ctx.palette.secondary;
    scene.push(TextItem::new(
        ElementKey::Title,
        "LINES OF CODE",
        36.0,
        secondary,
        HAlign::Center,
        cy - 350.0,
    ));

    if let Some(e) = Reveal::cubic(0.5, 1.5).progress(t) {
        scene.push(TextItem::new(
            ElementKey::Added,
            format!("+{}", thousands(count_up(c.added, e))),
            60.0,
            ADDED_GREEN,
            HAlign::Center,
            cy - 220.0,
        ));
        scene.push(TextItem::new(
            ElementKey::AddedLabel,
            "lines added",
            28.0,
            secondary,
            HAlign::Center,
            cy - 140.0,
        ));
    }

    if let Some(e) = Reveal::cubic(1.5, 1.5).progress(t) {
        scene.push(TextItem::new(
            ElementKey::Deleted,
            format!("-{}", thousands(count_up(c.deleted, e))),
            60.0,
            DELETED_RED,
            HAlign::Center,
            cy - 40.0,
        ));
        scene.push(TextItem::new(
            ElementKey::DeletedLabel,
            "lines deleted",
            28.0,
            secondary,
            HAlign::Center,
            cy + 40.0,
        ));
    }

    if let Some(e) = Reveal::cubic(3.0, 0.8).progress(t) {
        let net = c.net();
        let color = if net >= 0 { ADDED_GREEN } else { DELETED_RED };
        let dy = slide(20.0, e);
        scene.push(TextItem::new(
            ElementKey::NetLabel,
            "Net change",
            28.0,
            secondary,
            HAlign::Center,
            cy + 140.0 + dy,
        ));
        scene.push(TextItem::new(
            ElementKey::Net,
            signed_delta(count_up_signed(net, e)),
            60.0,
            color,
            HAlign::Center,
            cy + 200.0 + dy,
        ));
    }
}

/// Bar geometry in layout units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartGeometry {
    pub left: f64,
    pub top: f64,
    pub bottom: f64,
    pub bar_width: f64,
    pub bar_spacing: f64,
    pub capacity: f64,
}

impl ChartGeometry {
    pub fn new(layout: LayoutSpace) -> Self {
        let chart_width = layout.width - 2.0 * CHART_SIDE_MARGIN;
        let bar_width = (chart_width / 14.0).floor();
        let bar_spacing = ((chart_width - bar_width * 12.0) / 13.0).floor();
        let top = layout.center_y() - 350.0;
        Self {
            left: CHART_SIDE_MARGIN,
            top,
            bottom: top + CHART_HEIGHT,
            bar_width,
            bar_spacing,
            capacity: CHART_HEIGHT - CHART_LABEL_HEADROOM,
        }
    }

    pub fn bar_x(&self, i: usize) -> f64 {
        self.left + i as f64 * (self.bar_width + self.bar_spacing) + self.bar_spacing
    }

    /// `(value / max) * capacity * eased`, truncated; all zero when `max == 0`.
    pub fn bar_height(&self, value: u64, max: u64, eased: f64) -> f64 {
        if max == 0 {
            return 0.0;
        }
        (value as f64 / max as f64 * self.capacity * eased).trunc()
    }
}

fn bar_chart(scene: &mut FrameScene, c: &BarChartClip, t: f64, ctx: &Ctx<'_>) {
    scene.push(TextItem::new(
        ElementKey::Title,
        "COMMITS BY MONTH",
        36.0,
        ctx.palette.text,
        HAlign::Center,
        ctx.cy() - 500.0,
    ));

    let geo = ChartGeometry::new(ctx.layout);
    let max = c.values.iter().copied().max().unwrap_or(0);

    for (i, (&value, month)) in c.values.iter().zip(MONTH_ABBREVIATIONS).enumerate() {
        let reveal = Reveal::staggered(0.5, 0.15, i, 1.0, Ease::OutCubic);
        let (Some(p), Some(e)) = (reveal.raw(t), reveal.progress(t)) else {
            continue;
        };
        let x = geo.bar_x(i);
        let height = geo.bar_height(value, max, e);
        let y = geo.bottom - height;
        scene.rect(
            ElementKey::Bar(i),
            Rect::new(x, y, x + geo.bar_width, geo.bottom),
            ctx.palette.primary,
        );

        let span = HAlign::CenterIn {
            left: x,
            width: geo.bar_width,
        };
        scene.push(TextItem::new(
            ElementKey::MonthLabel(i),
            month,
            22.0,
            ctx.palette.secondary,
            span,
            geo.bottom + 12.0,
        ));
        if p > ctx.thresholds.bar_label_min_progress && value > 0 {
            scene.push(TextItem::new(
                ElementKey::BarValue(i),
                thousands(value),
                18.0,
                ctx.palette.text,
                span,
                y - 28.0,
            ));
        }
    }
}

fn outro(scene: &mut FrameScene, c: OutroClip, t: f64, ctx: &Ctx<'_>) {
    let cy = ctx.cy();

    if let Some(e) = Reveal::cubic(0.3, 0.8).progress(t) {
        scene.push(TextItem::new(
            ElementKey::Title,
            "THAT'S A WRAP",
            56.0,
            ctx.palette.text,
            HAlign::Center,
            cy - 300.0 + slide(30.0, e),
        ));
    }

    if let Some(e) = Reveal::new(0.8, 0.6, Ease::OutElastic).progress(t) {
        scene.push(TextItem::new(
            ElementKey::YearNumeral,
            c.year.to_string(),
            (130.0 * (0.6 + 0.4 * e)).trunc().max(1.0),
            ctx.palette.primary,
            HAlign::Center,
            cy - 180.0,
        ));
    }

    let lines = [
        format!("{} commits", thousands(c.commits)),
        format!("{} PRs merged", thousands(c.prs)),
        format!("{} releases", thousands(c.releases)),
    ];
    for (i, line) in lines.into_iter().enumerate() {
        if let Some(e) = Reveal::staggered(1.8, 0.4, i, 0.4, Ease::OutCubic).progress(t) {
            scene.push(TextItem::new(
                ElementKey::StatLine(i),
                line,
                38.0,
                ctx.palette.text,
                HAlign::Center,
                cy + 30.0 + i as f64 * 60.0 + slide(20.0, e),
            ));
        }
    }

    if let Some(p) = Reveal::linear(3.5, 0.6).progress(t) {
        scene.push(
            TextItem::new(
                ElementKey::Footer,
                format!("Here's to shipping more in {}", c.year + 1),
                32.0,
                ctx.palette.secondary,
                HAlign::Center,
                cy + 280.0,
            )
            .with_opacity(p),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/clips.rs"]
mod tests;
