use std::ops::Range;

use crate::foundation::core::{Fps, FrameIndex, Rgb8};
use crate::foundation::error::{WrappedError, WrappedResult};
use crate::stats::record::ContributorCount;

/// Vertical two-colour background; `top` at row 0 and `bottom` at the last row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Gradient {
    pub top: Rgb8,
    pub bottom: Rgb8,
}

impl Gradient {
    pub fn new(top: &str, bottom: &str) -> WrappedResult<Self> {
        Ok(Self {
            top: Rgb8::from_hex(top)?,
            bottom: Rgb8::from_hex(bottom)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntroClip {
    pub year: i32,
    /// Already upper-cased display name.
    pub repo: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CountUpClip {
    pub title: String,
    pub target: u64,
    pub subtitle: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LeaderboardClip {
    /// At most five rows, in rank order.
    pub rows: Vec<ContributorCount>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimeGridItem {
    pub label: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimeGridClip {
    pub items: Vec<TimeGridItem>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinesClip {
    pub added: u64,
    pub deleted: u64,
}

impl LinesClip {
    pub fn net(self) -> i64 {
        let added = i64::try_from(self.added).unwrap_or(i64::MAX);
        let deleted = i64::try_from(self.deleted).unwrap_or(i64::MAX);
        added.saturating_sub(deleted)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarChartClip {
    /// Commits per calendar month, January first.
    pub values: [u64; 12],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutroClip {
    pub year: i32,
    pub commits: u64,
    pub prs: u64,
    pub releases: u64,
}

/// Closed set of slide layouts. Each variant carries the constants bound by the builder.
#[derive(Clone, Debug, PartialEq)]
pub enum ClipKind {
    Intro(IntroClip),
    CountUp(CountUpClip),
    Leaderboard(LeaderboardClip),
    TimeGrid(TimeGridClip),
    LinesOfCode(LinesClip),
    BarChart(BarChartClip),
    Outro(OutroClip),
}

/// One ready-to-render slide: stateless, evaluated at any local time.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipDef {
    /// Stable slot name (`"intro"`, `"commits"`, ...).
    pub id: &'static str,
    pub kind: ClipKind,
    /// Seconds, > 0.
    pub duration: f64,
    pub fps: Fps,
    pub fade_in: f64,
    pub fade_out: f64,
    pub gradient: Gradient,
}

impl ClipDef {
    pub fn frame_count(&self) -> u64 {
        self.fps.secs_to_frames_round(self.duration)
    }

    /// Brightness multiplier toward black: ramps up over `fade_in`, down over the last
    /// `fade_out` seconds.
    pub fn fade_factor(&self, t: f64) -> f64 {
        let mut f = 1.0;
        if self.fade_in > 0.0 && t < self.fade_in {
            f *= (t / self.fade_in).max(0.0);
        }
        let from_end = self.duration - t;
        if self.fade_out > 0.0 && from_end < self.fade_out {
            f *= (from_end / self.fade_out).max(0.0);
        }
        f.clamp(0.0, 1.0)
    }

    /// Local time at which every reveal has finished and the fade-out has not begun.
    pub fn settled_time(&self) -> f64 {
        (self.duration - self.fade_out).max(0.0)
    }

    pub fn validate(&self) -> WrappedResult<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(WrappedError::validation(format!(
                "clip '{}' duration must be > 0",
                self.id
            )));
        }
        for (name, v) in [("fade_in", self.fade_in), ("fade_out", self.fade_out)] {
            if !v.is_finite() || v < 0.0 || v > self.duration {
                return Err(WrappedError::validation(format!(
                    "clip '{}' {name} must be within [0, duration]",
                    self.id
                )));
            }
        }
        if self.frame_count() == 0 {
            return Err(WrappedError::validation(format!(
                "clip '{}' is shorter than one frame",
                self.id
            )));
        }
        Ok(())
    }
}

/// Clips laid end to end with no gaps.
#[derive(Clone, Debug)]
pub struct Timeline {
    clips: Vec<ClipDef>,
    fps: Fps,
    frame_starts: Vec<u64>,
    total_frames: u64,
}

impl Timeline {
    pub fn new(clips: Vec<ClipDef>, fps: Fps) -> WrappedResult<Self> {
        if clips.is_empty() {
            return Err(WrappedError::validation("timeline needs at least one clip"));
        }
        let mut frame_starts = Vec::with_capacity(clips.len());
        let mut total_frames = 0u64;
        for clip in &clips {
            clip.validate()?;
            if clip.fps != fps {
                return Err(WrappedError::validation(format!(
                    "clip '{}' fps differs from timeline fps",
                    clip.id
                )));
            }
            frame_starts.push(total_frames);
            total_frames += clip.frame_count();
        }
        Ok(Self {
            clips,
            fps,
            frame_starts,
            total_frames,
        })
    }

    pub fn clips(&self) -> &[ClipDef] {
        &self.clips
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Sum of clip durations in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.clips.iter().map(|c| c.duration).sum()
    }

    /// Start offset of clip `idx` in seconds.
    pub fn clip_start_secs(&self, idx: usize) -> f64 {
        self.clips.iter().take(idx).map(|c| c.duration).sum()
    }

    pub fn clip_frames(&self, idx: usize) -> Option<Range<u64>> {
        let start = *self.frame_starts.get(idx)?;
        Some(start..start + self.clips[idx].frame_count())
    }

    /// Map a global frame to `(clip index, local seconds)`. Frames past the end yield `None`.
    pub fn locate(&self, frame: FrameIndex) -> Option<(usize, f64)> {
        if frame.0 >= self.total_frames {
            return None;
        }
        let idx = self
            .frame_starts
            .partition_point(|start| *start <= frame.0)
            .saturating_sub(1);
        let local = frame.0 - self.frame_starts[idx];
        Some((idx, self.fps.frames_to_secs(local)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/clip.rs"]
mod tests;
