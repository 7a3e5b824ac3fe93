use crate::animation::ease::Ease;
use crate::foundation::math::window_progress;

/// A staggered reveal window: the element is absent before `start`, then its eased progress
/// runs from 0 to 1 over `duration` seconds and holds at 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reveal {
    pub start: f64,
    pub duration: f64,
    pub ease: Ease,
}

impl Reveal {
    pub const fn new(start: f64, duration: f64, ease: Ease) -> Self {
        Self {
            start,
            duration,
            ease,
        }
    }

    pub const fn cubic(start: f64, duration: f64) -> Self {
        Self::new(start, duration, Ease::OutCubic)
    }

    pub const fn linear(start: f64, duration: f64) -> Self {
        Self::new(start, duration, Ease::Linear)
    }

    /// `i`-th member of a stagger group starting at `first` and spaced by `step`.
    pub fn staggered(first: f64, step: f64, i: usize, duration: f64, ease: Ease) -> Self {
        Self::new(first + step * i as f64, duration, ease)
    }

    /// Raw clamped progress, or `None` while the element is still hidden.
    pub fn raw(&self, t: f64) -> Option<f64> {
        if t < self.start {
            return None;
        }
        Some(window_progress(t, self.start, self.duration))
    }

    /// Eased progress, or `None` while the element is still hidden.
    pub fn progress(&self, t: f64) -> Option<f64> {
        self.raw(t).map(|p| self.ease.apply(p))
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration.max(0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/reveal.rs"]
mod tests;
