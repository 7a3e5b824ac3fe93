use std::f64::consts::PI;

/// Easing functions used to map normalized animation progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// Cubic ease-out; decelerates into the final position.
    OutCubic,
    /// Elastic ease-out; overshoots and oscillates before settling at 1.
    OutElastic,
}

impl Ease {
    /// Apply this easing function to normalized progress `t`, clamped into `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutCubic => ease_out_cubic(t),
            Self::OutElastic => ease_out_elastic(t),
        }
    }
}

/// `1 - (1 - t)^3`.
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// `2^(-10t) * sin((10t - 0.75) * 2π/3) + 1`, exact at both boundaries.
pub fn ease_out_elastic(t: f64) -> f64 {
    if t == 0.0 || t == 1.0 {
        return t;
    }
    let c4 = (2.0 * PI) / 3.0;
    2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
