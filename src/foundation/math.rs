pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Normalized progress of `t` through the window `[start, start + duration]`.
///
/// A non-positive `duration` snaps to 1 once the window has started.
pub fn window_progress(t: f64, start: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return if t >= start { 1.0 } else { 0.0 };
    }
    ((t - start) / duration).clamp(0.0, 1.0)
}

/// `target * eased`, truncated toward zero.
pub fn count_up(target: u64, eased: f64) -> u64 {
    let v = (target as f64) * eased.clamp(0.0, 1.0);
    (v.floor().max(0.0) as u64).min(target)
}

/// Signed variant of [`count_up`]; the magnitude never exceeds `|target|`.
pub fn count_up_signed(target: i64, eased: f64) -> i64 {
    let v = ((target as f64) * eased.clamp(0.0, 1.0)).trunc() as i64;
    if target >= 0 {
        v.clamp(0, target)
    } else {
        v.clamp(target, 0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
