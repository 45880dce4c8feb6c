//! Pure timing and geometry formulas used by the animated behaviors.

/// `1 - (1 - x)^3`, with `x` clamped to `[0, 1]`.
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Counter value shown `elapsed` ms into a run of `duration` ms.
///
/// Exactly `target` once `elapsed >= duration`.
pub fn counter_value(target: i64, elapsed: f64, duration: f64) -> i64 {
    if elapsed >= duration {
        return target;
    }
    let progress = (elapsed / duration).max(0.0);
    (target as f64 * ease_out_cubic(progress)).floor() as i64
}

/// Linear interpolation from `start` to `end`, floored. Reaches `end` once
/// `elapsed >= duration`.
pub fn linear_value(start: f64, end: f64, elapsed: f64, duration: f64) -> f64 {
    let progress = if duration > 0.0 {
        (elapsed / duration).clamp(0.0, 1.0)
    } else {
        1.0
    };
    (start + (end - start) * progress).floor()
}

/// Document offset that puts an element `header_offset` below the viewport top.
pub fn scroll_destination(rect_top: f64, scroll_y: f64, header_offset: f64) -> f64 {
    rect_top + scroll_y - header_offset
}
