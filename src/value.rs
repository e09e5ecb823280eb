//! Normalization of primitive field values into their wire form.
//!
//! The sitemap sub-specifications bound most numeric fields; out-of-range
//! values are clamped with a warning rather than rejected, so a single
//! bad value never aborts a whole document. Clamping is idempotent and
//! leaves in-range values untouched.

use log::warn;

/// Upper bound for `<video:duration>` in seconds (8 hours).
pub const MAX_VIDEO_DURATION: i64 = 28_800;

/// Maximum star rating for `<video:rating>`.
pub const MAX_VIDEO_RATING: f64 = 5.0;

/// Clamp a url priority into `[0.0, 1.0]`.
pub fn clamp_priority(priority: f64) -> f64 {
    if !(0.0..=1.0).contains(&priority) {
        warn!("adjusting priority as it is out of bounds (0, 1): {priority}");
    }
    priority.clamp(0.0, 1.0)
}

/// Render a (clamped) priority with one decimal place.
pub fn format_priority(priority: f64) -> String {
    format!("{:.1}", clamp_priority(priority))
}

/// Clamp a video duration into `[0, 28800]` seconds.
pub fn clamp_duration(seconds: i64) -> i64 {
    if !(0..=MAX_VIDEO_DURATION).contains(&seconds) {
        warn!("adjusting duration as it is out of bounds (0, 28800): {seconds}");
    }
    seconds.clamp(0, MAX_VIDEO_DURATION)
}

/// Clamp a video rating into `[0.0, 5.0]`.
pub fn clamp_rating(rating: f64) -> f64 {
    if !(0.0..=MAX_VIDEO_RATING).contains(&rating) {
        warn!("adjusting rating as it is out of bounds (0, 5): {rating}");
    }
    rating.clamp(0.0, MAX_VIDEO_RATING)
}

/// Clamp a view count to a non-negative value.
pub fn clamp_view_count(count: i64) -> i64 {
    if count < 0 {
        warn!("adjusting negative view count: {count}");
    }
    count.max(0)
}

/// Render a float with at least one decimal place, so whole-number
/// ratings and prices come out as `5.0` rather than `5`.
pub fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Encode a boolean as the `yes`/`no` tokens the video format uses.
pub fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
