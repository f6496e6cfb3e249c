//! Duration formatting helpers.

/// Render a second count as zero-padded `HH:MM:SS`.
///
/// Negative, NaN and non-finite input renders as `00:00:00`; fractional
/// seconds are dropped. The hour field widens past two digits as needed.
pub fn format_duration(total_seconds: f64) -> String {
    let total = if total_seconds.is_finite() && total_seconds > 0.0 {
        total_seconds.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
