//! Human-readable renderings of durations and file sizes.

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Render a duration in seconds as `M:SS`, or `H:MM:SS` once it reaches an hour.
///
/// Zero, negative and non-finite inputs render as `0:00`.
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_owned();
    }

    let hours = (seconds / 3600.0).floor() as u64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Render a byte count with two decimals in the largest unit that keeps the
/// value below 1024. Terabytes are the last unit and absorb anything larger.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let last = SIZE_UNITS.len() - 1;

    for (index, unit) in SIZE_UNITS.iter().enumerate() {
        if size < 1024.0 || index == last {
            return format!("{size:.2} {unit}");
        }
        size /= 1024.0;
    }

    unreachable!("the terminal unit always returns")
}
