use {
    crate::types::SECONDS_PER_DAY,
    chrono::{DateTime, Utc},
    std::time::{SystemTime, UNIX_EPOCH},
};

pub fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

pub fn format_timestamp(timestamp: i64) -> String {
    let datetime = DateTime::<Utc>::from_timestamp(timestamp, 0).unwrap_or_default();
    datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

pub fn format_date(timestamp: i64) -> String {
    let datetime = DateTime::<Utc>::from_timestamp(timestamp, 0).unwrap_or_default();
    datetime.format("%Y-%m-%d").to_string()
}

/// Coarse countdown from `now` to `deadline`: `"12d 4h"`, `"3h 20m"`, `"45s"`.
/// Anything at or past the deadline is `"0s"`.
pub fn format_remaining(now: i64, deadline: i64) -> String {
    let remaining = deadline.saturating_sub(now).max(0) as u64;
    let days = remaining / SECONDS_PER_DAY;
    let hours = (remaining % SECONDS_PER_DAY) / 3_600;
    let minutes = (remaining % 3_600) / 60;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", remaining)
    }
}
