//! Field formatting for long-format lines.

use chrono::{DateTime, Local, Utc};

use crate::humanize::humanize;
use crate::metadata::EntryMetadata;
use crate::width::WidthSet;

/// Timestamps older than this show the year instead of the time of day.
const SIX_MONTHS: i64 = 6 * 30 * 24 * 60 * 60;

/// `"%b %e %H:%M"` for recent timestamps, `"%b %e  %Y"` otherwise. Both
/// forms are twelve characters wide.
pub fn format_timestamp(secs: i64, now: i64) -> String {
    // Timestamps outside chrono's range render as the epoch.
    let local = DateTime::<Utc>::from_timestamp(secs, 0)
        .unwrap_or_default()
        .with_timezone(&Local);
    let pattern = if now - secs < SIX_MONTHS {
        "%b %e %H:%M"
    } else {
        "%b %e  %Y"
    };
    local.format(pattern).to_string()
}

/// Right-justified size, or `major, minor` for devices.
pub fn size_field(md: &EntryMetadata, widths: &WidthSet, human: bool) -> String {
    let width = widths.size_column();
    if md.is_device() {
        let pair = format!(
            "{:>maj$}, {:>min$}",
            md.major(),
            md.minor(),
            maj = widths.major,
            min = widths.minor
        );
        format!("{pair:>width$}")
    } else if human {
        format!("{:>width$}", humanize(md.size))
    } else {
        format!("{:>width$}", md.size)
    }
}
