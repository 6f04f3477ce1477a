//! Four-column human-readable byte counts.

const UNIT: f64 = 1024.0;
const UNITS: [char; 5] = ['K', 'M', 'G', 'T', 'P'];

/// Render `bytes` as a right-justified, 4-character magnitude string.
///
/// Below 1024 the plain integer is printed. Otherwise the value is divided
/// by 1024 until it drops below 1024 or the `P` unit is reached; values
/// under 10 keep one decimal (`9.5K`), larger ones are rounded to the
/// nearest integer (` 10K`). A value that rounds up to 1024 is promoted to
/// `1.0` of the next unit so the field never grows past four characters.
/// Only counts beyond 999 PiB exceed the width.
pub fn humanize(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes:>4}");
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= UNIT && unit < UNITS.len() {
        value /= UNIT;
        unit += 1;
    }
    let suffix = UNITS[unit - 1];

    // 9.95 and up would print as "10.0".
    if value < 9.95 {
        return format!("{value:>3.1}{suffix}");
    }

    let rounded = (value + 0.5) as u64;
    if rounded >= 1024 && unit < UNITS.len() {
        return format!("1.0{}", UNITS[unit]);
    }
    format!("{rounded:>3}{suffix}")
}
