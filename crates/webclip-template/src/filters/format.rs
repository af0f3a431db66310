//! Text formatting filters: `indent` and `dur`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::args::strip_matching_quotes;
use crate::error::{FilterError, FilterResult};

static ISO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^P(?:(\d+(?:\.\d+)?)Y)?(?:(\d+(?:\.\d+)?)M)?(?:(\d+(?:\.\d+)?)W)?(?:(\d+(?:\.\d+)?)D)?",
        r"(?:T(?:(\d+(?:\.\d+)?)H)?(?:(\d+(?:\.\d+)?)M)?(?:(\d+(?:\.\d+)?)S)?)?$",
    ))
    .expect("valid duration regex")
});

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;

/// Prefixes every line with `level` tab characters (default 1).
pub fn indent(input: &str, level: Option<&str>) -> String {
    let level = level
        .map(strip_matching_quotes)
        .and_then(|l| l.trim().parse::<usize>().ok())
        .unwrap_or(1);
    let prefix = "\t".repeat(level);

    input
        .split('\n')
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders an ISO-8601 duration (`PT1H2M3S`) as `HH:MM:SS`.
///
/// Years count as 365 days, months as 30, weeks as 7. Hours are not wrapped
/// at 24, so `P1D` is `24:00:00`.
pub fn dur(input: &str) -> FilterResult<String> {
    let trimmed = input.trim();
    let caps = ISO_DURATION
        .captures(trimmed)
        .filter(|_| trimmed.len() > 1 && trimmed != "PT")
        .ok_or_else(|| FilterError::invalid_duration(input))?;

    let field = |caps: &Captures<'_>, idx: usize| -> f64 {
        caps.get(idx)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(0.0)
    };

    let seconds = field(&caps, 1) * 365.0 * DAY
        + field(&caps, 2) * 30.0 * DAY
        + field(&caps, 3) * 7.0 * DAY
        + field(&caps, 4) * DAY
        + field(&caps, 5) * HOUR
        + field(&caps, 6) * MINUTE
        + field(&caps, 7);
    let total = seconds.trunc() as u64;

    Ok(format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    ))
}
