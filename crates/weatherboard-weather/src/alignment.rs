//! Hourly alignment
//!
//! Open-Meteo reports the current observation on a 15-minute grid while the
//! hourly series is on the hour, so the hourly values that belong to "now"
//! have to be located by timestamp.

use chrono::NaiveDateTime;

/// Local timestamp layouts used by Open-Meteo (`timeformat=iso8601`)
const LOCAL_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Length of the `YYYY-MM-DDTHH` prefix
const HOUR_PREFIX_LEN: usize = 13;

fn parse_local(timestamp: &str) -> Option<NaiveDateTime> {
    LOCAL_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(timestamp, format).ok())
}

/// Select the index of the hourly entry that corresponds to `current`
///
/// Tried in order:
/// 1. an exact string match,
/// 2. the entry for the same hour (`YYYY-MM-DDTHH:00`),
/// 3. the entry closest in time; the first of equally close entries wins and
///    entries that do not parse are skipped.
///
/// Returns `None` when `current` is missing or the series is empty, and when
/// nothing in the series could be compared against `current`.
pub fn pick_hourly_index(current: Option<&str>, times: &[String]) -> Option<usize> {
    let current = current.filter(|c| !c.is_empty())?;
    if times.is_empty() {
        return None;
    }

    if let Some(idx) = times.iter().position(|t| t == current) {
        return Some(idx);
    }

    let hour = format!("{}:00", current.get(..HOUR_PREFIX_LEN).unwrap_or(current));
    if let Some(idx) = times.iter().position(|t| *t == hour) {
        return Some(idx);
    }

    let target = parse_local(current)?;
    times
        .iter()
        .enumerate()
        .filter_map(|(idx, t)| {
            let diff = (parse_local(t)? - target).num_milliseconds().abs();
            Some((idx, diff))
        })
        .min_by_key(|&(_, diff)| diff)
        .map(|(idx, _)| idx)
}
