use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// The run's reference date: the explicit `YYYY-MM-DD` override if given, otherwise the calendar
/// date of `now_utc` in `tz`.
pub fn resolve_reference_date(
    as_of_date_arg: Option<&str>,
    now_utc: DateTime<Utc>,
    tz: Tz,
) -> anyhow::Result<NaiveDate> {
    if let Some(s) = as_of_date_arg {
        return NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .with_context(|| format!("invalid as-of date (expected YYYY-MM-DD): {s}"));
    }

    Ok(now_utc.with_timezone(&tz).date_naive())
}
