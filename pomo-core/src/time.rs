//! Time utilities: timezone-aware due-date conversion.

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Convert a wall-clock due date (as produced by the parser) in an IANA tz
/// like "America/Chicago" into UTC.
pub fn local_to_utc(local: NaiveDateTime, tz: &str) -> Result<DateTime<Utc>> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;

    let local_dt = tz
        .from_local_datetime(&local)
        .single()
        .ok_or_else(|| anyhow::anyhow!("ambiguous or invalid local time (DST?): {local} {tz}"))?;

    Ok(local_dt.with_timezone(&Utc))
}
