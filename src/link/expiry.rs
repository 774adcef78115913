use anyhow::{Context, Result};
use chrono::{DateTime, Local, SecondsFormat, TimeZone, Utc};

/// Default lifetime of a link, one hour
pub const DEFAULT_EXPIRE: u64 = 3600;

/// Current unix time in seconds
///
/// # Errors
///
/// Will return `Err` if the system clock is set before the unix epoch
pub fn now() -> Result<u64> {
    u64::try_from(Utc::now().timestamp()).context("system clock is set before the unix epoch")
}

/// The instant `timestamp + expire` seconds in the given timezone
///
/// # Errors
///
/// Will return `Err` if the sum overflows or is out of chrono's range
pub fn expiry_in<Tz: TimeZone>(timestamp: u64, expire: u64, tz: &Tz) -> Result<DateTime<Tz>> {
    let expires_at = timestamp
        .checked_add(expire)
        .with_context(|| format!("expiry overflows: {timestamp} + {expire}"))?;

    let secs = i64::try_from(expires_at)
        .with_context(|| format!("expiry out of range: {expires_at}"))?;

    let utc = DateTime::<Utc>::from_timestamp(secs, 0)
        .with_context(|| format!("expiry out of range: {expires_at}"))?;

    Ok(utc.with_timezone(tz))
}

/// ISO-8601 expiry in the local timezone, e.g. `2023-11-14T23:13:20+01:00`
///
/// # Errors
///
/// Will return `Err` if the expiry can't be represented
pub fn expires_at(timestamp: u64, expire: u64) -> Result<String> {
    Ok(format_expiry(&expiry_in(timestamp, expire, &Local)?))
}

#[must_use]
pub fn format_expiry<Tz: TimeZone>(datetime: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    datetime.to_rfc3339_opts(SecondsFormat::Secs, false)
}
