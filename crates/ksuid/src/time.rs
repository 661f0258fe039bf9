use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::{Error, Result};

/// KSUID epoch: Tuesday, May 13, 2014 16:53:20 UTC.
///
/// Offset from the Unix epoch so that the 32-bit second counter covers a
/// useful range (through the year 2150) instead of wasting bits on the past.
pub const KSUID_EPOCH: Duration = Duration::from_secs(KSUID_EPOCH_SECS);

/// The KSUID epoch as seconds since the Unix epoch.
pub const KSUID_EPOCH_SECS: u64 = 1_400_000_000;

/// Smallest encodable wall-clock time, in seconds since the Unix epoch.
pub const MIN_UNIX_SECS: u64 = KSUID_EPOCH_SECS;

/// Largest encodable wall-clock time, in seconds since the Unix epoch.
pub const MAX_UNIX_SECS: u64 = KSUID_EPOCH_SECS + u32::MAX as u64;

/// Converts an absolute Unix timestamp into epoch-relative KSUID seconds.
///
/// # Errors
///
/// Returns [`Error::TimestampOutOfRange`] if `unix_secs` is outside
/// `[MIN_UNIX_SECS, MAX_UNIX_SECS]`.
pub fn to_epoch_secs(unix_secs: u64) -> Result<u32> {
    if !(MIN_UNIX_SECS..=MAX_UNIX_SECS).contains(&unix_secs) {
        return Err(Error::TimestampOutOfRange { unix_secs });
    }
    Ok((unix_secs - KSUID_EPOCH_SECS) as u32)
}

/// Converts epoch-relative KSUID seconds back into an absolute Unix timestamp.
///
/// Total for all `u32` values; the inverse of [`to_epoch_secs`].
pub fn from_epoch_secs(timestamp: u32) -> u64 {
    u64::from(timestamp) + KSUID_EPOCH_SECS
}

/// Extracts whole seconds since the Unix epoch from a `SystemTime`.
///
/// Times before the Unix epoch saturate to `0`, which the range check in
/// [`to_epoch_secs`] then rejects.
pub(crate) fn unix_secs_of(datetime: SystemTime) -> u64 {
    datetime
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
