pub mod base64url;

pub use base64url::{decode_segment, encode, encode_segment};

use std::time::{SystemTime, UNIX_EPOCH};

/// Current Unix timestamp in seconds
pub(crate) fn current_timestamp() -> i64 {
    unix_timestamp(SystemTime::now())
}

/// Seconds since the epoch; a clock before the epoch saturates to `i64::MAX`
/// so that every `exp` check fails
fn unix_timestamp(time: SystemTime) -> i64 {
    time.duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|d| i64::try_from(d.as_secs()).ok())
        .unwrap_or(i64::MAX)
}
