//! Timestamps.

use chrono::{DateTime, Utc};

/// UTC timestamp stamped onto a device each time it is saved.
pub type Timestamp = DateTime<Utc>;

/// Current UTC time, used as the save stamp.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}
