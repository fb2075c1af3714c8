//! Transaction deadlines.
//!
//! The ledger measures time in milliseconds since its own epoch
//! ([`NETWORK_EPOCH_MILLIS`]), not since 1970. A transaction that is not
//! confirmed before its deadline is dropped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::uint64::UInt64;
use crate::config::{MAX_DEADLINE, NETWORK_EPOCH_MILLIS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Deadline(UInt64);

impl Deadline {
    /// `now + ttl`, measured on the network clock. Nodes refuse deadlines
    /// more than [`MAX_DEADLINE`] ahead, so longer ttls are clamped.
    pub fn create(ttl: Duration) -> Self {
        Self::at(Utc::now(), ttl.min(MAX_DEADLINE))
    }

    /// `instant + ttl`. Instants before the network epoch clamp to zero.
    pub fn at(instant: DateTime<Utc>, ttl: Duration) -> Self {
        let since_epoch = (instant.timestamp_millis() - NETWORK_EPOCH_MILLIS).max(0) as u64;
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        Self(UInt64::from_u64(since_epoch.saturating_add(ttl_ms)))
    }

    /// Raw network-epoch milliseconds, as decoded from a payload.
    pub const fn from_network_millis(value: UInt64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> UInt64 {
        self.0
    }

    /// The deadline as a wall-clock instant.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        let millis = i64::try_from(self.0.to_u64()).ok()?;
        DateTime::from_timestamp_millis(millis.checked_add(NETWORK_EPOCH_MILLIS)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_is_relative_to_network_epoch() {
        let epoch = DateTime::from_timestamp_millis(NETWORK_EPOCH_MILLIS).unwrap();
        let d = Deadline::at(epoch, Duration::from_secs(1));
        assert_eq!(d.value().to_u64(), 1_000);
        assert_eq!(d.to_datetime().unwrap().timestamp_millis(), NETWORK_EPOCH_MILLIS + 1_000);
    }

    #[test]
    fn create_is_in_the_future() {
        let before = Utc::now();
        let d = Deadline::create(Duration::from_secs(3600));
        assert!(d.to_datetime().unwrap() > before);
    }

    #[test]
    fn create_clamps_to_max_deadline() {
        let limit = Utc::now() + chrono::Duration::hours(25);
        let d = Deadline::create(Duration::from_secs(7 * 24 * 3600));
        assert!(d.to_datetime().unwrap() < limit);
    }

    #[test]
    fn pre_epoch_instants_clamp() {
        let d = Deadline::at(DateTime::from_timestamp_millis(0).unwrap(), Duration::ZERO);
        assert!(d.value().is_zero());
    }
}
