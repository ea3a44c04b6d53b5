// std
use std::sync::atomic::{AtomicI64, Ordering};
// self
use crate::_prelude::*;

/// Millisecond wall clock consulted by the signature cache.
pub trait Clock
where
	Self: Send + Sync,
{
	/// Current time in integer milliseconds since the Unix epoch.
	fn now_millis(&self) -> i64;
}

/// [`Clock`] backed by the system's UTC time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
	fn now_millis(&self) -> i64 {
		unix_millis(OffsetDateTime::now_utc())
	}
}

/// Manually driven [`Clock`] for tests; clones share the same instant.
#[derive(Clone, Debug, Default)]
pub struct ManualClock(Arc<AtomicI64>);
impl ManualClock {
	/// Creates a clock frozen at `millis`.
	pub fn at(millis: i64) -> Self {
		Self(Arc::new(AtomicI64::new(millis)))
	}

	/// Moves the clock to `millis`.
	pub fn set(&self, millis: i64) {
		self.0.store(millis, Ordering::SeqCst);
	}

	/// Moves the clock forward by `delta`.
	pub fn advance(&self, delta: Duration) {
		self.0.fetch_add(duration_millis(delta), Ordering::SeqCst);
	}
}
impl Clock for ManualClock {
	fn now_millis(&self) -> i64 {
		self.0.load(Ordering::SeqCst)
	}
}

/// Converts an instant to integer milliseconds since the Unix epoch.
pub fn unix_millis(instant: OffsetDateTime) -> i64 {
	i64::try_from(instant.unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX)
}

/// Converts a duration to whole milliseconds, saturating at the `i64` range.
pub fn duration_millis(duration: Duration) -> i64 {
	let millis = duration.whole_milliseconds();

	i64::try_from(millis).unwrap_or(if millis.is_negative() { i64::MIN } else { i64::MAX })
}
