//! Owned handle for re-running the gate on a fixed cadence.

use std::time::Duration;

use gloo::timers::callback::Interval;
use log::debug;

/// A repeating check that lives exactly as long as this value.
///
/// Dropping the handle (or calling [`ScheduledCheck::stop`]) clears the
/// underlying timer before returning, so no callback fires afterwards.
pub struct ScheduledCheck {
	interval: Interval,
}

impl ScheduledCheck {
	/// Run `check` every `period`. The first call happens after one period.
	pub fn start(period: Duration, check: impl FnMut() + 'static) -> Self {
		let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX).max(1);
		debug!("season: scheduling re-check every {} ms", millis);
		Self {
			interval: Interval::new(millis, check),
		}
	}

	/// Cancel the timer now.
	pub fn stop(self) {
		drop(self.interval.cancel());
	}
}
