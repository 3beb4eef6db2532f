//! Source of "now" for the gate.

use chrono::{Local, NaiveDateTime};

/// Where the current instant comes from.
///
/// `Fixed` pins the clock for deterministic checks and previews; the pinned
/// instant is returned verbatim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Clock {
	/// Local wall-clock time.
	#[default]
	System,
	/// A pinned instant.
	Fixed(NaiveDateTime),
}

impl Clock {
	pub fn now(&self) -> NaiveDateTime {
		match self {
			Clock::System => Local::now().naive_local(),
			Clock::Fixed(instant) => *instant,
		}
	}
}

impl From<Option<NaiveDateTime>> for Clock {
	fn from(instant: Option<NaiveDateTime>) -> Self {
		instant.map_or(Clock::System, Clock::Fixed)
	}
}
