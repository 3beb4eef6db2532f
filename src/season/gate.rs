//! Activation gate: which theme, if any, is live right now.
//!
//! Selection is a pure function of the catalog and an instant:
//! keep enabled themes, then take the first (in catalog order) whose window
//! contains the instant. Catalog order is the tie-break for overlapping
//! windows, so reordering the configuration is how priority is expressed.

use chrono::{NaiveDate, NaiveDateTime};

use super::clock::Clock;
use super::theme::{Effect, Theme, ThemeCatalog};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Boundary used by the fixed-cutoff check that predates the catalog.
pub fn legacy_snow_cutoff() -> NaiveDateTime {
	NaiveDate::from_ymd_opt(2025, 12, 27)
		.and_then(|d| d.and_hms_opt(23, 59, 59))
		.unwrap_or(NaiveDateTime::MIN)
}

/// Fixed-cutoff check: active until `boundary`, inclusive.
pub fn legacy_cutoff_active(now: NaiveDateTime, boundary: NaiveDateTime) -> bool {
	now <= boundary
}

/// Whole days left until `end`, rounded up. Zero or negative once `end` is
/// within the same day or already past.
pub fn days_remaining(now: NaiveDateTime, end: NaiveDateTime) -> i64 {
	let millis = (end - now).num_milliseconds() as f64;
	(millis / MILLIS_PER_DAY).ceil() as i64
}

impl ThemeCatalog {
	/// The theme live at `now`, if any.
	pub fn active_at(&self, now: NaiveDateTime) -> Option<&Theme> {
		self.themes()
			.iter()
			.filter(|theme| theme.enabled)
			.find(|theme| theme.contains(now))
	}

	/// The theme live according to `clock`.
	pub fn active_theme(&self, clock: &Clock) -> Option<&Theme> {
		self.active_at(clock.now())
	}

	/// Whether the theme selected at `now` is the one called `id`.
	pub fn is_theme_active(&self, id: &str, now: NaiveDateTime) -> bool {
		self.active_at(now).is_some_and(|theme| theme.id == id)
	}
}

/// Decides whether one effect should currently render.
///
/// The catalog is authoritative. A `cutoff` switches to the fixed-boundary
/// comparison instead and is only honoured when given explicitly.
#[derive(Clone, Debug)]
pub struct EffectGate {
	catalog: ThemeCatalog,
	effect: Effect,
	cutoff: Option<NaiveDateTime>,
	clock: Clock,
}

impl EffectGate {
	pub fn new(catalog: ThemeCatalog, effect: Effect) -> Self {
		Self {
			catalog,
			effect,
			cutoff: None,
			clock: Clock::System,
		}
	}

	/// Use the fixed-boundary comparison with `cutoff` as the last active instant.
	pub fn with_cutoff(self, cutoff: Option<NaiveDateTime>) -> Self {
		Self { cutoff, ..self }
	}

	pub fn with_clock(self, clock: Clock) -> Self {
		Self { clock, ..self }
	}

	pub fn clock(&self) -> Clock {
		self.clock
	}

	/// The catalog's current theme, regardless of effect.
	pub fn active_theme(&self) -> Option<&Theme> {
		self.catalog.active_theme(&self.clock)
	}

	pub fn is_active(&self) -> bool {
		let now = self.clock.now();
		match self.cutoff {
			Some(boundary) => legacy_cutoff_active(now, boundary),
			None => self
				.catalog
				.active_at(now)
				.is_some_and(|theme| theme.effect == self.effect),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
		NaiveDate::from_ymd_opt(y, m, d)
			.unwrap()
			.and_hms_opt(h, min, s)
			.unwrap()
	}

	fn theme(id: &str, start: NaiveDateTime, end: NaiveDateTime, enabled: bool) -> Theme {
		Theme {
			id: id.into(),
			name: id.into(),
			start,
			end,
			enabled,
			effect: Effect::Snow,
		}
	}

	fn natal() -> ThemeCatalog {
		ThemeCatalog::new(vec![theme(
			"natal",
			at(2025, 12, 1, 0, 0, 0),
			at(2025, 12, 27, 23, 59, 59),
			true,
		)])
	}

	fn active_id(catalog: &ThemeCatalog, now: NaiveDateTime) -> Option<&str> {
		catalog.active_at(now).map(|t| t.id.as_str())
	}

	#[test]
	fn christmas_day_is_inside_the_window() {
		assert_eq!(active_id(&natal(), at(2025, 12, 25, 10, 0, 0)), Some("natal"));
	}

	#[test]
	fn day_after_window_is_outside() {
		assert_eq!(active_id(&natal(), at(2025, 12, 28, 0, 0, 0)), None);
		assert_eq!(active_id(&natal(), at(2026, 1, 1, 0, 0, 0)), None);
	}

	#[test]
	fn bounds_are_inclusive() {
		let catalog = natal();
		assert_eq!(active_id(&catalog, at(2025, 12, 27, 23, 59, 59)), Some("natal"));
		assert_eq!(active_id(&catalog, at(2025, 12, 1, 0, 0, 0)), Some("natal"));
		assert_eq!(active_id(&catalog, at(2025, 11, 30, 23, 59, 59)), None);
	}

	#[test]
	fn every_hour_of_the_window_is_active_and_none_outside() {
		let catalog = natal();
		let mut now = at(2025, 11, 20, 0, 0, 0);
		let stop = at(2026, 1, 10, 0, 0, 0);
		while now < stop {
			let inside = now >= at(2025, 12, 1, 0, 0, 0) && now <= at(2025, 12, 27, 23, 59, 59);
			assert_eq!(catalog.is_theme_active("natal", now), inside, "at {now}");
			now += chrono::Duration::hours(1);
		}
	}

	#[test]
	fn disabled_themes_never_win() {
		let catalog = ThemeCatalog::new(vec![theme(
			"off",
			at(2025, 1, 1, 0, 0, 0),
			at(2025, 12, 31, 0, 0, 0),
			false,
		)]);
		assert_eq!(active_id(&catalog, at(2025, 6, 1, 0, 0, 0)), None);
	}

	#[test]
	fn overlap_resolves_by_catalog_order() {
		let wide = theme("wide", at(2025, 12, 1, 0, 0, 0), at(2025, 12, 31, 0, 0, 0), true);
		let narrow = theme("narrow", at(2025, 12, 20, 0, 0, 0), at(2025, 12, 26, 0, 0, 0), true);
		let now = at(2025, 12, 24, 12, 0, 0);

		let wide_first = ThemeCatalog::new(vec![wide.clone(), narrow.clone()]);
		assert_eq!(active_id(&wide_first, now), Some("wide"));

		let narrow_first = ThemeCatalog::new(vec![narrow, wide]);
		assert_eq!(active_id(&narrow_first, now), Some("narrow"));
		assert_eq!(active_id(&narrow_first, at(2025, 12, 28, 0, 0, 0)), Some("wide"));
	}

	#[test]
	fn disabled_earlier_entry_yields_to_later() {
		let catalog = ThemeCatalog::new(vec![
			theme("first", at(2025, 12, 1, 0, 0, 0), at(2025, 12, 31, 0, 0, 0), false),
			theme("second", at(2025, 12, 1, 0, 0, 0), at(2025, 12, 31, 0, 0, 0), true),
		]);
		assert_eq!(active_id(&catalog, at(2025, 12, 10, 0, 0, 0)), Some("second"));
	}

	#[test]
	fn gate_follows_the_fixed_clock() {
		let gate = EffectGate::new(natal(), Effect::Snow);
		assert!(
			gate.clone()
				.with_clock(Clock::Fixed(at(2025, 12, 25, 10, 0, 0)))
				.is_active()
		);
		assert!(
			!gate
				.with_clock(Clock::Fixed(at(2025, 12, 28, 0, 0, 0)))
				.is_active()
		);
	}

	#[test]
	fn cutoff_overrides_the_catalog() {
		let empty = EffectGate::new(ThemeCatalog::default(), Effect::Snow)
			.with_clock(Clock::Fixed(at(2025, 12, 27, 23, 59, 0)));
		assert!(!empty.is_active());

		let with_cutoff = empty.with_cutoff(Some(legacy_snow_cutoff()));
		assert!(with_cutoff.is_active());
		assert!(
			!with_cutoff
				.with_clock(Clock::Fixed(at(2025, 12, 28, 0, 0, 0)))
				.is_active()
		);
	}

	#[test]
	fn legacy_boundary_is_inclusive() {
		let boundary = legacy_snow_cutoff();
		assert_eq!(boundary, at(2025, 12, 27, 23, 59, 59));
		assert!(legacy_cutoff_active(boundary, boundary));
		assert!(legacy_cutoff_active(at(2025, 12, 25, 10, 0, 0), boundary));
		assert!(!legacy_cutoff_active(at(2026, 1, 1, 0, 0, 0), boundary));
	}

	#[test]
	fn days_remaining_rounds_up() {
		let end = at(2025, 12, 27, 23, 59, 59);
		assert_eq!(days_remaining(at(2025, 12, 25, 10, 0, 0), end), 3);
		assert_eq!(days_remaining(at(2025, 12, 27, 12, 0, 0), end), 1);
		assert_eq!(days_remaining(end, end), 0);
		assert!(days_remaining(at(2025, 12, 29, 0, 0, 0), end) < 0);
	}
}
