//! Diagnostic overlay for the seasonal gate.
//!
//! Shows the gate decision, the current time, the live theme and how long it
//! has left. Refreshes once a second so window edges can be watched live.

use std::time::Duration;

use chrono::NaiveDateTime;
use leptos::prelude::*;

use crate::season::{Clock, Effect, EffectGate, ScheduledCheck, Theme, ThemeCatalog, days_remaining};

const REFRESH: Duration = Duration::from_secs(1);
const DATE_TIME: &str = "%d/%m/%Y %H:%M:%S";
const DATE_MINUTE: &str = "%d/%m/%Y %H:%M";

/// Everything the panel displays, computed in one pass.
#[derive(Clone, Debug, PartialEq)]
pub struct SeasonSnapshot {
	pub now: NaiveDateTime,
	pub active: bool,
	pub theme: Option<Theme>,
}

impl SeasonSnapshot {
	pub fn capture(gate: &EffectGate) -> Self {
		Self {
			now: gate.clock().now(),
			active: gate.is_active(),
			theme: gate.active_theme().cloned(),
		}
	}

	/// Days left in the live theme, rounded up; zero without a theme.
	pub fn days_left(&self) -> i64 {
		self.theme
			.as_ref()
			.map(|t| days_remaining(self.now, t.end))
			.unwrap_or(0)
	}

	pub fn remaining_label(&self) -> String {
		match self.days_left() {
			n if n > 1 => format!("{n} days"),
			1 => "1 day".to_string(),
			_ => "Last day!".to_string(),
		}
	}
}

/// Floating status card for checking the seasonal configuration.
#[component]
pub fn SeasonStatus(
	#[prop(into)] catalog: Signal<ThemeCatalog>,
	#[prop(optional)] clock: Clock,
) -> impl IntoView {
	let capture = move || {
		SeasonSnapshot::capture(&EffectGate::new(catalog.get_untracked(), Effect::Snow).with_clock(clock))
	};
	let snapshot = RwSignal::new(capture());

	let refresh = StoredValue::new_local(Some(ScheduledCheck::start(REFRESH, move || {
		snapshot.set(capture());
	})));
	on_cleanup(move || {
		refresh.update_value(|check| {
			if let Some(check) = check.take() {
				check.stop();
			}
		});
	});

	let status = move || {
		if snapshot.with(|s| s.active) {
			"active"
		} else {
			"inactive"
		}
	};

	view! {
		<aside class="season-status">
			<h3>"Seasonal effect"</h3>
			<dl>
				<dt>"Status"</dt>
				<dd class=move || format!("season-status__badge season-status__badge--{}", status())>
					{status}
				</dd>
				<dt>"Now"</dt>
				<dd>{move || snapshot.with(|s| s.now.format(DATE_TIME).to_string())}</dd>
				{move || {
					snapshot
						.with(|s| s.theme.clone())
						.map(|theme| {
							view! {
								<dt>"Theme"</dt>
								<dd>{theme.name}</dd>
								<dt>"Ends"</dt>
								<dd>{theme.end.format(DATE_MINUTE).to_string()}</dd>
							}
						})
				}}
				<Show when=move || snapshot.with(|s| s.active)>
					<dt>"Remaining"</dt>
					<dd>{move || snapshot.with(SeasonSnapshot::remaining_label)}</dd>
				</Show>
			</dl>
			<p>
				{move || {
					if snapshot.with(|s| s.active) {
						"Snow is falling"
					} else {
						"Snow switched off automatically"
					}
				}}
			</p>
		</aside>
	}
}
