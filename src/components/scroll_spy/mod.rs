//! Scroll-spy: which page section is currently in view.
//!
//! Sections are observed against a band near the top of the viewport. The
//! most recent section to cross into the band becomes active; there is no
//! active section until the first crossing.

mod observer;
pub mod tracker;

use leptos::prelude::*;

pub use observer::{ScrollSpyOptions, SectionObserver};
pub use tracker::SectionTracker;

/// Track the active section among `ids` for as long as the calling
/// component is mounted.
pub fn use_scroll_spy(ids: Vec<String>, options: ScrollSpyOptions) -> ReadSignal<Option<String>> {
	let (active, set_active) = signal(None::<String>);
	let observer = StoredValue::new_local(None::<SectionObserver>);

	// Runs after mount, once the section elements exist.
	Effect::new(move |_| {
		let started = SectionObserver::observe(&ids, &options, move |id| {
			set_active.set(Some(id.to_string()));
		});
		observer.set_value(started);
	});

	on_cleanup(move || observer.set_value(None));

	active
}
