//! `IntersectionObserver` plumbing for the scroll-spy.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::tracker::SectionTracker;

/// Shape of the band near the top of the viewport that counts as "current".
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollSpyOptions {
	/// Pixels trimmed from the top of the viewport (e.g. a fixed header).
	pub offset_top: f64,
	/// Percentage of the viewport trimmed from the bottom.
	pub bottom_margin_pct: f64,
	/// Visible fraction of a section needed to report a crossing.
	pub threshold: f64,
}

impl Default for ScrollSpyOptions {
	fn default() -> Self {
		Self {
			offset_top: 100.0,
			bottom_margin_pct: 80.0,
			threshold: 0.1,
		}
	}
}

impl ScrollSpyOptions {
	/// CSS margin string for `IntersectionObserverInit.rootMargin`.
	pub fn root_margin(&self) -> String {
		format!(
			"-{}px 0px -{}% 0px",
			self.offset_top, self.bottom_margin_pct
		)
	}
}

/// Watches a set of sections and reports changes of the active one.
///
/// Dropping the observer disconnects it and empties the tracker, so a
/// callback already queued by the browser finds nothing to report.
pub struct SectionObserver {
	observer: IntersectionObserver,
	tracker: Rc<RefCell<SectionTracker>>,
	_callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl SectionObserver {
	/// Start observing the elements with the given ids. Ids with no matching
	/// element are skipped.
	pub fn observe(
		ids: &[String],
		options: &ScrollSpyOptions,
		on_change: impl Fn(&str) + 'static,
	) -> Option<Self> {
		let document = web_sys::window()?.document()?;
		let tracker = Rc::new(RefCell::new(SectionTracker::new(ids.iter().cloned())));

		let callback: Closure<dyn FnMut(js_sys::Array)> = {
			let tracker = Rc::clone(&tracker);
			Closure::new(move |entries: js_sys::Array| {
				for entry in entries.iter() {
					let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
						continue;
					};
					let id = entry.target().id();
					let changed = tracker.borrow_mut().record(&id, entry.is_intersecting());
					if changed {
						debug!("scroll-spy: active section is now {:?}", id);
						on_change(&id);
					}
				}
			})
		};

		let init = IntersectionObserverInit::new();
		init.set_root_margin(&options.root_margin());
		init.set_threshold(&JsValue::from_f64(options.threshold));
		let observer =
			match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
				Ok(observer) => observer,
				Err(e) => {
					warn!("scroll-spy: IntersectionObserver unavailable: {:?}", e);
					return None;
				}
			};

		for id in ids {
			match document.get_element_by_id(id) {
				Some(element) => observer.observe(&element),
				None => warn!("scroll-spy: no element with id {:?}", id),
			}
		}

		Some(Self {
			observer,
			tracker,
			_callback: callback,
		})
	}

	pub fn active(&self) -> Option<String> {
		self.tracker.borrow().active().map(str::to_string)
	}
}

impl Drop for SectionObserver {
	fn drop(&mut self) {
		self.observer.disconnect();
		self.tracker.borrow_mut().clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_band_matches_header_offset() {
		assert_eq!(ScrollSpyOptions::default().root_margin(), "-100px 0px -80% 0px");
	}

	#[test]
	fn custom_band() {
		let options = ScrollSpyOptions {
			offset_top: 64.0,
			bottom_margin_pct: 50.5,
			..Default::default()
		};
		assert_eq!(options.root_margin(), "-64px 0px -50.5% 0px");
	}
}
