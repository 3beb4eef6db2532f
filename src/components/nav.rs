//! Section navigation driven by the scroll-spy.

use leptos::prelude::*;
use log::warn;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

/// A page section that can be navigated to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Section {
	/// Element id of the section anchor.
	pub id: &'static str,
	pub label: &'static str,
}

/// Sections of the portfolio page, top to bottom.
pub const SECTIONS: &[Section] = &[
	Section { id: "home", label: "Home" },
	Section { id: "projects", label: "Projects" },
	Section { id: "skills", label: "Skills" },
	Section { id: "certificates", label: "Certificates" },
	Section { id: "contact", label: "Contact" },
];

/// Smooth-scroll the section with `id` to the top of the viewport.
fn scroll_to_section(id: &str) {
	let Some(element) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.get_element_by_id(id))
	else {
		warn!("nav: no section with id {:?}", id);
		return;
	};
	let options = ScrollIntoViewOptions::new();
	options.set_behavior(ScrollBehavior::Smooth);
	options.set_block(ScrollLogicalPosition::Start);
	element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Vertical list of section links; the active one is highlighted.
#[component]
pub fn SectionNav(
	sections: &'static [Section],
	#[prop(into)] active: Signal<Option<String>>,
) -> impl IntoView {
	view! {
		<nav class="section-nav">
			<ul>
				{sections
					.iter()
					.map(|section| {
						let id = section.id;
						let is_active = move || active.with(|a| a.as_deref() == Some(id));
						view! {
							<li>
								<button
									class=move || {
										if is_active() {
											"section-nav__link section-nav__link--active"
										} else {
											"section-nav__link"
										}
									}
									aria-current=move || is_active().then_some("true")
									on:click=move |_| scroll_to_section(id)
								>
									{section.label}
								</button>
							</li>
						}
					})
					.collect_view()}
			</ul>
		</nav>
	}
}
