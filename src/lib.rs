//! portfolio-season: seasonal effects and scroll-spy navigation for a
//! personal portfolio page.
//!
//! This crate provides a WASM-based page shell with a calendar-gated falling
//! snow background, section navigation that follows the scroll position, and
//! an optional overlay for checking the seasonal configuration.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

// Selects the browser entropy source used by `rand` on wasm32.
use getrandom as _;

pub mod components;
pub mod config;
pub mod season;

pub use components::nav::{SECTIONS, Section, SectionNav};
pub use components::scroll_spy::{ScrollSpyOptions, use_scroll_spy};
pub use components::season_status::SeasonStatus;
pub use components::snow::{SnowBackground, SnowStyle};
pub use config::SiteConfig;
pub use season::{Clock, Effect, EffectGate, ThemeCatalog};

const DEFAULT_ICON: &str = "/icon.png";
const SEASONAL_ICON: &str = "/icon-seasonal.png";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("portfolio-season: logging initialized");
}

/// Text of the JSON `<script>` element with the given id.
fn json_script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Deserialize the JSON `<script>` element with the given id, if present.
fn load_json_script<T: DeserializeOwned>(id: &str) -> Option<T> {
	let json_text = json_script_text(id)?;
	match serde_json::from_str::<T>(&json_text) {
		Ok(value) => Some(value),
		Err(e) => {
			warn!("portfolio-season: failed to parse #{}: {}", id, e);
			None
		}
	}
}

/// Site settings from `#site-config`, defaults otherwise.
fn load_site_config() -> SiteConfig {
	load_json_script::<SiteConfig>("site-config").unwrap_or_default()
}

/// Theme catalog from `#theme-catalog`, falling back to the bundled one.
fn load_catalog() -> ThemeCatalog {
	ThemeCatalog::resolve(json_script_text("theme-catalog").as_deref())
}

/// Main application component.
/// Loads configuration from the DOM and renders the page shell.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_site_config();
	let catalog = load_catalog();

	let icon = if EffectGate::new(catalog.clone(), Effect::Snow).is_active() {
		SEASONAL_ICON
	} else {
		DEFAULT_ICON
	};
	let catalog_signal = Signal::derive(move || catalog.clone());

	let section_ids = SECTIONS.iter().map(|s| s.id.to_string()).collect();
	let active_section = use_scroll_spy(section_ids, ScrollSpyOptions::default());

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />
		<Link rel="icon" href=icon />

		<div class="portfolio">
			<SectionNav sections=SECTIONS active=active_section />
			<main class="portfolio__main" style="position: relative;">
				<SnowBackground catalog=catalog_signal style=config.snow.style() />
				{SECTIONS
					.iter()
					.map(|section| {
						view! {
							<section id=section.id class="portfolio__section">
								<h2>{section.label}</h2>
							</section>
						}
					})
					.collect_view()}
			</main>
			{config.show_season_status.then(|| view! { <SeasonStatus catalog=catalog_signal /> })}
		</div>
	}
}
