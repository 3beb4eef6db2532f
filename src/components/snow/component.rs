//! Leptos component wrapping the snow canvas.
//!
//! The gate is evaluated at mount and then on a fixed cadence. While it
//! reports the effect active, a canvas is mounted and a [`SnowRenderer`] owns
//! it; when the gate flips off (or the component unmounts) the renderer is
//! dropped, which cancels the frame loop before the canvas disappears.

use chrono::NaiveDateTime;
use gloo::render::{AnimationFrame, request_animation_frame};
use leptos::prelude::*;
use log::{debug, info};
use web_sys::HtmlCanvasElement;

use super::style::SnowStyle;
use super::surface::SnowRenderer;
use crate::season::{Clock, Effect as ThemeEffect, EffectGate, ScheduledCheck, ThemeCatalog};

type RendererSlot = StoredValue<Option<SnowRenderer>, LocalStorage>;

fn snow_gate(catalog: ThemeCatalog, cutoff: Option<NaiveDateTime>, clock: Clock) -> EffectGate {
	EffectGate::new(catalog, ThemeEffect::Snow)
		.with_cutoff(cutoff)
		.with_clock(clock)
}

/// Record a gate decision. Returns whether it changed anything.
///
/// Switching off drops the renderer first, so the frame loop is cancelled
/// before `<Show>` unmounts the canvas.
fn apply_decision(now_active: bool, active: RwSignal<bool>, renderer: RendererSlot) -> bool {
	if now_active == active.get_untracked() {
		return false;
	}
	info!("snow: gate now reports {}", if now_active { "active" } else { "inactive" });
	if !now_active {
		renderer.set_value(None);
	}
	active.set(now_active);
	true
}

/// Falling snow behind the page while a snow theme is live.
///
/// `cutoff` replaces the catalog decision with "active until this instant",
/// and `clock` pins the time used for either check.
#[component]
pub fn SnowBackground(
	#[prop(into)] catalog: Signal<ThemeCatalog>,
	#[prop(optional)] cutoff: Option<NaiveDateTime>,
	#[prop(optional)] clock: Clock,
	#[prop(optional)] style: SnowStyle,
	#[prop(optional, into)] class: String,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let gate = move || snow_gate(catalog.get_untracked(), cutoff, clock);
	let active = RwSignal::new(gate().is_active());

	let renderer: RendererSlot = StoredValue::new_local(None);
	let retry = StoredValue::new_local(None::<AnimationFrame>);
	let attempt = RwSignal::new(0u32);

	let recheck = StoredValue::new_local(Some(ScheduledCheck::start(
		style.recheck_interval,
		move || {
			apply_decision(gate().is_active(), active, renderer);
		},
	)));

	// Catalog swaps take effect immediately rather than at the next tick.
	Effect::new(move |prev: Option<()>| {
		catalog.track();
		if prev.is_some() {
			apply_decision(gate().is_active(), active, renderer);
		}
	});

	let renderer_style = style.clone();
	Effect::new(move |_| {
		attempt.track();
		let on = active.get();
		let canvas = canvas_ref.get();
		retry.set_value(None);
		match (on, canvas) {
			(true, Some(canvas)) => {
				if renderer.with_value(|r| r.is_some()) {
					return;
				}
				if canvas.is_connected() {
					let canvas: HtmlCanvasElement = canvas;
					renderer.set_value(SnowRenderer::start(canvas, renderer_style.clone()));
				} else {
					// The ref may still hold a canvas from a previous active period.
					debug!("snow: canvas not attached yet, retrying next frame");
					retry.set_value(Some(request_animation_frame(move |_| {
						attempt.update(|n| *n = n.wrapping_add(1));
					})));
				}
			}
			_ => renderer.set_value(None),
		}
	});

	on_cleanup(move || {
		retry.set_value(None);
		renderer.set_value(None);
		recheck.update_value(|check| {
			if let Some(check) = check.take() {
				check.stop();
			}
		});
	});

	let class = format!("snow-background {class}");
	view! {
		<Show when=move || active.get()>
			<canvas
				node_ref=canvas_ref
				class=class.clone()
				style="position: absolute; inset: 0; pointer-events: none; z-index: 0; background: transparent;"
			/>
		</Show>
	}
}
