//! Scoped ownership of the canvas while snow is falling.
//!
//! A [`SnowRenderer`] holds everything an active effect touches: the 2D
//! context, the flake pool, the pending animation frame and the resize
//! subscriptions. Dropping it cancels the frame and the subscriptions before
//! the pool goes away, so nothing keeps drawing into a discarded surface.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{AnimationFrame, request_animation_frame};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ResizeObserver};

use super::field::SnowField;
use super::render::{self, SnowPainter};
use super::style::SnowStyle;

fn js_dimension(value: Result<JsValue, JsValue>) -> f64 {
	value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}

/// Current pixel size of the canvas's container.
///
/// Falls back to the viewport for a detached canvas and to 0×0 when neither
/// can be measured.
pub fn measure_container(canvas: &HtmlCanvasElement) -> (f64, f64) {
	match canvas.parent_element() {
		Some(parent) => (
			parent.client_width().max(0) as f64,
			parent.client_height().max(0) as f64,
		),
		None => web_sys::window()
			.map(|w| (js_dimension(w.inner_width()), js_dimension(w.inner_height())))
			.unwrap_or((0.0, 0.0)),
	}
}

/// Per-frame state shared between the renderer and its frame callback.
struct SnowLoop {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	style: SnowStyle,
	field: RefCell<SnowField>,
	rng: RefCell<StdRng>,
	pending: RefCell<Option<AnimationFrame>>,
	running: Cell<bool>,
}

impl SnowLoop {
	fn schedule(self: &Rc<Self>) {
		if !self.running.get() {
			return;
		}
		let snow = Rc::clone(self);
		let handle = request_animation_frame(move |_| {
			snow.pending.borrow_mut().take();
			if !snow.running.get() {
				return;
			}
			snow.tick();
			snow.schedule();
		});
		*self.pending.borrow_mut() = Some(handle);
	}

	fn tick(&self) {
		let mut field = self.field.borrow_mut();
		field.step(&self.style, &mut *self.rng.borrow_mut());
		render::draw(&self.ctx, &field, &self.style);
	}

	fn fit_to_container(&self) {
		if !self.running.get() {
			return;
		}
		let (width, height) = measure_container(&self.canvas);
		self.canvas.set_width(width as u32);
		self.canvas.set_height(height as u32);
		self.field.borrow_mut().resize(width, height);
		debug!("snow: surface resized to {}x{}", width, height);
	}

	fn stop(&self) {
		self.running.set(false);
		// Dropping the handle cancels the frame and releases the callback's
		// reference to this loop.
		self.pending.borrow_mut().take();
		let (width, height) = self.field.borrow().size();
		self.ctx.clear(width, height);
	}
}

/// `ResizeObserver` on the canvas's container, disconnected on drop.
struct ContainerObserver {
	observer: ResizeObserver,
	_callback: Closure<dyn FnMut()>,
}

impl ContainerObserver {
	fn watch(snow: &Rc<SnowLoop>) -> Option<Self> {
		let parent = snow.canvas.parent_element()?;
		let target = Rc::clone(snow);
		let callback: Closure<dyn FnMut()> = Closure::new(move || target.fit_to_container());
		let observer = match ResizeObserver::new(callback.as_ref().unchecked_ref()) {
			Ok(observer) => observer,
			Err(e) => {
				warn!("snow: ResizeObserver unavailable: {:?}", e);
				return None;
			}
		};
		observer.observe(&parent);
		Some(Self {
			observer,
			_callback: callback,
		})
	}
}

impl Drop for ContainerObserver {
	fn drop(&mut self) {
		self.observer.disconnect();
	}
}

/// An active snow effect bound to one canvas.
pub struct SnowRenderer {
	snow: Rc<SnowLoop>,
	container: Option<ContainerObserver>,
	window_resize: Option<EventListener>,
}

impl SnowRenderer {
	/// Size `canvas` to its container, allocate the pool and start the frame
	/// loop. Returns `None` when the platform lacks a window or 2D context.
	pub fn start(canvas: HtmlCanvasElement, style: SnowStyle) -> Option<Self> {
		let Some(window) = web_sys::window() else {
			warn!("snow: no window, effect disabled");
			return None;
		};
		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					warn!("snow: 2d context has an unexpected type, effect disabled");
					return None;
				}
			},
			_ => {
				warn!("snow: 2d context unavailable, effect disabled");
				return None;
			}
		};

		let (width, height) = measure_container(&canvas);
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		let mut rng = StdRng::from_entropy();
		let field = SnowField::populate(&style, width, height, &mut rng);
		info!(
			"snow: started with {} flakes on {}x{}",
			field.len(),
			width,
			height
		);

		let snow = Rc::new(SnowLoop {
			canvas,
			ctx,
			style,
			field: RefCell::new(field),
			rng: RefCell::new(rng),
			pending: RefCell::new(None),
			running: Cell::new(true),
		});

		let window_resize = {
			let snow = Rc::clone(&snow);
			EventListener::new(&window, "resize", move |_| snow.fit_to_container())
		};
		let container = ContainerObserver::watch(&snow);

		snow.schedule();

		Some(Self {
			snow,
			container,
			window_resize: Some(window_resize),
		})
	}

	pub fn flake_count(&self) -> usize {
		self.snow.field.borrow().len()
	}

	pub fn surface_size(&self) -> (f64, f64) {
		self.snow.field.borrow().size()
	}
}

impl Drop for SnowRenderer {
	fn drop(&mut self) {
		self.snow.stop();
		self.container.take();
		self.window_resize.take();
		info!("snow: stopped");
	}
}
