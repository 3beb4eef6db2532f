//! Canvas painting for the snow field.
//!
//! Each flake is two circles: the flake itself, then a smaller, dimmer one
//! offset to the left so flakes do not read as flat dots.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::field::SnowField;
use super::style::{Color, SnowStyle};

/// The drawing operations the snow renderer needs.
pub trait SnowPainter {
	/// Erase the whole `width` × `height` surface.
	fn clear(&self, width: f64, height: f64);
	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: Color);
}

impl SnowPainter for CanvasRenderingContext2d {
	fn clear(&self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: Color) {
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.set_fill_style_str(&color.to_css());
		self.fill();
	}
}

/// Paints one frame: clear, then every flake in pool order.
pub fn draw(painter: &impl SnowPainter, field: &SnowField, style: &SnowStyle) {
	let (width, height) = field.size();
	painter.clear(width, height);

	for flake in field.flakes() {
		painter.fill_circle(
			flake.x,
			flake.y,
			flake.radius,
			style.color.with_alpha(flake.opacity),
		);
		painter.fill_circle(
			flake.x - flake.radius * style.detail_offset,
			flake.y,
			flake.radius * style.detail_scale,
			style.color.with_alpha(flake.opacity * style.detail_opacity),
		);
	}
}
