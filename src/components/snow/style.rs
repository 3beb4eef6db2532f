//! Visual and timing configuration for the snow effect.

use std::ops::RangeInclusive;
use std::time::Duration;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Snowfall configuration.
///
/// Ranges are sampled uniformly once per flake when the pool is created.
#[derive(Clone, Debug, PartialEq)]
pub struct SnowStyle {
	/// Upper bound on the pool size.
	pub max_count: usize,
	/// Surface area (px²) per flake before `max_count` applies.
	pub density_divisor: f64,
	/// Flake radius in pixels.
	pub radius: RangeInclusive<f64>,
	/// Fall speed in pixels per frame.
	pub speed: RangeInclusive<f64>,
	pub opacity: RangeInclusive<f64>,
	/// Constant horizontal drift in pixels per frame.
	pub drift: RangeInclusive<f64>,
	/// Sway term is `sin(y * sway_frequency) * sway_amplitude`.
	pub sway_frequency: f64,
	pub sway_amplitude: f64,
	/// Vertical position a flake respawns at after leaving the bottom edge.
	pub respawn_y: f64,
	/// Detail circle offset to the left, as a fraction of the radius.
	pub detail_offset: f64,
	/// Detail circle radius as a fraction of the radius.
	pub detail_scale: f64,
	/// Detail circle opacity as a fraction of the flake opacity.
	pub detail_opacity: f64,
	pub color: Color,
	/// How often the seasonal gate is re-evaluated while mounted.
	pub recheck_interval: Duration,
}

impl SnowStyle {
	/// Gentle white snowfall (default).
	pub fn flurry() -> Self {
		Self {
			max_count: 100,
			density_divisor: 15_000.0,
			radius: 1.0..=4.0,
			speed: 0.5..=2.5,
			opacity: 0.3..=0.8,
			drift: -0.25..=0.25,
			sway_frequency: 0.01,
			sway_amplitude: 0.5,
			respawn_y: -10.0,
			detail_offset: 0.3,
			detail_scale: 0.5,
			detail_opacity: 0.5,
			color: Color::rgb(255, 255, 255),
			recheck_interval: Duration::from_secs(60 * 60),
		}
	}

	/// Denser, faster snow for large screens.
	pub fn blizzard() -> Self {
		Self {
			max_count: 250,
			density_divisor: 6_000.0,
			speed: 1.5..=4.0,
			drift: -0.8..=0.4,
			sway_amplitude: 0.8,
			..Self::flurry()
		}
	}
}

impl Default for SnowStyle {
	fn default() -> Self {
		Self::flurry()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output() {
		let white = Color::rgb(255, 255, 255);
		assert_eq!(white.to_css(), "#ffffff");
		assert_eq!(white.with_alpha(0.5).to_css(), "rgba(255, 255, 255, 0.5)");
	}

	#[test]
	fn blizzard_keeps_flurry_shape() {
		let (flurry, blizzard) = (SnowStyle::flurry(), SnowStyle::blizzard());
		assert_eq!(blizzard.radius, flurry.radius);
		assert_eq!(blizzard.respawn_y, flurry.respawn_y);
		assert!(blizzard.max_count > flurry.max_count);
	}
}
