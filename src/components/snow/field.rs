//! Falling-snow particle simulation.
//!
//! Pure state: no canvas, no timers. The renderer calls [`SnowField::step`]
//! once per animation frame and then paints [`SnowField::flakes`].

use std::ops::RangeInclusive;

use rand::Rng;

use super::style::SnowStyle;

/// A single falling flake.
#[derive(Clone, Debug, PartialEq)]
pub struct Flake {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	/// Pixels per frame, always positive.
	pub speed: f64,
	pub opacity: f64,
	/// Horizontal pixels per frame before sway; may be negative.
	pub drift: f64,
}

/// Number of flakes for a surface: one per `density_divisor` px², capped at
/// `max_count`. Unmeasurable surfaces get none.
pub fn pool_size(width: f64, height: f64, style: &SnowStyle) -> usize {
	if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
		return 0;
	}
	if style.density_divisor <= 0.0 {
		return style.max_count;
	}
	let by_area = (width * height / style.density_divisor).floor() as usize;
	by_area.min(style.max_count)
}

fn sample<R: Rng + ?Sized>(rng: &mut R, range: &RangeInclusive<f64>) -> f64 {
	range.start() + rng.r#gen::<f64>() * (range.end() - range.start())
}

/// Fixed-size pool of flakes bound to a surface size.
#[derive(Clone, Debug)]
pub struct SnowField {
	flakes: Vec<Flake>,
	width: f64,
	height: f64,
}

impl SnowField {
	/// Allocate the pool for a `width` × `height` surface with flakes scattered
	/// uniformly across it.
	pub fn populate<R: Rng + ?Sized>(style: &SnowStyle, width: f64, height: f64, rng: &mut R) -> Self {
		let count = pool_size(width, height, style);
		let flakes = (0..count)
			.map(|_| Flake {
				x: rng.r#gen::<f64>() * width,
				y: rng.r#gen::<f64>() * height,
				radius: sample(rng, &style.radius),
				speed: sample(rng, &style.speed),
				opacity: sample(rng, &style.opacity),
				drift: sample(rng, &style.drift),
			})
			.collect();

		Self {
			flakes,
			width,
			height,
		}
	}

	/// Advance every flake by one frame.
	///
	/// Flakes that fall past the bottom respawn just above the top at a random
	/// column; horizontal motion wraps around the side edges.
	pub fn step<R: Rng + ?Sized>(&mut self, style: &SnowStyle, rng: &mut R) {
		let (width, height) = (self.width, self.height);

		for flake in &mut self.flakes {
			flake.y += flake.speed;
			flake.x += flake.drift + (flake.y * style.sway_frequency).sin() * style.sway_amplitude;

			if flake.y > height {
				flake.y = style.respawn_y;
				flake.x = rng.r#gen::<f64>() * width;
			}

			if flake.x > width {
				flake.x = 0.0;
			} else if flake.x < 0.0 {
				flake.x = width;
			}
		}
	}

	/// Track a new surface size. Flakes keep their positions; anything now out
	/// of bounds is corrected by the next wraparound.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn flakes(&self) -> &[Flake] {
		&self.flakes
	}

	pub fn len(&self) -> usize {
		self.flakes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.flakes.is_empty()
	}

	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn rng() -> StdRng {
		StdRng::seed_from_u64(0x5a0e)
	}

	#[test]
	fn pool_size_follows_area_and_cap() {
		let style = SnowStyle::default();
		assert_eq!(pool_size(300.0, 100.0, &style), 2);
		assert_eq!(pool_size(800.0, 600.0, &style), 32);
		assert_eq!(pool_size(1920.0, 1080.0, &style), 100);
		assert_eq!(pool_size(10_000.0, 10_000.0, &style), 100);
		assert_eq!(pool_size(100.0, 100.0, &style), 0);
	}

	#[test]
	fn pool_size_never_exceeds_cap() {
		let style = SnowStyle::default();
		for w in (0..4000).step_by(170) {
			for h in (0..3000).step_by(130) {
				let (w, h) = (w as f64, h as f64);
				let n = pool_size(w, h, &style);
				assert!(n <= style.max_count);
				assert_eq!(n, ((w * h / style.density_divisor).floor() as usize).min(style.max_count));
			}
		}
	}

	#[test]
	fn unmeasurable_surface_gets_no_flakes() {
		let style = SnowStyle::default();
		let mut rng = rng();
		for (w, h) in [(0.0, 600.0), (800.0, 0.0), (-5.0, 10.0), (f64::NAN, 600.0)] {
			let mut field = SnowField::populate(&style, w, h, &mut rng);
			assert!(field.is_empty());
			field.step(&style, &mut rng);
		}
	}

	#[test]
	fn populated_flakes_respect_style_ranges() {
		let style = SnowStyle::default();
		let field = SnowField::populate(&style, 1920.0, 1080.0, &mut rng());
		assert_eq!(field.len(), 100);
		for f in field.flakes() {
			assert!((0.0..=1920.0).contains(&f.x));
			assert!((0.0..=1080.0).contains(&f.y));
			assert!(style.radius.contains(&f.radius));
			assert!(style.speed.contains(&f.speed));
			assert!(style.opacity.contains(&f.opacity));
			assert!(style.drift.contains(&f.drift));
		}
	}

	#[test]
	fn step_applies_fall_and_sway() {
		let style = SnowStyle::default();
		let mut field = SnowField::populate(&style, 800.0, 600.0, &mut rng());
		field.flakes = vec![Flake {
			x: 100.0,
			y: 50.0,
			radius: 2.0,
			speed: 1.5,
			opacity: 0.5,
			drift: 0.1,
		}];

		field.step(&style, &mut rng());

		let f = &field.flakes()[0];
		assert_eq!(f.y, 51.5);
		let expected_x = 100.0 + 0.1 + (51.5f64 * 0.01).sin() * 0.5;
		assert!((f.x - expected_x).abs() < 1e-12);
		assert_eq!((f.radius, f.speed, f.opacity, f.drift), (2.0, 1.5, 0.5, 0.1));
	}

	#[test]
	fn flakes_past_the_bottom_respawn_above_the_top() {
		let style = SnowStyle::default();
		let mut field = SnowField::populate(&style, 800.0, 600.0, &mut rng());
		field.flakes = vec![Flake {
			x: 400.0,
			y: 599.5,
			radius: 2.0,
			speed: 1.0,
			opacity: 0.5,
			drift: 0.0,
		}];

		field.step(&style, &mut rng());

		let f = &field.flakes()[0];
		assert_eq!(f.y, style.respawn_y);
		assert!(f.y < 0.0);
		assert!((0.0..=800.0).contains(&f.x));
	}

	#[test]
	fn horizontal_motion_wraps() {
		let style = SnowStyle {
			sway_amplitude: 0.0,
			..SnowStyle::default()
		};
		let mut field = SnowField::populate(&style, 800.0, 600.0, &mut rng());
		let base = Flake {
			x: 0.0,
			y: 100.0,
			radius: 2.0,
			speed: 1.0,
			opacity: 0.5,
			drift: 0.0,
		};
		field.flakes = vec![
			Flake { x: 799.9, drift: 0.25, ..base.clone() },
			Flake { x: 0.1, drift: -0.25, ..base },
		];

		field.step(&style, &mut rng());

		assert_eq!(field.flakes()[0].x, 0.0);
		assert_eq!(field.flakes()[1].x, 800.0);
	}

	#[test]
	fn long_run_keeps_flakes_in_bounds() {
		let style = SnowStyle::default();
		let mut rng = rng();
		let mut field = SnowField::populate(&style, 640.0, 480.0, &mut rng);
		for _ in 0..5_000 {
			field.step(&style, &mut rng);
			for f in field.flakes() {
				assert!(f.y <= 480.0, "flake stuck below the surface: {f:?}");
				assert!(f.y >= style.respawn_y);
				assert!((0.0..=640.0).contains(&f.x), "flake outside columns: {f:?}");
			}
		}
	}

	#[test]
	fn resize_keeps_pool_and_positions() {
		let style = SnowStyle {
			sway_amplitude: 0.0,
			density_divisor: 5_000.0,
			..SnowStyle::default()
		};
		let mut rng = rng();
		let mut field = SnowField::populate(&style, 800.0, 600.0, &mut rng);
		field.flakes.truncate(50);
		assert_eq!(field.len(), 50);
		let before = field.flakes().to_vec();

		field.resize(400.0, 300.0);

		assert_eq!(field.size(), (400.0, 300.0));
		assert_eq!(field.flakes(), before.as_slice());

		// Out-of-bounds flakes are pulled back in using the new bounds.
		field.step(&style, &mut rng);
		for (after, before) in field.flakes().iter().zip(&before) {
			if before.y + before.speed > 300.0 {
				assert_eq!(after.y, style.respawn_y);
				assert!((0.0..=400.0).contains(&after.x));
			} else {
				assert_eq!(after.y, before.y + before.speed);
				assert!((0.0..=400.0).contains(&after.x));
			}
		}
	}
}
