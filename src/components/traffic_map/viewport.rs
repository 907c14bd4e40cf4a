//! Logical-to-pixel scaling and traffic map tunables.
//!
//! # Coordinate Spaces
//!
//! - **Logical**: the fixed 800×400 grid road endpoints are authored in.
//! - **Pixel**: canvas pixels. Each axis is scaled independently, so the
//!   logical grid always fills the canvas regardless of aspect ratio.

/// Width of the logical authoring grid.
pub const LOGICAL_WIDTH: f64 = 800.0;
/// Height of the logical authoring grid.
pub const LOGICAL_HEIGHT: f64 = 400.0;

/// Tunables for sizing, hit testing and deferred work.
#[derive(Clone, Debug)]
pub struct TrafficMapConfig {
	/// Added to a road's stroke width to get its hover hit radius.
	pub hit_tolerance: f64,
	/// Fraction of the canvas that must be on screen before it activates.
	pub visibility_threshold: f64,
	/// Upper bound on how long styling may wait for an idle period.
	pub idle_timeout_ms: u32,
	/// Canvas height as a fraction of container width.
	pub aspect_ratio: f64,
	/// Maximum canvas height in pixels.
	pub max_height: f64,
}

impl Default for TrafficMapConfig {
	fn default() -> Self {
		Self {
			hit_tolerance: 5.0,
			visibility_threshold: 0.1,
			idle_timeout_ms: 1000,
			aspect_ratio: 0.6,
			max_height: 500.0,
		}
	}
}

/// Pixel dimensions of the drawing surface. Both sides are at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportState {
	/// Canvas width in device pixels.
	pub pixel_width: u32,
	/// Canvas height in device pixels.
	pub pixel_height: u32,
}

impl ViewportState {
	/// Viewport of an explicit pixel size.
	pub fn new(pixel_width: u32, pixel_height: u32) -> Self {
		Self {
			pixel_width: pixel_width.max(1),
			pixel_height: pixel_height.max(1),
		}
	}

	/// Sizes the surface from its container: full width, height following the
	/// configured aspect ratio up to `max_height`.
	pub fn from_container_width(width: f64, config: &TrafficMapConfig) -> Self {
		let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
		let height = (width * config.aspect_ratio).min(config.max_height);
		Self::new(width.floor() as u32, height.floor() as u32)
	}

	/// Pixel width as `f64`.
	pub fn width(&self) -> f64 {
		self.pixel_width as f64
	}

	/// Pixel height as `f64`.
	pub fn height(&self) -> f64 {
		self.pixel_height as f64
	}

	/// Pixels per logical unit, horizontally.
	pub fn scale_x(&self) -> f64 {
		self.width() / LOGICAL_WIDTH
	}

	/// Pixels per logical unit, vertically.
	pub fn scale_y(&self) -> f64 {
		self.height() / LOGICAL_HEIGHT
	}

	/// Maps a logical point to pixel coordinates.
	pub fn to_pixels(&self, x: f64, y: f64) -> (f64, f64) {
		(x * self.scale_x(), y * self.scale_y())
	}
}

impl Default for ViewportState {
	fn default() -> Self {
		Self::new(LOGICAL_WIDTH as u32, LOGICAL_HEIGHT as u32)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn height_follows_aspect_ratio_with_cap() {
		let config = TrafficMapConfig::default();

		assert_eq!(
			ViewportState::from_container_width(400.0, &config),
			ViewportState::new(400, 240)
		);
		assert_eq!(
			ViewportState::from_container_width(800.0, &config),
			ViewportState::new(800, 480)
		);
		assert_eq!(
			ViewportState::from_container_width(1200.0, &config),
			ViewportState::new(1200, 500)
		);
	}

	#[test]
	fn zero_and_invalid_widths_clamp_to_one_pixel() {
		let config = TrafficMapConfig::default();
		for width in [0.0, -20.0, f64::NAN] {
			let vp = ViewportState::from_container_width(width, &config);
			assert_eq!(vp, ViewportState::new(1, 1));
			assert!(vp.scale_x() > 0.0 && vp.scale_y() > 0.0);
		}
	}

	#[test]
	fn axes_scale_independently() {
		let vp = ViewportState::new(400, 240);
		let (x, y) = vp.to_pixels(100.0, 200.0);
		assert_eq!(x, 50.0);
		assert_eq!(y, 120.0);

		let (x, y) = ViewportState::default().to_pixels(100.0, 0.0);
		assert_eq!((x, y), (100.0, 0.0));
	}
}
