//! Visual theming for the traffic map.
//!
//! Colors and fonts for everything the renderer draws apart from the road
//! strokes themselves, which come from the congestion style mapper.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity, 0.0 to 1.0.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color at opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS form: `#rrggbb` when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Hover label box drawn above the highlighted road.
#[derive(Clone, Debug)]
pub struct TooltipStyle {
	/// Box fill.
	pub background: Color,
	/// Label color.
	pub text: Color,
	/// Box width in pixels.
	pub width: f64,
	/// Box height in pixels.
	pub height: f64,
	/// Box corner radius.
	pub corner_radius: f64,
	/// Distance from the road midpoint up to the top edge of the box.
	pub lift: f64,
	/// Font for the road name.
	pub title_font: &'static str,
	/// Font for the congestion line.
	pub detail_font: &'static str,
}

/// Legend box anchored to the top-right corner.
#[derive(Clone, Debug)]
pub struct LegendStyle {
	/// Box fill.
	pub background: Color,
	/// Box outline.
	pub border: Color,
	/// Title and entry text color.
	pub text: Color,
	/// Box width in pixels.
	pub width: f64,
	/// Box height in pixels.
	pub height: f64,
	/// Box corner radius.
	pub corner_radius: f64,
	/// Gap between the legend and the top and right edges.
	pub inset: f64,
	/// Font for the title and entries.
	pub font: &'static str,
}

/// Complete visual theme configuration.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Canvas fill behind the roads.
	pub background: Color,
	/// Stroke color for the hovered road.
	pub highlight: Color,
	/// Extra stroke width applied to the hovered road.
	pub highlight_extra_width: f64,
	/// Hover label styling.
	pub tooltip: TooltipStyle,
	/// Legend styling.
	pub legend: LegendStyle,
}

impl Theme {
	/// Light dashboard theme.
	pub fn light() -> Self {
		Self {
			background: Color::rgb(248, 249, 250),
			highlight: Color::rgb(51, 51, 51),
			highlight_extra_width: 2.0,
			tooltip: TooltipStyle {
				background: Color::rgba(0, 0, 0, 0.8),
				text: Color::rgb(255, 255, 255),
				width: 120.0,
				height: 30.0,
				corner_radius: 5.0,
				lift: 40.0,
				title_font: "bold 12px Arial",
				detail_font: "10px Arial",
			},
			legend: LegendStyle {
				background: Color::rgba(255, 255, 255, 0.9),
				border: Color::rgb(221, 221, 221),
				text: Color::rgb(51, 51, 51),
				width: 140.0,
				height: 110.0,
				corner_radius: 8.0,
				inset: 20.0,
				font: "bold 12px Arial",
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn opaque_colors_render_as_hex() {
		assert_eq!(Color::rgb(229, 57, 53).to_css(), "#e53935");
		assert_eq!(Color::rgba(0, 0, 0, 0.8).to_css(), "rgba(0, 0, 0, 0.8)");
		assert_eq!(Color::rgb(1, 2, 3).with_alpha(0.5).a, 0.5);
	}
}
