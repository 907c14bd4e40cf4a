//! Drawing surface abstraction.
//!
//! The renderer only needs a small slice of the 2D canvas API. Putting that
//! slice behind [`Surface`] keeps the render pass free of DOM handles, so it can
//! be exercised natively against a recording surface.

use web_sys::CanvasRenderingContext2d;

use super::theme::Color;

/// The subset of 2D canvas operations used by the traffic renderer.
///
/// Calls are fire-and-forget: a surface that fails a draw call drops it and
/// carries on, so a frame is always best effort.
pub trait Surface {
	/// Clears a rectangle to transparent.
	fn clear_rect(&self, x: f64, y: f64, w: f64, h: f64);
	/// Fills a rectangle with the current fill color.
	fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64);
	/// Sets the fill color.
	fn set_fill(&self, color: Color);
	/// Sets the stroke color.
	fn set_stroke(&self, color: Color);
	/// Sets the stroke width in pixels.
	fn set_line_width(&self, width: f64);
	/// Canvas line cap name: `butt`, `round` or `square`.
	fn set_line_cap(&self, cap: &str);
	/// Sets the CSS font used by [`Surface::fill_text`].
	fn set_font(&self, font: &str);
	/// Canvas text alignment name, e.g. `left` or `center`.
	fn set_text_align(&self, align: &str);
	/// Starts a new path.
	fn begin_path(&self);
	/// Closes the current subpath.
	fn close_path(&self);
	/// Starts a subpath at a point.
	fn move_to(&self, x: f64, y: f64);
	/// Adds a straight segment to a point.
	fn line_to(&self, x: f64, y: f64);
	/// Adds a rounded corner between two tangent lines.
	fn arc_to(&self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64);
	/// Strokes the current path.
	fn stroke(&self);
	/// Fills the current path.
	fn fill(&self);
	/// Draws text at a point.
	fn fill_text(&self, text: &str, x: f64, y: f64);

	/// Appends a closed rounded rectangle to the current path.
	fn rounded_rect(&self, x: f64, y: f64, w: f64, h: f64, radius: f64) {
		let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
		self.move_to(x + r, y);
		self.arc_to(x + w, y, x + w, y + h, r);
		self.arc_to(x + w, y + h, x, y + h, r);
		self.arc_to(x, y + h, x, y, r);
		self.arc_to(x, y, x + w, y, r);
		self.close_path();
	}
}

impl Surface for CanvasRenderingContext2d {
	fn clear_rect(&self, x: f64, y: f64, w: f64, h: f64) {
		CanvasRenderingContext2d::clear_rect(self, x, y, w, h);
	}

	fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64) {
		CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
	}

	fn set_fill(&self, color: Color) {
		self.set_fill_style_str(&color.to_css());
	}

	fn set_stroke(&self, color: Color) {
		self.set_stroke_style_str(&color.to_css());
	}

	fn set_line_width(&self, width: f64) {
		CanvasRenderingContext2d::set_line_width(self, width);
	}

	fn set_line_cap(&self, cap: &str) {
		CanvasRenderingContext2d::set_line_cap(self, cap);
	}

	fn set_font(&self, font: &str) {
		CanvasRenderingContext2d::set_font(self, font);
	}

	fn set_text_align(&self, align: &str) {
		CanvasRenderingContext2d::set_text_align(self, align);
	}

	fn begin_path(&self) {
		CanvasRenderingContext2d::begin_path(self);
	}

	fn close_path(&self) {
		CanvasRenderingContext2d::close_path(self);
	}

	fn move_to(&self, x: f64, y: f64) {
		CanvasRenderingContext2d::move_to(self, x, y);
	}

	fn line_to(&self, x: f64, y: f64) {
		CanvasRenderingContext2d::line_to(self, x, y);
	}

	fn arc_to(&self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) {
		let _ = CanvasRenderingContext2d::arc_to(self, x1, y1, x2, y2, radius);
	}

	fn stroke(&self) {
		CanvasRenderingContext2d::stroke(self);
	}

	fn fill(&self) {
		CanvasRenderingContext2d::fill(self);
	}

	fn fill_text(&self, text: &str, x: f64, y: f64) {
		let _ = CanvasRenderingContext2d::fill_text(self, text, x, y);
	}
}

#[cfg(test)]
pub(crate) mod recording {
	//! A [`Surface`] that records what would have been drawn.

	use std::cell::RefCell;

	use super::{Color, Surface};

	/// One visible drawing operation, with the state it was drawn in.
	#[derive(Clone, Debug, PartialEq)]
	pub enum DrawOp {
		Clear { w: f64, h: f64 },
		FillRect { x: f64, y: f64, w: f64, h: f64, color: Color },
		Stroke { path: Vec<(f64, f64)>, width: f64, color: Color, cap: String },
		Fill { path: Vec<(f64, f64)>, color: Color },
		Text { text: String, x: f64, y: f64, font: String, align: String, color: Color },
	}

	#[derive(Default)]
	struct PenState {
		fill: Option<Color>,
		stroke: Option<Color>,
		width: f64,
		cap: String,
		font: String,
		align: String,
		path: Vec<(f64, f64)>,
	}

	#[derive(Default)]
	pub struct RecordingSurface {
		pen: RefCell<PenState>,
		ops: RefCell<Vec<DrawOp>>,
	}

	impl RecordingSurface {
		pub fn ops(&self) -> Vec<DrawOp> {
			self.ops.borrow().clone()
		}

		/// Strokes as `(path, width, color)`, in draw order.
		pub fn strokes(&self) -> Vec<(Vec<(f64, f64)>, f64, Color)> {
			self.ops
				.borrow()
				.iter()
				.filter_map(|op| match op {
					DrawOp::Stroke {
						path, width, color, ..
					} => Some((path.clone(), *width, *color)),
					_ => None,
				})
				.collect()
		}

		pub fn texts(&self) -> Vec<(String, f64, f64)> {
			self.ops
				.borrow()
				.iter()
				.filter_map(|op| match op {
					DrawOp::Text { text, x, y, .. } => Some((text.clone(), *x, *y)),
					_ => None,
				})
				.collect()
		}

		fn push(&self, op: DrawOp) {
			self.ops.borrow_mut().push(op);
		}

		fn pen_color(color: Option<Color>) -> Color {
			color.unwrap_or(Color::rgb(0, 0, 0))
		}
	}

	/// Axis-aligned bounds `(min_x, min_y, max_x, max_y)` of a recorded path.
	pub fn bounds(path: &[(f64, f64)]) -> (f64, f64, f64, f64) {
		path.iter().fold(
			(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
			|(a, b, c, d), &(x, y)| (a.min(x), b.min(y), c.max(x), d.max(y)),
		)
	}

	impl Surface for RecordingSurface {
		fn clear_rect(&self, _x: f64, _y: f64, w: f64, h: f64) {
			self.push(DrawOp::Clear { w, h });
		}

		fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64) {
			let color = Self::pen_color(self.pen.borrow().fill);
			self.push(DrawOp::FillRect { x, y, w, h, color });
		}

		fn set_fill(&self, color: Color) {
			self.pen.borrow_mut().fill = Some(color);
		}

		fn set_stroke(&self, color: Color) {
			self.pen.borrow_mut().stroke = Some(color);
		}

		fn set_line_width(&self, width: f64) {
			self.pen.borrow_mut().width = width;
		}

		fn set_line_cap(&self, cap: &str) {
			self.pen.borrow_mut().cap = cap.to_string();
		}

		fn set_font(&self, font: &str) {
			self.pen.borrow_mut().font = font.to_string();
		}

		fn set_text_align(&self, align: &str) {
			self.pen.borrow_mut().align = align.to_string();
		}

		fn begin_path(&self) {
			self.pen.borrow_mut().path.clear();
		}

		fn close_path(&self) {}

		fn move_to(&self, x: f64, y: f64) {
			self.pen.borrow_mut().path.push((x, y));
		}

		fn line_to(&self, x: f64, y: f64) {
			self.pen.borrow_mut().path.push((x, y));
		}

		fn arc_to(&self, x1: f64, y1: f64, _x2: f64, _y2: f64, _radius: f64) {
			self.pen.borrow_mut().path.push((x1, y1));
		}

		fn stroke(&self) {
			let pen = self.pen.borrow();
			let op = DrawOp::Stroke {
				path: pen.path.clone(),
				width: pen.width,
				color: Self::pen_color(pen.stroke),
				cap: pen.cap.clone(),
			};
			drop(pen);
			self.push(op);
		}

		fn fill(&self) {
			let pen = self.pen.borrow();
			let op = DrawOp::Fill {
				path: pen.path.clone(),
				color: Self::pen_color(pen.fill),
			};
			drop(pen);
			self.push(op);
		}

		fn fill_text(&self, text: &str, x: f64, y: f64) {
			let pen = self.pen.borrow();
			let op = DrawOp::Text {
				text: text.to_string(),
				x,
				y,
				font: pen.font.clone(),
				align: pen.align.clone(),
				color: Self::pen_color(pen.fill),
			};
			drop(pen);
			self.push(op);
		}
	}
}
