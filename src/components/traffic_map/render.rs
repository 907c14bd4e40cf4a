//! Canvas rendering for the traffic map.
//!
//! Each frame is drawn from scratch in four passes:
//! 1. Background (clear + fill)
//! 2. Road strokes, scaled from logical to pixel space
//! 3. Hover highlight and label for the hovered road
//! 4. Legend, anchored top-right in pixel space

use super::style::RoadStyle;
use super::surface::Surface;
use super::theme::{Color, Theme};
use super::types::{CongestionLevel, HoverState, StyledRoadSegment};
use super::viewport::ViewportState;

/// Vertical spacing between legend rows, starting below the title.
const LEGEND_ROW_SPACING: f64 = 20.0;
/// Horizontal padding inside the legend box.
const LEGEND_PADDING: f64 = 10.0;
/// Length of the sample stroke in each legend row.
const LEGEND_SAMPLE_LENGTH: f64 = 30.0;

/// Renders the complete traffic map to the surface.
pub fn render(
	surface: &impl Surface,
	viewport: &ViewportState,
	roads: &[StyledRoadSegment],
	hover: &HoverState,
	theme: &Theme,
) {
	draw_background(surface, viewport, theme);

	surface.set_line_cap("round");
	for road in roads {
		draw_road(surface, viewport, road, road.stroke_width, road.stroke_color);
	}

	let hovered = hover
		.hovered_road_id
		.as_deref()
		.and_then(|id| roads.iter().find(|r| r.road.id == id));
	if let Some(road) = hovered {
		draw_road(
			surface,
			viewport,
			road,
			road.stroke_width + theme.highlight_extra_width,
			theme.highlight,
		);
		draw_tooltip(surface, viewport, road, theme);
	}

	draw_legend(surface, viewport, theme);
}

/// Top-left corner of the legend box in pixel space.
pub fn legend_origin(viewport: &ViewportState, theme: &Theme) -> (f64, f64) {
	(
		viewport.width() - theme.legend.inset - theme.legend.width,
		theme.legend.inset,
	)
}

fn draw_background(surface: &impl Surface, viewport: &ViewportState, theme: &Theme) {
	surface.clear_rect(0.0, 0.0, viewport.width(), viewport.height());
	surface.set_fill(theme.background);
	surface.fill_rect(0.0, 0.0, viewport.width(), viewport.height());
}

fn draw_road(
	surface: &impl Surface,
	viewport: &ViewportState,
	road: &StyledRoadSegment,
	width: f64,
	color: Color,
) {
	let (x1, y1) = viewport.to_pixels(road.road.start_x, road.road.start_y);
	let (x2, y2) = viewport.to_pixels(road.road.end_x, road.road.end_y);

	surface.begin_path();
	surface.move_to(x1, y1);
	surface.line_to(x2, y2);
	surface.set_stroke(color);
	surface.set_line_width(width);
	surface.set_line_cap("round");
	surface.stroke();
}

fn draw_tooltip(
	surface: &impl Surface,
	viewport: &ViewportState,
	road: &StyledRoadSegment,
	theme: &Theme,
) {
	let style = &theme.tooltip;
	let (mid_x, mid_y) = viewport.to_pixels(
		(road.road.start_x + road.road.end_x) / 2.0,
		(road.road.start_y + road.road.end_y) / 2.0,
	);
	let (left, top) = (mid_x - style.width / 2.0, mid_y - style.lift);

	surface.set_fill(style.background);
	surface.begin_path();
	surface.rounded_rect(left, top, style.width, style.height, style.corner_radius);
	surface.fill();

	surface.set_fill(style.text);
	surface.set_text_align("center");
	surface.set_font(style.title_font);
	surface.fill_text(&road.road.name, mid_x, top + style.height / 2.0);
	surface.set_font(style.detail_font);
	surface.fill_text(
		&format!("{} traffic", road.road.congestion),
		mid_x,
		top + style.height,
	);
}

fn draw_legend(surface: &impl Surface, viewport: &ViewportState, theme: &Theme) {
	let style = &theme.legend;
	let (x, y) = legend_origin(viewport, theme);

	surface.set_fill(style.background);
	surface.begin_path();
	surface.rounded_rect(x, y, style.width, style.height, style.corner_radius);
	surface.fill();
	surface.set_stroke(style.border);
	surface.set_line_width(1.0);
	surface.stroke();

	surface.set_fill(style.text);
	surface.set_font(style.font);
	surface.set_text_align("left");
	surface.fill_text("Traffic Legend", x + LEGEND_PADDING, y + LEGEND_ROW_SPACING);

	for (row, level) in CongestionLevel::LEGEND.into_iter().enumerate() {
		let sample = RoadStyle::for_level(level);
		let row_y = y + LEGEND_ROW_SPACING * (row as f64 + 2.0);

		surface.begin_path();
		surface.move_to(x + LEGEND_PADDING, row_y);
		surface.line_to(x + LEGEND_PADDING + LEGEND_SAMPLE_LENGTH, row_y);
		surface.set_stroke(sample.color);
		surface.set_line_width(sample.width);
		surface.set_line_cap("round");
		surface.stroke();

		surface.fill_text(
			level.title(),
			x + LEGEND_PADDING * 2.0 + LEGEND_SAMPLE_LENGTH,
			row_y + 4.0,
		);
	}
}

#[cfg(test)]
mod tests {
	use super::super::style::style_roads;
	use super::super::surface::recording::{DrawOp, RecordingSurface, bounds};
	use super::super::types::RoadSegment;
	use super::*;

	fn road(id: &str, start: (f64, f64), end: (f64, f64), level: CongestionLevel) -> RoadSegment {
		RoadSegment {
			id: id.into(),
			name: format!("{id} street"),
			start_x: start.0,
			start_y: start.1,
			end_x: end.0,
			end_y: end.1,
			congestion: level,
			vehicles: 12,
		}
	}

	fn frame(
		viewport: ViewportState,
		roads: &[RoadSegment],
		hover: HoverState,
	) -> RecordingSurface {
		let surface = RecordingSurface::default();
		render(
			&surface,
			&viewport,
			&style_roads(roads),
			&hover,
			&Theme::default(),
		);
		surface
	}

	#[test]
	fn draws_single_high_road_and_legend() {
		let roads = [road("r0", (0.0, 0.0), (100.0, 0.0), CongestionLevel::High)];
		let surface = frame(ViewportState::new(800, 400), &roads, HoverState::default());

		let ops = surface.ops();
		assert_eq!(ops[0], DrawOp::Clear { w: 800.0, h: 400.0 });
		assert_eq!(
			ops[1],
			DrawOp::FillRect {
				x: 0.0,
				y: 0.0,
				w: 800.0,
				h: 400.0,
				color: Color::rgb(248, 249, 250),
			}
		);

		let strokes = surface.strokes();
		let (path, width, color) = &strokes[0];
		assert_eq!(path, &vec![(0.0, 0.0), (100.0, 0.0)]);
		assert_eq!(*width, 8.0);
		assert_eq!(color.to_css(), "#e53935");
		assert!(
			ops.iter()
				.all(|op| !matches!(op, DrawOp::Stroke { cap, .. } if cap != "round"))
		);

		// legend box sits 20px in from the top-right corner
		let legend_fill = ops
			.iter()
			.find_map(|op| match op {
				DrawOp::Fill { path, color } if *color == Color::rgba(255, 255, 255, 0.9) => {
					Some(bounds(path))
				}
				_ => None,
			})
			.unwrap();
		assert_eq!(legend_fill, (640.0, 20.0, 780.0, 130.0));

		let labels: Vec<_> = surface.texts().into_iter().map(|t| t.0).collect();
		assert_eq!(labels, ["Traffic Legend", "High", "Medium", "Low"]);
	}

	#[test]
	fn legend_samples_use_mapper_styles() {
		let surface = frame(ViewportState::new(800, 400), &[], HoverState::default());
		let samples: Vec<_> = surface
			.strokes()
			.into_iter()
			.filter(|(path, ..)| path.len() == 2)
			.map(|(path, width, color)| (path[0].1, width, color.to_css()))
			.collect();

		assert_eq!(
			samples,
			[
				(60.0, 8.0, "#e53935".to_string()),
				(80.0, 5.0, "#fb8c00".to_string()),
				(100.0, 3.0, "#43a047".to_string()),
			]
		);
	}

	#[test]
	fn roads_scale_per_axis() {
		let roads = [road("r0", (100.0, 200.0), (800.0, 400.0), CongestionLevel::Low)];
		let surface = frame(ViewportState::new(400, 240), &roads, HoverState::default());

		let (path, ..) = &surface.strokes()[0];
		assert_eq!(path, &vec![(50.0, 120.0), (400.0, 240.0)]);
	}

	#[test]
	fn hovered_road_gets_highlight_and_label() {
		let roads = [
			road("r0", (0.0, 100.0), (200.0, 100.0), CongestionLevel::Medium),
			road("r1", (0.0, 300.0), (200.0, 300.0), CongestionLevel::Low),
		];
		let hover = HoverState {
			hovered_road_id: Some("r0".into()),
		};
		let surface = frame(ViewportState::new(800, 400), &roads, hover);

		let strokes = surface.strokes();
		let (path, width, color) = &strokes[2];
		assert_eq!(path, &vec![(0.0, 100.0), (200.0, 100.0)]);
		assert_eq!(*width, 7.0);
		assert_eq!(*color, Color::rgb(51, 51, 51));

		let texts = surface.texts();
		assert_eq!(texts[0], ("r0 street".to_string(), 100.0, 75.0));
		assert!(surface.ops().iter().any(|op| matches!(
			op,
			DrawOp::Text { text, font, align, color, .. }
				if text == "r0 street"
					&& font == "bold 12px Arial"
					&& align == "center"
					&& *color == Color::rgb(255, 255, 255)
		)));
		assert_eq!(texts[1], ("medium traffic".to_string(), 100.0, 90.0));

		let label_box = surface
			.ops()
			.iter()
			.find_map(|op| match op {
				DrawOp::Fill { path, color } if *color == Color::rgba(0, 0, 0, 0.8) => {
					Some(bounds(path))
				}
				_ => None,
			})
			.unwrap();
		assert_eq!(label_box, (40.0, 60.0, 160.0, 90.0));
	}

	#[test]
	fn stale_hover_id_draws_no_highlight() {
		let roads = [road("r0", (0.0, 0.0), (100.0, 0.0), CongestionLevel::High)];
		let hover = HoverState {
			hovered_road_id: Some("gone".into()),
		};
		let surface = frame(ViewportState::new(800, 400), &roads, hover);

		// one road plus the legend border and three samples
		assert_eq!(surface.strokes().len(), 5);
		assert_eq!(surface.texts()[0].0, "Traffic Legend");
	}

	#[test]
	fn degenerate_roads_still_render() {
		let roads = [road("dot", (50.0, 50.0), (50.0, 50.0), CongestionLevel::Unknown)];
		let surface = frame(ViewportState::new(1, 1), &roads, HoverState::default());

		let (path, width, _) = &surface.strokes()[0];
		assert_eq!(path[0], path[1]);
		assert_eq!(*width, 2.0);
	}
}
