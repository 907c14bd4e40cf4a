//! Congestion level to road stroke mapping.

use super::theme::Color;
use super::types::{CongestionLevel, RoadSegment, StyledRoadSegment};

/// Stroke used to draw a road of a given congestion level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoadStyle {
	/// Stroke width in logical units.
	pub width: f64,
	/// Stroke color.
	pub color: Color,
}

impl RoadStyle {
	/// Looks up the stroke for `level`. Total over every level.
	pub const fn for_level(level: CongestionLevel) -> Self {
		match level {
			CongestionLevel::High => Self {
				width: 8.0,
				color: Color::rgb(229, 57, 53), // #e53935
			},
			CongestionLevel::Medium => Self {
				width: 5.0,
				color: Color::rgb(251, 140, 0), // #fb8c00
			},
			CongestionLevel::Low => Self {
				width: 3.0,
				color: Color::rgb(67, 160, 71), // #43a047
			},
			CongestionLevel::Unknown => Self {
				width: 2.0,
				color: Color::rgb(117, 117, 117), // #757575
			},
		}
	}
}

/// Annotates each road with its stroke, preserving input order.
pub fn style_roads(roads: &[RoadSegment]) -> Vec<StyledRoadSegment> {
	roads
		.iter()
		.map(|road| {
			let style = RoadStyle::for_level(road.congestion);
			StyledRoadSegment {
				road: road.clone(),
				stroke_width: style.width,
				stroke_color: style.color,
			}
		})
		.collect()
}
