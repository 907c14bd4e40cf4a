//! Road network data structures supplied to the traffic map.

use std::fmt;

use serde::Deserialize;

use super::theme::Color;

/// Traffic density classification for a road.
///
/// Deserializes from the lowercase names; anything unrecognised (or a
/// missing field) becomes [`CongestionLevel::Unknown`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum CongestionLevel {
	/// Light traffic.
	Low,
	/// Moderate traffic.
	Medium,
	/// Heavy traffic.
	High,
	/// Missing or unrecognised level.
	#[default]
	Unknown,
}

impl CongestionLevel {
	/// Levels shown in the legend, heaviest first.
	pub const LEGEND: [CongestionLevel; 3] = [Self::High, Self::Medium, Self::Low];

	/// Lowercase name, as used in the road JSON.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Low => "low",
			Self::Medium => "medium",
			Self::High => "high",
			Self::Unknown => "unknown",
		}
	}

	/// Capitalized name used for legend labels.
	pub fn title(self) -> &'static str {
		match self {
			Self::Low => "Low",
			Self::Medium => "Medium",
			Self::High => "High",
			Self::Unknown => "Unknown",
		}
	}
}

impl From<&str> for CongestionLevel {
	fn from(value: &str) -> Self {
		match value {
			"low" => Self::Low,
			"medium" => Self::Medium,
			"high" => Self::High,
			_ => Self::Unknown,
		}
	}
}

impl From<String> for CongestionLevel {
	fn from(value: String) -> Self {
		Self::from(value.as_str())
	}
}

impl fmt::Display for CongestionLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A straight road segment in the 800×400 logical plane.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadSegment {
	/// Unique identifier, used to track the hovered road.
	pub id: String,
	/// Display name shown in the hover label.
	pub name: String,
	/// Start point, logical x.
	pub start_x: f64,
	/// Start point, logical y.
	pub start_y: f64,
	/// End point, logical x.
	pub end_x: f64,
	/// End point, logical y.
	pub end_y: f64,
	/// Current congestion level.
	#[serde(default)]
	pub congestion: CongestionLevel,
	/// Number of vehicles currently on the segment.
	#[serde(default)]
	pub vehicles: u32,
}

/// A road annotated with its derived stroke style.
///
/// `stroke_width` and `stroke_color` depend only on `road.congestion`.
#[derive(Clone, Debug, PartialEq)]
pub struct StyledRoadSegment {
	/// The source road.
	pub road: RoadSegment,
	/// Stroke width in logical units.
	pub stroke_width: f64,
	/// Stroke color for the congestion level.
	pub stroke_color: Color,
}

/// The road currently under the pointer, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverState {
	/// Id of the hovered road.
	pub hovered_road_id: Option<String>,
}

/// Complete road set handed over by the data source.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TrafficData {
	/// Every road to draw.
	pub roads: Vec<RoadSegment>,
}
