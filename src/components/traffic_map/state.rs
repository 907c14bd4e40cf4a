//! Traffic map state and interaction tracking.
//!
//! Owns everything the canvas driver mutates between events: the visibility
//! gate, the current road set, its styled form, the viewport and the hover
//! state. Styling is split into a [`StyleJob`] so it can be run later by an
//! [`IdleScheduler`](super::schedule::IdleScheduler) and applied back; a job
//! that finishes after its road set was replaced is discarded.

use std::rc::Rc;

use log::debug;

use super::hover::resolve_hover;
use super::render;
use super::style::style_roads;
use super::surface::Surface;
use super::theme::Theme;
use super::types::{HoverState, RoadSegment, StyledRoadSegment};
use super::viewport::{TrafficMapConfig, ViewportState};
use super::visibility::VisibilityGate;

/// A pending styling pass over one road set.
#[derive(Clone, Debug)]
pub struct StyleJob {
	generation: u64,
	roads: Rc<Vec<RoadSegment>>,
}

/// The output of a [`StyleJob`], ready to hand back to the state.
#[derive(Clone, Debug)]
pub struct StyledRoads {
	generation: u64,
	roads: Vec<StyledRoadSegment>,
}

impl StyleJob {
	/// Styles the snapshot taken when the job was created.
	pub fn run(self) -> StyledRoads {
		StyledRoads {
			generation: self.generation,
			roads: style_roads(&self.roads),
		}
	}
}

/// Core traffic map state.
///
/// Created once when the component mounts, then mutated by the resize,
/// pointer and intersection handlers.
#[derive(Debug)]
pub struct TrafficMapState {
	/// One-way visibility gate.
	pub gate: VisibilityGate,
	/// Current pixel size and scale factors.
	pub viewport: ViewportState,
	/// Road under the pointer, if any.
	pub hover: HoverState,
	roads: Rc<Vec<RoadSegment>>,
	styled: Option<Vec<StyledRoadSegment>>,
	generation: u64,
	job_in_flight: bool,
}

impl TrafficMapState {
	/// Starts pending, with unstyled `roads`.
	pub fn new(roads: Vec<RoadSegment>, viewport: ViewportState) -> Self {
		Self {
			gate: VisibilityGate::default(),
			viewport,
			hover: HoverState::default(),
			roads: Rc::new(roads),
			styled: None,
			generation: 0,
			job_in_flight: false,
		}
	}

	/// The current, unstyled road set.
	pub fn roads(&self) -> &[RoadSegment] {
		&self.roads
	}

	/// Styled roads, once the surface is visible and styling has completed.
	pub fn styled(&self) -> Option<&[StyledRoadSegment]> {
		self.styled.as_deref()
	}

	/// Whether a frame can be drawn.
	pub fn is_ready(&self) -> bool {
		self.gate.is_visible() && self.styled.is_some()
	}

	/// Whether a road is currently hovered.
	pub fn is_hovering(&self) -> bool {
		self.hover.hovered_road_id.is_some()
	}

	/// Replaces the whole road set. Styled data is dropped until the next
	/// styling pass completes.
	pub fn set_roads(&mut self, roads: Vec<RoadSegment>) {
		if let Some(id) = &self.hover.hovered_road_id {
			if !roads.iter().any(|r| &r.id == id) {
				self.hover.hovered_road_id = None;
			}
		}
		self.roads = Rc::new(roads);
		self.styled = None;
		self.generation += 1;
		self.job_in_flight = false;
		debug!(
			"traffic-lens: road set replaced ({} roads, generation {})",
			self.roads.len(),
			self.generation
		);
	}

	/// Feeds an intersection ratio to the gate. Returns `true` when the gate
	/// opens, at which point the observer can be detached.
	pub fn observe_visibility(&mut self, ratio: f64, config: &TrafficMapConfig) -> bool {
		self.gate.observe(ratio, config.visibility_threshold)
	}

	/// Takes the styling pass the current road set still needs, if any.
	///
	/// Nothing is returned while the gate is closed, once styled data is
	/// present, or while a job for this road set is already out.
	pub fn take_style_job(&mut self) -> Option<StyleJob> {
		if !self.gate.is_visible() || self.styled.is_some() || self.job_in_flight {
			return None;
		}
		self.job_in_flight = true;
		Some(StyleJob {
			generation: self.generation,
			roads: self.roads.clone(),
		})
	}

	/// Stores a finished styling pass. Returns `false` if it belongs to a
	/// road set that has since been replaced.
	pub fn apply_styled(&mut self, styled: StyledRoads) -> bool {
		if styled.generation != self.generation {
			debug!(
				"traffic-lens: dropping stale styling (generation {} != {})",
				styled.generation, self.generation
			);
			return false;
		}
		self.styled = Some(styled.roads);
		self.job_in_flight = false;
		true
	}

	/// Recomputes the viewport from the container width.
	pub fn resize(&mut self, container_width: f64, config: &TrafficMapConfig) -> ViewportState {
		self.viewport = ViewportState::from_container_width(container_width, config);
		self.viewport
	}

	/// Updates the hovered road for a surface-local pointer position.
	///
	/// Returns whether the hovered road changed. Does nothing until styled
	/// data is available.
	pub fn pointer_moved(&mut self, x: f64, y: f64, config: &TrafficMapConfig) -> bool {
		let Some(styled) = self.styled.as_deref() else {
			return false;
		};
		let hovered = resolve_hover(styled, &self.viewport, x, y, config.hit_tolerance)
			.map(|road| road.road.id.clone());

		if hovered == self.hover.hovered_road_id {
			return false;
		}
		self.hover.hovered_road_id = hovered;
		true
	}

	/// Draws the current frame. Returns `false` without touching the surface
	/// if the map is not ready yet.
	pub fn draw(&self, surface: &impl Surface, theme: &Theme) -> bool {
		match self.styled.as_deref() {
			Some(styled) if self.gate.is_visible() => {
				render::render(surface, &self.viewport, styled, &self.hover, theme);
				true
			}
			_ => false,
		}
	}
}
