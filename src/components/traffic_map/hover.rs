//! Pointer hit testing against road segments.

use super::geometry::is_within_hit_radius;
use super::types::StyledRoadSegment;
use super::viewport::ViewportState;

/// Finds the road under the surface-local pixel position `(x, y)`.
///
/// Roads are tested in order and the first one within
/// `stroke_width + tolerance` pixels wins, so an earlier road shadows any
/// later road it overlaps.
pub fn resolve_hover<'a>(
	roads: &'a [StyledRoadSegment],
	viewport: &ViewportState,
	x: f64,
	y: f64,
	tolerance: f64,
) -> Option<&'a StyledRoadSegment> {
	roads.iter().find(|styled| {
		let (x1, y1) = viewport.to_pixels(styled.road.start_x, styled.road.start_y);
		let (x2, y2) = viewport.to_pixels(styled.road.end_x, styled.road.end_y);
		is_within_hit_radius(x, y, x1, y1, x2, y2, styled.stroke_width + tolerance)
	})
}

/// Converts a client-space pointer position to surface-local coordinates.
pub fn client_to_local(client_x: f64, client_y: f64, left: f64, top: f64) -> (f64, f64) {
	(client_x - left, client_y - top)
}
