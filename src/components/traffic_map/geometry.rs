//! Point-to-segment distance and hit testing in pixel space.

/// Euclidean distance from `(px, py)` to the segment `(x1, y1)-(x2, y2)`.
///
/// The projection onto the segment's line is clamped to the segment, so points
/// beyond either end measure to the nearer endpoint. A zero-length segment is
/// treated as the single point `(x1, y1)`.
pub fn distance_point_to_segment_clamped(
	px: f64,
	py: f64,
	x1: f64,
	y1: f64,
	x2: f64,
	y2: f64,
) -> f64 {
	let (dx, dy) = (x2 - x1, y2 - y1);
	let len_sq = dx * dx + dy * dy;

	let t = if len_sq > f64::EPSILON && len_sq.is_finite() {
		(((px - x1) * dx + (py - y1) * dy) / len_sq).clamp(0.0, 1.0)
	} else {
		0.0
	};

	let (cx, cy) = (x1 + t * dx, y1 + t * dy);
	(px - cx).hypot(py - cy)
}

/// Whether `(px, py)` lies within `radius` of the segment.
pub fn is_within_hit_radius(
	px: f64,
	py: f64,
	x1: f64,
	y1: f64,
	x2: f64,
	y2: f64,
	radius: f64,
) -> bool {
	distance_point_to_segment_clamped(px, py, x1, y1, x2, y2) <= radius
}
