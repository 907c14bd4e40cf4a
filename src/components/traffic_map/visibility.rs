//! One-way activation gate driven by viewport intersection.

/// Whether the surface has been on screen yet.
///
/// Starts [`VisibilityGate::Pending`] and latches to
/// [`VisibilityGate::Visible`] the first time enough of the surface is in view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisibilityGate {
	#[default]
	Pending,
	Visible,
}

impl VisibilityGate {
	/// Feeds an intersection ratio (0.0 to 1.0) reported for the surface.
	///
	/// Returns `true` only on the observation that opens the gate; the caller
	/// should stop observing then. Later observations are ignored.
	pub fn observe(&mut self, intersection_ratio: f64, threshold: f64) -> bool {
		match *self {
			Self::Visible => false,
			Self::Pending if intersection_ratio > 0.0 && intersection_ratio >= threshold => {
				*self = Self::Visible;
				true
			}
			Self::Pending => false,
		}
	}

	/// Whether the gate has opened.
	pub fn is_visible(self) -> bool {
		self == Self::Visible
	}
}
