//! Device position tracking.
//!
//! A [`PositionSource`] pushes fixes and errors through callbacks; the
//! [`LocationTracker`] folds them into what the location panel shows. The
//! tracker always holds a usable position, starting from
//! [`Position::DEFAULT`] until the first fix arrives.

use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Position as GeoFix, PositionError, PositionOptions};

use crate::error::DashboardError;

const CAPABILITY: &str = "Geolocation";

/// A geographic fix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
	/// Degrees north.
	pub latitude: f64,
	/// Degrees east.
	pub longitude: f64,
	/// Accuracy radius in meters, when the source reports one.
	pub accuracy: Option<f64>,
}

impl Position {
	/// Fallback used until (or unless) a real fix arrives: central Bangalore.
	pub const DEFAULT: Position = Position {
		latitude: 12.9716,
		longitude: 77.5946,
		accuracy: None,
	};
}

impl Default for Position {
	fn default() -> Self {
		Self::DEFAULT
	}
}

/// Callback receiving each new fix.
pub type PositionCallback = Box<dyn FnMut(Position)>;
/// Callback receiving acquisition errors.
pub type ErrorCallback = Box<dyn FnMut(DashboardError)>;

/// Keeps a position watch alive. Dropping it stops the watch.
pub struct WatchHandle {
	stop: Option<Box<dyn FnOnce()>>,
}

impl WatchHandle {
	/// Runs `stop` when the handle is dropped.
	pub fn new(stop: impl FnOnce() + 'static) -> Self {
		Self {
			stop: Some(Box::new(stop)),
		}
	}
}

impl Drop for WatchHandle {
	fn drop(&mut self) {
		if let Some(stop) = self.stop.take() {
			stop();
		}
	}
}

/// Something that pushes position fixes, any number of times.
pub trait PositionSource {
	/// Starts watching. Fails with
	/// [`DashboardError::CapabilityUnavailable`] if there is nothing to watch.
	fn watch(
		&self,
		on_update: PositionCallback,
		on_error: ErrorCallback,
	) -> Result<WatchHandle, DashboardError>;
}

/// `navigator.geolocation.watchPosition` with high accuracy, a 10 s timeout
/// and no cached fixes.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserGeolocation;

impl PositionSource for BrowserGeolocation {
	fn watch(
		&self,
		mut on_update: PositionCallback,
		mut on_error: ErrorCallback,
	) -> Result<WatchHandle, DashboardError> {
		let geolocation = web_sys::window()
			.and_then(|w| w.navigator().geolocation().ok())
			.ok_or(DashboardError::unavailable(CAPABILITY))?;

		let success = Closure::<dyn FnMut(GeoFix)>::new(move |fix: GeoFix| {
			let coords = fix.coords();
			on_update(Position {
				latitude: coords.latitude(),
				longitude: coords.longitude(),
				accuracy: Some(coords.accuracy()),
			});
		});
		let failure = Closure::<dyn FnMut(PositionError)>::new(move |err: PositionError| {
			on_error(DashboardError::failure(CAPABILITY, err.message()));
		});

		let options = PositionOptions::new();
		options.set_enable_high_accuracy(true);
		options.set_timeout(10_000);
		options.set_maximum_age(0);

		let id = geolocation
			.watch_position_with_error_callback_and_options(
				success.as_ref().unchecked_ref(),
				Some(failure.as_ref().unchecked_ref()),
				&options,
			)
			.map_err(|e| DashboardError::failure(CAPABILITY, format!("{:?}", e)))?;
		info!("traffic-lens: watching position (id {})", id);

		Ok(WatchHandle::new(move || {
			geolocation.clear_watch(id);
			drop((success, failure));
		}))
	}
}

/// What the location panel shows: the best known position and any message
/// about why it may be a fallback.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocationTracker {
	/// Latest fix, or [`Position::DEFAULT`].
	pub position: Position,
	/// Set once a real fix has been received.
	pub has_fix: bool,
	/// Informational message for the user, if acquisition is degraded.
	pub message: Option<String>,
}

impl LocationTracker {
	/// Records a successful fix.
	pub fn apply_update(&mut self, position: Position) {
		self.position = position;
		self.has_fix = true;
		self.message = None;
	}

	/// Records an error. The current position is kept.
	pub fn apply_error(&mut self, error: &DashboardError) {
		warn!("traffic-lens: {}", error);
		self.message = Some(format!("{error}. Using default location."));
	}

	/// Whether the panel has anything to show yet: a fix or an explanation.
	pub fn is_initialized(&self) -> bool {
		self.has_fix || self.message.is_some()
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;

	/// Source whose callbacks the test drives by hand.
	#[derive(Default)]
	struct FakeSource {
		unavailable: bool,
		callbacks: RefCell<Option<(PositionCallback, ErrorCallback)>>,
		stopped: Rc<RefCell<bool>>,
	}

	impl FakeSource {
		fn push(&self, pos: Position) {
			if let Some((on_update, _)) = self.callbacks.borrow_mut().as_mut() {
				on_update(pos);
			}
		}

		fn fail(&self, message: &str) {
			if let Some((_, on_error)) = self.callbacks.borrow_mut().as_mut() {
				on_error(DashboardError::failure(CAPABILITY, message));
			}
		}
	}

	impl PositionSource for FakeSource {
		fn watch(
			&self,
			on_update: PositionCallback,
			on_error: ErrorCallback,
		) -> Result<WatchHandle, DashboardError> {
			if self.unavailable {
				return Err(DashboardError::unavailable(CAPABILITY));
			}
			*self.callbacks.borrow_mut() = Some((on_update, on_error));
			let stopped = self.stopped.clone();
			Ok(WatchHandle::new(move || *stopped.borrow_mut() = true))
		}
	}

	fn attach(source: &FakeSource, tracker: &Rc<RefCell<LocationTracker>>) -> Option<WatchHandle> {
		let (t_up, t_err) = (tracker.clone(), tracker.clone());
		let result = source.watch(
			Box::new(move |pos| t_up.borrow_mut().apply_update(pos)),
			Box::new(move |err| t_err.borrow_mut().apply_error(&err)),
		);
		match result {
			Ok(handle) => Some(handle),
			Err(err) => {
				tracker.borrow_mut().apply_error(&err);
				None
			}
		}
	}

	#[test]
	fn starts_at_default_position() {
		let tracker = LocationTracker::default();
		assert_eq!(tracker.position, Position::DEFAULT);
		assert!(!tracker.is_initialized());
	}

	#[test]
	fn fixes_replace_the_position() {
		let source = FakeSource::default();
		let tracker = Rc::new(RefCell::new(LocationTracker::default()));
		let _handle = attach(&source, &tracker);

		let fix = Position {
			latitude: 51.5,
			longitude: -0.12,
			accuracy: Some(8.0),
		};
		source.push(fix);
		assert_eq!(tracker.borrow().position, fix);
		assert!(tracker.borrow().is_initialized());
	}

	#[test]
	fn errors_keep_last_known_position() {
		let source = FakeSource::default();
		let tracker = Rc::new(RefCell::new(LocationTracker::default()));
		let _handle = attach(&source, &tracker);

		source.fail("Timeout expired");
		let t = tracker.borrow();
		assert_eq!(t.position, Position::DEFAULT);
		assert!(!t.has_fix);
		assert_eq!(
			t.message.as_deref(),
			Some("Geolocation error: Timeout expired. Using default location.")
		);
	}

	#[test]
	fn missing_capability_is_informational() {
		let source = FakeSource {
			unavailable: true,
			..FakeSource::default()
		};
		let tracker = Rc::new(RefCell::new(LocationTracker::default()));
		assert!(attach(&source, &tracker).is_none());

		let t = tracker.borrow();
		assert!(t.is_initialized());
		assert_eq!(
			t.message.as_deref(),
			Some("Geolocation is not supported by your browser. Using default location.")
		);
	}

	#[test]
	fn dropping_the_handle_stops_the_watch() {
		let source = FakeSource::default();
		let tracker = Rc::new(RefCell::new(LocationTracker::default()));
		let handle = attach(&source, &tracker);

		assert!(!*source.stopped.borrow());
		drop(handle);
		assert!(*source.stopped.borrow());
	}
}
