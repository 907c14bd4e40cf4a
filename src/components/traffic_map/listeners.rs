//! Teardown for browser callbacks registered by the map.
//!
//! Each registration hands over a detach closure that owns the callback it
//! registered, so the callback stays alive exactly as long as it is attached.

/// Detach closures for everything the component attached to the page.
///
/// Runs them newest first, once, on [`Listeners::detach_all`] or on drop.
#[derive(Default)]
pub(crate) struct Listeners {
	detach: Vec<Box<dyn FnOnce()>>,
}

impl Listeners {
	/// Registers the detach step for one attached callback.
	pub fn push(&mut self, detach: impl FnOnce() + 'static) {
		self.detach.push(Box::new(detach));
	}

	/// Number of callbacks still attached.
	pub fn len(&self) -> usize {
		self.detach.len()
	}

	/// Detaches everything now.
	pub fn detach_all(&mut self) {
		while let Some(detach) = self.detach.pop() {
			detach();
		}
	}
}

impl Drop for Listeners {
	fn drop(&mut self) {
		self.detach_all();
	}
}
