//! Deferred work scheduling.
//!
//! Styling a fresh road set is pushed to an idle period so it does not compete
//! with input handling. The outcome is identical whichever scheduler runs it;
//! only the timing differs.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{IdleRequestOptions, Window};

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce()>;

/// Host facility for running work when the thread is otherwise idle.
pub trait IdleScheduler {
	/// Runs `task` once, no later than roughly `timeout_ms` from now.
	fn schedule_when_idle(&self, task: Task, timeout_ms: u32);
}

/// Runs every task synchronously at the call site.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateScheduler;

impl IdleScheduler for ImmediateScheduler {
	fn schedule_when_idle(&self, task: Task, _timeout_ms: u32) {
		task();
	}
}

/// Uses `window.requestIdleCallback`, falling back to running immediately
/// where the browser does not provide it.
#[derive(Clone, Debug)]
pub struct BrowserIdleScheduler {
	window: Option<Window>,
}

impl BrowserIdleScheduler {
	/// Scheduler bound to the current window, if any.
	pub fn new() -> Self {
		Self {
			window: web_sys::window(),
		}
	}

	fn idle_callback_supported(window: &Window) -> bool {
		js_sys::Reflect::get(window, &JsValue::from_str("requestIdleCallback"))
			.map(|f| f.is_function())
			.unwrap_or(false)
	}
}

impl Default for BrowserIdleScheduler {
	fn default() -> Self {
		Self::new()
	}
}

impl IdleScheduler for BrowserIdleScheduler {
	fn schedule_when_idle(&self, task: Task, timeout_ms: u32) {
		let Some(window) = self.window.as_ref().filter(|w| Self::idle_callback_supported(w))
		else {
			debug!("traffic-lens: requestIdleCallback unavailable, running now");
			task();
			return;
		};

		// Shared so the task can still run here if the browser rejects the request.
		let pending = Rc::new(RefCell::new(Some(task)));
		let pending_cb = pending.clone();
		let callback = Closure::once_into_js(move || {
			if let Some(task) = pending_cb.borrow_mut().take() {
				task();
			}
		});

		let options = IdleRequestOptions::new();
		options.set_timeout(timeout_ms);
		if let Err(e) = window.request_idle_callback_with_options(callback.unchecked_ref(), &options)
		{
			warn!("traffic-lens: requestIdleCallback failed, running now: {:?}", e);
			let task = pending.borrow_mut().take();
			if let Some(task) = task {
				task();
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	#[test]
	fn immediate_scheduler_runs_before_returning() {
		let ran = Rc::new(Cell::new(0));
		let ran_task = ran.clone();
		ImmediateScheduler.schedule_when_idle(
			Box::new(move || ran_task.set(ran_task.get() + 1)),
			1000,
		);
		assert_eq!(ran.get(), 1);
	}
}
