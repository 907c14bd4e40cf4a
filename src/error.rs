//! Errors surfaced by the dashboard's browser collaborators.
//!
//! None of these stop rendering: callers log them, show the message, and
//! carry on with default values.

use thiserror::Error;

/// A degraded capability or failed acquisition.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DashboardError {
	/// The browser does not provide the named capability at all.
	#[error("{capability} is not supported by your browser")]
	CapabilityUnavailable {
		/// Human-readable capability name, e.g. "Geolocation".
		capability: &'static str,
	},
	/// The capability exists but reported an error at runtime.
	#[error("{capability} error: {message}")]
	AcquisitionFailure {
		/// Human-readable capability name.
		capability: &'static str,
		/// Message reported by the browser.
		message: String,
	},
}

impl DashboardError {
	/// The capability is missing from this browser.
	pub fn unavailable(capability: &'static str) -> Self {
		Self::CapabilityUnavailable { capability }
	}

	/// The capability reported `message`.
	pub fn failure(capability: &'static str, message: impl Into<String>) -> Self {
		Self::AcquisitionFailure {
			capability,
			message: message.into(),
		}
	}
}
