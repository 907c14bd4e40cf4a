//! Connection quality telemetry from `navigator.connection`.
//!
//! The Network Information API is not in every browser and is not part of the
//! stable `web-sys` surface, so fields are read reflectively.

use std::collections::VecDeque;

use js_sys::Reflect;
use log::{debug, info};
use wasm_bindgen::prelude::*;
use web_sys::EventTarget;

use crate::error::DashboardError;

const CAPABILITY: &str = "Network Information API";

/// Number of snapshots kept in the connection history.
pub const HISTORY_LEN: usize = 5;

/// One reading of the connection properties.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetworkInfo {
	/// Physical link type, e.g. `wifi` or `cellular`.
	pub connection_type: Option<String>,
	/// Effective type: `slow-2g`, `2g`, `3g` or `4g`.
	pub effective_type: Option<String>,
	/// Estimated bandwidth in Mbps.
	pub downlink_mbps: Option<f64>,
	/// Estimated round-trip time in milliseconds.
	pub rtt_ms: Option<f64>,
	/// Whether the user asked for reduced data usage.
	pub save_data: bool,
	/// Local time of the reading, as displayed.
	pub last_updated: Option<String>,
}

/// Coarse connection rating shown on the network panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetworkQuality {
	/// 4G with more than 4 Mbps.
	Excellent,
	/// 3G with more than 2 Mbps.
	Good,
	/// Anything in between.
	Fair,
	/// 2G or slower.
	Poor,
	/// No effective type reported.
	Unknown,
}

impl NetworkQuality {
	/// Rates a reading from its effective type and downlink.
	pub fn classify(info: &NetworkInfo) -> Self {
		let Some(effective) = info.effective_type.as_deref() else {
			return Self::Unknown;
		};
		let downlink = info.downlink_mbps.unwrap_or(0.0);

		if effective.contains("4g") && downlink > 4.0 {
			Self::Excellent
		} else if effective.contains("3g") && downlink > 2.0 {
			Self::Good
		} else if effective.contains("2g") {
			Self::Poor
		} else {
			Self::Fair
		}
	}

	/// Panel label.
	pub fn label(self) -> &'static str {
		match self {
			Self::Excellent => "Excellent",
			Self::Good => "Good",
			Self::Fair => "Fair",
			Self::Poor => "Poor",
			Self::Unknown => "Unknown",
		}
	}

	/// CSS color for the quality badge.
	pub fn color(self) -> &'static str {
		match self {
			Self::Excellent => "#4CAF50",
			Self::Good => "#FFC107",
			Self::Fair => "#FF9800",
			Self::Poor => "#F44336",
			Self::Unknown => "#9E9E9E",
		}
	}
}

/// The most recent [`HISTORY_LEN`] readings, oldest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectionHistory {
	entries: VecDeque<NetworkInfo>,
}

impl ConnectionHistory {
	/// Records a reading, evicting the oldest past [`HISTORY_LEN`].
	pub fn push(&mut self, info: NetworkInfo) {
		if self.entries.len() == HISTORY_LEN {
			self.entries.pop_front();
		}
		self.entries.push_back(info);
	}

	/// Number of stored readings.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether no reading has been stored.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Readings, oldest first.
	pub fn iter(&self) -> impl Iterator<Item = &NetworkInfo> {
		self.entries.iter()
	}

	/// The most recent reading.
	pub fn latest(&self) -> Option<&NetworkInfo> {
		self.entries.back()
	}
}

fn connection_object() -> Result<JsValue, DashboardError> {
	let navigator = web_sys::window()
		.map(|w| w.navigator())
		.ok_or(DashboardError::unavailable(CAPABILITY))?;
	match Reflect::get(&navigator, &JsValue::from_str("connection")) {
		Ok(conn) if conn.is_object() => Ok(conn),
		_ => Err(DashboardError::unavailable(CAPABILITY)),
	}
}

fn string_field(obj: &JsValue, key: &str) -> Option<String> {
	Reflect::get(obj, &JsValue::from_str(key))
		.ok()
		.and_then(|v| v.as_string())
		.filter(|s| !s.is_empty())
}

fn number_field(obj: &JsValue, key: &str) -> Option<f64> {
	Reflect::get(obj, &JsValue::from_str(key))
		.ok()
		.and_then(|v| v.as_f64())
}

/// Takes a reading of `navigator.connection`.
pub fn read_connection() -> Result<NetworkInfo, DashboardError> {
	let conn = connection_object()?;
	let info = NetworkInfo {
		connection_type: string_field(&conn, "type"),
		effective_type: string_field(&conn, "effectiveType"),
		downlink_mbps: number_field(&conn, "downlink"),
		rtt_ms: number_field(&conn, "rtt"),
		save_data: Reflect::get(&conn, &JsValue::from_str("saveData"))
			.ok()
			.and_then(|v| v.as_bool())
			.unwrap_or(false),
		last_updated: js_sys::Date::new_0()
			.to_locale_time_string("default")
			.as_string(),
	};
	debug!("traffic-lens: connection {:?}", info);
	Ok(info)
}

/// Keeps a `change` listener on `navigator.connection` attached.
/// Dropping it removes the listener.
pub struct ConnectionWatch {
	target: EventTarget,
	callback: Closure<dyn FnMut()>,
}

impl Drop for ConnectionWatch {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback("change", self.callback.as_ref().unchecked_ref());
	}
}

/// Calls `on_change` with a fresh reading whenever the connection changes.
pub fn subscribe_connection_changes(
	mut on_change: impl FnMut(NetworkInfo) + 'static,
) -> Result<ConnectionWatch, DashboardError> {
	let target: EventTarget = connection_object()?.unchecked_into();
	let callback = Closure::<dyn FnMut()>::new(move || {
		if let Ok(info) = read_connection() {
			on_change(info);
		}
	});
	target
		.add_event_listener_with_callback("change", callback.as_ref().unchecked_ref())
		.map_err(|e| DashboardError::failure(CAPABILITY, format!("{:?}", e)))?;
	info!("traffic-lens: listening for connection changes");
	Ok(ConnectionWatch { target, callback })
}

#[cfg(test)]
mod tests {
	use super::*;

	fn info(effective: Option<&str>, downlink: Option<f64>) -> NetworkInfo {
		NetworkInfo {
			effective_type: effective.map(str::to_string),
			downlink_mbps: downlink,
			..NetworkInfo::default()
		}
	}

	#[test]
	fn classifies_connection_quality() {
		let cases = [
			(None, Some(10.0), NetworkQuality::Unknown),
			(Some("4g"), Some(10.0), NetworkQuality::Excellent),
			(Some("4g"), Some(4.0), NetworkQuality::Fair),
			(Some("3g"), Some(2.5), NetworkQuality::Good),
			(Some("3g"), Some(1.0), NetworkQuality::Fair),
			(Some("2g"), Some(0.2), NetworkQuality::Poor),
			(Some("slow-2g"), None, NetworkQuality::Poor),
			(Some("4g"), None, NetworkQuality::Fair),
		];
		for (effective, downlink, expected) in cases {
			assert_eq!(
				NetworkQuality::classify(&info(effective, downlink)),
				expected,
				"{effective:?} {downlink:?}"
			);
		}
	}

	#[test]
	fn qualities_have_badges() {
		assert_eq!(NetworkQuality::Excellent.color(), "#4CAF50");
		assert_eq!(NetworkQuality::Unknown.label(), "Unknown");
	}

	#[test]
	fn history_keeps_latest_five() {
		let mut history = ConnectionHistory::default();
		assert!(history.is_empty());

		for i in 0..7 {
			history.push(info(Some("4g"), Some(i as f64)));
		}
		assert_eq!(history.len(), HISTORY_LEN);
		let downlinks: Vec<_> = history.iter().filter_map(|i| i.downlink_mbps).collect();
		assert_eq!(downlinks, [2.0, 3.0, 4.0, 5.0, 6.0]);
		assert_eq!(history.latest().and_then(|i| i.downlink_mbps), Some(6.0));
	}
}
