//! traffic-lens: synthetic traffic overlay dashboard.
//!
//! This crate provides a WASM dashboard that draws a synthetic road network on
//! a canvas, with hover details and a congestion legend, next to the device
//! position and live connection-quality telemetry.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod error;
pub mod telemetry;

pub use components::traffic_map::{
	CongestionLevel, RoadSegment, TrafficData, TrafficMapCanvas, generate_mock_roads,
};
pub use error::DashboardError;

use components::location_panel::LocationPanel;
use components::network_status::NetworkStatus;
use components::traffic_map::schedule::{BrowserIdleScheduler, IdleScheduler};
use telemetry::network::{ConnectionWatch, read_connection, subscribe_connection_changes};
use telemetry::{
	BrowserGeolocation, ConnectionHistory, LocationTracker, NetworkInfo, PositionSource, WatchHandle,
};

/// How long road delivery may wait for an idle period.
const DATA_IDLE_TIMEOUT_MS: u32 = 2000;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("traffic-lens: logging initialized");
}

/// Load road data from a script element with id="traffic-data".
/// Expected format: JSON with { roads: [...] }
fn load_road_data() -> Option<TrafficData> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("traffic-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<TrafficData>(&json_text) {
		Ok(data) => {
			info!("traffic-lens: loaded {} roads", data.roads.len());
			Some(data)
		}
		Err(e) => {
			warn!("traffic-lens: failed to parse road data: {}", e);
			None
		}
	}
}

/// Embedded roads if the page carries them, otherwise a generated network.
fn initial_roads() -> Vec<RoadSegment> {
	load_road_data().map(|d| d.roads).unwrap_or_else(|| {
		let seed = js_sys::Date::now() as u64;
		info!("traffic-lens: generating mock roads (seed {})", seed);
		generate_mock_roads(seed)
	})
}

#[component]
fn LoadingIndicator() -> impl IntoView {
	view! {
		<div class="loading-container">
			<div class="loading-content">
				<div class="loading-spinner">
					<div class="spinner-circle"></div>
					<div class="spinner-circle"></div>
					<div class="spinner-circle"></div>
				</div>
				<h3>"Loading Traffic Dashboard"</h3>
				<p class="loading-message">"Preparing road data while the page is idle..."</p>
			</div>
		</div>
	}
}

/// Main application component.
/// Starts position and connection tracking, loads road data during an idle
/// period, and lays out the dashboard panels.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let tracker = RwSignal::new(LocationTracker::default());
	let network = RwSignal::new(None::<NetworkInfo>);
	let history = RwSignal::new(ConnectionHistory::default());
	let roads = RwSignal::new(Vec::<RoadSegment>::new());
	let loading = RwSignal::new(true);

	let position_watch: Rc<RefCell<Option<WatchHandle>>> = Rc::new(RefCell::new(None));
	let connection_watch: Rc<RefCell<Option<ConnectionWatch>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let watch = BrowserGeolocation.watch(
			Box::new(move |pos| tracker.update(|t| t.apply_update(pos))),
			Box::new(move |err| tracker.update(|t| t.apply_error(&err))),
		);
		match watch {
			Ok(handle) => *position_watch.borrow_mut() = Some(handle),
			Err(err) => tracker.update(|t| t.apply_error(&err)),
		}

		let record = move |info: NetworkInfo| {
			history.update(|h| h.push(info.clone()));
			network.set(Some(info));
		};
		match read_connection() {
			Ok(info) => {
				record(info);
				match subscribe_connection_changes(record) {
					Ok(w) => *connection_watch.borrow_mut() = Some(w),
					Err(err) => warn!("traffic-lens: {}", err),
				}
			}
			Err(err) => warn!("traffic-lens: {}", err),
		}

		BrowserIdleScheduler::new().schedule_when_idle(
			Box::new(move || {
				roads.set(initial_roads());
				loading.set(false);
			}),
			DATA_IDLE_TIMEOUT_MS,
		);
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Real-Time Traffic Visualization Dashboard" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="app">
			<header class="app-header">
				<h1>"Real-Time Traffic Visualization Dashboard"</h1>
				<p class="api-subtitle">"Device location, connection quality and live road conditions"</p>
			</header>
			<Show when=move || !loading.get() fallback=|| view! { <LoadingIndicator /> }>
				<main>
					<section class="dashboard-section">
						<h2>"Your Location"</h2>
						<LocationPanel tracker=tracker />
					</section>
					<div class="dashboard-columns">
						<section class="dashboard-section">
							<h2>"Network Status"</h2>
							<NetworkStatus info=network history=history />
						</section>
						<section class="dashboard-section">
							<h2>"Traffic Conditions"</h2>
							<TrafficMapCanvas roads=roads />
						</section>
					</div>
				</main>
			</Show>
		</div>
	}
}
