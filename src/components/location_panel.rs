//! Panel showing the tracked device position.

use leptos::prelude::*;

use crate::telemetry::LocationTracker;

/// Shows the current position, its accuracy, and any fallback message.
#[component]
pub fn LocationPanel(#[prop(into)] tracker: Signal<LocationTracker>) -> impl IntoView {
	view! {
		<div class="map-container">
			{move || {
				let t = tracker.get();
				if !t.is_initialized() {
					return view! {
						<div class="map-loading">
							<div class="spinner"></div>
							<p>"Initializing map..."</p>
						</div>
					}
						.into_any();
				}
				let accuracy = t
					.position
					.accuracy
					.map(|a| format!("Accuracy: {} meters", a.round()));
				view! {
					<div class="map-popup">
						<strong>"Your Location"</strong>
						<p>{format!("Latitude: {:.6}", t.position.latitude)}</p>
						<p>{format!("Longitude: {:.6}", t.position.longitude)}</p>
						{accuracy.map(|a| view! { <p>{a}</p> })}
						{t.message.map(|m| view! { <p class="location-message">{m}</p> })}
					</div>
				}
					.into_any()
			}}
		</div>
	}
}
