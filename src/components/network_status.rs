//! Panel showing connection quality and recent history.

use leptos::prelude::*;

use crate::telemetry::{ConnectionHistory, NetworkInfo, NetworkQuality};

fn or_unknown(value: Option<String>) -> String {
	value.unwrap_or_else(|| "Unknown".to_string())
}

/// Current connection details with a quality badge. Shows an unsupported
/// notice when no reading is available.
/// Badge tint: the quality color at roughly 12% opacity.
fn badge_style(quality: NetworkQuality) -> String {
	format!("background-color: {}20", quality.color())
}

/// Current connection reading with a quality badge, plus recent history.
#[component]
pub fn NetworkStatus(
	#[prop(into)] info: Signal<Option<NetworkInfo>>,
	#[prop(into)] history: Signal<ConnectionHistory>,
) -> impl IntoView {
	let current = move || {
		let Some(info) = info.get() else {
			return view! {
				<div class="network-not-supported">
					<p>"Network Information API not supported in this browser"</p>
					<p class="small">"This feature requires Chrome, Edge, or Opera on Android"</p>
				</div>
			}
				.into_any();
		};
		let quality = NetworkQuality::classify(&info);
		let rows = [
			("Type:", or_unknown(info.connection_type.clone())),
			("Effective Type:", or_unknown(info.effective_type.clone())),
			(
				"Downlink:",
				or_unknown(info.downlink_mbps.map(|d| format!("{d} Mbps"))),
			),
			(
				"Latency:",
				or_unknown(info.rtt_ms.map(|r| format!("{r} ms"))),
			),
			(
				"Data Saver:",
				if info.save_data { "Enabled" } else { "Disabled" }.to_string(),
			),
		];
		view! {
			<div class="network-current" style=format!("border-left: 4px solid {}", quality.color())>
				<div
					class="network-quality"
					style=badge_style(quality)
				>
					<span style=format!("color: {}", quality.color())>
						{format!("{} Connection", quality.label())}
					</span>
				</div>
				<div class="network-details">
					{rows
						.into_iter()
						.map(|(label, value)| {
							view! {
								<div class="network-detail">
									<span class="detail-label">{label}</span>
									<span class="detail-value">{value}</span>
								</div>
							}
						})
						.collect_view()}
				</div>
				<div class="network-updated">
					{format!("Last updated: {}", info.last_updated.unwrap_or_default())}
				</div>
			</div>
		}
			.into_any()
	};

	let past = move || {
		let history = history.get();
		(history.len() > 1)
			.then(|| {
				view! {
					<div class="network-history">
						<h4>"Connection History:"</h4>
						<div class="history-items">
							{history
								.iter()
								.map(|conn| {
									view! {
										<div class="history-item">
											<span class="history-type">
												{or_unknown(conn.effective_type.clone())}
											</span>
											<span class="history-speed">
												{format!("{} Mbps", conn.downlink_mbps.unwrap_or(0.0))}
											</span>
											<span class="history-latency">
												{format!("{} ms", conn.rtt_ms.unwrap_or(0.0))}
											</span>
										</div>
									}
								})
								.collect_view()}
						</div>
					</div>
				}
			})
	};

	view! {
		<div class="network-status">
			{current}
			{past}
		</div>
	}
}
