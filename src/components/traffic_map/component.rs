//! Leptos component wrapping the traffic map canvas.
//!
//! The component creates an HTML canvas sized to its container and wires up
//! three event sources: an `IntersectionObserver` that opens the visibility
//! gate, a window `resize` listener, and `mousemove` for hover. Every redraw
//! happens synchronously inside those handlers; styling of a new road set is
//! handed to an [`IdleScheduler`]. The observer and the resize listener are
//! detached when the component unmounts.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, IntersectionObserver, IntersectionObserverEntry,
	IntersectionObserverInit, MouseEvent, Window,
};

use super::hover::client_to_local;
use super::listeners::Listeners;
use super::schedule::{BrowserIdleScheduler, IdleScheduler};
use super::state::TrafficMapState;
use super::theme::Theme;
use super::types::RoadSegment;
use super::viewport::{LOGICAL_WIDTH, TrafficMapConfig, ViewportState};

/// Bundles map state with the canvas it draws on and its visual configuration.
struct MapContext {
	state: TrafficMapState,
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	theme: Theme,
	config: TrafficMapConfig,
}

impl MapContext {
	fn container_width(&self) -> f64 {
		container_width(&self.canvas)
	}

	fn apply_viewport(&self) {
		self.canvas.set_width(self.state.viewport.pixel_width);
		self.canvas.set_height(self.state.viewport.pixel_height);
	}

	fn redraw(&self) {
		self.state.draw(&self.ctx, &self.theme);
	}
}

type SharedContext = Rc<RefCell<Option<MapContext>>>;

fn container_width(canvas: &HtmlCanvasElement) -> f64 {
	canvas
		.parent_element()
		.map(|p| p.client_width() as f64)
		.unwrap_or(LOGICAL_WIDTH)
}

/// Queues styling for the current road set, if it needs any, and redraws once
/// the styled roads are applied.
fn schedule_styling(context: &SharedContext, scheduler: &Rc<dyn IdleScheduler>) {
	let (job, timeout) = {
		let mut guard = context.borrow_mut();
		let Some(c) = guard.as_mut() else {
			return;
		};
		(c.state.take_style_job(), c.config.idle_timeout_ms)
	};
	let Some(job) = job else {
		return;
	};

	let context_job = context.clone();
	scheduler.schedule_when_idle(
		Box::new(move || {
			let styled = job.run();
			if let Some(ref mut c) = *context_job.borrow_mut() {
				if c.state.apply_styled(styled) {
					debug!(
						"traffic-lens: styled {} roads",
						c.state.styled().map_or(0, |s| s.len())
					);
					c.redraw();
				}
			}
		}),
		timeout,
	);
}

/// Renders the synthetic road network on a canvas with hover details.
///
/// Pass roads via the reactive `roads` signal; each change replaces the whole
/// set. Nothing is styled or drawn until at least
/// [`TrafficMapConfig::visibility_threshold`] of the canvas has scrolled into
/// view.
#[component]
pub fn TrafficMapCanvas(
	#[prop(into)] roads: Signal<Vec<RoadSegment>>,
	#[prop(default = TrafficMapConfig::default())] config: TrafficMapConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let hovering = RwSignal::new(false);
	let context: SharedContext = Rc::new(RefCell::new(None));
	let scheduler: Rc<dyn IdleScheduler> = Rc::new(BrowserIdleScheduler::new());
	let listeners = StoredValue::new_local(Listeners::default());
	let (context_init, scheduler_init) = (context.clone(), scheduler.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window): Option<Window> = web_sys::window() else {
			return;
		};
		listeners.update_value(|l| l.detach_all());

		let ctx = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		{
			Some(ctx) => ctx,
			None => {
				warn!("traffic-lens: 2d canvas context unavailable");
				return;
			}
		};

		let viewport = ViewportState::from_container_width(container_width(&canvas), &config);
		let c = MapContext {
			state: TrafficMapState::new(roads.get_untracked(), viewport),
			canvas: canvas.clone(),
			ctx,
			theme: Theme::default(),
			config: config.clone(),
		};
		c.apply_viewport();
		info!(
			"traffic-lens: canvas mounted at {}x{}",
			viewport.pixel_width, viewport.pixel_height
		);
		*context_init.borrow_mut() = Some(c);
		let context_unmount = context_init.clone();
		listeners.update_value(|l| {
			l.push(move || {
				context_unmount.borrow_mut().take();
			})
		});

		let (context_vis, scheduler_vis) = (context_init.clone(), scheduler_init.clone());
		let observer_cb = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
			move |entries: js_sys::Array, observer: IntersectionObserver| {
				for entry in entries.iter() {
					let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
						continue;
					};
					let opened = match *context_vis.borrow_mut() {
						Some(ref mut c) => c
							.state
							.observe_visibility(entry.intersection_ratio(), &c.config),
						None => false,
					};
					if opened {
						info!("traffic-lens: canvas visible, preparing roads");
						observer.disconnect();
						schedule_styling(&context_vis, &scheduler_vis);
						break;
					}
				}
			},
		);
		let init = IntersectionObserverInit::new();
		init.set_threshold(&JsValue::from_f64(config.visibility_threshold));
		let created = IntersectionObserver::new_with_options(observer_cb.as_ref().unchecked_ref(), &init);
		match created {
			Ok(observer) => {
				observer.observe(&canvas);
				listeners.update_value(|l| {
					l.push(move || {
						observer.disconnect();
						drop(observer_cb);
					})
				});
			}
			Err(e) => {
				// Without an observer there is no way to know; treat as visible.
				warn!("traffic-lens: IntersectionObserver unavailable: {:?}", e);
				if let Some(ref mut c) = *context_init.borrow_mut() {
					c.state.observe_visibility(1.0, &c.config);
				}
				schedule_styling(&context_init, &scheduler_init);
			}
		}

		let context_resize = context_init.clone();
		let resize_cb = Closure::<dyn FnMut()>::new(move || {
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				let width = c.container_width();
				let vp = c.state.resize(width, &c.config);
				c.apply_viewport();
				debug!("traffic-lens: resized to {}x{}", vp.pixel_width, vp.pixel_height);
				c.redraw();
			}
		});
		if window
			.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
			.is_ok()
		{
			listeners.update_value(|l| {
				l.push(move || {
					let _ = window
						.remove_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
				})
			});
		}
	});

	on_cleanup(move || {
		listeners.try_update_value(|l| {
			debug!("traffic-lens: detaching {} listeners", l.len());
			l.detach_all();
		});
	});

	let (context_data, scheduler_data) = (context.clone(), scheduler.clone());
	Effect::new(move |_| {
		let next = roads.get();
		let replaced = match *context_data.borrow_mut() {
			Some(ref mut c) => {
				c.state.set_roads(next);
				c.redraw();
				Some(c.state.is_hovering())
			}
			None => None,
		};
		if let Some(still_hovering) = replaced {
			hovering.set(still_hovering);
			schedule_styling(&context_data, &scheduler_data);
		}
	});

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = client_to_local(
			ev.client_x() as f64,
			ev.client_y() as f64,
			rect.left(),
			rect.top(),
		);

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.state.pointer_moved(x, y, &c.config) {
				hovering.set(c.state.is_hovering());
				c.redraw();
			}
		}
	};

	view! {
		<div class="traffic-visualizer">
			<div class="canvas-container">
				<canvas
					node_ref=canvas_ref
					class="traffic-map-canvas"
					on:mousemove=on_mousemove
					style=move || {
						format!(
							"display: block; width: 100%; border-radius: 8px; border: 1px solid #e0e0e0; cursor: {};",
							if hovering.get() { "pointer" } else { "default" }
						)
					}
				/>
			</div>
			<Show when=move || hovering.get()>
				<div class="road-tooltip">"Hover over roads to see details"</div>
			</Show>
		</div>
	}
}
