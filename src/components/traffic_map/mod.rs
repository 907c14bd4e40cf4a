//! Traffic map visualization component.
//!
//! Draws a synthetic road network on an HTML canvas with:
//! - Roads stroked by congestion level, scaled from an 800×400 logical grid
//! - A legend anchored to the top-right corner
//! - Hover hit testing with a highlighted road and a name/congestion label
//! - Deferred start: nothing is styled or drawn until the canvas is on screen
//!
//! # Example
//!
//! ```ignore
//! use traffic_lens::{TrafficMapCanvas, generate_mock_roads};
//!
//! let roads = generate_mock_roads(42);
//! view! { <TrafficMapCanvas roads=roads /> }
//! ```

mod component;
pub mod geometry;
pub mod hover;
mod listeners;
pub mod mock;
pub mod render;
pub mod schedule;
mod state;
pub mod style;
pub mod surface;
pub mod theme;
mod types;
pub mod viewport;
mod visibility;

pub use component::TrafficMapCanvas;
pub use mock::generate_mock_roads;
pub use state::{StyleJob, StyledRoads, TrafficMapState};
pub use theme::{Color, Theme};
pub use types::{CongestionLevel, HoverState, RoadSegment, StyledRoadSegment, TrafficData};
pub use viewport::{TrafficMapConfig, ViewportState};
pub use visibility::VisibilityGate;
