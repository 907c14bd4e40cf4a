//! Dashboard view components.

pub mod location_panel;
pub mod network_status;
pub mod traffic_map;
