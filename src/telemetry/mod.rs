//! Device telemetry feeding the dashboard side panels: position tracking and
//! connection quality.

pub mod location;
pub mod network;

pub use location::{BrowserGeolocation, LocationTracker, Position, PositionSource, WatchHandle};
pub use network::{ConnectionHistory, NetworkInfo, NetworkQuality};
