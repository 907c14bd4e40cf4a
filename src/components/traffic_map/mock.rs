//! Synthetic road network generator.
//!
//! Stands in for a real traffic feed: a seeded set of straight roads scattered
//! over the logical plane with random congestion and vehicle counts.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::types::{CongestionLevel, RoadSegment};
use super::viewport::{LOGICAL_HEIGHT, LOGICAL_WIDTH};

/// Number of roads in a generated network.
pub const MOCK_ROAD_COUNT: usize = 15;

/// Keeps generated endpoints this far from the logical edges.
const EDGE_MARGIN: f64 = 50.0;

const ROAD_NAMES: [&str; 10] = [
	"MG Road",
	"Brigade Road",
	"Residency Road",
	"Church Street",
	"Commercial Street",
	"Hosur Road",
	"Old Airport Road",
	"Outer Ring Road",
	"Bannerghatta Road",
	"Kanakapura Road",
];

/// Generates [`MOCK_ROAD_COUNT`] roads. The same seed always yields the same
/// network.
pub fn generate_mock_roads(seed: u64) -> Vec<RoadSegment> {
	let mut rng = ChaCha8Rng::seed_from_u64(seed);
	let levels = [
		CongestionLevel::Low,
		CongestionLevel::Medium,
		CongestionLevel::High,
	];

	(0..MOCK_ROAD_COUNT)
		.map(|i| {
			let mut coord = |extent: f64| rng.gen_range(EDGE_MARGIN..extent - EDGE_MARGIN);
			let (start_x, start_y) = (coord(LOGICAL_WIDTH), coord(LOGICAL_HEIGHT));
			let (end_x, end_y) = (coord(LOGICAL_WIDTH), coord(LOGICAL_HEIGHT));

			RoadSegment {
				id: format!("road-{i}"),
				name: ROAD_NAMES[i % ROAD_NAMES.len()].to_string(),
				start_x,
				start_y,
				end_x,
				end_y,
				congestion: levels[rng.gen_range(0..levels.len())],
				vehicles: rng.gen_range(5..55),
			}
		})
		.collect()
}
