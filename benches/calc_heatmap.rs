//! Measure sampling a full heatmap
//!
//! Grid is 20x20 cells observed from 1000 vantage points
//!

use bevy::prelude::*;
use bevy_heatmap_nav_plugin::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A scene where every point is in view and nothing occludes, the worst
/// case for sampling since no cell gets skipped
struct OpenScene;

impl SceneQuery for OpenScene {
	fn cast_occlusion(&self, _origin: Vec3, _direction: Vec3, _max_distance: f32) -> Option<Entity> {
		None
	}
	fn point_in_frustum(&self, _point: Vec3) -> bool {
		true
	}
}

/// Create the grid, vantage points and registry before benchmarking
fn prepare_sampling() -> (GridDimensions, VantagePoints, VantageParams, CellOccluders) {
	let dimensions = GridDimensions::new(20, 20, 1.0);
	let params = VantageParams::default();
	let mut vantage = VantagePoints::new();
	let mut rng = StdRng::seed_from_u64(13);
	vantage.generate(&dimensions, &params, &OpenScene, &mut rng);
	(dimensions, vantage, params, CellOccluders::new())
}

/// Run one full sampling pass
fn calc(
	dimensions: &GridDimensions,
	vantage: &VantagePoints,
	params: &VantageParams,
	occluders: &CellOccluders,
	heatmap: &mut Heatmap,
) {
	calculate_heatmap(dimensions, vantage, occluders, params, &OpenScene, heatmap);
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("algorithm_use");
	group.significance_level(0.05).sample_size(100);
	let (dimensions, vantage, params, occluders) = prepare_sampling();
	let mut heatmap = Heatmap::new(&dimensions);
	group.bench_function("calc_heatmap", |b| {
		b.iter(|| {
			calc(
				black_box(&dimensions),
				black_box(&vantage),
				black_box(&params),
				black_box(&occluders),
				black_box(&mut heatmap),
			)
		})
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
