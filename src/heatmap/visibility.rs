//! Sampling how observable each grid cell is from a set of vantage
//! points scattered through the scene
//!
//! The sampler never owns or discovers scene geometry itself. The
//! application supplies two things: a [SceneQuery] implementation
//! answering ray occlusion and camera frustum tests, and a
//! [CellOccluders] registry naming the scene object that represents each
//! cell. Scoring casts a ray from every vantage point to every cell and
//! counts the unobstructed ones
//!

use std::collections::BTreeMap;

use crate::prelude::*;
use bevy::prelude::*;
use rand::Rng;

/// Scene geometry queries the sampler depends on, implemented by the
/// application over whatever physics/culling backend it uses
pub trait SceneQuery {
	/// Cast a ray from `origin` along `direction` up to `max_distance`
	/// and report the first occluding scene object hit, if any
	fn cast_occlusion(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<Entity>;
	/// Whether a world point projects inside the reference camera's
	/// visible volume
	fn point_in_frustum(&self, point: Vec3) -> bool;
}

/// Resource wrapper handing the application's [SceneQuery] implementation
/// to the sampling systems. When the resource is absent visibility
/// degrades to "nothing is visible" - cells stay unscored rather than
/// anything crashing
#[derive(Resource)]
pub struct SceneQueryResource(Box<dyn SceneQuery + Send + Sync>);

impl SceneQueryResource {
	/// Create a new instance of [SceneQueryResource]
	pub fn new(query: impl SceneQuery + Send + Sync + 'static) -> Self {
		SceneQueryResource(Box::new(query))
	}
	/// Get the scene query implementation
	pub fn get(&self) -> &(dyn SceneQuery + Send + Sync) {
		&*self.0
	}
}

/// An explicit registry of the scene object representing each cell.
///
/// A ray cast towards a cell that hits the cell's own registered object
/// counts as *seeing* the cell, not as occlusion. Cells are registered by
/// the application when it instantiates the scene - the plugin never
/// finds geometry by matching names
#[derive(Component, Default, Clone)]
pub struct CellOccluders {
	/// Map of each cell to the `Entity` of its representative object
	map: BTreeMap<GridCoord, Entity>,
}

impl CellOccluders {
	/// Create a new empty instance of [CellOccluders]
	pub fn new() -> Self {
		CellOccluders {
			map: BTreeMap::new(),
		}
	}
	/// Get a reference to the registry map
	pub fn get(&self) -> &BTreeMap<GridCoord, Entity> {
		&self.map
	}
	/// Register the representative object of a cell
	pub fn insert(&mut self, cell: GridCoord, entity: Entity) {
		self.map.insert(cell, entity);
	}
	/// Get the registered object of a cell, [None] when the cell has no
	/// representative
	pub fn get_occluder(&self, cell: GridCoord) -> Option<Entity> {
		self.map.get(&cell).copied()
	}
}

/// Tunables controlling vantage point generation and cell sampling
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Component, Clone, Copy, Reflect)]
pub struct VantageParams {
	/// Number of vantage points to aim for when generating
	count: usize,
	/// Lower bound of the height band points are generated within
	min_height: f32,
	/// Upper bound of the height band points are generated within
	max_height: f32,
	/// How far above a cell's surface its sample position sits, avoids
	/// the ground geometry occluding its own cell
	sample_height_offset: f32,
}

impl Default for VantageParams {
	fn default() -> Self {
		VantageParams {
			count: 1000,
			min_height: 7.0,
			max_height: 17.0,
			sample_height_offset: 0.1,
		}
	}
}

impl VantageParams {
	/// Create a new instance of [VantageParams]
	pub fn new(count: usize, min_height: f32, max_height: f32, sample_height_offset: f32) -> Self {
		if max_height < min_height {
			panic!(
				"Vantage height band `({}, {})` is inverted",
				min_height, max_height
			);
		}
		VantageParams {
			count,
			min_height,
			max_height,
			sample_height_offset,
		}
	}
	/// Get the target number of vantage points
	pub fn get_count(&self) -> usize {
		self.count
	}
	/// Get the lower bound of the height band
	pub fn get_min_height(&self) -> f32 {
		self.min_height
	}
	/// Get the upper bound of the height band
	pub fn get_max_height(&self) -> f32 {
		self.max_height
	}
	/// Get the cell sample height offset
	pub fn get_sample_height_offset(&self) -> f32 {
		self.sample_height_offset
	}
}

/// The fixed set of world-space positions visibility is sampled from.
///
/// Generated once by rejection sampling and immutable afterwards -
/// vantage points and occluders are assumed static within one run
#[derive(Component, Default, Clone)]
pub struct VantagePoints {
	/// The accepted vantage positions
	points: Vec<Vec3>,
	/// Whether generation has run, distinguishes "not yet generated"
	/// from "generated but every candidate was rejected"
	generated: bool,
}

impl VantagePoints {
	/// Create a new ungenerated instance of [VantagePoints]
	pub fn new() -> Self {
		VantagePoints::default()
	}
	/// Create an instance from known positions, useful for deterministic
	/// setups
	pub fn from_points(points: Vec<Vec3>) -> Self {
		VantagePoints {
			points,
			generated: true,
		}
	}
	/// Get the vantage positions
	pub fn get(&self) -> &Vec<Vec3> {
		&self.points
	}
	/// Whether generation has run
	pub fn is_generated(&self) -> bool {
		self.generated
	}
	/// Generate vantage points by rejection sampling within the grid
	/// footprint and the configured height band. A candidate is accepted
	/// only when the reference camera can see it. Sampling gives up after
	/// ten failed attempts per requested point so a camera facing away
	/// from the grid cannot stall the app
	pub fn generate(
		&mut self,
		dimensions: &GridDimensions,
		params: &VantageParams,
		scene: &dyn SceneQuery,
		rng: &mut impl Rng,
	) {
		let half_x = dimensions.get_rows() as f32 * dimensions.get_cell_size() / 2.0;
		let half_z = dimensions.get_cols() as f32 * dimensions.get_cell_size() / 2.0;
		let mut attempts = 0;
		while self.points.len() < params.get_count() && attempts < params.get_count() * 10 {
			attempts += 1;
			let candidate = Vec3::new(
				rng.random_range(-half_x..half_x),
				rng.random_range(params.get_min_height()..=params.get_max_height()),
				rng.random_range(-half_z..half_z),
			);
			if scene.point_in_frustum(candidate) {
				self.points.push(candidate);
			}
		}
		self.generated = true;
	}
}

/// Recompute every cell score of the heatmap from scratch.
///
/// The previous pass is fully overwritten, there is no smoothing or decay
/// between passes and calling this repeatedly with unchanged inputs
/// yields identical scores. Cells whose sample position the reference
/// camera cannot see are skipped and left unscored - the sampler only
/// bothers scoring what the observer itself can see
pub fn calculate_heatmap(
	dimensions: &GridDimensions,
	vantage: &VantagePoints,
	occluders: &CellOccluders,
	params: &VantageParams,
	scene: &dyn SceneQuery,
	heatmap: &mut Heatmap,
) {
	heatmap.reset();
	let points = vantage.get();
	// with no vantage points every score is defined as zero, guards the
	// division below
	if points.is_empty() {
		return;
	}
	for x in 0..dimensions.get_rows() {
		for z in 0..dimensions.get_cols() {
			let cell = GridCoord::new(x, z);
			let sample =
				dimensions.cell_to_world(cell) + Vec3::Y * params.get_sample_height_offset();
			if !scene.point_in_frustum(sample) {
				continue;
			}
			let mut seen = 0;
			for vantage_point in points.iter() {
				let to_sample = sample - *vantage_point;
				let visible = match scene.cast_occlusion(
					*vantage_point,
					to_sample.normalize_or_zero(),
					to_sample.length(),
				) {
					None => true,
					// a ray ending on the cell's own representative
					// object is seeing the cell, not occlusion
					Some(hit) => occluders.get_occluder(cell) == Some(hit),
				};
				if visible {
					seen += 1;
				}
			}
			heatmap.set_cell_value(seen as f32 / points.len() as f32, cell);
		}
	}
}
