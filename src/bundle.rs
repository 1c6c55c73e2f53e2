//! A bundle of the components a grid entity needs for sampling and
//! navigation
//!

use crate::prelude::*;
use bevy::prelude::*;

/// All the components a single grid needs for visibility sampling and
/// path planning, spawned together so one entity owns one grid's state
#[derive(Bundle)]
pub struct HeatmapNavBundle {
	/// Cell layout and world-space mapping of the grid
	grid_dimensions: GridDimensions,
	/// Per-cell observability scores, doubling as traversal costs
	heatmap: Heatmap,
	/// One-way record of cells visited while observable
	observed: ObservedField,
	/// The vantage positions visibility is sampled from
	vantage_points: VantagePoints,
	/// Sampling tunables
	vantage_params: VantageParams,
	/// Registry of each cell's representative scene object
	cell_occluders: CellOccluders,
}

impl HeatmapNavBundle {
	/// Create a new instance of [HeatmapNavBundle] based on grid
	/// dimensions, with default sampling parameters and vantage points
	/// yet to be generated
	pub fn new(rows: usize, cols: usize, cell_size: f32) -> Self {
		let grid_dimensions = GridDimensions::new(rows, cols, cell_size);
		let heatmap = Heatmap::new(&grid_dimensions);
		let observed = ObservedField::new(&grid_dimensions);
		HeatmapNavBundle {
			grid_dimensions,
			heatmap,
			observed,
			vantage_points: VantagePoints::new(),
			vantage_params: VantageParams::default(),
			cell_occluders: CellOccluders::new(),
		}
	}
	/// Create a new instance of [HeatmapNavBundle] with custom sampling
	/// parameters and a pre-registered occluder registry
	pub fn new_with_scene(
		rows: usize,
		cols: usize,
		cell_size: f32,
		vantage_params: VantageParams,
		cell_occluders: CellOccluders,
	) -> Self {
		let grid_dimensions = GridDimensions::new(rows, cols, cell_size);
		let heatmap = Heatmap::new(&grid_dimensions);
		let observed = ObservedField::new(&grid_dimensions);
		HeatmapNavBundle {
			grid_dimensions,
			heatmap,
			observed,
			vantage_points: VantagePoints::new(),
			vantage_params,
			cell_occluders,
		}
	}
}
