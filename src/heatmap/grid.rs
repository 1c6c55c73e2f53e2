//! Addressing scheme mapping integer grid cells to world space and back
//!

use bevy::prelude::*;

/// Unique ID of a cell within the grid, following an `(x, z)` convention
/// aligned with the world axes of the same name
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct GridCoord((usize, usize));

impl GridCoord {
	/// Create a new instance of [GridCoord]
	pub fn new(x: usize, z: usize) -> Self {
		GridCoord((x, z))
	}
	/// Get the `(x, z)` tuple
	pub fn get(&self) -> (usize, usize) {
		self.0
	}
	/// Get the `x` component
	pub fn get_x(&self) -> usize {
		self.0 .0
	}
	/// Get the `z` component
	pub fn get_z(&self) -> usize {
		self.0 .1
	}
	/// Number of orthogonal steps between two cells
	pub fn manhattan_distance(&self, other: &GridCoord) -> usize {
		self.get_x().abs_diff(other.get_x()) + self.get_z().abs_diff(other.get_z())
	}
}

/// The dimensions of the cell grid and the size each cell occupies in
/// world space.
///
/// The grid is centred on the world origin: cell `(0, 0)` sits towards
/// `(-x, -z)` and cell `(rows - 1, cols - 1)` towards `(+x, +z)`. The
/// cell-to-world mapping is a pure affine transform so converting a cell
/// to world space and back always yields the original cell
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Component, Clone, Copy, Reflect)]
pub struct GridDimensions {
	/// Number of cells along the world `x` axis
	rows: usize,
	/// Number of cells along the world `z` axis
	cols: usize,
	/// Length and depth of a single cell in world units
	cell_size: f32,
}

impl GridDimensions {
	/// Create a new instance of [GridDimensions]. The recommendation is
	/// for a `unit` of space to be 1 meter, thereby a grid of `20x20`
	/// cells with a `cell_size` of `1.0` covers a `20x20` meter footprint
	pub fn new(rows: usize, cols: usize, cell_size: f32) -> Self {
		if rows == 0 || cols == 0 {
			panic!(
				"Grid dimensions `({}, {})` must be non-zero in both axes",
				rows, cols
			);
		}
		if cell_size <= 0.0 {
			panic!("Cell size `{}` must be greater than zero", cell_size);
		}
		GridDimensions {
			rows,
			cols,
			cell_size,
		}
	}
	/// Get the number of cells along the world `x` axis
	pub fn get_rows(&self) -> usize {
		self.rows
	}
	/// Get the number of cells along the world `z` axis
	pub fn get_cols(&self) -> usize {
		self.cols
	}
	/// Get the world-space size of a single cell
	pub fn get_cell_size(&self) -> f32 {
		self.cell_size
	}
	/// Total number of cells in the grid
	pub fn get_cell_count(&self) -> usize {
		self.rows * self.cols
	}
	/// Whether the cell sits within the grid
	pub fn is_in_bounds(&self, cell: GridCoord) -> bool {
		cell.get_x() < self.rows && cell.get_z() < self.cols
	}
	/// Convert a cell into the world-space position of its centre, at
	/// ground level (`y = 0`)
	pub fn cell_to_world(&self, cell: GridCoord) -> Vec3 {
		Vec3::new(
			(cell.get_x() as f32 - self.rows as f32 / 2.0) * self.cell_size,
			0.0,
			(cell.get_z() as f32 - self.cols as f32 / 2.0) * self.cell_size,
		)
	}
	/// Convert a world-space position into the cell containing it. Each
	/// axis is clamped to the grid limits so any position maps to *some*
	/// valid cell - agents outside the grid footprint saturate to the
	/// boundary cells rather than producing an error
	pub fn world_to_cell(&self, position: Vec3) -> GridCoord {
		let x = (position.x / self.cell_size + self.rows as f32 / 2.0).round();
		let z = (position.z / self.cell_size + self.cols as f32 / 2.0).round();
		let x = (x.max(0.0) as usize).min(self.rows - 1);
		let z = (z.max(0.0) as usize).min(self.cols - 1);
		GridCoord::new(x, z)
	}
	/// Based on a cells `(x, z)` position find its orthogonal neighbours
	/// within the grid limits (up to 4). Diagonal movement is not
	/// supported
	pub fn get_orthogonal_neighbours(&self, cell: GridCoord) -> Vec<GridCoord> {
		let mut neighbours = Vec::new();
		if cell.get_z() > 0 {
			neighbours.push(GridCoord::new(cell.get_x(), cell.get_z() - 1)); // northern cell coords
		}
		if cell.get_x() < self.rows - 1 {
			neighbours.push(GridCoord::new(cell.get_x() + 1, cell.get_z())); // eastern cell coords
		}
		if cell.get_z() < self.cols - 1 {
			neighbours.push(GridCoord::new(cell.get_x(), cell.get_z() + 1)); // southern cell coords
		}
		if cell.get_x() > 0 {
			neighbours.push(GridCoord::new(cell.get_x() - 1, cell.get_z())); // western cell coords
		}
		neighbours
	}
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn valid_grid_dimensions() {
		let _dims = GridDimensions::new(20, 20, 1.0);
	}
	#[test]
	#[should_panic]
	fn invalid_grid_dimensions() {
		GridDimensions::new(0, 20, 1.0);
	}
	#[test]
	#[should_panic]
	fn invalid_cell_size() {
		GridDimensions::new(20, 20, 0.0);
	}
	#[test]
	fn cell_to_world_centre_even() {
		let dims = GridDimensions::new(20, 20, 1.0);
		let result = dims.cell_to_world(GridCoord::new(10, 10));
		let actual = Vec3::new(0.0, 0.0, 0.0);
		assert_eq!(actual, result);
	}
	#[test]
	fn cell_to_world_corner() {
		let dims = GridDimensions::new(20, 20, 2.0);
		let result = dims.cell_to_world(GridCoord::new(0, 0));
		let actual = Vec3::new(-20.0, 0.0, -20.0);
		assert_eq!(actual, result);
	}
	#[test]
	fn world_to_cell_round_trip() {
		let dims = GridDimensions::new(13, 7, 0.5);
		for x in 0..13 {
			for z in 0..7 {
				let cell = GridCoord::new(x, z);
				let world = dims.cell_to_world(cell);
				assert_eq!(cell, dims.world_to_cell(world));
			}
		}
	}
	#[test]
	fn world_to_cell_saturates_out_of_bounds() {
		let dims = GridDimensions::new(20, 20, 1.0);
		let result = dims.world_to_cell(Vec3::new(-999.0, 0.0, 999.0));
		let actual = GridCoord::new(0, 19);
		assert_eq!(actual, result);
	}
	#[test]
	fn manhattan_distance() {
		let a = GridCoord::new(2, 7);
		let b = GridCoord::new(5, 3);
		assert_eq!(7, a.manhattan_distance(&b));
		assert_eq!(7, b.manhattan_distance(&a));
	}
	#[test]
	fn orthogonal_neighbours_corner() {
		let dims = GridDimensions::new(10, 10, 1.0);
		let result = dims.get_orthogonal_neighbours(GridCoord::new(0, 0));
		let actual = vec![GridCoord::new(1, 0), GridCoord::new(0, 1)];
		assert_eq!(actual, result);
	}
	#[test]
	fn orthogonal_neighbours_centre() {
		let dims = GridDimensions::new(10, 10, 1.0);
		let result = dims.get_orthogonal_neighbours(GridCoord::new(4, 4));
		let actual = vec![
			GridCoord::new(4, 3),
			GridCoord::new(5, 4),
			GridCoord::new(4, 5),
			GridCoord::new(3, 4),
		];
		assert_eq!(actual, result);
	}
	#[test]
	fn orthogonal_neighbours_edge() {
		let dims = GridDimensions::new(10, 10, 1.0);
		let result = dims.get_orthogonal_neighbours(GridCoord::new(5, 0));
		let actual = vec![
			GridCoord::new(6, 0),
			GridCoord::new(5, 1),
			GridCoord::new(4, 0),
		];
		assert_eq!(actual, result);
	}
}
