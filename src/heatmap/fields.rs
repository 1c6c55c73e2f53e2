//! The per-cell data arrays layered over the grid
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Defines required access to a row-major per-cell array sized to match a
/// [GridDimensions]
pub trait Field<T> {
	/// Get a reference to the backing array
	fn get(&self) -> &[T];
	/// Retrieve a cell value
	fn get_cell_value(&self, cell: GridCoord) -> T;
	/// Set a cell to a value
	fn set_cell_value(&mut self, value: T, cell: GridCoord);
}

/// Stores the observability score of every cell in the grid.
///
/// A score is a fraction in `[0.0, 1.0]` describing how many of the
/// vantage points have an unobstructed line of sight to the cell. The
/// same value doubles as the cost of a pathing actor entering the cell -
/// pathfinding will prefer cells that are watched less.
///
/// An example heatmap sampled from 4 vantage points may look:
///
/// ```text
///  _____________________________
/// |     |     |     |     |     |
/// | 1.0 | 1.0 | 0.75| 0.5 | 0.5 |
/// |_____|_____|_____|_____|_____|
/// |     |     |     |     |     |
/// | 1.0 | 0.0 | 0.0 | 0.25| 0.5 |
/// |_____|_____|_____|_____|_____|
/// |     |     |     |     |     |
/// | 0.75| 0.0 | 0.0 | 0.25| 0.5 |
/// |_____|_____|_____|_____|_____|
/// |     |     |     |     |     |
/// | 0.75| 0.25| 0.25| 0.5 | 0.75|
/// |_____|_____|_____|_____|_____|
/// ```
///
/// The interior `0.0` cells are shadowed by an occluder and make a cheap
/// corridor for an actor trying to stay unseen
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Component, Clone, Reflect)]
pub struct Heatmap {
	/// Cells along the `x` axis, used as the array stride
	rows: usize,
	/// Cells along the `z` axis
	cols: usize,
	/// Row-major array of per-cell scores
	array: Vec<f32>,
}

impl Heatmap {
	/// Create a new instance of [Heatmap] sized to the grid with every
	/// cell unscored
	pub fn new(dimensions: &GridDimensions) -> Self {
		Heatmap {
			rows: dimensions.get_rows(),
			cols: dimensions.get_cols(),
			array: vec![0.0; dimensions.get_cell_count()],
		}
	}
	/// Overwrite every cell score with zero, ready for a fresh sampling
	/// pass
	pub fn reset(&mut self) {
		self.array.fill(0.0);
	}
	/// Compute the row-major index of a cell, panics when the cell is
	/// outside the grid
	fn index_of(&self, cell: GridCoord) -> usize {
		if cell.get_x() >= self.rows || cell.get_z() >= self.cols {
			panic!(
				"Cannot index Heatmap, cell out of bounds. Asked for x {}, z {}, heatmap is {} by {}",
				cell.get_x(),
				cell.get_z(),
				self.rows,
				self.cols
			)
		}
		cell.get_x() * self.cols + cell.get_z()
	}
}

impl Field<f32> for Heatmap {
	/// Get a reference to the backing array
	fn get(&self) -> &[f32] {
		&self.array
	}
	/// Retrieve a cell score
	fn get_cell_value(&self, cell: GridCoord) -> f32 {
		self.array[self.index_of(cell)]
	}
	/// Set a cell to a score
	fn set_cell_value(&mut self, value: f32, cell: GridCoord) {
		let index = self.index_of(cell);
		self.array[index] = value;
	}
}

/// Records which cells an actor has visited while they were scored as
/// observable (or were the traversal goal).
///
/// Marking is a one-way transition - there is deliberately no method to
/// clear a cell, a cell once observed stays observed for the lifetime of
/// the field
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Component, Clone, Reflect)]
pub struct ObservedField {
	/// Cells along the `x` axis, used as the array stride
	rows: usize,
	/// Cells along the `z` axis
	cols: usize,
	/// Row-major array of per-cell observed flags
	array: Vec<bool>,
}

impl ObservedField {
	/// Create a new instance of [ObservedField] sized to the grid with
	/// every cell unobserved
	pub fn new(dimensions: &GridDimensions) -> Self {
		ObservedField {
			rows: dimensions.get_rows(),
			cols: dimensions.get_cols(),
			array: vec![false; dimensions.get_cell_count()],
		}
	}
	/// Flag a cell as observed
	pub fn mark(&mut self, cell: GridCoord) {
		self.set_cell_value(true, cell);
	}
	/// Compute the row-major index of a cell, panics when the cell is
	/// outside the grid
	fn index_of(&self, cell: GridCoord) -> usize {
		if cell.get_x() >= self.rows || cell.get_z() >= self.cols {
			panic!(
				"Cannot index ObservedField, cell out of bounds. Asked for x {}, z {}, field is {} by {}",
				cell.get_x(),
				cell.get_z(),
				self.rows,
				self.cols
			)
		}
		cell.get_x() * self.cols + cell.get_z()
	}
}

impl Field<bool> for ObservedField {
	/// Get a reference to the backing array
	fn get(&self) -> &[bool] {
		&self.array
	}
	/// Retrieve a cell flag
	fn get_cell_value(&self, cell: GridCoord) -> bool {
		self.array[self.index_of(cell)]
	}
	/// Set a cell flag
	fn set_cell_value(&mut self, value: bool, cell: GridCoord) {
		let index = self.index_of(cell);
		self.array[index] = value;
	}
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn heatmap_starts_unscored() {
		let dims = GridDimensions::new(20, 20, 1.0);
		let heatmap = Heatmap::new(&dims);
		for value in heatmap.get() {
			assert_eq!(0.0, *value);
		}
	}
	#[test]
	fn heatmap_get_set() {
		let dims = GridDimensions::new(20, 20, 1.0);
		let mut heatmap = Heatmap::new(&dims);
		let cell = GridCoord::new(3, 11);
		heatmap.set_cell_value(0.25, cell);
		assert_eq!(0.25, heatmap.get_cell_value(cell));
	}
	#[test]
	fn heatmap_reset_overwrites() {
		let dims = GridDimensions::new(5, 5, 1.0);
		let mut heatmap = Heatmap::new(&dims);
		heatmap.set_cell_value(1.0, GridCoord::new(2, 2));
		heatmap.reset();
		assert_eq!(0.0, heatmap.get_cell_value(GridCoord::new(2, 2)));
	}
	#[test]
	#[should_panic]
	fn heatmap_out_of_bounds() {
		let dims = GridDimensions::new(5, 5, 1.0);
		let heatmap = Heatmap::new(&dims);
		heatmap.get_cell_value(GridCoord::new(5, 0));
	}
	#[test]
	fn observed_field_marks_one_way() {
		let dims = GridDimensions::new(5, 5, 1.0);
		let mut observed = ObservedField::new(&dims);
		let cell = GridCoord::new(1, 4);
		assert!(!observed.get_cell_value(cell));
		observed.mark(cell);
		assert!(observed.get_cell_value(cell));
	}
}
