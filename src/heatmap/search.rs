//! Weighted best-first search across the grid using heatmap scores as
//! traversal costs
//!
//! The graph is the 4-connected cell grid. The cost of a step is the
//! heatmap score of the cell being *entered* - cost models how exposed
//! arriving in a cell is, so shadowed cells score zero and get favoured.
//! The heuristic is the Manhattan distance in cell hops, which never
//! overestimates the hop count of the remaining route
//!

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::prelude::*;
use bevy::prelude::*;

/// An ordered sequence of cells describing a traversal from start to
/// goal, both inclusive
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path(Vec<GridCoord>);

impl Path {
	/// Create a new instance of [Path]
	pub fn new(cells: Vec<GridCoord>) -> Self {
		Path(cells)
	}
	/// Get the ordered cells of the path
	pub fn get(&self) -> &Vec<GridCoord> {
		&self.0
	}
	/// Number of cells in the path
	pub fn len(&self) -> usize {
		self.0.len()
	}
	/// Whether the path contains no cells
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// An open-set entry ordered so that [BinaryHeap] pops the smallest
/// `f_score` first, with ties broken by cell coordinates to keep the
/// expansion order deterministic for a fixed insertion order
#[derive(Clone, Copy, Debug)]
struct FrontierNode {
	/// Cost-so-far plus heuristic of the cell
	f_score: f32,
	/// The cell this entry expands
	cell: GridCoord,
}

impl PartialEq for FrontierNode {
	fn eq(&self, other: &Self) -> bool {
		self.f_score == other.f_score && self.cell == other.cell
	}
}

impl Eq for FrontierNode {}

impl PartialOrd for FrontierNode {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for FrontierNode {
	fn cmp(&self, other: &Self) -> Ordering {
		// reversed comparison turns the default max-heap into a min-heap
		other
			.f_score
			.total_cmp(&self.f_score)
			.then_with(|| other.cell.cmp(&self.cell))
	}
}

/// Manhattan distance between two cells as a cost estimate
fn heuristic(from: GridCoord, to: GridCoord) -> f32 {
	from.manhattan_distance(&to) as f32
}

/// Find the cheapest traversal from `start` to `goal`.
///
/// Returns [None] when `start` or `goal` sit outside the grid or the
/// open set empties without reaching the goal - the caller should treat
/// an absent path as "skip movement this cycle", it is a valid outcome
/// rather than an error. On the obstacle-free grid graph a route between
/// two in-bounds cells always exists.
///
/// A generous cap on node expansions bounds the search against
/// pathological cost fields, since re-planning performs this search every
/// traversal cycle
pub fn find_path(
	dimensions: &GridDimensions,
	heatmap: &Heatmap,
	start: GridCoord,
	goal: GridCoord,
) -> Option<Path> {
	if !dimensions.is_in_bounds(start) || !dimensions.is_in_bounds(goal) {
		error!(
			"Cannot search for a path, start {:?} or goal {:?} is outside the {} by {} grid",
			start,
			goal,
			dimensions.get_rows(),
			dimensions.get_cols()
		);
		return None;
	}
	/// Row-major index of a cell within the score arrays
	fn index_of(dimensions: &GridDimensions, cell: GridCoord) -> usize {
		cell.get_x() * dimensions.get_cols() + cell.get_z()
	}
	let cell_count = dimensions.get_cell_count();
	let mut g_score = vec![f32::INFINITY; cell_count];
	let mut f_score = vec![f32::INFINITY; cell_count];
	let mut came_from: Vec<Option<GridCoord>> = vec![None; cell_count];
	let mut open = BinaryHeap::new();

	g_score[index_of(dimensions, start)] = 0.0;
	f_score[index_of(dimensions, start)] = heuristic(start, goal);
	open.push(FrontierNode {
		f_score: heuristic(start, goal),
		cell: start,
	});

	let max_expansions = cell_count * 16;
	let mut expansions = 0;

	while let Some(node) = open.pop() {
		// a relaxation after this entry was pushed found a better score,
		// the entry is stale
		if node.f_score > f_score[index_of(dimensions, node.cell)] {
			continue;
		}
		if node.cell == goal {
			let mut cells = vec![node.cell];
			let mut current = node.cell;
			while let Some(previous) = came_from[index_of(dimensions, current)] {
				cells.push(previous);
				current = previous;
			}
			cells.reverse();
			return Some(Path::new(cells));
		}
		expansions += 1;
		if expansions > max_expansions {
			debug!(
				"Abandoning search from {:?} to {:?} after {} expansions",
				start, goal, expansions
			);
			return None;
		}
		for neighbour in dimensions.get_orthogonal_neighbours(node.cell) {
			let tentative =
				g_score[index_of(dimensions, node.cell)] + heatmap.get_cell_value(neighbour);
			let neighbour_index = index_of(dimensions, neighbour);
			// relax only on a strictly better cost-so-far, revisiting
			// via a worse route is a no-op
			if tentative < g_score[neighbour_index] {
				came_from[neighbour_index] = Some(node.cell);
				g_score[neighbour_index] = tentative;
				let estimate = tentative + heuristic(neighbour, goal);
				f_score[neighbour_index] = estimate;
				open.push(FrontierNode {
					f_score: estimate,
					cell: neighbour,
				});
			}
		}
	}
	debug!("Open set exhausted from {:?} to {:?}", start, goal);
	None
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;

	/// Assert every step of a path moves to an orthogonally adjacent cell
	fn assert_contiguous(path: &Path) {
		for pair in path.get().windows(2) {
			assert_eq!(1, pair[0].manhattan_distance(&pair[1]));
		}
	}

	#[test]
	fn cost_free_grid_degenerates_to_hop_count() {
		let dims = GridDimensions::new(10, 10, 1.0);
		let heatmap = Heatmap::new(&dims);
		let start = GridCoord::new(1, 2);
		let goal = GridCoord::new(7, 9);
		let path = find_path(&dims, &heatmap, start, goal).unwrap();
		assert_eq!(start, *path.get().first().unwrap());
		assert_eq!(goal, *path.get().last().unwrap());
		assert_eq!(start.manhattan_distance(&goal) + 1, path.len());
		assert_contiguous(&path);
	}
	#[test]
	fn staircase_route_across_three_by_three() {
		let dims = GridDimensions::new(3, 3, 1.0);
		let heatmap = Heatmap::new(&dims);
		let path = find_path(&dims, &heatmap, GridCoord::new(0, 0), GridCoord::new(2, 2)).unwrap();
		// 4 steps, every one of them monotonically towards the goal
		assert_eq!(5, path.len());
		assert_contiguous(&path);
		for pair in path.get().windows(2) {
			assert!(pair[1].get_x() >= pair[0].get_x());
			assert!(pair[1].get_z() >= pair[0].get_z());
		}
	}
	#[test]
	fn equal_length_route_avoids_hot_cell() {
		let dims = GridDimensions::new(3, 3, 1.0);
		let mut heatmap = Heatmap::new(&dims);
		heatmap.set_cell_value(1.0, GridCoord::new(1, 1));
		let path = find_path(&dims, &heatmap, GridCoord::new(0, 0), GridCoord::new(2, 2)).unwrap();
		// a staircase around the hot centre costs nothing and is no
		// longer than one through it
		assert_eq!(5, path.len());
		assert!(!path.get().contains(&GridCoord::new(1, 1)));
	}
	#[test]
	fn direct_route_beats_longer_detour() {
		let dims = GridDimensions::new(3, 3, 1.0);
		let mut heatmap = Heatmap::new(&dims);
		heatmap.set_cell_value(1.0, GridCoord::new(1, 1));
		let path = find_path(&dims, &heatmap, GridCoord::new(0, 1), GridCoord::new(2, 1)).unwrap();
		// the hop-count heuristic keeps the search from trading two
		// extra steps for the hot cell's cost
		let actual = vec![
			GridCoord::new(0, 1),
			GridCoord::new(1, 1),
			GridCoord::new(2, 1),
		];
		assert_eq!(&actual, path.get());
	}
	#[test]
	fn start_equals_goal() {
		let dims = GridDimensions::new(5, 5, 1.0);
		let heatmap = Heatmap::new(&dims);
		let cell = GridCoord::new(3, 3);
		let path = find_path(&dims, &heatmap, cell, cell).unwrap();
		assert_eq!(&vec![cell], path.get());
	}
	#[test]
	fn out_of_bounds_goal_is_not_found() {
		let dims = GridDimensions::new(5, 5, 1.0);
		let heatmap = Heatmap::new(&dims);
		let result = find_path(&dims, &heatmap, GridCoord::new(0, 0), GridCoord::new(5, 5));
		assert!(result.is_none());
	}
	#[test]
	fn uniform_cost_still_routes() {
		let dims = GridDimensions::new(8, 8, 1.0);
		let mut heatmap = Heatmap::new(&dims);
		for x in 0..8 {
			for z in 0..8 {
				heatmap.set_cell_value(1.0, GridCoord::new(x, z));
			}
		}
		let start = GridCoord::new(0, 0);
		let goal = GridCoord::new(7, 4);
		let path = find_path(&dims, &heatmap, start, goal).unwrap();
		assert_eq!(start.manhattan_distance(&goal) + 1, path.len());
		assert_contiguous(&path);
	}
	#[cfg(feature = "serde")]
	#[test]
	fn path_is_serializable() {
		/// The field types a path travels between are serializable, so
		/// the path itself must be too
		fn assert_serializable<T: serde::Serialize + serde::de::DeserializeOwned>() {}
		assert_serializable::<Path>();
	}
	#[test]
	fn repeated_searches_are_deterministic() {
		let dims = GridDimensions::new(10, 10, 1.0);
		let mut heatmap = Heatmap::new(&dims);
		heatmap.set_cell_value(0.5, GridCoord::new(4, 4));
		heatmap.set_cell_value(0.75, GridCoord::new(5, 4));
		heatmap.set_cell_value(0.25, GridCoord::new(4, 5));
		let start = GridCoord::new(0, 0);
		let goal = GridCoord::new(9, 9);
		let first = find_path(&dims, &heatmap, start, goal).unwrap();
		let second = find_path(&dims, &heatmap, start, goal).unwrap();
		assert_eq!(first, second);
	}
}
