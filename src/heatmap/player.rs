//! Advancing an agent along a computed path one cell at a time
//!
//! The original traversal loop in this family of navigators tends to be
//! written as a coroutine suspended mid-interpolation. Here it is an
//! explicit state machine driven by an external `tick` so the scheduling
//! loop stays in charge: one interpolation step per tick, one state
//! transition per arrival
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Seconds spent interpolating between two adjacent cells
pub const DEFAULT_STEP_DURATION: f32 = 0.2;
/// How far above a cell's centre the agent is positioned while moving
pub const DEFAULT_HOVER_OFFSET: f32 = 0.5;

/// Where a [PathPlayer] is within its traversal
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayerState {
	/// No path assigned, waiting for a plan
	Idle,
	/// Interpolating the agent towards the cell at `step` of the path
	MovingToCell {
		/// Index into the path of the cell being moved to
		step: usize,
		/// World position the interpolation started from
		from: Vec3,
		/// World position of the destination cell (hover applied)
		to: Vec3,
		/// Seconds spent on this step so far
		elapsed: f32,
	},
	/// The agent reached the cell at `step`, resolved next tick
	Arrived {
		/// Index into the path of the cell arrived at
		step: usize,
	},
	/// The goal cell was reached, traversal over for this path instance
	Done,
}

/// Consumes a [Path] and walks an agent's position along it cell by cell.
///
/// The player retains its goal so that exhausting a partial path drops it
/// back to [PlayerState::Idle] where the plugin re-derives the agent's
/// current cell and re-plans
#[derive(Component, Clone, Debug)]
pub struct PathPlayer {
	/// The grid entity this player's paths are planned and walked
	/// against - with several grids spawned each player belongs to
	/// exactly one
	grid: Entity,
	/// The cell the traversal is heading for
	goal: GridCoord,
	/// The path currently being walked
	path: Option<Path>,
	/// Progress through the current path
	state: PlayerState,
	/// Seconds spent interpolating between two adjacent cells
	step_duration: f32,
	/// How far above a cell's centre the agent is positioned
	hover_offset: f32,
}

impl PathPlayer {
	/// Create a new instance of [PathPlayer] bound to the `grid` entity
	/// and heading for `goal`
	pub fn new(grid: Entity, goal: GridCoord, step_duration: f32, hover_offset: f32) -> Self {
		if step_duration <= 0.0 {
			panic!("Step duration `{}` must be greater than zero", step_duration);
		}
		PathPlayer {
			grid,
			goal,
			path: None,
			state: PlayerState::Idle,
			step_duration,
			hover_offset,
		}
	}
	/// Get the grid entity the player is bound to
	pub fn get_grid(&self) -> Entity {
		self.grid
	}
	/// Get the goal cell
	pub fn get_goal(&self) -> GridCoord {
		self.goal
	}
	/// Get the traversal state
	pub fn get_state(&self) -> &PlayerState {
		&self.state
	}
	/// Whether the goal has been reached
	pub fn is_done(&self) -> bool {
		matches!(self.state, PlayerState::Done)
	}
	/// Whether the player is waiting for a path to be planned
	pub fn needs_path(&self) -> bool {
		matches!(self.state, PlayerState::Idle)
	}
	/// Hand the player a freshly planned path.
	///
	/// The first cell of a path is the cell the agent already stands in
	/// so movement begins towards the second. A single-cell path means
	/// the agent is already at the goal
	pub fn assign_path(&mut self, path: Path, dimensions: &GridDimensions, position: Vec3) {
		if path.len() > 1 {
			let to = dimensions.cell_to_world(path.get()[1]) + Vec3::Y * self.hover_offset;
			self.state = PlayerState::MovingToCell {
				step: 1,
				from: position,
				to,
				elapsed: 0.0,
			};
			self.path = Some(path);
		} else if path.get().first() == Some(&self.goal) {
			self.state = PlayerState::Done;
			self.path = None;
		}
	}
	/// Advance the traversal by `delta_time` seconds, reading and writing
	/// the agent's `position`.
	///
	/// Returns the cell arrived at when an interpolation step completes
	/// so the caller can mark it observed, otherwise [None]
	pub fn tick(
		&mut self,
		delta_time: f32,
		dimensions: &GridDimensions,
		position: &mut Vec3,
	) -> Option<GridCoord> {
		match self.state {
			PlayerState::Idle | PlayerState::Done => None,
			PlayerState::MovingToCell {
				step,
				from,
				to,
				elapsed,
			} => {
				let elapsed = elapsed + delta_time;
				if elapsed < self.step_duration {
					*position = from.lerp(to, elapsed / self.step_duration);
					self.state = PlayerState::MovingToCell {
						step,
						from,
						to,
						elapsed,
					};
					None
				} else {
					*position = to;
					self.state = PlayerState::Arrived { step };
					self.path.as_ref().map(|path| path.get()[step])
				}
			}
			PlayerState::Arrived { step } => {
				let Some(path) = self.path.as_ref() else {
					self.state = PlayerState::Idle;
					return None;
				};
				let cell = path.get()[step];
				if cell == self.goal {
					self.state = PlayerState::Done;
					self.path = None;
				} else if step + 1 < path.len() {
					let to =
						dimensions.cell_to_world(path.get()[step + 1]) + Vec3::Y * self.hover_offset;
					self.state = PlayerState::MovingToCell {
						step: step + 1,
						from: *position,
						to,
						elapsed: 0.0,
					};
				} else {
					// path exhausted short of the goal, wait for a
					// re-plan from wherever the agent now stands
					self.state = PlayerState::Idle;
					self.path = None;
				}
				None
			}
		}
	}
}
