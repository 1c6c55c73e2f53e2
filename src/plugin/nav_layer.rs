//! Logic for assigning traversal goals, planning paths over the
//! [Heatmap] and walking agents along them
//!

use crate::prelude::*;
use bevy::prelude::*;

/// A request for an agent to start navigating towards a goal cell of a
/// particular grid
#[derive(Event)]
pub struct EventNavRequest {
	/// The agent entity that should move, its `Transform` is read for
	/// the start cell and written during traversal
	agent: Entity,
	/// The grid entity to navigate across
	grid: Entity,
	/// The cell to navigate to
	goal: GridCoord,
}

impl EventNavRequest {
	/// Create a new instance of [EventNavRequest]
	pub fn new(agent: Entity, grid: Entity, goal: GridCoord) -> Self {
		EventNavRequest { agent, grid, goal }
	}
	/// Get the agent entity
	pub fn get_agent(&self) -> Entity {
		self.agent
	}
	/// Get the grid entity
	pub fn get_grid(&self) -> Entity {
		self.grid
	}
	/// Get the goal cell
	pub fn get_goal(&self) -> GridCoord {
		self.goal
	}
}

/// Read [EventNavRequest] and attach a [PathPlayer] to each requested
/// agent, bound to the requested grid. Goals outside that grid are
/// rejected - the caller is responsible for supplying validated
/// coordinates and gets an error log otherwise
#[cfg(not(tarpaulin_include))]
pub fn assign_goals(
	mut events: EventReader<EventNavRequest>,
	q_grids: Query<&GridDimensions>,
	mut commands: Commands,
) {
	for event in events.read() {
		let Ok(dimensions) = q_grids.get(event.get_grid()) else {
			error!(
				"Navigation request targets {:?} which is not a grid, ignoring request",
				event.get_grid()
			);
			continue;
		};
		if dimensions.is_in_bounds(event.get_goal()) {
			commands.entity(event.get_agent()).insert(PathPlayer::new(
				event.get_grid(),
				event.get_goal(),
				DEFAULT_STEP_DURATION,
				DEFAULT_HOVER_OFFSET,
			));
		} else {
			error!(
				"Navigation goal {:?} is outside the grid of {:?}, ignoring request",
				event.get_goal(),
				event.get_grid()
			);
		}
	}
}

/// For every [PathPlayer] waiting on a plan, derive its agent's current
/// cell from the `Transform` and search its grid for a route to the
/// goal. A search that finds no route skips movement this cycle and is
/// retried on the next pass
#[cfg(not(tarpaulin_include))]
pub fn plan_paths(
	q_grids: Query<(&GridDimensions, &Heatmap)>,
	mut q_players: Query<(&mut PathPlayer, &Transform)>,
) {
	for (mut player, transform) in q_players.iter_mut() {
		if !player.needs_path() {
			continue;
		}
		let Ok((dimensions, heatmap)) = q_grids.get(player.get_grid()) else {
			continue;
		};
		let start = dimensions.world_to_cell(transform.translation);
		if let Some(path) = find_path(dimensions, heatmap, start, player.get_goal()) {
			trace!(
				"Planned a {} cell path from {:?} to {:?}",
				path.len(),
				start,
				player.get_goal()
			);
			player.assign_path(path, dimensions, transform.translation);
		} else {
			debug!(
				"No route from {:?} to {:?} this cycle",
				start,
				player.get_goal()
			);
		}
	}
}

/// Tick every [PathPlayer] with the frame delta against its own grid,
/// writing the agent's `Transform` and marking any cell arrived at while
/// it was observable (or was the goal) into the [ObservedField]
#[cfg(not(tarpaulin_include))]
pub fn advance_path_players(
	time: Res<Time>,
	mut q_grids: Query<(&GridDimensions, &Heatmap, &mut ObservedField)>,
	mut q_players: Query<(&mut PathPlayer, &mut Transform)>,
) {
	for (mut player, mut transform) in q_players.iter_mut() {
		let Ok((dimensions, heatmap, mut observed)) = q_grids.get_mut(player.get_grid()) else {
			continue;
		};
		let mut position = transform.translation;
		if let Some(cell) = player.tick(time.delta_secs(), dimensions, &mut position) {
			if cell == player.get_goal() || heatmap.get_cell_value(cell) > 0.0 {
				observed.mark(cell);
			}
		}
		transform.translation = position;
	}
}
