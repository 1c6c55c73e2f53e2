//! Logic for generating vantage points and recomputing the [Heatmap]
//!

use crate::prelude::*;
use bevy::prelude::*;

/// One-shot rejection sampling of vantage points for any grid that has
/// not generated its set yet. Without a [SceneQueryResource] there is no
/// frustum predicate to accept candidates against, so generation waits
/// until the application provides one
#[cfg(not(tarpaulin_include))]
pub fn generate_vantage_points(
	scene: Option<Res<SceneQueryResource>>,
	mut q_grids: Query<(&GridDimensions, &VantageParams, &mut VantagePoints)>,
) {
	let Some(scene) = scene else {
		return;
	};
	for (dimensions, params, mut vantage) in q_grids.iter_mut() {
		if vantage.is_generated() {
			continue;
		}
		let mut rng = rand::rng();
		vantage.generate(dimensions, params, scene.get(), &mut rng);
		debug!(
			"Generated {} of {} requested vantage points",
			vantage.get().len(),
			params.get_count()
		);
	}
}

/// Recompute the [Heatmap] of every grid from scratch.
///
/// This runs once per traversal cycle - when an [EventNavRequest] is
/// pending or some [PathPlayer] is waiting on a plan - since vantage
/// points and occluders are static while an agent walks its current
/// path. The request check matters for ordering: a requested agent only
/// gains its [PathPlayer] later in the frame, so without it the first
/// plan of a traversal would be made before any sampling had run. A
/// missing [SceneQueryResource] degrades every cell to "not visible"
/// rather than failing
#[cfg(not(tarpaulin_include))]
pub fn sample_visibility_field(
	mut requests: EventReader<EventNavRequest>,
	scene: Option<Res<SceneQueryResource>>,
	mut q_grids: Query<(
		&GridDimensions,
		&VantagePoints,
		&CellOccluders,
		&VantageParams,
		&mut Heatmap,
	)>,
	q_players: Query<&PathPlayer>,
) {
	let pending_request = !requests.is_empty();
	requests.clear();
	if !pending_request && !q_players.iter().any(|player| player.needs_path()) {
		return;
	}
	let Some(scene) = scene else {
		for (_, _, _, _, mut heatmap) in q_grids.iter_mut() {
			heatmap.reset();
		}
		return;
	};
	for (dimensions, vantage, occluders, params, mut heatmap) in q_grids.iter_mut() {
		calculate_heatmap(
			dimensions,
			vantage,
			occluders,
			params,
			scene.get(),
			&mut heatmap,
		);
	}
}
