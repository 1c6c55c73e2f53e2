//! Defines the Bevy [Plugin] for heatmap navigation
//!

use crate::prelude::*;
use bevy::prelude::*;

pub mod nav_layer;
pub mod sample_layer;

/// Enforces the strictly ordered phases of a traversal cycle: recompute
/// the heatmap, then plan and animate. With the phases chained on one
/// schedule there is never concurrent mutation of the heatmap or grid
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum OrderingSet {
	/// Vantage point generation and heatmap recomputation
	Sample,
	/// Goal assignment, path planning and agent movement
	Navigate,
}

/// Registers the types, events and ordered systems of heatmap navigation
pub struct HeatmapNavPlugin;

impl Plugin for HeatmapNavPlugin {
	#[cfg(not(tarpaulin_include))]
	fn build(&self, app: &mut App) {
		app.register_type::<GridCoord>()
			.register_type::<GridDimensions>()
			.register_type::<Heatmap>()
			.register_type::<ObservedField>()
			.register_type::<VantageParams>()
			.add_event::<nav_layer::EventNavRequest>()
			.configure_sets(Update, (OrderingSet::Sample, OrderingSet::Navigate).chain())
			.add_systems(
				Update,
				(
					(
						sample_layer::generate_vantage_points,
						sample_layer::sample_visibility_field,
					)
						.chain()
						.in_set(OrderingSet::Sample),
					(
						nav_layer::assign_goals,
						nav_layer::plan_paths,
						nav_layer::advance_path_players,
					)
						.chain()
						.in_set(OrderingSet::Navigate),
				),
			);
	}
}
