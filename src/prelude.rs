//! `use bevy_heatmap_nav_plugin::prelude::*;` to import common structures and methods
//!

#[doc(hidden)]
pub use crate::heatmap::{fields::*, grid::*, player::*, search::*, visibility::*};

#[doc(hidden)]
pub use crate::{
	bundle::*,
	plugin::{nav_layer::*, sample_layer::*, *},
};
