//! This is a plugin for Bevy game engine to sample occlusion-aware visibility heatmaps over a cell grid and steer agents along least-observed paths
//!

pub mod heatmap;
pub mod bundle;
pub mod plugin;

pub mod prelude;
