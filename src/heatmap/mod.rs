//! Visibility heatmaps are a means of steering an actor through the
//! least-observed cells of a space.
//!
//! A world is overlaid with a grid of cells. A fixed set of vantage
//! points is scattered above the grid and, for every cell, occlusion
//! rays from each vantage point decide how many of them can actually see
//! the cell - the fraction that can is the cell's heatmap score. The
//! score doubles as the cost of entering the cell during pathfinding, so
//! a weighted best-first search naturally prefers routes through
//! shadowed, unobserved space. A path player then walks an agent along
//! the route cell by cell, re-planning whenever its path runs out.
//!
//! Definitions:
//!
//! * Grid - an `MxN` arrangement of cells centred on the world origin,
//!   each cell covering a square patch of ground
//! * Vantage point - a fixed world position used as a line-of-sight
//!   origin when sampling
//! * Heatmap - per-cell scores in `[0.0, 1.0]` where `0.0` means no
//!   vantage point sees the cell and `1.0` means all of them do
//! * Occlusion query - a capped ray test answering "does geometry block
//!   the line from a vantage point to a cell?"
//! * Path - an ordered list of cells from an agent's current cell to its
//!   goal, chosen to minimise accumulated heatmap cost
//!
//! An example cycle over a `4x4` grid with one occluder casting a shadow
//! across the middle columns, and the path an agent in the top-left takes
//! towards a goal in the bottom-right:
//!
//! ```text
//!  _______________________       _______________________
//! |     |     |     |     |     |     |     |     |     |
//! | 0.8 | 0.1 | 0.1 | 0.9 |     |  S--|-->. |     |     |
//! |_____|_____|_____|_____|     |_____|___|_|_____|_____|
//! |     |     |     |     |     |     |   | |     |     |
//! | 0.9 | 0.2 | 0.1 | 0.8 |     |     |   '-|->.  |     |
//! |_____|_____|_____|_____|     |_____|_____|__|__|_____|
//! |     |     |     |     |     |     |     |  |  |     |
//! | 0.7 | 0.2 | 0.2 | 0.9 |     |     |     |  .  |     |
//! |_____|_____|_____|_____|     |_____|_____|__|__|_____|
//! |     |     |     |     |     |     |     |  |  |     |
//! | 0.9 | 0.8 | 0.3 | 1.0 |     |     |     |  '--|-> G |
//! |_____|_____|_____|_____|     |_____|_____|_____|_____|
//!
//!      heatmap scores             path hugging the shadow
//! ```
//!

pub mod fields;
pub mod grid;
pub mod player;
pub mod search;
pub mod visibility;
