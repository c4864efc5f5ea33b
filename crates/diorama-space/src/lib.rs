//! Space backdrop: the spiral galaxy point cloud surrounding the diorama.

pub mod galaxy;

pub use galaxy::{SpiralParams, StarSample, flatten_colors, flatten_positions, sample_spiral};
