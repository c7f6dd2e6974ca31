//! Feature extraction
//!
//! Converts variable-length shot logs into fixed-size feature vectors.

pub mod grid;
pub mod shot_types;

pub use grid::{CourtGrid, GridPool, ShotFeaturizer};
pub use shot_types::shot_type_counts;
