//! Hunt mark data: loading, rank disambiguation and spawn grouping.

pub mod model;
pub mod remap;
pub mod spawns;
