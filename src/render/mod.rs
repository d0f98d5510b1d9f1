pub mod layer;
pub mod marker;
pub mod pipeline;
pub mod surface;
