//! Map-space / pixel-space coordinate conversion.

pub mod coords;
