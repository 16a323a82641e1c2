//! Trellis Core — shape graph model for diagram interchange

pub mod diagram;
pub mod error;
pub mod model;
pub mod shape;

#[cfg(test)]
mod tests;

pub use diagram::Diagram;
pub use error::ModelError;
pub use model::{Bounds, Point, ResourceId, StencilSetRef, StencilType};
pub use shape::Shape;
