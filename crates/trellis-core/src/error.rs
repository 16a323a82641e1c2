//! Errors raised by the shape graph model

use thiserror::Error;

use crate::model::ResourceId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Width or height was requested from a shape without geometry.
    #[error("shape '{0}' has no bounds")]
    MissingBounds(ResourceId),

    #[error("shape resource id must not be empty")]
    EmptyResourceId,

    #[error("shape '{0}' is already part of the diagram")]
    DuplicateResourceId(ResourceId),

    #[error("no shape with id '{0}' in the diagram")]
    UnknownShape(ResourceId),
}
