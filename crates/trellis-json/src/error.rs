//! Errors reported while reading or writing editor JSON

use thiserror::Error;
use trellis_core::{ModelError, ResourceId};

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("diagram root must be a JSON object")]
    RootNotObject,

    #[error("shape without a resourceId (parent: {parent:?})")]
    MissingResourceId { parent: Option<ResourceId> },

    #[error("entry in childShapes of '{parent}' is not an object")]
    MalformedShape { parent: ResourceId },

    #[error("malformed {field} on shape '{shape}': {source}")]
    MalformedGeometry {
        shape: ResourceId,
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed {field} reference on shape '{shape}': expected an object with a resourceId")]
    MalformedReference {
        shape: ResourceId,
        field: &'static str,
    },

    #[error("shape '{from}' references unknown shape '{to}' in {field}")]
    UnresolvedReference {
        from: ResourceId,
        to: ResourceId,
        field: &'static str,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}
