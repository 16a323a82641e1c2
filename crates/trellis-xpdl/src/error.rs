//! Errors raised while building, writing or reading XPDL

use thiserror::Error;
use trellis_core::ResourceId;

#[derive(Error, Debug)]
pub enum XpdlError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("failed to write XML: {0}")]
    Io(#[from] std::io::Error),

    #[error("written XML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// An association shape points at nothing: no `target` and no outgoing edge.
    #[error("association '{0}' has no target")]
    MissingTarget(ResourceId),

    #[error("invalid {attribute} value '{value}'")]
    MalformedCoordinate { attribute: String, value: String },

    #[error("document has no Package element")]
    MissingPackage,
}
