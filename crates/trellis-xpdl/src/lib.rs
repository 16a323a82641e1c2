//! XPDL adapters for the shape graph: associations and multi-instance loops

pub mod association;
pub mod error;
pub mod multi_instance;
pub mod package;
pub mod xml;


pub use association::{XpdlAssociation, ASSOCIATION_STENCILS};
pub use error::XpdlError;
pub use multi_instance::XpdlMultiInstance;
pub use package::{read_package, write_package, ExportOptions, XpdlActivity, XpdlPackage};
pub use xml::{to_xml_string, ToXml};
