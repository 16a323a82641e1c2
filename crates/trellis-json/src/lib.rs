//! Editor JSON import and export for the shape graph

pub mod error;
pub mod export;
pub mod import;


pub use error::JsonError;
pub use export::{diagram_to_value, write_diagram};
pub use import::{diagram_from_value, parse_diagram};
