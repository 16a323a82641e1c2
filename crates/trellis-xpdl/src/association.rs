//! XPDL `Association` element, built from association connector shapes

use std::io::Write;

use quick_xml::Writer;
use trellis_core::{Diagram, Point, Shape};

use crate::error::XpdlError;
use crate::xml::{attrs, write_empty, write_end, write_start, ToXml};

/// Stencil ids of the connectors exported as associations.
pub const ASSOCIATION_STENCILS: [&str; 3] = [
    "Association_Undirected",
    "Association_Unidirectional",
    "Association_Bidirectional",
];

/// An association between two flow objects or artifacts.
///
/// Every field is an opaque string; nothing checks them against each other.
/// `waypoints` is the connector's routing, written as connector graphics.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XpdlAssociation {
    pub id: Option<String>,
    pub name: Option<String>,
    pub direction: Option<String>,
    pub source: Option<String>,
    pub target: Option<String>,
    pub waypoints: Vec<Point>,
}

impl XpdlAssociation {
    pub fn handles_stencil(stencil_id: &str) -> bool {
        ASSOCIATION_STENCILS.contains(&stencil_id)
    }

    /// Read an association from a connector shape.
    ///
    /// The source is the `source` property when set, else the first
    /// incoming shape. The target is the shape's `target`, else its first
    /// outgoing shape; having neither is an error.
    pub fn from_shape(diagram: &Diagram, shape: &Shape) -> Result<Self, XpdlError> {
        let id = shape.resource_id();

        let source = shape
            .property("source")
            .map(str::to_string)
            .or_else(|| shape.incomings().first().map(|s| s.to_string()));

        let target = shape
            .target()
            .or_else(|| shape.outgoings().first())
            .map(|t| t.to_string())
            .ok_or_else(|| XpdlError::MissingTarget(id.clone()))?;

        if !diagram.contains(&target) {
            tracing::warn!("Association {} targets {} which is not in the diagram", id, target);
        }

        Ok(XpdlAssociation {
            id: Some(id.to_string()),
            name: shape.property("name").map(str::to_string),
            direction: shape.property("direction").map(str::to_string),
            source,
            target: Some(target),
            waypoints: shape.dockers().to_vec(),
        })
    }

    pub(crate) fn from_attrs(attributes: &[(String, String)]) -> Self {
        let mut assoc = XpdlAssociation::default();
        for (key, value) in attributes {
            let slot = match key.as_str() {
                "Id" => &mut assoc.id,
                "Name" => &mut assoc.name,
                "Direction" => &mut assoc.direction,
                "Source" => &mut assoc.source,
                "Target" => &mut assoc.target,
                _ => continue,
            };
            *slot = Some(value.clone());
        }
        assoc
    }

    /// Add the waypoint described by a `Coordinates` element.
    pub(crate) fn push_coordinates(&mut self, attributes: &[(String, String)]) -> Result<(), XpdlError> {
        let mut point = Point::default();
        for (key, value) in attributes {
            let slot = match key.as_str() {
                "XCoordinate" => &mut point.x,
                "YCoordinate" => &mut point.y,
                _ => continue,
            };
            *slot = value.parse().map_err(|_| XpdlError::MalformedCoordinate {
                attribute: key.clone(),
                value: value.clone(),
            })?;
        }
        self.waypoints.push(point);
        Ok(())
    }
}

impl ToXml for XpdlAssociation {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), XpdlError> {
        let attributes = attrs(&[
            ("Id", self.id.as_deref()),
            ("Name", self.name.as_deref()),
            ("Direction", self.direction.as_deref()),
            ("Source", self.source.as_deref()),
            ("Target", self.target.as_deref()),
        ]);
        if self.waypoints.is_empty() {
            return write_empty(writer, "Association", &attributes);
        }

        write_start(writer, "Association", &attributes)?;
        write_start(writer, "ConnectorGraphicsInfos", &[])?;
        write_start(writer, "ConnectorGraphicsInfo", &[])?;
        for point in &self.waypoints {
            let (x, y) = (point.x.to_string(), point.y.to_string());
            write_empty(writer, "Coordinates", &[("XCoordinate", x.as_str()), ("YCoordinate", y.as_str())])?;
        }
        write_end(writer, "ConnectorGraphicsInfo")?;
        write_end(writer, "ConnectorGraphicsInfos")?;
        write_end(writer, "Association")
    }
}
