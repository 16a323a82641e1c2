//! XPDL package: the document wrapping associations and activities

use std::collections::HashSet;
use std::io::Write;

use quick_xml::events::Event;
use quick_xml::{Reader, Writer};
use trellis_core::{Diagram, ResourceId, Shape};

use crate::association::XpdlAssociation;
use crate::error::XpdlError;
use crate::multi_instance::XpdlMultiInstance;
use crate::xml::{
    attrs, read_attrs, write_empty, write_end, write_start, write_text_element, ToXml,
};

pub const XPDL_NAMESPACE: &str = "http://www.wfmc.org/2008/XPDL2.1";
pub const XPDL_VERSION: &str = "2.1";

/// Package-level values that do not come from the diagram itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportOptions {
    /// Package id; the diagram root id is used when unset.
    pub package_id: Option<String>,
    pub package_name: Option<String>,
    pub vendor: Option<String>,
    pub created: Option<String>,
}

/// An activity carrying multi-instance loop settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XpdlActivity {
    pub id: String,
    pub name: Option<String>,
    pub multi_instance: Option<XpdlMultiInstance>,
}

impl ToXml for XpdlActivity {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), XpdlError> {
        let attributes = attrs(&[("Id", Some(self.id.as_str())), ("Name", self.name.as_deref())]);
        match &self.multi_instance {
            Some(mi) => {
                write_start(writer, "Activity", &attributes)?;
                write_start(writer, "Loop", &[("LoopType", "MultiInstance")])?;
                mi.write_xml(writer)?;
                write_end(writer, "Loop")?;
                write_end(writer, "Activity")
            }
            None => write_empty(writer, "Activity", &attributes),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct XpdlPackage {
    pub id: String,
    pub name: Option<String>,
    pub vendor: Option<String>,
    pub created: Option<String>,
    pub associations: Vec<XpdlAssociation>,
    pub activities: Vec<XpdlActivity>,
}

impl XpdlPackage {
    /// Collect the exportable parts of a diagram.
    ///
    /// Shapes are visited in pre-order along `child_shapes`, starting at the
    /// root. Association connectors become [`XpdlAssociation`]s and shapes
    /// whose `looptype` is `MultiInstance` become activities.
    pub fn from_diagram(diagram: &Diagram, options: &ExportOptions) -> Result<Self, XpdlError> {
        let mut package = XpdlPackage {
            id: options
                .package_id
                .clone()
                .unwrap_or_else(|| diagram.root_id().to_string()),
            name: options
                .package_name
                .clone()
                .or_else(|| diagram.root().property("name").map(str::to_string)),
            vendor: options.vendor.clone(),
            created: options.created.clone(),
            associations: Vec::new(),
            activities: Vec::new(),
        };

        for shape in pre_order(diagram) {
            if shape.stencil_id().is_some_and(XpdlAssociation::handles_stencil) {
                package
                    .associations
                    .push(XpdlAssociation::from_shape(diagram, shape)?);
            } else if XpdlMultiInstance::is_multi_instance(shape) {
                package.activities.push(XpdlActivity {
                    id: shape.resource_id().to_string(),
                    name: shape.property("name").map(str::to_string),
                    multi_instance: Some(XpdlMultiInstance::from_shape(shape)),
                });
            }
        }

        tracing::info!(
            "Collected {} associations and {} multi-instance activities",
            package.associations.len(),
            package.activities.len()
        );
        Ok(package)
    }
}

/// Shapes reachable from the root through containment, parents first.
fn pre_order(diagram: &Diagram) -> Vec<&Shape> {
    let mut visited: HashSet<&ResourceId> = HashSet::new();
    let mut order = Vec::new();
    let mut stack = vec![diagram.root()];

    while let Some(shape) = stack.pop() {
        if !visited.insert(shape.resource_id()) {
            continue;
        }
        order.push(shape);
        let children = diagram.children_of(shape.resource_id().as_str());
        stack.extend(children.into_iter().rev());
    }

    order
}

impl ToXml for XpdlPackage {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), XpdlError> {
        let attributes = attrs(&[
            ("xmlns", Some(XPDL_NAMESPACE)),
            ("Id", Some(self.id.as_str())),
            ("Name", self.name.as_deref()),
        ]);
        write_start(writer, "Package", &attributes)?;

        write_start(writer, "PackageHeader", &[])?;
        write_text_element(writer, "XPDLVersion", XPDL_VERSION)?;
        if let Some(vendor) = &self.vendor {
            write_text_element(writer, "Vendor", vendor)?;
        }
        if let Some(created) = &self.created {
            write_text_element(writer, "Created", created)?;
        }
        write_end(writer, "PackageHeader")?;

        if !self.associations.is_empty() {
            write_start(writer, "Associations", &[])?;
            for association in &self.associations {
                association.write_xml(writer)?;
            }
            write_end(writer, "Associations")?;
        }

        if !self.activities.is_empty() {
            write_start(writer, "WorkflowProcesses", &[])?;
            let process_id = format!("{}-process", self.id);
            write_start(writer, "WorkflowProcess", &[("Id", process_id.as_str())])?;
            write_start(writer, "Activities", &[])?;
            for activity in &self.activities {
                activity.write_xml(writer)?;
            }
            write_end(writer, "Activities")?;
            write_end(writer, "WorkflowProcess")?;
            write_end(writer, "WorkflowProcesses")?;
        }

        write_end(writer, "Package")
    }
}

/// Serialize a package as an indented XPDL document.
pub fn write_package(package: &XpdlPackage) -> Result<String, XpdlError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(quick_xml::events::BytesDecl::new(
        "1.0",
        Some("UTF-8"),
        None,
    )))?;
    package.write_xml(&mut writer)?;
    Ok(String::from_utf8(writer.into_inner())?)
}

#[derive(Clone, Copy)]
enum HeaderText {
    Vendor,
    Created,
}

/// Read associations (with their connector waypoints), multi-instance
/// activities and header fields back
/// from an XPDL document. Elements outside that subset are skipped.
pub fn read_package(xml: &str) -> Result<XpdlPackage, XpdlError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut package: Option<XpdlPackage> = None;
    let mut association: Option<XpdlAssociation> = None;
    let mut activity: Option<XpdlActivity> = None;
    let mut header_text: Option<HeaderText> = None;

    loop {
        let event = reader.read_event()?;
        match &event {
            Event::Start(elem) | Event::Empty(elem) => {
                let is_empty = matches!(event, Event::Empty(_));
                let attributes = read_attrs(elem)?;
                match elem.local_name().as_ref() {
                    b"Package" => {
                        let mut pkg = XpdlPackage::default();
                        for (key, value) in attributes {
                            match key.as_str() {
                                "Id" => pkg.id = value,
                                "Name" => pkg.name = Some(value),
                                _ => {}
                            }
                        }
                        package = Some(pkg);
                    }
                    b"Vendor" if !is_empty => header_text = Some(HeaderText::Vendor),
                    b"Created" if !is_empty => header_text = Some(HeaderText::Created),
                    b"Association" => {
                        let assoc = XpdlAssociation::from_attrs(&attributes);
                        if is_empty {
                            if let Some(pkg) = package.as_mut() {
                                pkg.associations.push(assoc);
                            }
                        } else {
                            association = Some(assoc);
                        }
                    }
                    b"Coordinates" => {
                        if let Some(assoc) = association.as_mut() {
                            assoc.push_coordinates(&attributes)?;
                        }
                    }
                    b"Activity" => {
                        let mut act = XpdlActivity::default();
                        for (key, value) in attributes {
                            match key.as_str() {
                                "Id" => act.id = value,
                                "Name" => act.name = Some(value),
                                _ => {}
                            }
                        }
                        if is_empty {
                            if let Some(pkg) = package.as_mut() {
                                pkg.activities.push(act);
                            }
                        } else {
                            activity = Some(act);
                        }
                    }
                    b"MultiInstance" => match activity.as_mut() {
                        Some(act) => act.multi_instance = Some(XpdlMultiInstance::from_attrs(&attributes)),
                        None => tracing::warn!("MultiInstance outside of an Activity, skipping"),
                    },
                    _ => {}
                }
            }
            Event::Text(text) => {
                if let (Some(field), Some(pkg)) = (header_text, package.as_mut()) {
                    let value = text.unescape()?.into_owned();
                    match field {
                        HeaderText::Vendor => pkg.vendor = Some(value),
                        HeaderText::Created => pkg.created = Some(value),
                    }
                }
            }
            Event::End(elem) => match elem.local_name().as_ref() {
                b"Vendor" | b"Created" => header_text = None,
                b"Association" => {
                    if let (Some(assoc), Some(pkg)) = (association.take(), package.as_mut()) {
                        pkg.associations.push(assoc);
                    }
                }
                b"Activity" => {
                    if let (Some(act), Some(pkg)) = (activity.take(), package.as_mut()) {
                        pkg.activities.push(act);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    package.ok_or(XpdlError::MissingPackage)
}
