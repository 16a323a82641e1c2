//! Build a [`Diagram`] from the editor's JSON payload

use std::collections::VecDeque;

use serde_json::{Map, Value};
use trellis_core::{Bounds, Diagram, Point, ResourceId, Shape, StencilSetRef, StencilType};

use crate::error::JsonError;

/// Edge references of one shape, resolved once every shape exists.
struct PendingRefs {
    shape: ResourceId,
    outgoing: Vec<ResourceId>,
    target: Option<ResourceId>,
}

/// Parse a serialized diagram.
pub fn parse_diagram(json: &str) -> Result<Diagram, JsonError> {
    let value: Value = serde_json::from_str(json)?;
    diagram_from_value(&value)
}

/// Build a diagram from an already parsed JSON document.
///
/// Shapes are created in a first pass over `childShapes`, which also wires
/// parent and child on both sides. A second pass resolves `outgoing` and
/// `target` references; every outgoing edge is mirrored into the incoming
/// list of the shape it points to.
pub fn diagram_from_value(value: &Value) -> Result<Diagram, JsonError> {
    let root_obj = value.as_object().ok_or(JsonError::RootNotObject)?;

    let mut pending = Vec::new();
    let root = read_shape(root_obj, None, &mut pending)?;
    let root_id = root.resource_id().clone();
    let mut diagram = Diagram::new(root);

    if let Some(stencil_set) = root_obj.get("stencilset").and_then(Value::as_object) {
        diagram.set_stencil_set(Some(StencilSetRef {
            url: string_field(stencil_set, "url").unwrap_or_default(),
            namespace: string_field(stencil_set, "namespace").unwrap_or_default(),
        }));
    }
    for extension in root_obj
        .get("ssextensions")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
    {
        match extension.as_str() {
            Some(ext) => diagram.add_ssextension(ext),
            None => tracing::warn!("Ignoring non-string stencil set extension: {}", extension),
        }
    }

    let mut queue = VecDeque::new();
    queue.push_back((root_obj, root_id));

    while let Some((obj, parent_id)) = queue.pop_front() {
        let children = match obj.get("childShapes").and_then(Value::as_array) {
            Some(children) => children,
            None => continue,
        };

        for child in children {
            let child_obj = child.as_object().ok_or_else(|| JsonError::MalformedShape {
                parent: parent_id.clone(),
            })?;
            let shape = read_shape(child_obj, Some(&parent_id), &mut pending)?;
            let child_id = shape.resource_id().clone();
            tracing::debug!(
                "Importing shape {} ({}) under {}",
                child_id,
                shape.stencil_id().unwrap_or("no stencil"),
                parent_id
            );

            diagram.insert(shape)?;
            diagram.attach_child(parent_id.as_str(), child_id.as_str())?;
            queue.push_back((child_obj, child_id));
        }
    }

    resolve_references(&mut diagram, pending)?;

    tracing::info!("Imported diagram {} with {} shapes", diagram.root_id(), diagram.len());
    Ok(diagram)
}

fn resolve_references(diagram: &mut Diagram, pending: Vec<PendingRefs>) -> Result<(), JsonError> {
    for refs in pending {
        for out in refs.outgoing {
            if !diagram.contains(out.as_str()) {
                return Err(JsonError::UnresolvedReference {
                    from: refs.shape,
                    to: out,
                    field: "outgoing",
                });
            }
            diagram.connect(refs.shape.as_str(), out.as_str())?;
        }

        if let Some(target) = refs.target {
            if !diagram.contains(target.as_str()) {
                return Err(JsonError::UnresolvedReference {
                    from: refs.shape,
                    to: target,
                    field: "target",
                });
            }
            if let Some(shape) = diagram.shape_mut(refs.shape.as_str()) {
                shape.set_target(Some(target));
            }
        }
    }
    Ok(())
}

/// Read the fields of one shape object, queuing its edge references.
fn read_shape(
    obj: &Map<String, Value>,
    parent: Option<&ResourceId>,
    pending: &mut Vec<PendingRefs>,
) -> Result<Shape, JsonError> {
    let id = match string_field(obj, "resourceId") {
        Some(id) if !id.is_empty() => ResourceId::new(id),
        _ => {
            return Err(JsonError::MissingResourceId {
                parent: parent.cloned(),
            })
        }
    };

    let mut shape = Shape::new(id.clone());

    if let Some(stencil_id) = obj
        .get("stencil")
        .and_then(Value::as_object)
        .and_then(|s| string_field(s, "id"))
    {
        shape.set_stencil(Some(StencilType::new(stencil_id)));
    }

    if let Some(properties) = obj.get("properties").and_then(Value::as_object) {
        for (name, value) in properties {
            if let Some(text) = property_text(value) {
                shape.put_property(name.clone(), text);
            }
        }
    }

    if let Some(bounds) = obj.get("bounds") {
        let bounds: Bounds = serde_json::from_value(bounds.clone()).map_err(|source| {
            JsonError::MalformedGeometry {
                shape: id.clone(),
                field: "bounds",
                source,
            }
        })?;
        shape.set_bounds(Some(bounds));
    }

    if let Some(dockers) = obj.get("dockers") {
        let dockers: Vec<Point> = serde_json::from_value(dockers.clone()).map_err(|source| {
            JsonError::MalformedGeometry {
                shape: id.clone(),
                field: "dockers",
                source,
            }
        })?;
        shape.set_dockers(&dockers);
    }

    for glossary_id in obj
        .get("glossaryIds")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
    {
        match glossary_id.as_str() {
            Some(g) => shape.add_glossary_id(g),
            None => tracing::warn!("Ignoring non-string glossary id on {}: {}", id, glossary_id),
        }
    }

    let outgoing = match obj.get("outgoing") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(refs)) => refs
            .iter()
            .map(|r| reference(r, &id, "outgoing"))
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => {
            return Err(JsonError::MalformedReference {
                shape: id,
                field: "outgoing",
            })
        }
    };
    let target = match obj.get("target") {
        None | Some(Value::Null) => None,
        Some(t) => Some(reference(t, &id, "target")?),
    };

    pending.push(PendingRefs {
        shape: id,
        outgoing,
        target,
    });

    Ok(shape)
}

/// An edge reference is an object carrying the referenced shape's `resourceId`.
fn reference(value: &Value, shape: &ResourceId, field: &'static str) -> Result<ResourceId, JsonError> {
    value
        .as_object()
        .and_then(|o| string_field(o, "resourceId"))
        .filter(|id| !id.is_empty())
        .map(ResourceId::new)
        .ok_or_else(|| JsonError::MalformedReference {
            shape: shape.clone(),
            field,
        })
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Property values are kept as text: strings verbatim, scalars by their
/// JSON spelling, structured values as compact JSON. `null` means unset.
pub(crate) fn property_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}
