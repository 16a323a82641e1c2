//! Serialize a [`Diagram`] back into the editor's JSON payload

use std::collections::HashSet;

use serde_json::{json, Map, Value};
use trellis_core::{Diagram, ResourceId, Shape};

use crate::error::JsonError;

/// Serialize a diagram as pretty-printed JSON.
pub fn write_diagram(diagram: &Diagram) -> Result<String, JsonError> {
    Ok(serde_json::to_string_pretty(&diagram_to_value(diagram))?)
}

/// Convert a diagram into a JSON value, nesting shapes along `childShapes`.
///
/// A shape that is reachable twice through containment is only written the
/// first time it is met.
pub fn diagram_to_value(diagram: &Diagram) -> Value {
    let mut visited = HashSet::new();
    let mut root = shape_value(diagram, diagram.root(), &mut visited);

    if let Value::Object(obj) = &mut root {
        if let Some(stencil_set) = diagram.stencil_set() {
            obj.insert(
                "stencilset".to_string(),
                json!({ "url": stencil_set.url, "namespace": stencil_set.namespace }),
            );
        }
        obj.insert("ssextensions".to_string(), json!(diagram.ssextensions()));
    }

    root
}

fn shape_value<'a>(diagram: &'a Diagram, shape: &'a Shape, visited: &mut HashSet<&'a ResourceId>) -> Value {
    visited.insert(shape.resource_id());

    let mut children = Vec::new();
    for child in diagram.children_of(shape.resource_id().as_str()) {
        if visited.contains(child.resource_id()) {
            tracing::warn!(
                "Shape {} is contained more than once, skipping under {}",
                child.resource_id(),
                shape.resource_id()
            );
            continue;
        }
        children.push(shape_value(diagram, child, visited));
    }

    let properties: Map<String, Value> = shape
        .properties()
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();

    let outgoing: Vec<Value> = shape
        .outgoings()
        .iter()
        .map(|id| json!({ "resourceId": id }))
        .collect();

    let mut obj = Map::new();
    obj.insert("resourceId".to_string(), json!(shape.resource_id()));
    obj.insert("properties".to_string(), Value::Object(properties));
    if let Some(stencil_id) = shape.stencil_id() {
        obj.insert("stencil".to_string(), json!({ "id": stencil_id }));
    }
    obj.insert("childShapes".to_string(), Value::Array(children));
    obj.insert("outgoing".to_string(), Value::Array(outgoing));
    if let Some(target) = shape.target() {
        obj.insert("target".to_string(), json!({ "resourceId": target }));
    }
    if let Some(bounds) = shape.bounds() {
        obj.insert("bounds".to_string(), json!(bounds));
    }
    obj.insert("dockers".to_string(), json!(shape.dockers()));
    if !shape.glossary_ids().is_empty() {
        obj.insert("glossaryIds".to_string(), json!(shape.glossary_ids()));
    }

    Value::Object(obj)
}
