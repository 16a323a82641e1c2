//! Unit tests for trellis-core

use crate::*;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

fn hash_of(shape: &Shape) -> u64 {
    let mut hasher = DefaultHasher::new();
    shape.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn test_shape_equality_by_id() {
    let mut a = Shape::with_stencil("sid-1", StencilType::new("Task"));
    a.put_property("name", "Check order");
    a.set_bounds(Some(Bounds::new(Point::new(0.0, 0.0), Point::new(100.0, 80.0))));

    let b = Shape::new("sid-1");
    let c = Shape::new("sid-2");

    assert_eq!(a, b);
    assert_eq!(b, a);
    assert_eq!(a, a.clone());
    assert_ne!(a, c);
    assert_eq!(hash_of(&a), hash_of(&b));
}

#[test]
fn test_shape_equality_is_transitive() {
    let a = Shape::new("x");
    let mut b = Shape::new("x");
    b.add_glossary_id("g1");
    let mut c = Shape::new("x");
    c.add_docker(Point::new(1.0, 1.0));

    assert_eq!(a, b);
    assert_eq!(b, c);
    assert_eq!(a, c);
}

#[test]
fn test_shapes_as_set_keys() {
    let mut set = HashSet::new();
    set.insert(Shape::new("a"));
    let mut dup = Shape::new("a");
    dup.put_property("name", "other");
    set.insert(dup);
    set.insert(Shape::new("b"));

    assert_eq!(set.len(), 2);
    assert!(set.contains(&Shape::new("a")));
}

#[test]
fn test_fresh_shape_has_empty_collections() {
    let shape = Shape::new("fresh");

    assert!(shape.child_shapes().is_empty());
    assert!(shape.outgoings().is_empty());
    assert!(shape.incomings().is_empty());
    assert!(shape.dockers().is_empty());
    assert!(shape.glossary_ids().is_empty());
    assert!(shape.properties().is_empty());
    assert!(shape.parent().is_none());
    assert!(shape.bounds().is_none());
    assert!(shape.target().is_none());
    assert!(shape.stencil_id().is_none());
}

#[test]
fn test_collections_reflect_mutations() {
    let mut shape = Shape::new("s");
    shape.child_shapes_mut().push(ResourceId::from("c1"));
    shape.add_glossary_id("glossary://1");
    shape.properties_mut().insert("k".to_string(), "v".to_string());

    assert_eq!(shape.child_shapes(), &[ResourceId::from("c1")]);
    assert_eq!(shape.child_shapes(), &[ResourceId::from("c1")]);
    assert_eq!(shape.glossary_ids(), &["glossary://1".to_string()]);
    assert_eq!(shape.property("k"), Some("v"));
}

#[test]
fn test_set_dockers_copies_input() {
    let mut shape = Shape::new("edge");
    let mut points = vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)];
    shape.set_dockers(&points);

    points[0] = Point::new(99.0, 99.0);
    points.push(Point::new(5.0, 6.0));

    assert_eq!(shape.dockers(), &[Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
}

#[test]
fn test_put_property_returns_previous() {
    let mut shape = Shape::new("s");

    assert_eq!(shape.put_property("x", "1"), None);
    assert_eq!(shape.put_property("x", "2"), Some("1".to_string()));
    assert_eq!(shape.property("x"), Some("2"));
    assert_eq!(shape.property("missing"), None);
}

#[test]
fn test_width_and_height_from_bounds() {
    let mut shape = Shape::new("s");
    shape.set_bounds(Some(Bounds::new(Point::new(0.0, 0.0), Point::new(10.0, 4.0))));

    assert_eq!(shape.width(), Ok(10.0));
    assert_eq!(shape.height(), Ok(4.0));
    assert_eq!(shape.upper_left(), Some(Point::new(0.0, 0.0)));
    assert_eq!(shape.lower_right(), Some(Point::new(10.0, 4.0)));
}

#[test]
fn test_flipped_bounds_give_negative_extent() {
    let bounds = Bounds::new(Point::new(10.0, 10.0), Point::new(4.0, 7.0));
    assert_eq!(bounds.width(), -6.0);
    assert_eq!(bounds.height(), -3.0);
}

#[test]
fn test_width_without_bounds_fails() {
    let shape = Shape::new("no-geometry");

    assert_eq!(
        shape.width(),
        Err(ModelError::MissingBounds(ResourceId::from("no-geometry")))
    );
    assert!(shape.height().is_err());
    assert_eq!(shape.upper_left(), None);
    assert_eq!(shape.lower_right(), None);
}

#[test]
fn test_add_outgoing_is_one_sided() {
    let mut diagram = Diagram::new(Shape::new("canvas"));
    let mut a = Shape::new("a");
    a.add_outgoing("b");
    a.add_outgoing("c");
    diagram.insert(a).unwrap();
    diagram.insert(Shape::new("b")).unwrap();
    diagram.insert(Shape::new("c")).unwrap();

    let a = diagram.shape("a").unwrap();
    assert_eq!(a.outgoings(), &[ResourceId::from("b"), ResourceId::from("c")]);
    assert_eq!(a.outgoings().iter().filter(|id| id.as_str() == "b").count(), 1);
    assert!(diagram.shape("b").unwrap().incomings().is_empty());

    let resolved: Vec<_> = diagram.outgoings_of("a").into_iter().map(|s| s.resource_id().as_str()).collect();
    assert_eq!(resolved, vec!["b", "c"]);
}

#[test]
fn test_child_does_not_get_parent_implicitly() {
    let mut diagram = Diagram::new(Shape::new("canvas"));
    diagram.insert(Shape::new("lane")).unwrap();

    diagram
        .shape_mut("canvas")
        .unwrap()
        .child_shapes_mut()
        .push(ResourceId::from("lane"));
    assert!(diagram.shape("lane").unwrap().parent().is_none());
    assert!(diagram.parent_of("lane").is_none());

    diagram
        .shape_mut("lane")
        .unwrap()
        .set_parent(Some(ResourceId::from("canvas")));

    let parent = diagram.parent_of("lane").unwrap();
    assert_eq!(parent, diagram.root());
    let children = diagram.children_of("canvas");
    assert_eq!(children.len(), 1);
    assert_eq!(children[0], diagram.shape("lane").unwrap());
}

#[test]
fn test_set_child_shapes_replaces_list() {
    let mut shape = Shape::new("pool");
    shape.child_shapes_mut().push(ResourceId::from("old"));
    shape.set_child_shapes(vec![ResourceId::from("n1"), ResourceId::from("n2")]);

    assert_eq!(shape.child_shapes(), &[ResourceId::from("n1"), ResourceId::from("n2")]);
}

#[test]
fn test_diagram_rejects_bad_ids() {
    let mut diagram = Diagram::new(Shape::new("canvas"));
    diagram.insert(Shape::new("a")).unwrap();

    assert_eq!(
        diagram.insert(Shape::new("a")),
        Err(ModelError::DuplicateResourceId(ResourceId::from("a")))
    );

    let mut unnamed = Shape::new("tmp");
    unnamed.set_resource_id("");
    assert_eq!(diagram.insert(unnamed), Err(ModelError::EmptyResourceId));
    assert_eq!(diagram.len(), 2);
}

#[test]
fn test_diagram_wiring_helpers() {
    let mut diagram = Diagram::new(Shape::new("canvas"));
    diagram.insert(Shape::new("task")).unwrap();
    diagram.insert(Shape::new("flow")).unwrap();

    diagram.attach_child("canvas", "task").unwrap();
    diagram.connect("task", "flow").unwrap();

    assert_eq!(diagram.parent_of("task").unwrap().resource_id().as_str(), "canvas");
    assert_eq!(diagram.incomings_of("flow")[0].resource_id().as_str(), "task");
    assert_eq!(
        diagram.connect("task", "ghost"),
        Err(ModelError::UnknownShape(ResourceId::from("ghost")))
    );
}

#[test]
fn test_dangling_references_resolve_to_nothing() {
    let mut diagram = Diagram::new(Shape::new("canvas"));
    let mut edge = Shape::new("edge");
    edge.set_target(Some(ResourceId::from("nowhere")));
    edge.add_outgoing("nowhere");
    diagram.insert(edge).unwrap();

    assert!(diagram.target_of("edge").is_none());
    assert!(diagram.outgoings_of("edge").is_empty());
    assert!(diagram.children_of("missing").is_empty());
}

#[test]
fn test_shapes_iterate_in_insertion_order() {
    let mut diagram = Diagram::new(Shape::new("canvas"));
    for id in ["c", "a", "b"] {
        diagram.insert(Shape::new(id)).unwrap();
    }
    let ids: Vec<_> = diagram.shapes().map(|s| s.resource_id().as_str()).collect();
    assert_eq!(ids, vec!["canvas", "c", "a", "b"]);
}

#[test]
fn test_bounds_serialization_uses_editor_names() {
    let bounds = Bounds::new(Point::new(1.0, 2.0), Point::new(3.0, 4.0));
    let value = serde_json::to_value(bounds).unwrap();

    assert_eq!(value["upperLeft"]["x"], 1.0);
    assert_eq!(value["lowerRight"]["y"], 4.0);
}

#[test]
fn test_rename_rekeys_shape_and_references() {
    let mut diagram = Diagram::new(Shape::new("canvas"));
    diagram.insert(Shape::new("a")).unwrap();
    diagram.insert(Shape::new("b")).unwrap();
    diagram.attach_child("canvas", "a").unwrap();
    diagram.connect("a", "b").unwrap();
    diagram.shape_mut("b").unwrap().set_target(Some(ResourceId::from("a")));

    diagram.rename("a", "task").unwrap();

    assert!(!diagram.contains("a"));
    assert_eq!(diagram.shape("task").unwrap().resource_id().as_str(), "task");
    assert_eq!(diagram.children_of("canvas")[0].resource_id().as_str(), "task");
    assert_eq!(diagram.parent_of("task").unwrap(), diagram.root());
    assert_eq!(diagram.incomings_of("b")[0].resource_id().as_str(), "task");
    assert_eq!(diagram.target_of("b").unwrap().resource_id().as_str(), "task");

    let ids: Vec<_> = diagram.shapes().map(|s| s.resource_id().as_str()).collect();
    assert_eq!(ids, vec!["canvas", "task", "b"]);
    assert_eq!(
        diagram.insert(Shape::new("task")),
        Err(ModelError::DuplicateResourceId(ResourceId::from("task")))
    );
    assert_eq!(diagram.insert(Shape::new("a")), Ok(()));
}

#[test]
fn test_rename_root_and_rejections() {
    let mut diagram = Diagram::new(Shape::new("canvas"));
    diagram.insert(Shape::new("a")).unwrap();

    assert_eq!(
        diagram.rename("canvas", "a"),
        Err(ModelError::DuplicateResourceId(ResourceId::from("a")))
    );
    assert_eq!(diagram.rename("canvas", ""), Err(ModelError::EmptyResourceId));
    assert_eq!(
        diagram.rename("ghost", "x"),
        Err(ModelError::UnknownShape(ResourceId::from("ghost")))
    );
    assert_eq!(diagram.len(), 2);

    diagram.rename("canvas", "board").unwrap();
    assert_eq!(diagram.root_id().as_str(), "board");
    assert_eq!(diagram.root().resource_id().as_str(), "board");
}
