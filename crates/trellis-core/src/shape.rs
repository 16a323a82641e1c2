//! A single node of the diagram graph

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::error::ModelError;
use crate::model::{Bounds, Point, ResourceId, StencilType};

/// An element of the canvas, independent of any stencil set.
///
/// Containment (`parent` / `child_shapes`) and adjacency (`outgoings` /
/// `incoming` / `target`) are stored as resource ids and resolved through the
/// owning [`Diagram`](crate::Diagram). Both relations are maintained
/// independently: pushing a child does not set its parent, and adding an
/// outgoing edge does not add the reverse incoming edge.
///
/// Equality and hashing look at the resource id only.
#[derive(Debug, Clone)]
pub struct Shape {
    resource_id: ResourceId,
    stencil: Option<StencilType>,
    properties: HashMap<String, String>,
    bounds: Option<Bounds>,
    child_shapes: Vec<ResourceId>,
    parent: Option<ResourceId>,
    outgoings: Vec<ResourceId>,
    incoming: Vec<ResourceId>,
    dockers: Vec<Point>,
    target: Option<ResourceId>,
    glossary_ids: Vec<String>,
}

impl Shape {
    /// Create a shape with empty collections, no parent and no bounds.
    ///
    /// The id must not be empty; [`Diagram::insert`](crate::Diagram::insert)
    /// rejects empty ids, this constructor only asserts in debug builds.
    pub fn new(resource_id: impl Into<ResourceId>) -> Self {
        let resource_id = resource_id.into();
        debug_assert!(!resource_id.is_empty(), "shape resource id must not be empty");
        Shape {
            resource_id,
            stencil: None,
            properties: HashMap::new(),
            bounds: None,
            child_shapes: Vec::new(),
            parent: None,
            outgoings: Vec::new(),
            incoming: Vec::new(),
            dockers: Vec::new(),
            target: None,
            glossary_ids: Vec::new(),
        }
    }

    pub fn with_stencil(resource_id: impl Into<ResourceId>, stencil: StencilType) -> Self {
        let mut shape = Shape::new(resource_id);
        shape.stencil = Some(stencil);
        shape
    }

    pub fn resource_id(&self) -> &ResourceId {
        &self.resource_id
    }

    /// Change the id of a free-standing shape. A shape that already lives in
    /// a [`Diagram`](crate::Diagram) must be renamed with
    /// [`Diagram::rename`](crate::Diagram::rename) instead.
    pub fn set_resource_id(&mut self, resource_id: impl Into<ResourceId>) {
        self.resource_id = resource_id.into();
    }

    /// Point every reference to `old` held by this shape at `new`.
    pub(crate) fn replace_reference(&mut self, old: &ResourceId, new: &ResourceId) {
        for id in self
            .child_shapes
            .iter_mut()
            .chain(self.outgoings.iter_mut())
            .chain(self.incoming.iter_mut())
            .chain(self.parent.iter_mut())
            .chain(self.target.iter_mut())
        {
            if *id == *old {
                *id = new.clone();
            }
        }
    }

    // ── Stencil ─────────────────────────────────────────────

    pub fn stencil(&self) -> Option<&StencilType> {
        self.stencil.as_ref()
    }

    pub fn set_stencil(&mut self, stencil: Option<StencilType>) {
        self.stencil = stencil;
    }

    /// Stencil id of the shape, `None` when no stencil is attached.
    pub fn stencil_id(&self) -> Option<&str> {
        self.stencil.as_ref().map(StencilType::id)
    }

    // ── Properties ──────────────────────────────────────────

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Set a property, returning the value it replaced.
    pub fn put_property(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.properties.insert(name.into(), value.into())
    }

    pub fn properties(&self) -> &HashMap<String, String> {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.properties
    }

    pub fn set_properties(&mut self, properties: HashMap<String, String>) {
        self.properties = properties;
    }

    // ── Containment ─────────────────────────────────────────

    pub fn child_shapes(&self) -> &[ResourceId] {
        &self.child_shapes
    }

    pub fn child_shapes_mut(&mut self) -> &mut Vec<ResourceId> {
        &mut self.child_shapes
    }

    /// Replace the child list wholesale. Parents of old or new children are
    /// left untouched.
    pub fn set_child_shapes(&mut self, child_shapes: Vec<ResourceId>) {
        self.child_shapes = child_shapes;
    }

    pub fn parent(&self) -> Option<&ResourceId> {
        self.parent.as_ref()
    }

    pub fn set_parent(&mut self, parent: Option<ResourceId>) {
        self.parent = parent;
    }

    // ── Adjacency ───────────────────────────────────────────

    pub fn outgoings(&self) -> &[ResourceId] {
        &self.outgoings
    }

    pub fn add_outgoing(&mut self, shape: impl Into<ResourceId>) {
        self.outgoings.push(shape.into());
    }

    pub fn set_outgoings(&mut self, outgoings: Vec<ResourceId>) {
        self.outgoings = outgoings;
    }

    pub fn incomings(&self) -> &[ResourceId] {
        &self.incoming
    }

    pub fn add_incoming(&mut self, shape: impl Into<ResourceId>) {
        self.incoming.push(shape.into());
    }

    pub fn set_incomings(&mut self, incoming: Vec<ResourceId>) {
        self.incoming = incoming;
    }

    pub fn target(&self) -> Option<&ResourceId> {
        self.target.as_ref()
    }

    pub fn set_target(&mut self, target: Option<ResourceId>) {
        self.target = target;
    }

    // ── Dockers ─────────────────────────────────────────────

    /// Routing waypoints, usually only present on edges.
    pub fn dockers(&self) -> &[Point] {
        &self.dockers
    }

    /// Store a copy of the given waypoints.
    pub fn set_dockers(&mut self, dockers: &[Point]) {
        self.dockers = dockers.to_vec();
    }

    pub fn add_docker(&mut self, docker: Point) {
        self.dockers.push(docker);
    }

    // ── Glossary ────────────────────────────────────────────

    pub fn glossary_ids(&self) -> &[String] {
        &self.glossary_ids
    }

    pub fn add_glossary_id(&mut self, id: impl Into<String>) {
        self.glossary_ids.push(id.into());
    }

    pub fn set_glossary_ids(&mut self, glossary_ids: Vec<String>) {
        self.glossary_ids = glossary_ids;
    }

    // ── Geometry ────────────────────────────────────────────

    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }

    pub fn set_bounds(&mut self, bounds: Option<Bounds>) {
        self.bounds = bounds;
    }

    pub fn upper_left(&self) -> Option<Point> {
        self.bounds.map(|b| b.upper_left)
    }

    pub fn lower_right(&self) -> Option<Point> {
        self.bounds.map(|b| b.lower_right)
    }

    /// Horizontal extent. Fails when the shape has no bounds.
    pub fn width(&self) -> Result<f64, ModelError> {
        self.require_bounds().map(|b| b.width())
    }

    /// Vertical extent. Fails when the shape has no bounds.
    pub fn height(&self) -> Result<f64, ModelError> {
        self.require_bounds().map(|b| b.height())
    }

    fn require_bounds(&self) -> Result<&Bounds, ModelError> {
        self.bounds
            .as_ref()
            .ok_or_else(|| ModelError::MissingBounds(self.resource_id.clone()))
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.resource_id == other.resource_id
    }
}

impl Eq for Shape {}

impl Hash for Shape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.resource_id.hash(state);
    }
}
