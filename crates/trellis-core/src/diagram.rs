//! Arena owning every shape of one diagram, keyed by resource id

use std::collections::HashMap;

use crate::error::ModelError;
use crate::model::{ResourceId, StencilSetRef};
use crate::shape::Shape;

/// One diagram: a root canvas shape plus every shape nested below it.
///
/// Shapes refer to each other by [`ResourceId`]; the diagram resolves those
/// ids back to shapes. Ids that are not present resolve to nothing.
pub struct Diagram {
    root: ResourceId,
    shapes: HashMap<ResourceId, Shape>,
    order: Vec<ResourceId>,
    stencil_set: Option<StencilSetRef>,
    ssextensions: Vec<String>,
}

impl std::fmt::Debug for Diagram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagram")
            .field("root", &self.root)
            .field("shape_count", &self.shapes.len())
            .field("stencil_set", &self.stencil_set)
            .finish()
    }
}

impl Diagram {
    /// Create a diagram whose canvas is `root`.
    pub fn new(root: Shape) -> Self {
        let root_id = root.resource_id().clone();
        let mut shapes = HashMap::new();
        shapes.insert(root_id.clone(), root);
        Diagram {
            root: root_id.clone(),
            shapes,
            order: vec![root_id],
            stencil_set: None,
            ssextensions: Vec::new(),
        }
    }

    /// Add a shape to the arena without wiring it to any other shape.
    pub fn insert(&mut self, shape: Shape) -> Result<(), ModelError> {
        let id = shape.resource_id().clone();
        if id.is_empty() {
            return Err(ModelError::EmptyResourceId);
        }
        if self.shapes.contains_key(&id) {
            return Err(ModelError::DuplicateResourceId(id));
        }
        tracing::trace!("Inserting shape {}", id);
        self.order.push(id.clone());
        self.shapes.insert(id, shape);
        Ok(())
    }

    pub fn root_id(&self) -> &ResourceId {
        &self.root
    }

    pub fn root(&self) -> &Shape {
        // The root is inserted on construction and shapes are never removed.
        &self.shapes[&self.root]
    }

    pub fn shape(&self, id: &str) -> Option<&Shape> {
        self.shapes.get(id)
    }

    /// Mutable access to a shape. Do not change its id through
    /// [`Shape::set_resource_id`] here; use [`Diagram::rename`].
    pub fn shape_mut(&mut self, id: &str) -> Option<&mut Shape> {
        self.shapes.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.shapes.contains_key(id)
    }

    /// Total number of shapes, the root included.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Iterate over all shapes in insertion order.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.order.iter().filter_map(move |id| self.shapes.get(id))
    }

    // ── Resolution ──────────────────────────────────────────

    pub fn parent_of(&self, id: &str) -> Option<&Shape> {
        self.shape(id)?.parent().and_then(|p| self.shape(p.as_str()))
    }

    pub fn target_of(&self, id: &str) -> Option<&Shape> {
        self.shape(id)?.target().and_then(|t| self.shape(t.as_str()))
    }

    pub fn children_of(&self, id: &str) -> Vec<&Shape> {
        self.resolve(id, Shape::child_shapes)
    }

    pub fn outgoings_of(&self, id: &str) -> Vec<&Shape> {
        self.resolve(id, Shape::outgoings)
    }

    pub fn incomings_of(&self, id: &str) -> Vec<&Shape> {
        self.resolve(id, Shape::incomings)
    }

    fn resolve<'a>(&'a self, id: &str, ids: fn(&Shape) -> &[ResourceId]) -> Vec<&'a Shape> {
        match self.shape(id) {
            Some(shape) => ids(shape)
                .iter()
                .filter_map(|r| self.shape(r.as_str()))
                .collect(),
            None => Vec::new(),
        }
    }

    // ── Wiring helpers ──────────────────────────────────────

    /// Append `child` to the children of `parent` and point `child` back at
    /// `parent`. Both shapes must already be in the diagram.
    pub fn attach_child(&mut self, parent: &str, child: &str) -> Result<(), ModelError> {
        self.require(parent)?;
        self.require(child)?;
        if let Some(p) = self.shapes.get_mut(parent) {
            p.child_shapes_mut().push(ResourceId::from(child));
        }
        if let Some(c) = self.shapes.get_mut(child) {
            c.set_parent(Some(ResourceId::from(parent)));
        }
        Ok(())
    }

    /// Add a directed edge, recording it on both ends.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<(), ModelError> {
        self.require(source)?;
        self.require(target)?;
        if let Some(s) = self.shapes.get_mut(source) {
            s.add_outgoing(target);
        }
        if let Some(t) = self.shapes.get_mut(target) {
            t.add_incoming(source);
        }
        Ok(())
    }

    /// Give a shape a new id, re-keying the arena and rewriting every
    /// reference to it held by other shapes.
    pub fn rename(&mut self, old: &str, new: impl Into<ResourceId>) -> Result<(), ModelError> {
        let new = new.into();
        if new.is_empty() {
            return Err(ModelError::EmptyResourceId);
        }
        if self.shapes.contains_key(&new) {
            return Err(ModelError::DuplicateResourceId(new));
        }
        let mut shape = self
            .shapes
            .remove(old)
            .ok_or_else(|| ModelError::UnknownShape(ResourceId::from(old)))?;
        let old = shape.resource_id().clone();
        tracing::debug!("Renaming shape {} to {}", old, new);

        shape.set_resource_id(new.clone());
        self.shapes.insert(new.clone(), shape);
        for shape in self.shapes.values_mut() {
            shape.replace_reference(&old, &new);
        }
        for id in self.order.iter_mut().filter(|id| **id == old) {
            *id = new.clone();
        }
        if self.root == old {
            self.root = new;
        }
        Ok(())
    }

    fn require(&self, id: &str) -> Result<(), ModelError> {
        if self.shapes.contains_key(id) {
            Ok(())
        } else {
            Err(ModelError::UnknownShape(ResourceId::from(id)))
        }
    }

    // ── Stencil set ─────────────────────────────────────────

    pub fn stencil_set(&self) -> Option<&StencilSetRef> {
        self.stencil_set.as_ref()
    }

    pub fn set_stencil_set(&mut self, stencil_set: Option<StencilSetRef>) {
        self.stencil_set = stencil_set;
    }

    /// Stencil set extension namespaces enabled for the diagram.
    pub fn ssextensions(&self) -> &[String] {
        &self.ssextensions
    }

    pub fn add_ssextension(&mut self, extension: impl Into<String>) {
        self.ssextensions.push(extension.into());
    }
}
