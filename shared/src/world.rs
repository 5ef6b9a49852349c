//! In-memory scene model for the arcade hall.
//!
//! Tables, their control assemblies, and transient game pieces live in one
//! id-arena tree rooted at the `ArcadeTables` container. All lookups are
//! absence-tolerant: a missing node is `None`, never an error. A table that
//! is still streaming in must not crash the event dispatcher.

use crate::frame::Frame;
use crate::vec3::Vec3;
use std::collections::HashMap;

/// Handle to a node in the scene tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

/// Instance classes the arcade tables are built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Model,
    Part,
    Seat,
    Attachment,
    ParticleEmitter,
    PointLight,
    VectorForce,
    PlaneConstraint,
    AlignOrientation,
    BodyVelocity,
    Display,
}

/// One scene node: a property bag over the classes in `NodeKind`.
/// Fields irrelevant to a node's class keep their defaults.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    pub frame: Frame,
    pub mass: f64,
    /// Theme color (0xRRGGBB) on parts.
    pub color: u32,
    /// Simulated linear velocity on parts.
    pub velocity: Vec3,
    /// Participant with physics authority, if any.
    pub network_owner: Option<u64>,
    /// Part of a rigid assembly.
    pub welded: bool,
    /// Emitters and lights.
    pub enabled: bool,
    /// Constant force applied by a `VectorForce`.
    pub force: Vec3,
    /// Velocity commanded by a `BodyVelocity` driver.
    pub drive_velocity: Vec3,
    /// Rendered text on a `Display`.
    pub text: String,
    /// Constraint endpoints on `PlaneConstraint` / `AlignOrientation`.
    pub attachment0: Option<NodeId>,
    pub attachment1: Option<NodeId>,
    /// Rigid alignment on an `AlignOrientation`.
    pub rigid: bool,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parent: None,
            children: Vec::new(),
            frame: Frame::identity(),
            mass: 1.0,
            color: 0xffffff,
            velocity: Vec3::ZERO,
            network_owner: None,
            welded: false,
            enabled: false,
            force: Vec3::ZERO,
            drive_velocity: Vec3::ZERO,
            text: String::new(),
            attachment0: None,
            attachment1: None,
            rigid: false,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Downward acceleration applied by the host simulation.
const DEFAULT_GRAVITY: f64 = 196.2;

/// The scene tree plus the ambient simulation parameters mechanics read.
pub struct World {
    nodes: HashMap<NodeId, Node>,
    next_id: u32,
    root: NodeId,
    pub gravity: f64,
}

impl World {
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::new("ArcadeTables", NodeKind::Model));
        Self {
            nodes,
            next_id: 1,
            root,
            gravity: DEFAULT_GRAVITY,
        }
    }

    /// The `ArcadeTables` container every table fixture hangs under.
    pub fn tables_root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Insert a node under `parent` and return its handle.
    pub fn spawn(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(id);
            node.parent = Some(parent);
        }
        self.nodes.insert(id, node);
        id
    }

    /// Reparent a node, detaching it from its current parent first.
    pub fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        if !self.nodes.contains_key(&id) || !self.nodes.contains_key(&parent) {
            return;
        }
        let old_parent = self.nodes.get(&id).and_then(|n| n.parent);
        if let Some(old) = old_parent {
            if let Some(p) = self.nodes.get_mut(&old) {
                p.children.retain(|c| *c != id);
            }
        }
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(id);
        }
        if let Some(n) = self.nodes.get_mut(&id) {
            n.parent = Some(parent);
        }
    }

    /// Remove a node and its whole subtree. Missing node is a no-op.
    pub fn destroy(&mut self, id: NodeId) {
        let parent = match self.nodes.get(&id) {
            Some(n) => n.parent,
            None => return,
        };
        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            p.children.retain(|c| *c != id);
        }
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                stack.extend(node.children);
            }
        }
    }

    /// Deep-copy a subtree. The copy starts out unparented; callers rename
    /// and reparent it afterwards. Returns `None` for a missing source.
    pub fn clone_subtree(&mut self, source: NodeId) -> Option<NodeId> {
        if !self.nodes.contains_key(&source) {
            return None;
        }
        Some(self.clone_into(source, None))
    }

    fn clone_into(&mut self, source: NodeId, parent: Option<NodeId>) -> NodeId {
        let mut copy = self.nodes[&source].clone();
        let children = std::mem::take(&mut copy.children);
        copy.parent = parent;
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, copy);
        for child in children {
            self.clone_into(child, Some(id));
        }
        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            p.children.push(id);
        }
        id
    }

    /// Find a table fixture by name under the `ArcadeTables` container.
    pub fn find_table(&self, name: &str) -> Option<NodeId> {
        self.find_child(self.root, name)
    }

    /// Find an immediate child by name.
    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        let node = self.nodes.get(&parent)?;
        node.children
            .iter()
            .copied()
            .find(|c| self.nodes.get(c).is_some_and(|n| n.name == name))
    }

    /// Find an immediate child by name, requiring an exact instance class.
    pub fn find_child_of_kind(&self, parent: NodeId, name: &str, kind: NodeKind) -> Option<NodeId> {
        let node = self.nodes.get(&parent)?;
        node.children
            .iter()
            .copied()
            .find(|c| {
                self.nodes
                    .get(c)
                    .is_some_and(|n| n.name == name && n.kind == kind)
            })
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
