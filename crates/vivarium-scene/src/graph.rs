//! Arena-backed node tree with cached world matrices
//!
//! The graph exclusively owns its nodes; parent/child links are ids. A child
//! has at most one parent, and removing a subtree detaches and destroys every
//! node below it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::draw::{DrawBackend, DrawCommand};
use crate::error::SceneError;
use crate::node::TransformNode;

/// Unique identifier for nodes in a scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(u64);

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

impl NodeId {
    fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw u64 value, useful for debugging
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: HashMap<NodeId, TransformNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        SceneGraph {
            nodes: HashMap::new(),
        }
    }

    /// Add a node to the graph, returning its id. The node starts detached.
    pub fn insert(&mut self, node: TransformNode) -> NodeId {
        let id = NodeId::next();
        self.nodes.insert(id, node);
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&TransformNode> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut TransformNode> {
        self.nodes.get_mut(&id)
    }

    /// Fallible node lookup for model-assembly code
    pub fn get(&self, id: NodeId) -> Result<&TransformNode, SceneError> {
        self.nodes.get(&id).ok_or(SceneError::UnknownNode(id))
    }

    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut TransformNode, SceneError> {
        self.nodes.get_mut(&id).ok_or(SceneError::UnknownNode(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Link `child` under `parent`. Fails fast on unknown ids, self-parenting,
    /// or a child that already has a parent.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if parent == child {
            return Err(SceneError::InvalidGeometry("a node cannot parent itself"));
        }
        if !self.nodes.contains_key(&parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        let child_node = self.nodes.get_mut(&child).ok_or(SceneError::UnknownNode(child))?;
        if child_node.parent.is_some() {
            return Err(SceneError::InvalidGeometry("child already has a parent"));
        }
        child_node.parent = Some(parent);
        self.nodes
            .get_mut(&parent)
            .expect("parent checked above")
            .children
            .push(child);
        Ok(())
    }

    /// Detach a node from its parent and destroy it together with all of its
    /// descendants. Unknown ids are ignored.
    pub fn remove_subtree(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if let Some(parent) = node.parent {
            if let Some(parent_node) = self.nodes.get_mut(&parent) {
                parent_node.children.retain(|&c| c != id);
            }
        }
        let mut stack = vec![id];
        let mut removed = 0usize;
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        log::trace!("removed subtree at {} ({} nodes)", id, removed);
    }

    /// Recompute cached world matrices for a subtree.
    ///
    /// Pure over local state and the given parent world matrix; idempotent, so
    /// calling it more often than necessary is always safe. Callers are
    /// responsible for triggering it after local-state mutation.
    pub fn recompute_world(&mut self, root: NodeId, parent_world: Mat4) {
        let mut stack = vec![(root, parent_world)];
        while let Some((id, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(&id) else {
                continue;
            };
            let world = parent_world * node.local_matrix();
            node.set_world(world);
            stack.extend(node.children.iter().map(|&c| (c, world)));
        }
    }

    /// Push every drawable node in a subtree to a render backend
    pub fn draw(&self, root: NodeId, backend: &mut dyn DrawBackend) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            if node.shape().is_some() {
                backend.draw(node.world(), node.color());
            }
            stack.extend(node.children.iter().copied());
        }
    }

    /// Collect draw commands for a subtree (read-only render query)
    pub fn collect_draw_commands(&self, root: NodeId, out: &mut Vec<DrawCommand>) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            if let Some(shape) = node.shape() {
                out.push(DrawCommand {
                    world: node.world(),
                    shape,
                    color: node.color(),
                });
            }
            stack.extend(node.children.iter().copied());
        }
    }
}
