//! Tree operations: insert, splice, remove, walk.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeData, NodeId};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// The view-node tree, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps so that node removal is O(subtree size) and lookup is O(1).
/// Splice operations (`insert_after`, `replace`) exist for the view
/// transformer, which substitutes custom-tag nodes in place.
pub struct ViewTree {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    root: Option<NodeId>,
}

impl ViewTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root: None,
        }
    }

    /// Insert a detached node (no parent).
    ///
    /// If no root has been set yet, this node becomes the root.
    pub fn insert(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    /// Insert a node as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics (debug) if `parent` does not exist in the tree.
    pub fn insert_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        debug_assert!(self.nodes.contains_key(parent), "parent node does not exist");
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        self.children
            .get_mut(parent)
            .expect("parent must have children vec")
            .push(id);
        id
    }

    /// Remove a node and all its descendants recursively.
    ///
    /// Returns the `NodeData` for the removed node, or `None` if it didn't exist.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if !self.nodes.contains_key(id) {
            return None;
        }

        self.detach(id);

        if self.root == Some(id) {
            self.root = None;
        }

        // Collect all descendants (BFS) to remove them.
        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed_root_data = None;

        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                for &child in &kids {
                    to_remove.push_back(child);
                }
            }
            self.parent.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed_root_data = data;
            }
        }

        removed_root_data
    }

    /// Detach `node` from its parent's child list, keeping its subtree intact.
    ///
    /// No-op for a node that has no parent.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent_id) = self.parent.remove(node) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != node);
            }
        }
    }

    /// Move `node` (with its subtree) to become the next sibling of `anchor`.
    ///
    /// Used when a replacement producer yields a sequence of nodes that must
    /// land after the original's position in document order.
    ///
    /// # Panics
    ///
    /// Panics (debug) if either node does not exist or `anchor` has no parent.
    pub fn insert_after(&mut self, anchor: NodeId, node: NodeId) {
        debug_assert!(self.nodes.contains_key(anchor), "anchor does not exist");
        debug_assert!(self.nodes.contains_key(node), "node does not exist");

        self.detach(node);

        let parent_id = self
            .parent
            .get(anchor)
            .copied()
            .expect("anchor must have a parent");
        let siblings = self
            .children
            .get_mut(parent_id)
            .expect("parent must have children vec");
        let idx = siblings
            .iter()
            .position(|&c| c == anchor)
            .expect("anchor must be among its parent's children");
        siblings.insert(idx + 1, node);
        self.parent.insert(node, parent_id);
    }

    /// Replace `old` with `new` in the tree, removing `old` and its subtree.
    ///
    /// `new` keeps its own subtree and takes over `old`'s position in the
    /// parent's child list. If `old` was the root, `new` becomes the root.
    ///
    /// # Panics
    ///
    /// Panics (debug) if either node does not exist.
    pub fn replace(&mut self, old: NodeId, new: NodeId) {
        debug_assert!(self.nodes.contains_key(old), "old node does not exist");
        debug_assert!(self.nodes.contains_key(new), "new node does not exist");

        self.detach(new);

        match self.parent.get(old).copied() {
            Some(parent_id) => {
                let siblings = self
                    .children
                    .get_mut(parent_id)
                    .expect("parent must have children vec");
                let idx = siblings
                    .iter()
                    .position(|&c| c == old)
                    .expect("old must be among its parent's children");
                siblings[idx] = new;
                self.parent.insert(new, parent_id);
                self.parent.remove(old);
                self.remove(old);
            }
            None => {
                self.remove(old);
                self.root = Some(new);
            }
        }
    }

    /// Move `node` to become the last child of `new_parent`.
    ///
    /// The node keeps its subtree intact. If `node` was previously a child
    /// of another parent, it is detached first.
    ///
    /// # Panics
    ///
    /// Panics (debug) if either `node` or `new_parent` does not exist.
    pub fn reparent(&mut self, node: NodeId, new_parent: NodeId) {
        debug_assert!(self.nodes.contains_key(node), "node does not exist");
        debug_assert!(
            self.nodes.contains_key(new_parent),
            "new_parent does not exist"
        );

        self.detach(node);
        self.parent.insert(node, new_parent);
        self.children
            .get_mut(new_parent)
            .expect("new_parent must have children vec")
            .push(node);
    }

    /// Deep-clone the subtree rooted at `id`, returning the detached clone.
    ///
    /// # Panics
    ///
    /// Panics (debug) if `id` does not exist.
    pub fn clone_subtree(&mut self, id: NodeId) -> NodeId {
        debug_assert!(self.nodes.contains_key(id), "node does not exist");
        let data = self.nodes[id].clone();
        let clone = self.nodes.insert(data);
        self.children.insert(clone, Vec::new());
        let kids: Vec<NodeId> = self.children(id).to_vec();
        for child in kids {
            let child_clone = self.clone_subtree(child);
            self.parent.insert(child_clone, clone);
            self.children
                .get_mut(clone)
                .expect("clone must have children vec")
                .push(child_clone);
        }
        clone
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Returns an empty slice if the node has no
    /// children or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Walk from `id` up to the root, collecting ancestor node ids.
    ///
    /// The returned vec does **not** include `id` itself; it starts with the
    /// immediate parent and ends at the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's data.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    /// Convenience attribute lookup on a node (case-insensitive name).
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes.get(id).and_then(|data| data.attr(name))
    }

    /// The current root node, if set.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Explicitly set the root node.
    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the tree contains a node with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            let kids = self.children(current);
            for &child in kids.iter().rev() {
                stack.push(child);
            }
        }
        result
    }
}

impl Default for ViewTree {
    fn default() -> Self {
        Self::new()
    }
}
