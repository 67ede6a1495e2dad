//! Component registry: view-node and handle associations.
//!
//! [`ComponentRegistry`] owns the records of all logical components and the
//! bidirectional association between components and view nodes. Event
//! routing resolves a raw event's target node to the nearest bound component
//! through [`ComponentRegistry::component_of`].

use std::collections::HashMap;

use slotmap::{new_key_type, SecondaryMap, SlotMap};

use crate::dom::{NodeId, ViewTree};

use super::handle::Handle;

new_key_type! {
    /// Unique identifier for a logical component. Copy, lightweight (u64).
    pub struct ComponentKey;
}

/// Record for a single logical component.
#[derive(Debug, Clone)]
struct ComponentInfo {
    /// Display/match name, compared case-insensitively by event filters.
    name: String,
    /// The component's current view node, if attached.
    view: Option<NodeId>,
    /// Parent component in the capability tree (distinct from the node tree).
    parent: Option<ComponentKey>,
}

/// Registry of logical components and their view-node associations.
///
/// Invariants:
/// - a view node maps to at most one component; registering a new
///   association for an already-bound node replaces the old one.
/// - a component's record survives re-binding to a new view node and is
///   deleted only by [`ComponentRegistry::destroy`].
#[derive(Default)]
pub struct ComponentRegistry {
    components: SlotMap<ComponentKey, ComponentInfo>,
    /// node -> component, for event-target resolution.
    by_node: SecondaryMap<NodeId, ComponentKey>,
    /// component -> the node it is currently registered under.
    registered: SecondaryMap<ComponentKey, NodeId>,
    /// opaque handle -> component, for dispatch identity.
    by_handle: HashMap<Handle, ComponentKey>,
    /// component -> its bound handle.
    handle_of: SecondaryMap<ComponentKey, Handle>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new component record with the given name, unattached.
    pub fn create(&mut self, name: impl Into<String>) -> ComponentKey {
        self.components.insert(ComponentInfo {
            name: name.into(),
            view: None,
            parent: None,
        })
    }

    /// Create a new component record with a parent in the capability tree.
    pub fn create_child(
        &mut self,
        name: impl Into<String>,
        parent: ComponentKey,
    ) -> ComponentKey {
        self.components.insert(ComponentInfo {
            name: name.into(),
            view: None,
            parent: Some(parent),
        })
    }

    /// Delete a component record, dropping its node and handle associations.
    pub fn destroy(&mut self, component: ComponentKey) {
        self.remove(component);
        if let Some(handle) = self.handle_of.remove(component) {
            self.by_handle.remove(&handle);
        }
        self.components.remove(component);
    }

    /// Whether the registry still holds a record for `component`.
    pub fn contains(&self, component: ComponentKey) -> bool {
        self.components.contains_key(component)
    }

    /// The component's name.
    pub fn name(&self, component: ComponentKey) -> Option<&str> {
        self.components.get(component).map(|info| info.name.as_str())
    }

    /// The component's current view node.
    pub fn view(&self, component: ComponentKey) -> Option<NodeId> {
        self.components.get(component).and_then(|info| info.view)
    }

    /// Point the component at a (new) view node.
    ///
    /// This only updates the record; call [`ComponentRegistry::add`] to
    /// register the node association, typically after re-parsing the view.
    pub fn set_view(&mut self, component: ComponentKey, view: Option<NodeId>) {
        if let Some(info) = self.components.get_mut(component) {
            info.view = view;
        }
    }

    /// The component's parent in the capability tree.
    pub fn parent(&self, component: ComponentKey) -> Option<ComponentKey> {
        self.components.get(component).and_then(|info| info.parent)
    }

    /// Set or clear the component's parent.
    pub fn set_parent(&mut self, component: ComponentKey, parent: Option<ComponentKey>) {
        if let Some(info) = self.components.get_mut(component) {
            info.parent = parent;
        }
    }

    /// Record the association from the component's current view node to the
    /// component. No-op if the component exposes no view node.
    ///
    /// A node already bound to another component is rebound to this one; a
    /// component already registered under another node is first unregistered.
    pub fn add(&mut self, component: ComponentKey) {
        let Some(node) = self.view(component) else {
            return;
        };

        // Drop any stale registration of this component under another node.
        if let Some(old_node) = self.registered.get(component).copied() {
            if old_node != node && self.by_node.get(old_node).copied() == Some(component) {
                self.by_node.remove(old_node);
            }
        }

        // Replace an existing binding of this node.
        if let Some(&previous) = self.by_node.get(node) {
            if previous != component {
                self.registered.remove(previous);
            }
        }

        self.by_node.insert(node, component);
        self.registered.insert(component, node);
    }

    /// Inverse of [`ComponentRegistry::add`]. Safe to call on an unbound
    /// component.
    pub fn remove(&mut self, component: ComponentKey) {
        if let Some(node) = self.registered.remove(component) {
            if self.by_node.get(node).copied() == Some(component) {
                self.by_node.remove(node);
            }
        }
    }

    /// Associate an opaque application-level handle with a component.
    ///
    /// Rebinding an already-bound handle replaces the old association.
    pub fn bind(&mut self, handle: Handle, component: ComponentKey) {
        if let Some(previous) = self.by_handle.insert(handle, component) {
            self.handle_of.remove(previous);
        }
        self.handle_of.insert(component, handle);
    }

    /// Drop a handle binding. No-op on an unbound handle.
    pub fn release(&mut self, handle: Handle) {
        if let Some(component) = self.by_handle.remove(&handle) {
            if self.handle_of.get(component) == Some(&handle) {
                self.handle_of.remove(component);
            }
        }
    }

    /// The component bound to an opaque handle.
    pub fn resolve(&self, handle: Handle) -> Option<ComponentKey> {
        self.by_handle.get(&handle).copied()
    }

    /// The handle bound to a component, used as its dispatch identity.
    pub fn handle_of(&self, component: ComponentKey) -> Option<Handle> {
        self.handle_of.get(component).copied()
    }

    /// Walk upward from `node` through its ancestors, returning the nearest
    /// bound component. Stops at the tree root.
    pub fn component_of(&self, tree: &ViewTree, node: NodeId) -> Option<ComponentKey> {
        let mut current = Some(node);
        while let Some(id) = current {
            if let Some(&component) = self.by_node.get(id) {
                return Some(component);
            }
            current = tree.parent(id);
        }
        None
    }

    /// The ancestor-component chain for a component: itself first, then its
    /// parents up the capability tree.
    pub fn chain(&self, component: ComponentKey) -> Vec<ComponentKey> {
        let mut result = Vec::new();
        let mut current = Some(component);
        while let Some(key) = current {
            if !self.components.contains_key(key) || result.contains(&key) {
                break;
            }
            result.push(key);
            current = self.parent(key);
        }
        result
    }

    /// All live component keys, in no particular order.
    pub fn components(&self) -> impl Iterator<Item = ComponentKey> + '_ {
        self.components.keys()
    }
}
