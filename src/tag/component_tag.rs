//! The consuming `component` attribute and its class registry.

use std::collections::HashMap;

use crate::component::{ComponentKey, ComponentRegistry};
use crate::dom::{NodeId, ViewTree};

use super::descriptor::{Expansion, ParseContext, ParseError, TagDescriptor};

/// Builds a component instance from the element it was declared on.
pub type ComponentFactory =
    Box<dyn Fn(&mut ViewTree, &mut ComponentRegistry, NodeId) -> Result<ComponentKey, ParseError>>;

/// Registered component classes, resolved by name (case-insensitive) when a
/// consuming `component` attribute is parsed.
#[derive(Default)]
pub struct ClassRegistry {
    classes: HashMap<String, ComponentFactory>,
}

impl ClassRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under a class name. Replaces any previous one.
    pub fn add(&mut self, name: impl Into<String>, factory: ComponentFactory) {
        self.classes.insert(name.into().to_ascii_lowercase(), factory);
    }

    /// Register the default factory for a class name: a plain component
    /// attached to the declaring element.
    pub fn add_simple(&mut self, name: impl Into<String>) {
        let name = name.into();
        let class = name.clone();
        self.add(
            name,
            Box::new(move |_tree, components, node| {
                let key = components.create(class.clone());
                components.set_view(key, Some(node));
                components.add(key);
                Ok(key)
            }),
        );
    }

    /// Look up a factory by class name.
    pub fn get(&self, name: &str) -> Option<&ComponentFactory> {
        self.classes.get(&name.to_ascii_lowercase())
    }

    /// Unregister a class name. No-op if absent.
    pub fn remove(&mut self, name: &str) {
        self.classes.remove(&name.to_ascii_lowercase());
    }
}

impl std::fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassRegistry")
            .field("classes", &self.classes.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// The built-in consuming attribute: `component="name"`.
///
/// Materializes the named component class for the element. The element body
/// is consumed, not replaced; nested custom tags inside it are still
/// resolved by the ongoing walk.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentAttr;

impl TagDescriptor for ComponentAttr {
    fn identifier(&self) -> &str {
        "component"
    }

    fn expand(
        &self,
        ctx: &mut ParseContext<'_>,
        node: NodeId,
        attr: Option<&str>,
    ) -> Result<Expansion, ParseError> {
        let attr = attr.unwrap_or("component");
        let name = ctx
            .tree
            .attr(node, attr)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ParseError::MissingAttribute(attr.to_owned()))?
            .to_owned();

        let factory = ctx
            .classes
            .get(&name)
            .ok_or_else(|| ParseError::UnknownClass(name.clone()))?;
        let component = factory(ctx.tree, ctx.components, node)?;
        Ok(Expansion::Consume(component))
    }
}
