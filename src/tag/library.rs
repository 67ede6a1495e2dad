//! The tag library: registered custom tags and custom attributes.

use std::collections::HashMap;

use super::component_tag::ComponentAttr;
use super::descriptor::TagDescriptor;
use super::foreach::Foreach;

/// Case-insensitive registry of custom tags and custom attributes.
///
/// An instance per view root (injectable; there is no hidden global). The
/// registration key defaults to the descriptor's own identifier and can be
/// moved with the rename operations; the parser's skip set tracks the key a
/// descriptor actually matched under.
#[derive(Default)]
pub struct TagLibrary {
    tags: HashMap<String, Box<dyn TagDescriptor>>,
    attrs: HashMap<String, Box<dyn TagDescriptor>>,
}

impl TagLibrary {
    /// An empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// A library with the built-in attributes installed: `foreach` and
    /// `component`.
    pub fn with_defaults() -> Self {
        let mut library = Self::new();
        library.add_attribute(Box::new(Foreach));
        library.add_attribute(Box::new(ComponentAttr));
        library
    }

    /// Register a custom tag under its identifier. Replaces any previous
    /// registration for the same identifier.
    pub fn add_tag(&mut self, tag: Box<dyn TagDescriptor>) {
        self.tags.insert(tag.identifier().to_ascii_lowercase(), tag);
    }

    /// Unregister a custom tag. No-op if absent.
    pub fn remove_tag(&mut self, identifier: &str) {
        self.tags.remove(&identifier.to_ascii_lowercase());
    }

    /// Re-register a custom tag under a different identifier.
    pub fn rename_tag(&mut self, identifier: &str, new_identifier: &str) {
        if let Some(tag) = self.tags.remove(&identifier.to_ascii_lowercase()) {
            self.tags.insert(new_identifier.to_ascii_lowercase(), tag);
        }
    }

    /// Look up a custom tag by element tag name. Returns the registration
    /// key and the descriptor.
    pub fn get_tag(&self, name: &str) -> Option<(&str, &dyn TagDescriptor)> {
        self.tags
            .get_key_value(&name.to_ascii_lowercase())
            .map(|(key, tag)| (key.as_str(), tag.as_ref()))
    }

    /// Register a custom attribute under its identifier. Replaces any
    /// previous registration for the same identifier.
    pub fn add_attribute(&mut self, attr: Box<dyn TagDescriptor>) {
        self.attrs.insert(attr.identifier().to_ascii_lowercase(), attr);
    }

    /// Unregister a custom attribute. No-op if absent.
    pub fn remove_attribute(&mut self, identifier: &str) {
        self.attrs.remove(&identifier.to_ascii_lowercase());
    }

    /// Re-register a custom attribute under a different identifier.
    pub fn rename_attribute(&mut self, identifier: &str, new_identifier: &str) {
        if let Some(attr) = self.attrs.remove(&identifier.to_ascii_lowercase()) {
            self.attrs.insert(new_identifier.to_ascii_lowercase(), attr);
        }
    }

    /// Look up a custom attribute by attribute name. Returns the
    /// registration key and the descriptor.
    pub fn get_attribute(&self, name: &str) -> Option<(&str, &dyn TagDescriptor)> {
        self.attrs
            .get_key_value(&name.to_ascii_lowercase())
            .map(|(key, attr)| (key.as_str(), attr.as_ref()))
    }
}

impl std::fmt::Debug for TagLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagLibrary")
            .field("tags", &self.tags.keys().collect::<Vec<_>>())
            .field("attrs", &self.attrs.keys().collect::<Vec<_>>())
            .finish()
    }
}
