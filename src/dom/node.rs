//! Node types: NodeId, NodeData.

use slotmap::new_key_type;

new_key_type! {
    /// Unique identifier for a view node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Data associated with a single view node.
///
/// A node is an element in the hierarchical view tree: a tag name, an
/// ordered list of named string attributes, and optional text content.
/// Attribute names are matched case-insensitively, as in markup.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Tag name (e.g. "input", "section").
    pub tag: String,
    /// Named attributes in declaration order.
    attrs: Vec<(String, String)>,
    /// Text content, if any.
    pub text: Option<String>,
}

impl NodeData {
    /// Create a new `NodeData` with the given tag name and no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            text: None,
        }
    }

    /// Set an attribute (builder). Overwrites an existing attribute with the
    /// same name, keeping its original position.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set the text content (builder).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Get an attribute value by name (case-insensitive).
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whether the node carries the named attribute (case-insensitive).
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Set an attribute value. Overwrites in place if the name is already
    /// present, otherwise appends to the end of the declaration order.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .attrs
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Remove an attribute by name. No-op if absent.
    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    }

    /// Attribute names in declaration order.
    pub fn attr_names(&self) -> impl Iterator<Item = &str> {
        self.attrs.iter().map(|(n, _)| n.as_str())
    }

    /// All `(name, value)` pairs in declaration order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Whether the tag name matches, case-insensitively.
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults() {
        let data = NodeData::new("input");
        assert_eq!(data.tag, "input");
        assert!(data.text.is_none());
        assert_eq!(data.attr_names().count(), 0);
    }

    #[test]
    fn builder_with_attr() {
        let data = NodeData::new("input").with_attr("name", "city");
        assert_eq!(data.attr("name"), Some("city"));
    }

    #[test]
    fn attr_lookup_is_case_insensitive() {
        let data = NodeData::new("input").with_attr("Source", "employees");
        assert_eq!(data.attr("source"), Some("employees"));
        assert_eq!(data.attr("SOURCE"), Some("employees"));
    }

    #[test]
    fn set_attr_overwrites_in_place() {
        let mut data = NodeData::new("input").with_attr("a", "1").with_attr("b", "2");
        data.set_attr("A", "3");
        assert_eq!(data.attr("a"), Some("3"));
        // Declaration order preserved.
        let names: Vec<&str> = data.attr_names().collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn remove_attr() {
        let mut data = NodeData::new("input").with_attr("row", "3");
        data.remove_attr("ROW");
        assert!(!data.has_attr("row"));
    }

    #[test]
    fn remove_attr_noop() {
        let mut data = NodeData::new("input");
        data.remove_attr("nonexistent"); // should not panic
        assert_eq!(data.attr_names().count(), 0);
    }

    #[test]
    fn attr_names_in_declaration_order() {
        let data = NodeData::new("input")
            .with_attr("source", "s")
            .with_attr("name", "n")
            .with_attr("row", "0");
        let names: Vec<&str> = data.attr_names().collect();
        assert_eq!(names, vec!["source", "name", "row"]);
    }

    #[test]
    fn with_text() {
        let data = NodeData::new("label").with_text("City");
        assert_eq!(data.text.as_deref(), Some("City"));
    }

    #[test]
    fn is_tag_case_insensitive() {
        let data = NodeData::new("Section");
        assert!(data.is_tag("section"));
        assert!(!data.is_tag("div"));
    }

    #[test]
    fn node_id_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<NodeId>();
    }
}
