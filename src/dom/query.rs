//! Tree queries: by tag, by attribute, generic predicate matching.

use super::node::{NodeData, NodeId};
use super::tree::ViewTree;

impl ViewTree {
    /// Find all nodes in the subtree under `root` whose tag name matches
    /// (case-insensitive), in document order.
    pub fn query_by_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        self.query_all(root, |data| data.is_tag(tag))
    }

    /// Find all nodes in the subtree under `root` carrying the named
    /// attribute, in document order.
    pub fn query_by_attr(&self, root: NodeId, name: &str) -> Vec<NodeId> {
        self.query_all(root, |data| data.has_attr(name))
    }

    /// Find all nodes in the subtree under `root` bound to a data source
    /// field, i.e. carrying both a matching `source` and `name` attribute
    /// (values compared case-insensitively), in document order.
    pub fn query_bound(&self, root: NodeId, source: &str, field: &str) -> Vec<NodeId> {
        self.query_all(root, |data| {
            data.attr("source").is_some_and(|s| s.eq_ignore_ascii_case(source))
                && data.attr("name").is_some_and(|n| n.eq_ignore_ascii_case(field))
        })
    }

    /// Find all nodes in the subtree under `root` matching an arbitrary
    /// predicate, in document order (pre-order depth-first).
    pub fn query_all(&self, root: NodeId, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.walk_depth_first(root)
            .into_iter()
            .filter(|&id| self.get(id).is_some_and(&predicate))
            .collect()
    }
}
