//! Control values: the `Value` type and per-control-type accessors.
//!
//! [`ValueAccess`] is the seam the event layer uses to read and write the
//! current value of a view node without knowing the control type. The
//! default [`AttributeValues`] implementation keeps values in node
//! attributes and text content.

use std::fmt;

use super::node::NodeId;
use super::tree::ViewTree;

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A loosely-typed control or property value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    /// No value.
    #[default]
    Null,
    /// Boolean, e.g. a checkbox state.
    Bool(bool),
    /// Integer, e.g. a row number or numeric control.
    Int(i64),
    /// Text.
    Str(String),
}

impl Value {
    /// The string content, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The integer content, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean content, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Whether this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

// ---------------------------------------------------------------------------
// ValueAccess
// ---------------------------------------------------------------------------

/// Read/write access to the current value of a view node.
pub trait ValueAccess {
    /// The current value of the node, typed per its control kind.
    fn get_value(&self, tree: &ViewTree, node: NodeId) -> Value;

    /// Set the value on the node.
    fn set_value(&self, tree: &mut ViewTree, node: NodeId, value: &Value);
}

/// Default accessor keeping values in attributes and text content.
///
/// - `input type="checkbox"` reads/writes the `checked` attribute as a bool.
/// - `input type="number"` / `type="range"` parses the `value` attribute as
///   an integer; unparseable input reads as `Null`.
/// - other `input` and `select` controls use the `value` attribute as text.
/// - everything else uses text content, falling back to the `value`
///   attribute when there is no text.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeValues;

impl AttributeValues {
    fn input_kind<'a>(tree: &'a ViewTree, node: NodeId) -> Option<&'a str> {
        let data = tree.get(node)?;
        if data.is_tag("input") {
            Some(data.attr("type").unwrap_or("text"))
        } else {
            None
        }
    }
}

impl ValueAccess for AttributeValues {
    fn get_value(&self, tree: &ViewTree, node: NodeId) -> Value {
        let Some(data) = tree.get(node) else {
            return Value::Null;
        };

        match Self::input_kind(tree, node) {
            Some("checkbox") => Value::Bool(data.has_attr("checked")),
            Some("number") | Some("range") => data
                .attr("value")
                .and_then(|v| v.trim().parse::<i64>().ok())
                .map(Value::Int)
                .unwrap_or(Value::Null),
            Some(_) => Value::Str(data.attr("value").unwrap_or("").to_owned()),
            None if data.is_tag("select") => {
                Value::Str(data.attr("value").unwrap_or("").to_owned())
            }
            None => match &data.text {
                Some(text) => Value::Str(text.clone()),
                None => data
                    .attr("value")
                    .map(|v| Value::Str(v.to_owned()))
                    .unwrap_or(Value::Null),
            },
        }
    }

    fn set_value(&self, tree: &mut ViewTree, node: NodeId, value: &Value) {
        let is_checkbox = Self::input_kind(tree, node) == Some("checkbox");
        let is_control = {
            let Some(data) = tree.get(node) else { return };
            data.is_tag("input") || data.is_tag("select")
        };
        let Some(data) = tree.get_mut(node) else {
            return;
        };

        if is_checkbox {
            match value {
                Value::Bool(true) => data.set_attr("checked", "checked"),
                _ => data.remove_attr("checked"),
            }
        } else if is_control {
            match value {
                Value::Null => data.remove_attr("value"),
                other => data.set_attr("value", other.to_string()),
            }
        } else {
            data.text = match value {
                Value::Null => None,
                other => Some(other.to_string()),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::NodeData;

    fn single(tree: &mut ViewTree, data: NodeData) -> NodeId {
        tree.insert(data)
    }

    #[test]
    fn text_input_round_trip() {
        let mut tree = ViewTree::new();
        let node = single(&mut tree, NodeData::new("input").with_attr("value", "Oslo"));
        let access = AttributeValues;
        assert_eq!(access.get_value(&tree, node), Value::Str("Oslo".into()));

        access.set_value(&mut tree, node, &Value::Str("Bergen".into()));
        assert_eq!(tree.attr(node, "value"), Some("Bergen"));
    }

    #[test]
    fn checkbox_reads_checked_attr() {
        let mut tree = ViewTree::new();
        let node = single(
            &mut tree,
            NodeData::new("input")
                .with_attr("type", "checkbox")
                .with_attr("checked", "checked"),
        );
        let access = AttributeValues;
        assert_eq!(access.get_value(&tree, node), Value::Bool(true));

        access.set_value(&mut tree, node, &Value::Bool(false));
        assert_eq!(access.get_value(&tree, node), Value::Bool(false));
    }

    #[test]
    fn number_input_parses_int() {
        let mut tree = ViewTree::new();
        let node = single(
            &mut tree,
            NodeData::new("input")
                .with_attr("type", "number")
                .with_attr("value", " 42 "),
        );
        let access = AttributeValues;
        assert_eq!(access.get_value(&tree, node), Value::Int(42));
    }

    #[test]
    fn number_input_unparseable_is_null() {
        let mut tree = ViewTree::new();
        let node = single(
            &mut tree,
            NodeData::new("input")
                .with_attr("type", "number")
                .with_attr("value", "abc"),
        );
        let access = AttributeValues;
        assert!(access.get_value(&tree, node).is_null());
    }

    #[test]
    fn label_uses_text_content() {
        let mut tree = ViewTree::new();
        let node = single(&mut tree, NodeData::new("label").with_text("City"));
        let access = AttributeValues;
        assert_eq!(access.get_value(&tree, node), Value::Str("City".into()));

        access.set_value(&mut tree, node, &Value::Str("Town".into()));
        assert_eq!(tree.get(node).unwrap().text.as_deref(), Some("Town"));
    }

    #[test]
    fn null_clears() {
        let mut tree = ViewTree::new();
        let node = single(&mut tree, NodeData::new("input").with_attr("value", "x"));
        let access = AttributeValues;
        access.set_value(&mut tree, node, &Value::Null);
        assert!(!tree.get(node).unwrap().has_attr("value"));
    }

    #[test]
    fn value_display() {
        assert_eq!(Value::Str("a".into()).to_string(), "a");
        assert_eq!(Value::Int(7).to_string(), "7");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Null.to_string(), "");
    }

    #[test]
    fn value_accessors() {
        assert_eq!(Value::Str("a".into()).as_str(), Some("a"));
        assert_eq!(Value::Int(3).as_int(), Some(3));
        assert_eq!(Value::Bool(false).as_bool(), Some(false));
        assert!(Value::Null.is_null());
        assert_eq!(Value::Int(3).as_str(), None);
    }

    #[test]
    fn value_from_impls() {
        assert_eq!(Value::from("x"), Value::Str("x".into()));
        assert_eq!(Value::from(5_i64), Value::Int(5));
        assert_eq!(Value::from(true), Value::Bool(true));
    }
}
