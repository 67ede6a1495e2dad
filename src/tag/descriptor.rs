//! Tag descriptors: the contract between the parser and custom tags.

use thiserror::Error;

use crate::component::{ComponentKey, ComponentRegistry};
use crate::dom::{NodeId, ViewTree};

use super::component_tag::ClassRegistry;

// ---------------------------------------------------------------------------
// ParseError
// ---------------------------------------------------------------------------

/// Structural errors raised during view transformation.
///
/// These represent developer-authored view defects; they abort the expansion
/// chain and surface to the top-level parse caller.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A foreach range expression did not parse.
    #[error("illegal foreach expression {expr:?}: expected \"<var> in <n1>..<n2>\"")]
    ForeachExpr {
        /// The offending expression text.
        expr: String,
    },
    /// A component attribute referenced an unregistered class name.
    #[error("unknown component class: {0}")]
    UnknownClass(String),
    /// A custom attribute matched but carried no usable value.
    #[error("missing value for custom attribute {0:?}")]
    MissingAttribute(String),
    /// Failure inside an application-provided descriptor.
    #[error("{0}")]
    Producer(String),
}

// ---------------------------------------------------------------------------
// ParseContext
// ---------------------------------------------------------------------------

/// Everything a descriptor may touch while expanding a node.
pub struct ParseContext<'a> {
    /// The tree being transformed.
    pub tree: &'a mut ViewTree,
    /// Component records and node associations.
    pub components: &'a mut ComponentRegistry,
    /// Registered component classes, for consuming descriptors.
    pub classes: &'a ClassRegistry,
}

// ---------------------------------------------------------------------------
// Expansion
// ---------------------------------------------------------------------------

/// The outcome of applying a descriptor to a node.
#[derive(Debug)]
pub enum Expansion {
    /// No replacement produced; the node is treated as unmatched.
    Keep,
    /// Splice a single node in place of the original.
    Replace(NodeId),
    /// Splice a sequence after the original's position and drop the
    /// original. An empty sequence just drops the original.
    ReplaceMany(Vec<NodeId>),
    /// A component was materialized from the element; the subtree stays.
    Consume(ComponentKey),
}

// ---------------------------------------------------------------------------
// TagDescriptor
// ---------------------------------------------------------------------------

/// A registered custom tag or custom attribute.
///
/// Replacing descriptors return [`Expansion::Replace`] /
/// [`Expansion::ReplaceMany`] with freshly built (detached) nodes; the
/// parser splices them and re-walks them under the loop-guard skip set.
/// Consuming descriptors return [`Expansion::Consume`]; the element subtree
/// is left in place for the new component.
pub trait TagDescriptor {
    /// The identifier this descriptor registers under (matched
    /// case-insensitively against tag and attribute names).
    fn identifier(&self) -> &str;

    /// Apply the descriptor to `node`. `attr` is the matched attribute name
    /// for custom-attribute matches, `None` for tag-name matches.
    fn expand(
        &self,
        ctx: &mut ParseContext<'_>,
        node: NodeId,
        attr: Option<&str>,
    ) -> Result<Expansion, ParseError>;
}
