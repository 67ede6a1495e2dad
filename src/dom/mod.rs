//! View-node tree: arena, node data, queries, and value access.

pub mod node;
pub mod query;
pub mod tree;
pub mod value;

pub use node::{NodeData, NodeId};
pub use tree::ViewTree;
pub use value::{AttributeValues, Value, ValueAccess};
