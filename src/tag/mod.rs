//! The view transformer: custom tags, the tag library, and the parser.

pub mod component_tag;
pub mod descriptor;
pub mod foreach;
pub mod library;
pub mod parser;

pub use component_tag::{ClassRegistry, ComponentAttr, ComponentFactory};
pub use descriptor::{Expansion, ParseContext, ParseError, TagDescriptor};
pub use foreach::Foreach;
pub use library::TagLibrary;
pub use parser::Parser;
