//! The view transformer: recursive custom-tag resolution.
//!
//! [`Parser`] walks a subtree, resolves custom tags and custom attributes
//! through the [`TagLibrary`], and either splices replacement nodes in place
//! or consumes elements into component instances. A per-expansion-chain skip
//! set stops a producer's own output from re-triggering the identifier that
//! produced it, while still letting different custom tags nested in the
//! output resolve.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::component::ComponentKey;
use crate::dom::NodeId;

use super::descriptor::{Expansion, ParseContext, ParseError};
use super::library::TagLibrary;

/// Recursive tree walker resolving custom tags and attributes.
///
/// One parser instance covers one parse run; consumed component instances
/// accumulate in per-identifier buckets for the caller to collect.
pub struct Parser<'lib> {
    library: &'lib TagLibrary,
    consumed: HashMap<String, Vec<ComponentKey>>,
}

impl<'lib> Parser<'lib> {
    /// Create a parser over the given library.
    pub fn new(library: &'lib TagLibrary) -> Self {
        Self {
            library,
            consumed: HashMap::new(),
        }
    }

    /// Transform the subtree below `root`.
    ///
    /// The root element itself is never replaced; transformation applies to
    /// its descendants. A failing producer aborts the whole parse and
    /// surfaces here.
    pub fn parse(&mut self, ctx: &mut ParseContext<'_>, root: NodeId) -> Result<(), ParseError> {
        self.parse_content(ctx, root)
    }

    /// Component instances consumed under the given identifier during this
    /// parse run.
    pub fn consumed(&self, identifier: &str) -> &[ComponentKey] {
        self.consumed
            .get(&identifier.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Walk the children of `node` in document order. Children that match
    /// nothing are descended into; matched children are handled by
    /// `parse_element` and own their subtree walk.
    fn parse_content(&mut self, ctx: &mut ParseContext<'_>, node: NodeId) -> Result<(), ParseError> {
        let children: Vec<NodeId> = ctx.tree.children(node).to_vec();
        for child in children {
            if !ctx.tree.contains(child) {
                continue;
            }
            if !self.parse_element(ctx, child, &HashSet::new())? {
                self.parse_content(ctx, child)?;
            }
        }
        Ok(())
    }

    /// Try to resolve `node` against the library: first by tag name, then by
    /// attributes in declaration order. Returns whether a descriptor
    /// handled the node (its subtree needs no further walk by the caller).
    fn parse_element(
        &mut self,
        ctx: &mut ParseContext<'_>,
        node: NodeId,
        skip: &HashSet<String>,
    ) -> Result<bool, ParseError> {
        let library = self.library;
        let Some(data) = ctx.tree.get(node) else {
            return Ok(false);
        };

        if let Some((key, _)) = library.get_tag(&data.tag) {
            if !skip.contains(key) {
                let key = key.to_owned();
                return self.apply(ctx, node, &key, None, skip);
            }
        }

        let attrs: Vec<String> = data.attr_names().map(str::to_owned).collect();
        for attr in attrs {
            if let Some((key, _)) = library.get_attribute(&attr) {
                if !skip.contains(key) {
                    let key = key.to_owned();
                    return self.apply(ctx, node, &key, Some(&attr), skip);
                }
            }
        }

        Ok(false)
    }

    /// Invoke the descriptor registered under `key` and splice its outcome.
    fn apply(
        &mut self,
        ctx: &mut ParseContext<'_>,
        node: NodeId,
        key: &str,
        attr: Option<&str>,
        skip: &HashSet<String>,
    ) -> Result<bool, ParseError> {
        let library = self.library;
        let descriptor = match attr {
            Some(_) => library.get_attribute(key),
            None => library.get_tag(key),
        };
        let Some((_, descriptor)) = descriptor else {
            return Ok(false);
        };

        match descriptor.expand(ctx, node, attr)? {
            Expansion::Keep => Ok(false),
            Expansion::Consume(component) => {
                trace!(identifier = key, "consumed element into component");
                self.consumed.entry(key.to_owned()).or_default().push(component);
                // The element stays in the tree; nested custom tags in its
                // subtree still resolve, outside any expansion chain.
                self.parse_content(ctx, node)?;
                Ok(true)
            }
            Expansion::Replace(replacement) => {
                trace!(identifier = key, "replaced element");
                ctx.tree.replace(node, replacement);
                let mut chain_skip = skip.clone();
                chain_skip.insert(key.to_owned());
                if !self.parse_element(ctx, replacement, &chain_skip)? {
                    self.parse_content(ctx, replacement)?;
                }
                Ok(true)
            }
            Expansion::ReplaceMany(replacements) => {
                trace!(
                    identifier = key,
                    count = replacements.len(),
                    "replaced element with sequence"
                );
                let mut anchor = node;
                for &replacement in &replacements {
                    ctx.tree.insert_after(anchor, replacement);
                    anchor = replacement;
                }
                ctx.tree.remove(node);

                let mut chain_skip = skip.clone();
                chain_skip.insert(key.to_owned());
                for replacement in replacements {
                    if !self.parse_element(ctx, replacement, &chain_skip)? {
                        self.parse_content(ctx, replacement)?;
                    }
                }
                Ok(true)
            }
        }
    }
}

impl std::fmt::Debug for Parser<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("consumed", &self.consumed.keys().collect::<Vec<_>>())
            .finish()
    }
}
