//! Form glue: a component that connects business events to the value store.
//!
//! [`FormView`] owns a component record, parses its view on attach, and
//! handles the form-level business events: `focus` tracks the current row,
//! `input` distributes the new value to twin controls and stores it with
//! delayed validation, `undo` restores the last accepted value from the
//! store.

use tracing::debug;

use crate::dom::{AttributeValues, NodeId, Value, ValueAccess, ViewTree};
use crate::event::{keys, types, BusinessEvent, HandlerError};
use crate::model::{MemoryStore, Validation, ValueStore};
use crate::tag::{ClassRegistry, ParseContext, ParseError, Parser, TagLibrary};

use super::handle::Handle;
use super::registry::{ComponentKey, ComponentRegistry};

/// A form-level component bound to a view subtree.
pub struct FormView {
    key: ComponentKey,
    handle: Handle,
    view: Option<NodeId>,
    store: MemoryStore,
    values: Box<dyn ValueAccess>,
    /// Offset of the view's first row into the backing store.
    row_offset: i64,
    /// The row of the last focused control.
    current_row: i64,
}

impl FormView {
    /// Create a form component record and bind its public handle.
    pub fn new(registry: &mut ComponentRegistry, name: impl Into<String>) -> Self {
        let key = registry.create(name);
        let handle = Handle::new();
        registry.bind(handle, key);
        Self {
            key,
            handle,
            view: None,
            store: MemoryStore::new(),
            values: Box::new(AttributeValues),
            row_offset: 0,
            current_row: 0,
        }
    }

    /// The component record key.
    pub fn key(&self) -> ComponentKey {
        self.key
    }

    /// The public handle bound to this form.
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// The attached view node, if any.
    pub fn view(&self) -> Option<NodeId> {
        self.view
    }

    /// The backing value store.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Mutable access to the backing value store.
    pub fn store_mut(&mut self) -> &mut MemoryStore {
        &mut self.store
    }

    /// Scroll offset: view row + offset = store row.
    pub fn set_row_offset(&mut self, offset: i64) {
        self.row_offset = offset;
    }

    /// The row of the last focused control.
    pub fn current_row(&self) -> i64 {
        self.current_row
    }

    /// Attach (or re-attach) the form to a view subtree.
    ///
    /// Drops the old node association, transforms the subtree, then
    /// re-registers under the new node. The component record survives the
    /// re-binding.
    pub fn set_view(
        &mut self,
        tree: &mut ViewTree,
        registry: &mut ComponentRegistry,
        library: &TagLibrary,
        classes: &ClassRegistry,
        node: NodeId,
    ) -> Result<(), ParseError> {
        registry.remove(self.key);

        let mut parser = Parser::new(library);
        let mut ctx = ParseContext {
            tree,
            components: registry,
            classes,
        };
        parser.parse(&mut ctx, node)?;

        self.view = Some(node);
        registry.set_view(self.key, Some(node));
        registry.add(self.key);
        Ok(())
    }

    /// Handle a business event addressed to this form.
    ///
    /// Returns `Ok(false)` to short-circuit the remaining listener chain
    /// (an input whose value the store rejected).
    pub fn handle_business_event(
        &mut self,
        tree: &mut ViewTree,
        event: &BusinessEvent,
    ) -> Result<bool, HandlerError> {
        let row = event.property(keys::ROW).as_int();
        let field = event.property(keys::FIELD).as_str().map(str::to_owned);
        let source = event.property(keys::SOURCE).as_str().map(str::to_owned);

        if event.is_type(types::FOCUS) {
            if let Some(row) = row.filter(|&r| r >= 0) {
                self.current_row = row;
            }
            return Ok(true);
        }

        let (Some(source), Some(field)) = (source, field) else {
            return Ok(true);
        };

        if event.is_type(types::UNDO) {
            let store_row = row.unwrap_or(self.current_row) + self.row_offset;
            let value = self.store.accepted(&source, &field, store_row);
            debug!(%source, %field, store_row, "undo restores stored value");
            self.distribute(tree, &source, &field, row, &value);
            return Ok(true);
        }

        if event.is_type(types::INPUT) {
            let value = event.property(keys::VALUE).clone();
            let store_row = row.unwrap_or(self.current_row) + self.row_offset;
            self.distribute(tree, &source, &field, row, &value);
            let accepted =
                self.store
                    .set_value(&source, &field, store_row, value, Validation::Delayed);
            return Ok(accepted);
        }

        Ok(true)
    }

    /// Write `value` into every control bound to (source, field) whose row
    /// matches. Controls without a row attribute follow the current row.
    pub fn distribute(
        &self,
        tree: &mut ViewTree,
        source: &str,
        field: &str,
        row: Option<i64>,
        value: &Value,
    ) {
        let Some(root) = self.view else {
            return;
        };
        let target_row = row.unwrap_or(self.current_row);

        for node in tree.query_bound(root, source, field) {
            let node_row = tree
                .attr(node, "row")
                .and_then(|r| r.trim().parse::<i64>().ok());
            if node_row.is_none() || node_row == Some(target_row) {
                self.values.set_value(tree, node, value);
            }
        }
    }
}

impl std::fmt::Debug for FormView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormView")
            .field("key", &self.key)
            .field("view", &self.view)
            .field("current_row", &self.current_row)
            .finish()
    }
}
