//! Business events: normalized, component-addressed interaction events.

use std::collections::HashMap;

use crate::component::{ComponentKey, Handle};
use crate::dom::{NodeId, Value};

// ---------------------------------------------------------------------------
// Event types and property keys
// ---------------------------------------------------------------------------

/// Logical event types derived by the router. Raw event names ("keydown",
/// "input", ...) pass through as-is.
pub mod types {
    /// The resolved component received focus.
    pub const FOCUS: &str = "focus";
    /// The component lost focus. Applications may send this explicitly; the
    /// router derives [`LEAVE`] for departures.
    pub const BLUR: &str = "blur";
    /// Focus moved into the component's subtree.
    pub const ENTER: &str = "enter";
    /// Focus moved out of the component's subtree.
    pub const LEAVE: &str = "leave";
    /// A control's value changed.
    pub const INPUT: &str = "input";
    /// Restore a control's value from the backing store.
    pub const UNDO: &str = "undo";
}

/// Well-known property-bag keys.
pub mod keys {
    /// Row number of the originating control, `-1` when unknown.
    pub const ROW: &str = "row";
    /// Field name of the originating control.
    pub const FIELD: &str = "field";
    /// Data-source name of the originating control.
    pub const SOURCE: &str = "source";
    /// The control's current value.
    pub const VALUE: &str = "value";
    /// Keyboard key name for key-down events.
    pub const KEY: &str = "key";
    /// Whether the input looked like browser autocompletion.
    pub const AUTOCOMPLETE: &str = "autocomplete";
}

// ---------------------------------------------------------------------------
// BusinessEvent
// ---------------------------------------------------------------------------

/// A normalized interaction event addressed to a logical component.
///
/// The type is a plain string: one of the derived types in [`types`], or the
/// raw event name for pass-through events. The property bag is populated
/// incrementally as the event moves through layers (the router annotates
/// `source`/`field`/`row` from the originating node's attributes; components
/// add values of their own).
#[derive(Debug, Clone)]
pub struct BusinessEvent {
    event_type: String,
    component: ComponentKey,
    component_name: String,
    handle: Option<Handle>,
    node: NodeId,
    properties: HashMap<String, Value>,
}

impl BusinessEvent {
    /// Create a new event of the given type, originating from `node` and
    /// owned by `component`.
    pub fn new(
        event_type: impl Into<String>,
        component: ComponentKey,
        component_name: impl Into<String>,
        node: NodeId,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            component,
            component_name: component_name.into(),
            handle: None,
            node,
            properties: HashMap::new(),
        }
    }

    /// Attach the component's dispatch-identity handle (builder).
    pub fn with_handle(mut self, handle: Option<Handle>) -> Self {
        self.handle = handle;
        self
    }

    /// Set a property (builder).
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_property(key, value);
        self
    }

    /// The event type string.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// The component that originated the event.
    pub fn component(&self) -> ComponentKey {
        self.component
    }

    /// The originating component's declared name.
    pub fn component_name(&self) -> &str {
        &self.component_name
    }

    /// The opaque handle bound to the originating component, if any.
    pub fn handle(&self) -> Option<Handle> {
        self.handle
    }

    /// The view node that originated the event.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Look up a property. Absent keys read as [`Value::Null`].
    pub fn property(&self, key: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.properties.get(key).unwrap_or(&NULL)
    }

    /// Set a property, replacing any previous value under the key.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Whether the type matches, exactly.
    pub fn is_type(&self, event_type: &str) -> bool {
        self.event_type == event_type
    }
}
