//! The business event router.
//!
//! [`EventRouter`] owns the focus-transition state and the listener table.
//! The host feeds it [`RawEvent`]s; the router resolves the target node to
//! its nearest bound component, derives logical events (focus, enter,
//! leave), and dispatches to filtered, score-ordered listeners with
//! short-circuit semantics.

use std::collections::HashMap;

use tracing::{trace, warn};

use crate::component::{ComponentKey, ComponentRegistry};
use crate::dom::{AttributeValues, NodeId, ValueAccess, ViewTree};

use super::business::{keys, types, BusinessEvent};
use super::filter::{ComparatorRegistry, EventFilter};
use super::listener::{Destination, ListenerId, Registration};
use super::raw::RawEvent;

/// Routes raw interaction events to business-event listeners.
///
/// One router serves one view root. All state is owned by the instance —
/// construct an isolated router per test case.
pub struct EventRouter {
    comparators: ComparatorRegistry,
    /// target component (or `None` for component-agnostic) -> registrations.
    listeners: HashMap<Option<ComponentKey>, Vec<Registration>>,
    next_listener: u64,
    /// The component resolved by the most recent focus/pointer trigger.
    current: Option<ComponentKey>,
    /// The previously focused component, diffed on the next transition.
    last: Option<ComponentKey>,
    /// The most recent raw event, retained for inspection.
    last_raw: Option<RawEvent>,
    /// Control-value accessor used to normalize input/undo events.
    values: Box<dyn ValueAccess>,
}

impl EventRouter {
    /// Create a router with the built-in comparators and attribute-backed
    /// value access.
    pub fn new() -> Self {
        Self {
            comparators: ComparatorRegistry::with_defaults(),
            listeners: HashMap::new(),
            next_listener: 0,
            current: None,
            last: None,
            last_raw: None,
            values: Box::new(AttributeValues),
        }
    }

    /// Replace the control-value accessor.
    pub fn set_value_access(&mut self, values: Box<dyn ValueAccess>) {
        self.values = values;
    }

    /// The comparator registry, for registering custom filter kinds.
    pub fn comparators_mut(&mut self) -> &mut ComparatorRegistry {
        &mut self.comparators
    }

    /// The component resolved by the most recent focus/pointer trigger.
    pub fn current(&self) -> Option<ComponentKey> {
        self.current
    }

    /// The most recent raw event seen, resolved or not.
    pub fn last_event(&self) -> Option<&RawEvent> {
        self.last_raw.as_ref()
    }

    // -- listener registration ----------------------------------------------

    /// Register a listener: a destination paired with a filter.
    ///
    /// The filter's component predicate selects the storage bucket; name
    /// filters and unresolvable handles land in the component-agnostic
    /// bucket and still match by name/handle at scoring time.
    pub fn add_listener(
        &mut self,
        registry: &ComponentRegistry,
        destination: Destination,
        filter: EventFilter,
    ) -> ListenerId {
        use super::filter::ComponentMatch;

        let bucket = match &filter.component {
            Some(ComponentMatch::Key(key)) => Some(*key),
            Some(ComponentMatch::Handle(handle)) => registry.resolve(*handle),
            Some(ComponentMatch::Name(_)) | None => None,
        };

        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.entry(bucket).or_default().push(Registration {
            id,
            destination,
            filter,
        });
        id
    }

    /// Remove a registration. Returns whether it existed.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        for registrations in self.listeners.values_mut() {
            if let Some(index) = registrations.iter().position(|r| r.id == id) {
                registrations.remove(index);
                return true;
            }
        }
        false
    }

    // -- raw event intake ---------------------------------------------------

    /// Handle a raw interaction event from the host.
    ///
    /// Resolves the target node to its nearest bound component; unresolved
    /// targets are a defined no-op (the event is still retained as the last
    /// raw event). Focus-in and pointer-down drive enter/leave/focus
    /// derivation; other events pass through with their raw name.
    pub fn handle_raw(
        &mut self,
        tree: &ViewTree,
        registry: &ComponentRegistry,
        raw: RawEvent,
    ) {
        let target = raw.target();
        let resolved = registry.component_of(tree, target);

        match (&raw, resolved) {
            (RawEvent::FocusIn { .. } | RawEvent::PointerDown { .. }, Some(component)) => {
                self.current = Some(component);
                self.deliver_transition(tree, registry, component, target);
                if matches!(raw, RawEvent::FocusIn { .. }) {
                    let event =
                        self.synthesize(tree, registry, types::FOCUS, component, target);
                    self.send(&event);
                }
                self.last = Some(component);
            }
            (RawEvent::KeyDown { key, .. }, Some(component)) => {
                if key.is_significant() {
                    let mut event =
                        self.synthesize(tree, registry, raw.name(), component, target);
                    event.set_property(keys::KEY, key.name());
                    self.send(&event);
                }
            }
            (_, Some(component)) => {
                let event = self.synthesize(tree, registry, raw.name(), component, target);
                self.send(&event);
            }
            (_, None) => {
                trace!(name = raw.name(), "raw event target has no bound component");
            }
        }

        self.last_raw = Some(raw);
    }

    /// Deliver `leave` to components departed from the focus chain
    /// (innermost-first) and `enter` to newly entered ones (outermost-first).
    fn deliver_transition(
        &mut self,
        tree: &ViewTree,
        registry: &ComponentRegistry,
        component: ComponentKey,
        target: NodeId,
    ) {
        let new_chain = registry.chain(component);
        let old_chain = match self.last {
            Some(previous) => registry.chain(previous),
            None => Vec::new(),
        };

        for &old in old_chain.iter().filter(|c| !new_chain.contains(*c)) {
            let node = registry.view(old).unwrap_or(target);
            let event = self.synthesize(tree, registry, types::LEAVE, old, node);
            self.send(&event);
        }

        for &new in new_chain.iter().rev().filter(|c| !old_chain.contains(*c)) {
            let node = registry.view(new).unwrap_or(target);
            let event = self.synthesize(tree, registry, types::ENTER, new, node);
            self.send(&event);
        }
    }

    // -- event synthesis ----------------------------------------------------

    /// Build a business event addressed to `component`, annotated from the
    /// originating node's `source`/`name`/`row` attributes, carrying the
    /// component's handle identity and, for input/undo, the control value.
    pub fn synthesize(
        &self,
        tree: &ViewTree,
        registry: &ComponentRegistry,
        event_type: &str,
        component: ComponentKey,
        node: NodeId,
    ) -> BusinessEvent {
        let name = registry.name(component).unwrap_or_default().to_owned();
        let mut event = BusinessEvent::new(event_type, component, name, node)
            .with_handle(registry.handle_of(component));

        let source = tree.attr(node, "source").map(str::to_ascii_lowercase);
        let field = tree.attr(node, "name").map(str::to_ascii_lowercase);
        let row = tree.attr(node, "row").and_then(|r| r.trim().parse::<i64>().ok());

        if let Some(source) = &source {
            event.set_property(keys::SOURCE, source.as_str());
        }
        if let Some(field) = &field {
            event.set_property(keys::FIELD, field.as_str());
        }
        match row {
            Some(row) => event.set_property(keys::ROW, row),
            None if source.is_some() && field.is_some() => {
                event.set_property(keys::ROW, -1_i64);
            }
            None => {}
        }

        if event.is_type(types::INPUT) || event.is_type(types::UNDO) {
            event.set_property(keys::VALUE, self.values.get_value(tree, node));
        }

        event
    }

    // -- dispatch -----------------------------------------------------------

    /// Dispatch a business event to its listeners.
    ///
    /// Candidates are the listeners bound to the event's component plus the
    /// component-agnostic ones. They run in descending comparator score;
    /// equal scores put component-specific hits before agnostic hits, and
    /// within one group ties keep registration order. A handler returning
    /// `Ok(false)` short-circuits the rest of the chain; a failing handler
    /// halts the chain and is logged, never re-thrown.
    pub fn send(&mut self, event: &BusinessEvent) -> usize {
        let mut scored: Vec<(i32, usize, Option<ComponentKey>, ListenerId)> = Vec::new();

        for (rank, bucket) in [Some(event.component()), None].into_iter().enumerate() {
            let Some(registrations) = self.listeners.get(&bucket) else {
                continue;
            };
            scored.extend(registrations.iter().filter_map(|r| {
                let score = self.comparators.score(event, &r.filter);
                (score >= 0).then_some((score, rank, bucket, r.id))
            }));
        }
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        let plan: Vec<(Option<ComponentKey>, ListenerId)> =
            scored.into_iter().map(|(_, _, bucket, id)| (bucket, id)).collect();

        let mut invoked = 0;
        for (bucket, id) in plan {
            let Some(registrations) = self.listeners.get_mut(&bucket) else {
                continue;
            };
            let Some(registration) = registrations.iter_mut().find(|r| r.id == id) else {
                continue;
            };
            invoked += 1;
            match (registration.destination.handler)(event) {
                Ok(true) => {}
                Ok(false) => break,
                Err(error) => {
                    warn!(
                        event_type = event.event_type(),
                        error = %error,
                        "business event listener failed; halting dispatch"
                    );
                    break;
                }
            }
        }
        invoked
    }
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRouter")
            .field("current", &self.current)
            .field("last", &self.last)
            .field(
                "listeners",
                &self.listeners.values().map(Vec::len).sum::<usize>(),
            )
            .finish()
    }
}
