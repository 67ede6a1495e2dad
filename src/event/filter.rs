//! Event filters and comparator registry.
//!
//! A filter describes which events a listener wants; a [`Comparator`] scores
//! an `(event, filter)` pair. Negative scores mean "no match"; non-negative
//! scores count the satisfied predicates, so more specific filters sort
//! ahead of less specific ones at dispatch time.

use std::collections::HashMap;

use crate::component::{ComponentKey, Handle};

use super::business::{keys, BusinessEvent};

// ---------------------------------------------------------------------------
// ComponentMatch
// ---------------------------------------------------------------------------

/// How a filter identifies its target component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentMatch {
    /// Exact component identity.
    Key(ComponentKey),
    /// The opaque handle bound to the component.
    Handle(Handle),
    /// The component's declared name, compared case-insensitively.
    Name(String),
}

impl From<ComponentKey> for ComponentMatch {
    fn from(key: ComponentKey) -> Self {
        Self::Key(key)
    }
}

impl From<Handle> for ComponentMatch {
    fn from(handle: Handle) -> Self {
        Self::Handle(handle)
    }
}

impl From<&str> for ComponentMatch {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

// ---------------------------------------------------------------------------
// FilterKind
// ---------------------------------------------------------------------------

/// Kind tag selecting the comparator for a filter.
///
/// Kinds without a registered comparator fall back to
/// [`default_comparator`]; that is a defined, tolerated state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterKind {
    /// Type + component predicates only.
    #[default]
    Basic,
    /// Adds form predicates: source, field, block.
    Form,
    /// Application-defined kind, matched by tag.
    Custom(&'static str),
}

// ---------------------------------------------------------------------------
// EventFilter
// ---------------------------------------------------------------------------

/// A matching specification for business events.
///
/// Every predicate is optional; an empty filter matches everything with
/// score 0.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Comparator selector.
    pub kind: FilterKind,
    /// The event type to filter on.
    pub event_type: Option<String>,
    /// The component to filter on.
    pub component: Option<ComponentMatch>,
    /// Data-source name predicate (form kind).
    pub source: Option<String>,
    /// Field name predicate (form kind).
    pub field: Option<String>,
    /// Block name predicate (form kind).
    pub block: Option<String>,
}

impl EventFilter {
    /// An empty basic filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty form filter.
    pub fn form() -> Self {
        Self {
            kind: FilterKind::Form,
            ..Self::default()
        }
    }

    /// Set the event-type predicate (builder).
    pub fn for_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    /// Set the component predicate (builder).
    pub fn for_component(mut self, component: impl Into<ComponentMatch>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Set the source predicate (builder).
    pub fn for_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the field predicate (builder).
    pub fn for_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Set the block predicate (builder).
    pub fn for_block(mut self, block: impl Into<String>) -> Self {
        self.block = Some(block.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Comparators
// ---------------------------------------------------------------------------

/// Scores an `(event, filter)` pair. Negative means no match; otherwise the
/// score is the count of satisfied predicates. Must be deterministic and
/// total over compatible pairs.
pub type Comparator = fn(&BusinessEvent, &EventFilter) -> i32;

/// The structural default: type and component predicates.
///
/// Returns -1 when a declared predicate mismatches, otherwise the number of
/// declared-and-satisfied predicates (0, 1, or 2). String components are
/// compared against the event's declared component name, case-insensitively;
/// keys and handles by identity.
pub fn default_comparator(event: &BusinessEvent, filter: &EventFilter) -> i32 {
    let mut score = 0;

    if let Some(event_type) = &filter.event_type {
        if event.event_type() != event_type {
            return -1;
        }
        score += 1;
    }

    if let Some(component) = &filter.component {
        let matched = match component {
            ComponentMatch::Key(key) => *key == event.component(),
            ComponentMatch::Handle(handle) => Some(*handle) == event.handle(),
            ComponentMatch::Name(name) => name.eq_ignore_ascii_case(event.component_name()),
        };
        if !matched {
            return -1;
        }
        score += 1;
    }

    score
}

/// Form comparator: the default predicates plus source, field, and block
/// checked against the event property bag.
pub fn form_comparator(event: &BusinessEvent, filter: &EventFilter) -> i32 {
    let mut score = default_comparator(event, filter);
    if score < 0 {
        return -1;
    }

    for (predicate, key) in [
        (&filter.source, keys::SOURCE),
        (&filter.field, keys::FIELD),
        (&filter.block, "block"),
    ] {
        if let Some(want) = predicate {
            let matched = event
                .property(key)
                .as_str()
                .is_some_and(|have| want.eq_ignore_ascii_case(have));
            if !matched {
                return -1;
            }
            score += 1;
        }
    }

    score
}

// ---------------------------------------------------------------------------
// ComparatorRegistry
// ---------------------------------------------------------------------------

/// Maps filter kinds to comparators. Last registration wins; kinds without a
/// registration score through [`default_comparator`].
#[derive(Debug, Default)]
pub struct ComparatorRegistry {
    comparators: HashMap<FilterKind, Comparator>,
}

impl ComparatorRegistry {
    /// An empty registry: every kind falls back to the default comparator.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in kinds installed.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(FilterKind::Form, form_comparator);
        registry
    }

    /// Associate a comparator with a filter kind, replacing any previous one.
    pub fn register(&mut self, kind: FilterKind, comparator: Comparator) {
        self.comparators.insert(kind, comparator);
    }

    /// The comparator registered for a kind, if any.
    pub fn get(&self, kind: FilterKind) -> Option<Comparator> {
        self.comparators.get(&kind).copied()
    }

    /// Score an event against a filter via the filter's registered
    /// comparator, falling back to the default.
    pub fn score(&self, event: &BusinessEvent, filter: &EventFilter) -> i32 {
        let comparator = self.get(filter.kind).unwrap_or(default_comparator);
        comparator(event, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentRegistry;
    use crate::dom::{NodeData, ViewTree};
    use crate::event::business::types;

    fn event(event_type: &str) -> (BusinessEvent, ComponentKey) {
        let mut tree = ViewTree::new();
        let node = tree.insert(NodeData::new("input"));
        let mut registry = ComponentRegistry::new();
        let key = registry.create("temp-form");
        (BusinessEvent::new(event_type, key, "temp-form", node), key)
    }

    // ── default comparator ───────────────────────────────────────────

    #[test]
    fn empty_filter_matches_with_zero_score() {
        let (ev, _) = event(types::INPUT);
        assert_eq!(default_comparator(&ev, &EventFilter::new()), 0);
    }

    #[test]
    fn type_and_component_score_two() {
        let (ev, _) = event(types::INPUT);
        let filter = EventFilter::new()
            .for_type(types::INPUT)
            .for_component("temp-form");
        assert_eq!(default_comparator(&ev, &filter), 2);
    }

    #[test]
    fn type_mismatch_scores_negative() {
        let (ev, _) = event(types::FOCUS);
        let filter = EventFilter::new()
            .for_type(types::INPUT)
            .for_component("temp-form");
        assert_eq!(default_comparator(&ev, &filter), -1);
    }

    #[test]
    fn component_name_is_case_insensitive() {
        let (ev, _) = event(types::INPUT);
        let filter = EventFilter::new().for_component("TEMP-FORM");
        assert_eq!(default_comparator(&ev, &filter), 1);
    }

    #[test]
    fn component_key_matches_by_identity() {
        let (ev, key) = event(types::INPUT);
        let filter = EventFilter::new().for_component(key);
        assert_eq!(default_comparator(&ev, &filter), 1);

        let mut other_registry = ComponentRegistry::new();
        let other = other_registry.create("temp-form");
        let miss = EventFilter::new().for_component(other);
        assert_eq!(default_comparator(&ev, &miss), -1);
    }

    #[test]
    fn component_handle_matches_bound_handle() {
        let (ev, _) = event(types::INPUT);
        let handle = Handle::new();
        let filter = EventFilter::new().for_component(handle);
        // The event carries no handle.
        assert_eq!(default_comparator(&ev, &filter), -1);

        let ev = ev.with_handle(Some(handle));
        assert_eq!(default_comparator(&ev, &filter), 1);
    }

    // ── form comparator ──────────────────────────────────────────────

    #[test]
    fn form_predicates_add_to_score() {
        let (mut ev, _) = event(types::INPUT);
        ev.set_property(keys::SOURCE, "employees");
        ev.set_property(keys::FIELD, "city");
        let filter = EventFilter::form()
            .for_type(types::INPUT)
            .for_source("employees")
            .for_field("city");
        assert_eq!(form_comparator(&ev, &filter), 3);
    }

    #[test]
    fn form_source_mismatch_scores_negative() {
        let (mut ev, _) = event(types::INPUT);
        ev.set_property(keys::SOURCE, "departments");
        let filter = EventFilter::form().for_source("employees");
        assert_eq!(form_comparator(&ev, &filter), -1);
    }

    #[test]
    fn form_field_absent_scores_negative() {
        let (ev, _) = event(types::INPUT);
        let filter = EventFilter::form().for_field("city");
        assert_eq!(form_comparator(&ev, &filter), -1);
    }

    #[test]
    fn form_defers_to_default_on_type_mismatch() {
        let (mut ev, _) = event(types::FOCUS);
        ev.set_property(keys::SOURCE, "employees");
        let filter = EventFilter::form()
            .for_type(types::INPUT)
            .for_source("employees");
        assert_eq!(form_comparator(&ev, &filter), -1);
    }

    // ── registry ─────────────────────────────────────────────────────

    #[test]
    fn unregistered_kind_falls_back_to_default() {
        let registry = ComparatorRegistry::new();
        let (ev, _) = event(types::INPUT);
        let filter = EventFilter {
            kind: FilterKind::Custom("audit"),
            ..EventFilter::new().for_type(types::INPUT)
        };
        assert_eq!(registry.score(&ev, &filter), 1);
    }

    #[test]
    fn with_defaults_installs_form_comparator() {
        let registry = ComparatorRegistry::with_defaults();
        let (mut ev, _) = event(types::INPUT);
        ev.set_property(keys::FIELD, "city");
        let filter = EventFilter::form().for_field("city");
        assert_eq!(registry.score(&ev, &filter), 1);
    }

    #[test]
    fn last_registration_wins() {
        fn always_ten(_: &BusinessEvent, _: &EventFilter) -> i32 {
            10
        }
        let mut registry = ComparatorRegistry::with_defaults();
        registry.register(FilterKind::Form, always_ten);
        let (ev, _) = event(types::INPUT);
        assert_eq!(registry.score(&ev, &EventFilter::form()), 10);
    }

    #[test]
    fn comparators_are_pure_over_repeat_calls() {
        let registry = ComparatorRegistry::with_defaults();
        let (ev, _) = event(types::INPUT);
        let filter = EventFilter::new().for_type(types::INPUT);
        assert_eq!(registry.score(&ev, &filter), registry.score(&ev, &filter));
    }
}
