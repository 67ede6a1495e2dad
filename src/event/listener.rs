//! Listener registration: destinations paired with filters.

use crate::component::ComponentKey;

use super::business::BusinessEvent;
use super::filter::EventFilter;

/// Error type for listener handlers. Failures are contained at the router
/// boundary: logged, and the event's remaining chain is dropped.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// A bound handler function.
///
/// Returning `Ok(false)` short-circuits the rest of the listener chain for
/// the current event; `Ok(true)` passes it on.
pub type Handler = Box<dyn FnMut(&BusinessEvent) -> Result<bool, HandlerError>>;

/// Identifies a registration for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// A destination: the component on whose behalf the handler runs, plus the
/// handler itself.
pub struct Destination {
    /// The receiving component, if the handler acts for one. Agnostic
    /// handlers (loggers, shortcuts) leave this unset.
    pub component: Option<ComponentKey>,
    /// The bound handler function.
    pub handler: Handler,
}

impl Destination {
    /// A destination acting for a specific component.
    pub fn new(
        component: ComponentKey,
        handler: impl FnMut(&BusinessEvent) -> Result<bool, HandlerError> + 'static,
    ) -> Self {
        Self {
            component: Some(component),
            handler: Box::new(handler),
        }
    }

    /// A destination not tied to any component.
    pub fn detached(
        handler: impl FnMut(&BusinessEvent) -> Result<bool, HandlerError> + 'static,
    ) -> Self {
        Self {
            component: None,
            handler: Box::new(handler),
        }
    }
}

impl std::fmt::Debug for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Destination")
            .field("component", &self.component)
            .field("handler", &"<fn>")
            .finish()
    }
}

/// A registered listener: destination plus its filter. Stored per target
/// component (or in the agnostic bucket); insertion order carries no
/// meaning — dispatch order comes from comparator scores.
pub struct Registration {
    pub(crate) id: ListenerId,
    pub(crate) destination: Destination,
    pub(crate) filter: EventFilter,
}

impl Registration {
    /// The registration's removal id.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// The registration's filter.
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("id", &self.id)
            .field("destination", &self.destination)
            .field("filter", &self.filter)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentRegistry;

    #[test]
    fn destination_for_component() {
        let mut registry = ComponentRegistry::new();
        let key = registry.create("form");
        let dest = Destination::new(key, |_| Ok(true));
        assert_eq!(dest.component, Some(key));
    }

    #[test]
    fn detached_destination() {
        let dest = Destination::detached(|_| Ok(true));
        assert!(dest.component.is_none());
    }

    #[test]
    fn debug_formats_without_handler_body() {
        let dest = Destination::detached(|_| Ok(false));
        let text = format!("{dest:?}");
        assert!(text.contains("<fn>"));
    }
}
