//! Business event routing: events, filters, listeners, raw input, router.

pub mod business;
pub mod filter;
pub mod listener;
pub mod raw;
pub mod router;

pub use business::{keys, types, BusinessEvent};
pub use filter::{
    default_comparator, form_comparator, Comparator, ComparatorRegistry, ComponentMatch,
    EventFilter, FilterKind,
};
pub use listener::{Destination, Handler, HandlerError, ListenerId};
pub use raw::{Key, RawEvent};
pub use router::EventRouter;
