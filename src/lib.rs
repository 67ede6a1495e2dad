//! # formwork
//!
//! A declarative forms layer for Rust: a custom-tag view transformer and a
//! business event routing engine connecting on-screen elements to
//! application components.
//!
//! Views are plain node trees. At attach time the transformer resolves
//! registered custom tags and attributes — replacing them with concrete
//! structure or consuming them into logical components. At runtime the
//! router turns raw interaction events into typed business events (focus,
//! enter, leave, input, undo), resolves the owning component by walking up
//! the node tree, and dispatches to filtered, score-ordered listeners with
//! short-circuiting.
//!
//! ## Core Systems
//!
//! - **[`dom`]** — Slotmap-backed view-node arena: splice operations,
//!   attribute queries, control value access
//! - **[`component`]** — Logical components: registry with node and handle
//!   associations, form glue
//! - **[`tag`]** — View transformer: tag library, recursive parser with
//!   loop guard, built-in `foreach` and `component` attributes
//! - **[`event`]** — Business events: filters and comparators, listener
//!   registration, the event router
//! - **[`model`]** — Field/record value-history store
//! - **[`testing`]** — Plain-text tree rendering for snapshots

// Core systems
pub mod component;
pub mod dom;
pub mod event;
pub mod model;
pub mod tag;

// Test support
pub mod testing;
