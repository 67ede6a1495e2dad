//! Raw input events, decoupled from any host toolkit.
//!
//! The host (browser bridge, terminal driver, test harness) converts its
//! native events into [`RawEvent`]s and feeds them to the router. Key-down
//! events only become business events for the significant-key allowlist.

use crate::dom::NodeId;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key, decoupled from the host toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Up,
    Down,
    PageUp,
    PageDown,
    F(u8),
}

impl Key {
    /// Whether the key participates in business-event routing.
    ///
    /// Plain typing keys stay out of the pipeline; navigation and function
    /// keys go through.
    pub fn is_significant(self) -> bool {
        matches!(
            self,
            Self::Tab
                | Self::BackTab
                | Self::Enter
                | Self::Escape
                | Self::PageUp
                | Self::PageDown
                | Self::Up
                | Self::Down
                | Self::F(1..=12)
        )
    }

    /// Stable name used as the `key` event property.
    pub fn name(self) -> String {
        match self {
            Self::Char(c) => c.to_string(),
            Self::Enter => "Enter".into(),
            Self::Escape => "Escape".into(),
            Self::Tab => "Tab".into(),
            Self::BackTab => "BackTab".into(),
            Self::Backspace => "Backspace".into(),
            Self::Delete => "Delete".into(),
            Self::Up => "ArrowUp".into(),
            Self::Down => "ArrowDown".into(),
            Self::PageUp => "PageUp".into(),
            Self::PageDown => "PageDown".into(),
            Self::F(n) => format!("F{n}"),
        }
    }
}

// ---------------------------------------------------------------------------
// RawEvent
// ---------------------------------------------------------------------------

/// A low-level interaction event with its target view node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEvent {
    /// Focus landed on the target (focus-in).
    FocusIn { target: NodeId },
    /// Pointer pressed on the target.
    PointerDown { target: NodeId },
    /// Key pressed while the target was focused.
    KeyDown { target: NodeId, key: Key },
    /// The target's value changed.
    Input { target: NodeId },
    /// Any other host event, passed through by name.
    Other { target: NodeId, name: String },
}

impl RawEvent {
    /// The event's target node.
    pub fn target(&self) -> NodeId {
        match *self {
            Self::FocusIn { target }
            | Self::PointerDown { target }
            | Self::KeyDown { target, .. }
            | Self::Input { target } => target,
            Self::Other { target, .. } => target,
        }
    }

    /// The raw event name, as carried on pass-through business events.
    pub fn name(&self) -> &str {
        match self {
            Self::FocusIn { .. } => "focusin",
            Self::PointerDown { .. } => "pointerdown",
            Self::KeyDown { .. } => "keydown",
            Self::Input { .. } => "input",
            Self::Other { name, .. } => name,
        }
    }
}
