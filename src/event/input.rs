//! Event categories and payloads delivered to element listeners.
//!
//! The platform layer produces [`Event`]s; this crate only stores handler
//! lists per [`EventKind`] and invokes them.

// ---------------------------------------------------------------------------
// EventKind
// ---------------------------------------------------------------------------

/// Event category. Each element keeps one ordered handler list per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Paint,
    Focus,
    Blur,
    Resize,
    KeyDown,
    KeyUp,
    KeyPress,
    MouseEnter,
    MouseLeave,
    MouseMove,
    MouseDown,
    MouseUp,
    Click,
    DblClick,
    ContextMenu,
    Wheel,
}

impl EventKind {
    /// Every category, in declaration order.
    pub const ALL: [EventKind; 16] = [
        EventKind::Paint,
        EventKind::Focus,
        EventKind::Blur,
        EventKind::Resize,
        EventKind::KeyDown,
        EventKind::KeyUp,
        EventKind::KeyPress,
        EventKind::MouseEnter,
        EventKind::MouseLeave,
        EventKind::MouseMove,
        EventKind::MouseDown,
        EventKind::MouseUp,
        EventKind::Click,
        EventKind::DblClick,
        EventKind::ContextMenu,
        EventKind::Wheel,
    ];

    pub fn is_key(self) -> bool {
        matches!(self, EventKind::KeyDown | EventKind::KeyUp | EventKind::KeyPress)
    }

    pub fn is_mouse(self) -> bool {
        matches!(
            self,
            EventKind::MouseEnter
                | EventKind::MouseLeave
                | EventKind::MouseMove
                | EventKind::MouseDown
                | EventKind::MouseUp
                | EventKind::Click
                | EventKind::DblClick
                | EventKind::ContextMenu
        )
    }
}

// ---------------------------------------------------------------------------
// MouseButton
// ---------------------------------------------------------------------------

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// An event with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Paint,
    Resize { width: u32, height: u32 },
    Focus,
    Blur,
    /// `kind` is one of the key categories.
    Key { kind: EventKind, text: String },
    /// `kind` is one of the mouse categories.
    Mouse {
        kind: EventKind,
        x: f64,
        y: f64,
        button: MouseButton,
    },
    Wheel { x: f64, y: f64, delta: f64 },
}

impl Event {
    /// A key event. Non-key kinds are coerced to [`EventKind::KeyPress`].
    pub fn key(kind: EventKind, text: impl Into<String>) -> Self {
        let kind = if kind.is_key() { kind } else { EventKind::KeyPress };
        Event::Key {
            kind,
            text: text.into(),
        }
    }

    /// A mouse event. Non-mouse kinds are coerced to [`EventKind::MouseMove`].
    pub fn mouse(kind: EventKind, x: f64, y: f64, button: MouseButton) -> Self {
        let kind = if kind.is_mouse() { kind } else { EventKind::MouseMove };
        Event::Mouse { kind, x, y, button }
    }

    /// The category whose handlers receive this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Paint => EventKind::Paint,
            Event::Resize { .. } => EventKind::Resize,
            Event::Focus => EventKind::Focus,
            Event::Blur => EventKind::Blur,
            Event::Key { kind, .. } | Event::Mouse { kind, .. } => *kind,
            Event::Wheel { .. } => EventKind::Wheel,
        }
    }
}
