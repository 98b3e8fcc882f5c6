//! Host events a flash reacts to

use crate::style::ContentSizeCategory;

/// Input and environment events, in host coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // Mouse events
    MouseDown { x: f32, y: f32, button: MouseButton },
    MouseUp { x: f32, y: f32, button: MouseButton },
    MouseMove { x: f32, y: f32 },

    // Touch events
    TouchStart { id: u64, x: f32, y: f32 },
    TouchMove { id: u64, x: f32, y: f32 },
    TouchEnd { id: u64 },
    TouchCancel { id: u64 },

    // Environment events
    Resize { width: f32, height: f32 },
    ContentSizeChanged(ContentSizeCategory),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}
