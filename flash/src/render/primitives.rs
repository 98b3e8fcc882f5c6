//! Render primitives

use crate::geometry::{Point, Rect};
use crate::style::Color;

/// A drawable primitive, in host coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Filled rounded rectangle
    Rect {
        frame: Rect,
        color: Color,
        corner_radius: f32,
    },
    /// One line of text; `origin` is the top-left of the line box
    Text {
        origin: Point,
        text: String,
        size: f32,
        color: Color,
    },
    /// Icon drawn aspect-fit into `frame`; template icons use `tint`
    Image {
        frame: Rect,
        tint: Option<Color>,
        opacity: f32,
    },
}

/// Render command list
#[derive(Debug, Default)]
pub struct RenderList {
    pub primitives: Vec<Primitive>,
}

impl RenderList {
    pub fn new() -> Self {
        Self { primitives: Vec::new() }
    }

    pub fn rect(&mut self, frame: Rect, color: Color, corner_radius: f32) {
        self.primitives.push(Primitive::Rect { frame, color, corner_radius });
    }

    pub fn text(&mut self, origin: Point, text: String, size: f32, color: Color) {
        self.primitives.push(Primitive::Text { origin, text, size, color });
    }

    pub fn image(&mut self, frame: Rect, tint: Option<Color>, opacity: f32) {
        self.primitives.push(Primitive::Image { frame, tint, opacity });
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}
