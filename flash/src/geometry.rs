//! Geometry value types: points, sizes, rectangles, insets and transforms.
//!
//! Coordinates follow the usual screen convention: the origin is the top-left
//! corner and `y` grows downwards. All operations are pure.

use glam::Vec2;
use serde::Deserialize;

/// A point in host coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, by: Vec2) -> Self {
        Self::new(self.x + by.x, self.y + by.y)
    }
}

impl From<Vec2> for Point {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// A width/height pair
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self { width: 0.0, height: 0.0 };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Rounds both dimensions to the nearest whole unit.
    pub fn rounded(self) -> Self {
        Self::new(self.width.round(), self.height.round())
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// The edge a rectangle is divided from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectEdge {
    MinX,
    MinY,
    MaxX,
    MaxY,
}

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Self = Self { origin: Point::ZERO, size: Size::ZERO };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Builds a rectangle of `size` centered on `center`.
    pub fn from_center(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn width(&self) -> f32 { self.size.width }
    pub fn height(&self) -> f32 { self.size.height }
    pub fn min_x(&self) -> f32 { self.origin.x }
    pub fn min_y(&self) -> f32 { self.origin.y }
    pub fn max_x(&self) -> f32 { self.origin.x + self.size.width }
    pub fn max_y(&self) -> f32 { self.origin.y + self.size.height }
    pub fn mid_x(&self) -> f32 { self.origin.x + self.size.width / 2.0 }
    pub fn mid_y(&self) -> f32 { self.origin.y + self.size.height / 2.0 }

    pub fn center(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    /// Half-open containment: the max edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x() && point.x < self.max_x() &&
        point.y >= self.min_y() && point.y < self.max_y()
    }

    pub fn offset(&self, by: Vec2) -> Self {
        Self::from_origin_size(self.origin.offset(by), self.size)
    }

    /// Shrinks the rectangle by four independent margins.
    ///
    /// The size never goes negative: a margin larger than the available extent
    /// collapses that dimension to zero instead of inverting the rectangle.
    pub fn inset_by(&self, insets: EdgeInsets) -> Self {
        Self::new(
            self.origin.x + insets.left,
            self.origin.y + insets.top,
            (self.size.width - insets.left - insets.right).max(0.0),
            (self.size.height - insets.top - insets.bottom).max(0.0),
        )
    }

    /// Splits the rectangle into a slice of `distance` measured from `edge`
    /// and the remainder. Returns `(slice, remainder)`.
    ///
    /// `distance` is clamped to the extent along the split axis, so neither
    /// part ends up with a negative dimension.
    pub fn divided(&self, distance: f32, edge: RectEdge) -> (Rect, Rect) {
        let Rect { origin, size } = *self;
        match edge {
            RectEdge::MinX => {
                let d = distance.clamp(0.0, size.width.max(0.0));
                (
                    Rect::new(origin.x, origin.y, d, size.height),
                    Rect::new(origin.x + d, origin.y, size.width - d, size.height),
                )
            }
            RectEdge::MaxX => {
                let d = distance.clamp(0.0, size.width.max(0.0));
                (
                    Rect::new(self.max_x() - d, origin.y, d, size.height),
                    Rect::new(origin.x, origin.y, size.width - d, size.height),
                )
            }
            RectEdge::MinY => {
                let d = distance.clamp(0.0, size.height.max(0.0));
                (
                    Rect::new(origin.x, origin.y, size.width, d),
                    Rect::new(origin.x, origin.y + d, size.width, size.height - d),
                )
            }
            RectEdge::MaxY => {
                let d = distance.clamp(0.0, size.height.max(0.0));
                (
                    Rect::new(origin.x, self.max_y() - d, size.width, d),
                    Rect::new(origin.x, origin.y, size.width, size.height - d),
                )
            }
        }
    }
}

/// Four-sided margins
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EdgeInsets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl EdgeInsets {
    pub const ZERO: Self = Self { top: 0.0, left: 0.0, bottom: 0.0, right: 0.0 };

    pub const fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self { top, left, bottom, right }
    }

    pub const fn all(v: f32) -> Self {
        Self { top: v, left: v, bottom: v, right: v }
    }

    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self { top: vertical, left: horizontal, bottom: vertical, right: horizontal }
    }
}

impl std::ops::Add for EdgeInsets {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.top + rhs.top,
            self.left + rhs.left,
            self.bottom + rhs.bottom,
            self.right + rhs.right,
        )
    }
}

impl From<f32> for EdgeInsets {
    fn from(v: f32) -> Self {
        Self::all(v)
    }
}

impl From<(f32, f32)> for EdgeInsets {
    fn from((h, v): (f32, f32)) -> Self {
        Self::symmetric(h, v)
    }
}

/// A 2D placement made of a translation and a uniform scale.
///
/// The scale is applied about the center of whatever the transform is applied
/// to, then the translation is added, matching how a view's transform is
/// anchored at its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec2,
    pub scale: f32,
}

impl Transform {
    pub const IDENTITY: Self = Self { translation: Vec2::ZERO, scale: 1.0 };

    pub fn translation(x: f32, y: f32) -> Self {
        Self { translation: Vec2::new(x, y), scale: 1.0 }
    }

    pub fn scale(scale: f32) -> Self {
        Self { translation: Vec2::ZERO, scale }
    }

    /// Appends a translation expressed in this transform's local space.
    pub fn translated_by(self, x: f32, y: f32) -> Self {
        Self {
            translation: self.translation + Vec2::new(x, y) * self.scale,
            scale: self.scale,
        }
    }

    pub fn scaled_by(self, factor: f32) -> Self {
        Self { translation: self.translation, scale: self.scale * factor }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Maps a rectangle through the transform, scaling about its center.
    pub fn apply_to_rect(&self, rect: Rect) -> Rect {
        let size = Size::new(rect.width() * self.scale, rect.height() * self.scale);
        Rect::from_center(rect.center().offset(self.translation), size)
    }

    /// Maps a point that lives inside `frame` the same way `apply_to_rect`
    /// maps the frame itself.
    pub fn apply_to_point(&self, point: Point, frame: Rect) -> Point {
        let center: Vec2 = frame.center().into();
        let p: Vec2 = point.into();
        Point::from(center + (p - center) * self.scale + self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
