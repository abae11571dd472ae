//! Layout system for tooltip positioning.
//!
//! All geometry is integer pixels in global coordinates unless a type says
//! otherwise. Right and bottom edges are exclusive.

use serde::{Deserialize, Serialize};

use crate::placement::Placement;

/// A 2D integer point or vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Point {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Creates a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise sum.
    #[must_use]
    pub const fn offset(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

/// A 2D integer size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl Size {
    /// An empty size.
    pub const ZERO: Self = Self { width: 0, height: 0 };

    /// Creates a new size.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Grows the size by the horizontal and vertical margin sums.
    #[must_use]
    pub const fn grow(self, margins: Margins) -> Self {
        Self::new(
            self.width + margins.left + margins.right,
            self.height + margins.top + margins.bottom,
        )
    }
}

/// Per-side spacing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    /// Left margin.
    pub left: i32,
    /// Top margin.
    pub top: i32,
    /// Right margin.
    pub right: i32,
    /// Bottom margin.
    pub bottom: i32,
}

impl Margins {
    /// Creates new margins.
    #[must_use]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Equal margins on all sides.
    #[must_use]
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Sum of left and right.
    #[must_use]
    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[must_use]
    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

/// A rectangle in integer pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// X position (left edge).
    pub x: i32,
    /// Y position (top edge).
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle from position and size.
    #[must_use]
    pub const fn from_pos_size(pos: Point, size: Size) -> Self {
        Self::new(pos.x, pos.y, size.width, size.height)
    }

    /// Top-left corner.
    #[must_use]
    pub const fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the right edge (exclusive).
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Returns the bottom edge (exclusive).
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Returns true if the point is inside the rectangle.
    #[must_use]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Returns true if `other` lies completely inside this rectangle.
    #[must_use]
    pub const fn contains_rect(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Moves the rectangle by a vector.
    #[must_use]
    pub const fn translate(&self, delta: Point) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// Expands the rectangle by the given amount on all sides.
    #[must_use]
    pub const fn expand(&self, amount: i32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2,
            self.height + amount * 2,
        )
    }

    /// Shrinks the rectangle by the given amount on all sides.
    #[must_use]
    pub const fn shrink(&self, amount: i32) -> Self {
        self.expand(-amount)
    }
}

/// Overlay-local rectangles produced by the layout pass.
///
/// `body` and `triangle` are relative to the overlay's top-left corner;
/// `global` is the overlay window itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayFrame {
    /// Overlay window in global coordinates, shadow padding included.
    pub global: Rect,
    /// Body (background bubble) in overlay coordinates.
    pub body: Rect,
    /// Pointer triangle in overlay coordinates, `None` when disabled.
    pub triangle: Option<Rect>,
    /// Placement the frame was built for.
    pub placement: Placement,
}

/// Inputs of [`OverlayFrame::compute`].
#[derive(Debug, Clone, Copy)]
pub struct FrameSpec {
    /// Anchor rectangle in global coordinates.
    pub anchor: Rect,
    /// Resolved concrete placement.
    pub placement: Placement,
    /// Body size (content + margins + border).
    pub body: Size,
    /// Triangle depth, 0 when the triangle is disabled.
    pub triangle_size: i32,
    /// Border width overlapped by the triangle base.
    pub border_width: i32,
    /// Shadow padding on every side, 0 when the shadow is disabled.
    pub shadow: i32,
    /// Offset for the resolved placement.
    pub offset: Point,
}

impl OverlayFrame {
    /// Builds the overlay geometry for one resolved placement.
    #[must_use]
    pub fn compute(spec: &FrameSpec) -> Self {
        let FrameSpec {
            anchor,
            placement,
            body,
            triangle_size: t,
            border_width: bw,
            shadow: s,
            offset,
        } = *spec;

        // Content = body extended by the triangle on the facing side.
        let content = crate::placement::tooltip_rect(anchor, placement, body, t, offset);

        let (body_pos, triangle) = match placement {
            Placement::Top => {
                let tri = Rect::new(s + (body.width - 2 * t) / 2, s + body.height - bw, 2 * t, t + bw);
                (Point::new(s, s), tri)
            }
            Placement::Bottom => {
                let tri = Rect::new(s + (body.width - 2 * t) / 2, s, 2 * t, t + bw);
                (Point::new(s, s + t), tri)
            }
            Placement::Left => {
                let tri = Rect::new(s + body.width - bw, s + (body.height - 2 * t) / 2, t + bw, 2 * t);
                (Point::new(s, s), tri)
            }
            Placement::Right | Placement::Auto => {
                let tri = Rect::new(s, s + (body.height - 2 * t) / 2, t + bw, 2 * t);
                (Point::new(s + t, s), tri)
            }
        };

        Self {
            global: content.expand(s),
            body: Rect::from_pos_size(body_pos, body),
            triangle: (t > 0).then_some(triangle),
            placement,
        }
    }

    /// Body rectangle in global coordinates.
    #[must_use]
    pub fn global_body(&self) -> Rect {
        self.body.translate(self.global.pos())
    }

    /// Triangle rectangle in global coordinates.
    #[must_use]
    pub fn global_triangle(&self) -> Option<Rect> {
        self.triangle.map(|t| t.translate(self.global.pos()))
    }
}
