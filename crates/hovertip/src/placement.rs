//! Placement engine.
//!
//! Pure functions deciding on which side of the anchor the tooltip goes.
//! Nothing here touches the host toolkit; callers pass the anchor rect, the
//! top-level container rect and the screen list explicitly.
//!
//! ## Rules
//!
//! - A candidate is valid only if a single screen fully contains it. Two
//!   adjacent screens do not merge into one valid area.
//! - No function here fails. When nothing fits, the result degrades to the
//!   side with the most room.

use serde::{Deserialize, Serialize};

use crate::layout::{Point, Rect, Size};

/// Side of the anchor where the tooltip is drawn.
///
/// `Auto` is a request; a resolved placement is always one of the four
/// concrete sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Pick the side with the most room that fits on screen.
    #[default]
    Auto,
    /// Left of the anchor.
    Left,
    /// Right of the anchor.
    Right,
    /// Above the anchor.
    Top,
    /// Below the anchor.
    Bottom,
}

impl Placement {
    /// Concrete placements in tie-break priority order.
    pub const PRIORITY: [Self; 4] = [Self::Right, Self::Left, Self::Top, Self::Bottom];

    /// Returns true for every placement except `Auto`.
    #[must_use]
    pub const fn is_concrete(self) -> bool {
        !matches!(self, Self::Auto)
    }

    /// Returns true for `Left` and `Right`.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    const fn slot(self) -> Option<usize> {
        match self {
            Self::Auto => None,
            Self::Left => Some(0),
            Self::Right => Some(1),
            Self::Top => Some(2),
            Self::Bottom => Some(3),
        }
    }
}

/// Per-placement offsets, one slot per concrete placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Offsets {
    /// Offset used for [`Placement::Left`].
    pub left: Point,
    /// Offset used for [`Placement::Right`].
    pub right: Point,
    /// Offset used for [`Placement::Top`].
    pub top: Point,
    /// Offset used for [`Placement::Bottom`].
    pub bottom: Point,
}

impl Offsets {
    /// Same offset for all four placements.
    #[must_use]
    pub const fn uniform(offset: Point) -> Self {
        Self {
            left: offset,
            right: offset,
            top: offset,
            bottom: offset,
        }
    }

    /// Offset for a placement. `Auto` has no slot and yields zero.
    #[must_use]
    pub fn get(&self, placement: Placement) -> Point {
        placement.slot().map_or(Point::ZERO, |i| self.as_array()[i])
    }

    /// Sets the offset of one placement. Setting `Auto` does nothing.
    pub fn set(&mut self, placement: Placement, offset: Point) {
        match placement {
            Placement::Auto => {}
            Placement::Left => self.left = offset,
            Placement::Right => self.right = offset,
            Placement::Top => self.top = offset,
            Placement::Bottom => self.bottom = offset,
        }
    }

    /// Offsets in `[left, right, top, bottom]` order.
    #[must_use]
    pub const fn as_array(&self) -> [Point; 4] {
        [self.left, self.right, self.top, self.bottom]
    }
}

/// Bounding rectangle of the tooltip for one concrete placement.
///
/// Top/bottom rects are centered horizontally on the anchor and grow by
/// `triangle_size` in height; left/right rects are centered vertically and
/// grow in width. `Auto` is treated as `Right`.
#[must_use]
pub fn tooltip_rect(
    anchor: Rect,
    placement: Placement,
    content: Size,
    triangle_size: i32,
    offset: Point,
) -> Rect {
    let rect = match placement {
        Placement::Top | Placement::Bottom => {
            let width = content.width;
            let height = content.height + triangle_size;
            let x = anchor.x + (anchor.width - width).div_euclid(2);
            let y = if placement == Placement::Top {
                anchor.y - height
            } else {
                anchor.bottom()
            };
            Rect::new(x, y, width, height)
        }
        Placement::Left | Placement::Right | Placement::Auto => {
            let width = content.width + triangle_size;
            let height = content.height;
            let x = if placement == Placement::Left {
                anchor.x - width
            } else {
                anchor.right()
            };
            let y = anchor.y + (anchor.height - height).div_euclid(2);
            Rect::new(x, y, width, height)
        }
    };
    rect.translate(offset)
}

/// Returns true if one of the screens fully contains `rect`.
#[must_use]
pub fn fits_on_any_screen(rect: &Rect, screens: &[Rect]) -> bool {
    screens.iter().any(|screen| screen.contains_rect(rect))
}

/// Space around the anchor, measured to the edges of its top-level container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailableSpace {
    /// Room left of the anchor.
    pub left: i32,
    /// Room right of the anchor.
    pub right: i32,
    /// Room above the anchor.
    pub top: i32,
    /// Room below the anchor.
    pub bottom: i32,
}

impl AvailableSpace {
    /// Measures the space between `anchor` and the edges of `container`.
    #[must_use]
    pub const fn measure(anchor: Rect, container: Rect) -> Self {
        Self {
            left: anchor.x - container.x,
            right: container.right() - anchor.right(),
            top: anchor.y - container.y,
            bottom: container.bottom() - anchor.bottom(),
        }
    }

    /// Space in the direction of a placement. `Auto` yields `i32::MIN`.
    #[must_use]
    pub const fn toward(&self, placement: Placement) -> i32 {
        match placement {
            Placement::Auto => i32::MIN,
            Placement::Left => self.left,
            Placement::Right => self.right,
            Placement::Top => self.top,
            Placement::Bottom => self.bottom,
        }
    }

    /// Concrete placements ordered by space, largest first.
    ///
    /// Equal spaces keep [`Placement::PRIORITY`] order.
    #[must_use]
    pub fn ranked(&self) -> [Placement; 4] {
        let mut ranked = Placement::PRIORITY;
        // Stable sort keeps the priority order among ties.
        ranked.sort_by_key(|&p| std::cmp::Reverse(self.toward(p)));
        ranked
    }
}

/// Inputs shared by [`optimal_placement`] and [`fallback_placement`].
#[derive(Debug, Clone, Copy)]
pub struct PlacementQuery<'a> {
    /// Anchor rectangle in global coordinates.
    pub anchor: Rect,
    /// Available screens.
    pub screens: &'a [Rect],
    /// Size of the tooltip body.
    pub content: Size,
    /// Triangle depth (0 when disabled).
    pub triangle_size: i32,
    /// Per-placement offsets.
    pub offsets: &'a Offsets,
}

impl PlacementQuery<'_> {
    /// Candidate rectangle for a placement.
    #[must_use]
    pub fn rect(&self, placement: Placement) -> Rect {
        tooltip_rect(
            self.anchor,
            placement,
            self.content,
            self.triangle_size,
            self.offsets.get(placement),
        )
    }

    /// Returns true if the candidate for `placement` fits on a screen.
    #[must_use]
    pub fn fits(&self, placement: Placement) -> bool {
        fits_on_any_screen(&self.rect(placement), self.screens)
    }
}

/// Picks the placement with the most container space that fits on a screen.
///
/// Falls back to the side with the most space when nothing fits.
#[must_use]
pub fn optimal_placement(query: &PlacementQuery<'_>, container: Rect) -> Placement {
    let ranked = AvailableSpace::measure(query.anchor, container).ranked();
    ranked
        .iter()
        .copied()
        .find(|&p| query.fits(p))
        .unwrap_or(ranked[0])
}

/// Finds a replacement for a primary placement that does not fit.
///
/// Returns `None` when the primary already fits or when no fallback fits.
/// Entries equal to the primary or to `Auto` are skipped.
#[must_use]
pub fn fallback_placement(
    query: &PlacementQuery<'_>,
    primary: Placement,
    fallbacks: &[Placement],
) -> Option<Placement> {
    if query.fits(primary) {
        return None;
    }
    fallbacks
        .iter()
        .copied()
        .filter(|&p| p != primary && p.is_concrete())
        .find(|&p| query.fits(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect::new(0, 0, 1920, 1080);

    fn query<'a>(anchor: Rect, screens: &'a [Rect], offsets: &'a Offsets, content: Size) -> PlacementQuery<'a> {
        PlacementQuery {
            anchor,
            screens,
            content,
            triangle_size: 5,
            offsets,
        }
    }

    #[test]
    fn test_tooltip_rect_sides() {
        let anchor = Rect::new(100, 100, 100, 30);
        let content = Size::new(50, 20);

        assert_eq!(tooltip_rect(anchor, Placement::Left, content, 5, Point::ZERO), Rect::new(45, 105, 55, 20));
        assert_eq!(tooltip_rect(anchor, Placement::Right, content, 5, Point::ZERO), Rect::new(200, 105, 55, 20));
        assert_eq!(tooltip_rect(anchor, Placement::Top, content, 5, Point::ZERO), Rect::new(125, 75, 50, 25));
        assert_eq!(tooltip_rect(anchor, Placement::Bottom, content, 5, Point::ZERO), Rect::new(125, 130, 50, 25));
    }

    #[test]
    fn test_tooltip_rect_offset() {
        let anchor = Rect::new(100, 100, 100, 30);
        let rect = tooltip_rect(anchor, Placement::Left, Size::new(50, 20), 0, Point::new(-10, 3));
        assert_eq!(rect, Rect::new(40, 108, 50, 20));
    }

    #[test]
    fn test_straddling_screens_do_not_fit() {
        let screens = [Rect::new(0, 0, 100, 100), Rect::new(100, 0, 100, 100)];

        assert!(fits_on_any_screen(&Rect::new(10, 10, 50, 50), &screens));
        assert!(fits_on_any_screen(&Rect::new(120, 10, 50, 50), &screens));
        assert!(!fits_on_any_screen(&Rect::new(80, 10, 50, 50), &screens));
        assert!(!fits_on_any_screen(&Rect::new(10, 10, 50, 50), &[]));
    }

    #[test]
    fn test_optimal_placement_each_side() {
        let container = Rect::new(0, 0, 500, 250);
        let offsets = Offsets::default();
        let content = Size::new(100, 30);
        let screens = [SCREEN];
        let cases = [
            (Point::new(400, 100), Placement::Left),
            (Point::new(0, 100), Placement::Right),
            (Point::new(200, 215), Placement::Top),
            (Point::new(200, 5), Placement::Bottom),
        ];

        for (pos, expected) in cases {
            let anchor = Rect::from_pos_size(pos, Size::new(100, 30));
            let q = query(anchor, &screens, &offsets, content);
            assert_eq!(optimal_placement(&q, container), expected, "anchor at {pos:?}");
        }
    }

    #[test]
    fn test_optimal_placement_skips_offscreen() {
        // Most room is on the right, but the screen ends right there.
        let container = Rect::new(0, 0, 500, 250);
        let screens = [Rect::new(0, 0, 260, 1080)];
        let offsets = Offsets::default();
        let anchor = Rect::new(150, 100, 100, 30);
        let q = query(anchor, &screens, &offsets, Size::new(100, 30));

        assert_eq!(AvailableSpace::measure(anchor, container).ranked()[0], Placement::Right);
        assert_eq!(optimal_placement(&q, container), Placement::Left);
    }

    #[test]
    fn test_optimal_placement_nothing_fits() {
        let container = Rect::new(0, 0, 500, 250);
        let offsets = Offsets::default();
        let anchor = Rect::new(0, 100, 100, 30);
        let q = query(anchor, &[], &offsets, Size::new(100, 30));

        assert_eq!(optimal_placement(&q, container), Placement::Right);
    }

    #[test]
    fn test_tie_break_priority() {
        let space = AvailableSpace {
            left: 10,
            right: 10,
            top: 10,
            bottom: 10,
        };
        assert_eq!(space.ranked(), Placement::PRIORITY);

        let space = AvailableSpace {
            left: 5,
            right: 1,
            top: 5,
            bottom: 5,
        };
        assert_eq!(
            space.ranked(),
            [Placement::Left, Placement::Top, Placement::Bottom, Placement::Right]
        );
    }

    #[test]
    fn test_fallback_placement() {
        let offsets = Offsets::default();
        let screens = [SCREEN];
        let content = Size::new(50, 20);
        let all = [Placement::Top, Placement::Right, Placement::Bottom];

        let q = query(Rect::new(0, 15, 100, 30), &screens, &offsets, content);
        assert_eq!(fallback_placement(&q, Placement::Left, &all), Some(Placement::Right));
        assert_eq!(
            fallback_placement(&q, Placement::Left, &[Placement::Top, Placement::Bottom]),
            Some(Placement::Bottom)
        );

        let q = query(Rect::new(0, 50, 100, 30), &screens, &offsets, content);
        assert_eq!(fallback_placement(&q, Placement::Left, &all), Some(Placement::Top));

        let q = query(Rect::new(100, 15, 100, 30), &screens, &offsets, content);
        assert_eq!(fallback_placement(&q, Placement::Left, &all), None);
    }

    #[test]
    fn test_fallback_skips_primary_and_auto() {
        let offsets = Offsets::default();
        let screens = [SCREEN];
        let q = query(Rect::new(0, 15, 100, 30), &screens, &offsets, Size::new(50, 20));

        let list = [Placement::Auto, Placement::Left, Placement::Top];
        assert_eq!(fallback_placement(&q, Placement::Left, &list), None);
    }

    #[test]
    fn test_offsets_table() {
        let mut offsets = Offsets::default();
        offsets.set(Placement::Top, Point::new(0, -10));
        offsets.set(Placement::Auto, Point::new(99, 99));

        assert_eq!(offsets.get(Placement::Top), Point::new(0, -10));
        assert_eq!(offsets.get(Placement::Auto), Point::ZERO);
        assert_eq!(offsets.as_array().len(), 4);
    }
}
